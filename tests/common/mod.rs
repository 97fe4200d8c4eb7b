/// Test utilities for building LAS text and drillhole fixtures
use las_drillhole::{
    Collar, Data, DataValues, Drillhole, DrillholeGroup, SamplingAxis, SurveyStation,
};
use std::collections::BTreeMap;

/// Builder for LAS 2.0 test files
pub struct LasBuilder {
    well: Vec<(String, String)>,
    curves: Vec<(String, String)>,
    params: Vec<(String, String, String)>,
    rows: Vec<Vec<String>>,
    wrap: bool,
}

impl LasBuilder {
    pub fn new() -> Self {
        Self {
            well: Vec::new(),
            curves: Vec::new(),
            params: Vec::new(),
            rows: Vec::new(),
            wrap: false,
        }
    }

    /// Add a `~Well` item
    pub fn well(mut self, mnemonic: &str, value: &str) -> Self {
        self.well.push((mnemonic.to_string(), value.to_string()));
        self
    }

    /// Add a `~Curve` item
    pub fn curve(mut self, mnemonic: &str, unit: &str) -> Self {
        self.curves.push((mnemonic.to_string(), unit.to_string()));
        self
    }

    /// Add a `~Parameter` item
    pub fn param(mut self, mnemonic: &str, value: &str, descr: &str) -> Self {
        self.params
            .push((mnemonic.to_string(), value.to_string(), descr.to_string()));
        self
    }

    /// Add a data row
    pub fn row(mut self, values: &[f64]) -> Self {
        self.rows.push(values.iter().map(|v| v.to_string()).collect());
        self
    }

    /// Add a raw data row, tokens written as given
    pub fn raw_row(mut self, tokens: &[&str]) -> Self {
        self.rows.push(tokens.iter().map(|t| t.to_string()).collect());
        self
    }

    /// Write each value of a row on its own line
    pub fn wrapped(mut self) -> Self {
        self.wrap = true;
        self
    }

    pub fn build(self) -> String {
        let mut out = String::new();
        out.push_str("# generated for tests\n");
        out.push_str("~Version Information\n");
        out.push_str(" VERS.   2.0 : CWLS LOG ASCII STANDARD - VERSION 2.0\n");
        out.push_str(&format!(
            " WRAP.   {} : wrap mode\n",
            if self.wrap { "YES" } else { "NO" }
        ));
        out.push_str("~Well Information\n");
        out.push_str(" NULL.   -999.25 : NULL VALUE\n");
        for (mnemonic, value) in &self.well {
            out.push_str(&format!(" {}.   {} : \n", mnemonic, value));
        }
        out.push_str("~Curve Information\n");
        for (mnemonic, unit) in &self.curves {
            out.push_str(&format!(" {}.{}   : {}\n", mnemonic, unit, mnemonic));
        }
        if !self.params.is_empty() {
            out.push_str("~Parameter Information\n");
            for (mnemonic, value, descr) in &self.params {
                out.push_str(&format!(" {}.   {} : {}\n", mnemonic, value, descr));
            }
        }
        out.push_str("~A\n");
        for row in &self.rows {
            if self.wrap {
                for token in row {
                    out.push_str(&format!(" {}\n", token));
                }
            } else {
                out.push_str(&format!(" {}\n", row.join("  ")));
            }
        }
        out
    }
}

/// Deterministic pseudo-random values in [-1, 1)
pub fn noise(seed: u64, n: usize) -> Vec<f64> {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    (0..n)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            ((state >> 11) as f64 / (1u64 << 53) as f64) * 2.0 - 1.0
        })
        .collect()
}

pub fn arange(start: f64, n: usize) -> Vec<f64> {
    (0..n).map(|i| start + i as f64).collect()
}

pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| start + (stop - start) * i as f64 / (n - 1) as f64)
        .collect()
}

pub fn surveys(n: usize) -> Vec<SurveyStation> {
    linspace(0.0, 100.0, n)
        .into_iter()
        .zip(linspace(-89.0, -75.0, n))
        .map(|(depth, dip)| SurveyStation::new(depth, dip, 45.0))
        .collect()
}

/// Sorted, non-overlapping intervals
pub fn intervals(seed: u64, n: usize) -> (Vec<f64>, Vec<f64>) {
    let mut bounds: Vec<f64> = noise(seed, 2 * n)
        .into_iter()
        .map(|v| 50.0 + 49.9 * v)
        .collect();
    bounds.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let from = bounds.iter().step_by(2).copied().collect();
    let to = bounds.iter().skip(1).step_by(2).copied().collect();
    (from, to)
}

pub fn float_data(name: &str, values: Vec<f64>) -> Data {
    Data::new(name, DataValues::Float { values })
}

/// Group with one drillhole holding interval and two depth samplings, and a
/// second holding float and categorical interval data.
pub fn sample_group() -> DrillholeGroup {
    let mut group = DrillholeGroup::new("dh_group");

    let mut well_a = Drillhole::new("dh1")
        .with_collar(Collar::new(0.0, 10.0, 10.0))
        .with_surveys(surveys(10));
    let (from, to) = intervals(1, 25);
    well_a
        .add_data(
            float_data("interval_values", noise(2, 25)),
            SamplingAxis::Interval { from, to },
            None,
        )
        .unwrap();
    well_a
        .add_data(
            float_data("depth_values", noise(3, 50)),
            SamplingAxis::Depth { depths: arange(0.0, 50) },
            None,
        )
        .unwrap();
    well_a
        .add_data(
            float_data("collocated_depth_values", noise(4, 50)),
            SamplingAxis::Depth { depths: arange(0.01, 50) },
            None,
        )
        .unwrap();
    group.add_drillhole(well_a);

    let mut well_b = Drillhole::new("dh2")
        .with_collar(Collar::new(10.0, 10.0, 10.0))
        .with_surveys(surveys(10));
    let (from, to) = intervals(5, 25);
    let axis = SamplingAxis::Interval { from, to };
    well_b
        .add_data(float_data("interval_values", noise(6, 25)), axis.clone(), None)
        .unwrap();
    let labels = ["granite", "basalt", "gneiss", "schist", "shale"];
    let value_map: BTreeMap<i64, String> = (1..=labels.len() as i64)
        .zip(labels.iter().map(|l| l.to_string()))
        .collect();
    let values: Vec<i64> = (0..25).map(|i| (i % 5) + 1).collect();
    well_b
        .add_data(
            Data::new("interval_referenced", DataValues::Referenced { values, value_map }),
            axis,
            None,
        )
        .unwrap();
    group.add_drillhole(well_b);

    group
}

pub fn assert_close(a: &[f64], b: &[f64], tolerance: f64) {
    assert_eq!(a.len(), b.len(), "length mismatch");
    for (x, y) in a.iter().zip(b) {
        assert!(
            (x - y).abs() <= tolerance || (x.is_nan() && y.is_nan()),
            "{} != {}",
            x,
            y
        );
    }
}
