//! High-level API for writing LAS files.

use crate::error::Result;
use crate::models::{HeaderItem, LasFile, DEFAULT_NULL};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Writer producing LAS 2.0 text, one line per depth step.
///
/// Numbers are written in their shortest round-trip form so that reading the
/// output back yields the same `f64` values. `NaN` samples are written as the
/// null value.
///
/// # Examples
///
/// ```no_run
/// use las_drillhole::{LasFile, LasCurve, LasWriter};
///
/// let mut las = LasFile::new();
/// las.append_curve(LasCurve::new("DEPTH", vec![0.0, 1.0]).with_unit("m"));
/// LasWriter::new().write_to_path("dh1.las", &las)?;
/// # Ok::<(), las_drillhole::Error>(())
/// ```
pub struct LasWriter {
    null_value: f64,
    column_width: usize,
}

impl LasWriter {
    pub fn new() -> Self {
        Self {
            null_value: DEFAULT_NULL,
            column_width: 12,
        }
    }

    /// Value written for `NaN` samples. Default is `-999.25`.
    pub fn null_value(mut self, value: f64) -> Self {
        self.null_value = value;
        self
    }

    /// Minimum width of each data column.
    pub fn column_width(mut self, width: usize) -> Self {
        self.column_width = width;
        self
    }

    pub fn write_to_path<P: AsRef<Path>>(&self, path: P, las: &LasFile) -> Result<()> {
        fs::write(path, self.write_to_string(las))?;
        Ok(())
    }

    pub fn write_to_string(&self, las: &LasFile) -> String {
        let mut out = String::new();

        out.push_str("~Version Information\n");
        let version = if las.version.is_empty() {
            vec![
                HeaderItem::new("VERS", "2.0").with_descr("CWLS LOG ASCII STANDARD - VERSION 2.0"),
                HeaderItem::new("WRAP", "NO").with_descr("ONE LINE PER DEPTH STEP"),
            ]
        } else {
            las.version
                .iter()
                .map(|item| match item.mnemonic.as_str() {
                    "WRAP" => HeaderItem::new("WRAP", "NO").with_descr("ONE LINE PER DEPTH STEP"),
                    _ => item.clone(),
                })
                .collect()
        };
        write_items(&mut out, &version);

        out.push_str("~Well Information\n");
        write_items(&mut out, &self.well_items(las));

        out.push_str("~Curve Information\n");
        let curve_items: Vec<HeaderItem> = las
            .curves
            .iter()
            .map(|c| {
                HeaderItem::new(c.mnemonic.clone(), "")
                    .with_unit(c.unit.clone())
                    .with_descr(c.descr.clone())
            })
            .collect();
        write_items(&mut out, &curve_items);

        if !las.params.is_empty() {
            out.push_str("~Params\n");
            write_items(&mut out, &las.params);
        }

        if !las.other.is_empty() {
            out.push_str("~Other\n");
            out.push_str(&las.other);
            out.push('\n');
        }

        out.push_str("~ASCII\n");
        for row in 0..las.len() {
            let line: Vec<String> = las
                .curves
                .iter()
                .map(|c| {
                    let value = c.data.get(row).copied().unwrap_or(f64::NAN);
                    format!("{:>width$}", self.format_value(value), width = self.column_width)
                })
                .collect();
            let _ = writeln!(out, "{}", line.join(" "));
        }

        out
    }

    /// STRT/STOP/STEP/NULL derived from the index curve, followed by the
    /// remaining well items in their original order.
    fn well_items(&self, las: &LasFile) -> Vec<HeaderItem> {
        let index = las.curves.first();
        let unit = index.map(|c| c.unit.clone()).unwrap_or_default();
        let samples: &[f64] = index.map(|c| c.data.as_slice()).unwrap_or(&[]);

        let start = samples.first().copied().unwrap_or(f64::NAN);
        let stop = samples.last().copied().unwrap_or(f64::NAN);
        let step = regular_step(samples).unwrap_or(0.0);

        let mut items = vec![
            HeaderItem::new("STRT", self.format_value(start))
                .with_unit(unit.clone())
                .with_descr("START DEPTH"),
            HeaderItem::new("STOP", self.format_value(stop))
                .with_unit(unit.clone())
                .with_descr("STOP DEPTH"),
            HeaderItem::new("STEP", format_number(step))
                .with_unit(unit)
                .with_descr("STEP"),
            HeaderItem::new("NULL", format_number(self.null_value)).with_descr("NULL VALUE"),
        ];

        items.extend(
            las.well
                .iter()
                .filter(|item| !matches!(item.mnemonic.as_str(), "STRT" | "STOP" | "STEP" | "NULL"))
                .cloned(),
        );
        items
    }

    fn format_value(&self, value: f64) -> String {
        if value.is_nan() {
            format_number(self.null_value)
        } else {
            format_number(value)
        }
    }
}

impl Default for LasWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn write_items(out: &mut String, items: &[HeaderItem]) {
    for item in items {
        let head = format!("{}.{}", item.mnemonic, item.unit);
        let _ = writeln!(out, " {:<16} {:>16} : {}", head, item.value, item.descr);
    }
}

/// Constant spacing of the samples, `None` when irregular or too short.
fn regular_step(samples: &[f64]) -> Option<f64> {
    if samples.len() < 2 {
        return None;
    }
    let step = samples[1] - samples[0];
    let regular = samples
        .windows(2)
        .all(|w| ((w[1] - w[0]) - step).abs() <= 1e-9 * step.abs().max(1.0));
    regular.then_some(step)
}

pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}
