//! Depth/interval classification and property-group placement of curves.

use std::collections::BTreeMap;

use log::{debug, warn};

use crate::error::{Error, Result};
use crate::matching::{get_depths, DEPTH_ALIASES};
use crate::models::{LasCurve, LasFile, REFERENCE_DESCR};
use crate::workspace::{Data, DataValues, Drillhole, SamplingAxis};

/// Name of the curve holding interval ends.
pub const TO_CURVE: &str = "TO";

/// Sampling of every data curve in `las`: intervals when a `TO` curve is
/// present, depths otherwise.
pub fn sampling_axis(las: &LasFile) -> Result<SamplingAxis> {
    let depths = get_depths(las)?.to_vec();
    Ok(match las.curve(TO_CURVE) {
        Some(to) => SamplingAxis::Interval {
            from: depths,
            to: to.data.clone(),
        },
        None => SamplingAxis::Depth { depths },
    })
}

/// True for the index and interval-end curves, which are never data.
pub fn is_axis_curve(mnemonic: &str) -> bool {
    mnemonic == TO_CURVE || DEPTH_ALIASES.contains(&mnemonic)
}

/// Mnemonic of a parameter item holding the label of `key` for `curve`.
pub fn reference_mnemonic(curve: &str, key: i64) -> String {
    format!("{} ({})", curve, key)
}

/// Value-to-label map of `curve` recovered from `REFERENCE` parameters.
///
/// `None` when the file declares no labels for the curve.
pub fn value_map(las: &LasFile, curve: &str) -> Option<BTreeMap<i64, String>> {
    let map: BTreeMap<i64, String> = las
        .params
        .iter()
        .filter(|item| item.descr == REFERENCE_DESCR)
        .filter_map(|item| {
            let (name, key) = item.mnemonic.strip_suffix(')')?.rsplit_once(" (")?;
            if name != curve {
                return None;
            }
            Some((key.trim().parse::<i64>().ok()?, item.value.clone()))
        })
        .collect();

    (!map.is_empty()).then_some(map)
}

/// Key of categorical samples that hold no value.
pub const NO_DATA_KEY: i64 = 0;

/// Builds a data entity from a curve, preserving any categorical labels.
///
/// Null samples of a categorical curve take [`NO_DATA_KEY`].
pub fn curve_to_data(las: &LasFile, curve: &LasCurve) -> Data {
    let values = match value_map(las, &curve.mnemonic) {
        Some(value_map) => {
            let nulls = curve.data.iter().filter(|v| v.is_nan()).count();
            if nulls > 0 {
                debug!(
                    "'{}': {} null sample(s) stored as key {}",
                    curve.mnemonic, nulls, NO_DATA_KEY
                );
            }
            DataValues::Referenced {
                values: curve
                    .data
                    .iter()
                    .map(|v| if v.is_nan() { NO_DATA_KEY } else { v.round() as i64 })
                    .collect(),
                value_map,
            }
        }
        None => DataValues::Float {
            values: curve.data.clone(),
        },
    };
    Data::new(curve.mnemonic.clone(), values).with_units(Some(curve.unit.clone()))
}

/// Names of curves added and skipped by [`add_curves`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddReport {
    pub added: Vec<String>,
    pub skipped: Vec<String>,
}

/// Adds every data curve of `las` to `drillhole`.
///
/// Curves whose name already exists on the drillhole are skipped with a
/// warning, as are curves that do not fit the requested property group.
pub fn add_curves(
    drillhole: &mut Drillhole,
    las: &LasFile,
    property_group: Option<&str>,
) -> Result<AddReport> {
    let axis = sampling_axis(las)?;
    let mut report = AddReport::default();

    for curve in las.curves.iter().filter(|c| !is_axis_curve(&c.mnemonic)) {
        let name = curve.mnemonic.clone();
        if drillhole.get_data(&name).is_some() {
            warn!(
                "Drillhole '{}' already contains '{}' data; skipping",
                drillhole.name, name
            );
            report.skipped.push(name);
            continue;
        }

        let data = curve_to_data(las, curve);
        match drillhole.add_data(data, axis.clone(), property_group) {
            Ok(group) => {
                debug!("'{}' -> {}/{}", name, drillhole.name, group);
                report.added.push(name);
            }
            Err(err @ (Error::AxisMismatch { .. } | Error::LengthMismatch { .. })) => {
                warn!("Skipping '{}' on drillhole '{}': {}", name, drillhole.name, err);
                report.skipped.push(name);
            }
            Err(err) => return Err(err),
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::HeaderItem;

    #[test]
    fn test_value_map_matches_exact_curve() {
        let mut las = LasFile::new();
        las.params.push(HeaderItem::new("rock (1)", "granite").with_descr(REFERENCE_DESCR));
        las.params.push(HeaderItem::new("rock (2)", "basalt").with_descr(REFERENCE_DESCR));
        las.params.push(HeaderItem::new("rocks (1)", "other").with_descr(REFERENCE_DESCR));
        las.params.push(HeaderItem::new("rock (3)", "not a label"));

        let map = value_map(&las, "rock").unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map[&1], "granite");
        assert_eq!(map[&2], "basalt");
        assert!(value_map(&las, "gamma").is_none());
    }

    #[test]
    fn test_null_categorical_samples_take_no_data_key() {
        let mut las = LasFile::new();
        las.params.push(HeaderItem::new("rock (1)", "granite").with_descr(REFERENCE_DESCR));
        let curve = LasCurve::new("rock", vec![1.0, f64::NAN, 1.0]);

        match curve_to_data(&las, &curve).values {
            DataValues::Referenced { values, .. } => assert_eq!(values, vec![1, NO_DATA_KEY, 1]),
            other => panic!("expected referenced data, got {:?}", other),
        }
    }

    #[test]
    fn test_axis_curves() {
        assert!(is_axis_curve("DEPTH"));
        assert!(is_axis_curve("DEPT"));
        assert!(is_axis_curve("TO"));
        assert!(!is_axis_curve("GR"));
    }
}
