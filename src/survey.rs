//! Drillhole surveys from LAS or delimited-text files.

use std::path::Path;

use log::debug;

use crate::error::{Error, Result};
use crate::matching::get_depths;
use crate::models::LasFile;
use crate::reader::read_las;
use crate::workspace::{Drillhole, SurveyStation};

pub const DIP_CURVE: &str = "DIP";
pub const AZIMUTH_CURVE: &str = "AZIM";

/// Suffix of survey file stems, `<drillhole>_survey.<ext>`.
pub const SURVEY_SUFFIX: &str = "_survey";

pub fn is_survey_file(path: &Path) -> bool {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.ends_with(SURVEY_SUFFIX))
        .unwrap_or(false)
}

/// Reads survey stations from `path`, dispatching on the extension.
///
/// `.las` files need a depth curve plus `DIP` and `AZIM`; anything else is
/// read as comma-delimited depth, dip, azimuth rows.
pub fn read_survey(path: &Path) -> Result<Vec<SurveyStation>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "las" => survey_from_las(&read_las(path)?, path),
        _ => survey_from_csv(path),
    }
}

pub fn survey_from_las(las: &LasFile, path: &Path) -> Result<Vec<SurveyStation>> {
    let depths = get_depths(las)?;
    let column = |name: &str| {
        las.curve(name)
            .map(|c| c.data.as_slice())
            .ok_or_else(|| Error::MissingCurve {
                curve: name.to_string(),
                context: path.display().to_string(),
            })
    };
    let dips = column(DIP_CURVE)?;
    let azimuths = column(AZIMUTH_CURVE)?;

    Ok(depths
        .iter()
        .zip(dips)
        .zip(azimuths)
        .map(|((depth, dip), azimuth)| SurveyStation::new(*depth, *dip, *azimuth))
        .collect())
}

pub fn survey_from_csv(path: &Path) -> Result<Vec<SurveyStation>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)?;

    let invalid = |row: usize, message: String| Error::Survey {
        path: path.to_path_buf(),
        message: format!("row {}: {}", row, message),
    };

    let mut stations = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record?;
        let row = idx + 1;

        let fields: Vec<&str> = record.iter().collect();
        // A leading row with a non-numeric first field is a header
        if idx == 0 && fields.first().map(|f| f.parse::<f64>().is_err()).unwrap_or(false) {
            continue;
        }
        if fields.len() != 3 {
            return Err(invalid(
                row,
                format!("expected 3 columns (depth, dip, azimuth), found {}", fields.len()),
            ));
        }

        let mut values = [0.0; 3];
        for (slot, field) in values.iter_mut().zip(&fields) {
            *slot = field
                .parse()
                .map_err(|_| invalid(row, format!("invalid number '{}'", field)))?;
        }
        stations.push(SurveyStation::new(values[0], values[1], values[2]));
    }

    if stations.is_empty() {
        return Err(Error::Survey {
            path: path.to_path_buf(),
            message: "no survey rows".to_string(),
        });
    }
    Ok(stations)
}

/// Replaces the survey of `drillhole` with the stations in `path`.
pub fn add_survey(path: &Path, drillhole: &mut Drillhole) -> Result<()> {
    let stations = read_survey(path)?;
    debug!(
        "Loaded {} survey station(s) for '{}' from {}",
        stations.len(),
        drillhole.name,
        path.display()
    );
    drillhole.surveys = stations;
    Ok(())
}
