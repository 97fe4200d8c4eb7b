//! Drillhole group → LAS files.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::error::{Error, Result};
use crate::models::{HeaderItem, LasCurve, LasFile, REFERENCE_DESCR};
use crate::reconcile::{is_axis_curve, reference_mnemonic, TO_CURVE};
use crate::survey::{AZIMUTH_CURVE, DIP_CURVE, SURVEY_SUFFIX};
use crate::workspace::{Drillhole, DrillholeGroup, PropertyGroup, SamplingAxis};
use crate::writer::{format_number, LasWriter};

const DEPTH_CURVE: &str = "DEPTH";
const DEPTH_UNIT: &str = "m";

/// Well section describing `drillhole`.
pub fn add_well_data(las: &mut LasFile, drillhole: &Drillhole) {
    las.set_well(HeaderItem::new("WELL", drillhole.name.clone()).with_descr("WELL"));
    las.set_well(
        HeaderItem::new("X", format_number(drillhole.collar.x))
            .with_unit(DEPTH_UNIT)
            .with_descr("X LOCATION"),
    );
    las.set_well(
        HeaderItem::new("Y", format_number(drillhole.collar.y))
            .with_unit(DEPTH_UNIT)
            .with_descr("Y LOCATION"),
    );
    las.set_well(
        HeaderItem::new("ELEV", format_number(drillhole.collar.z))
            .with_unit(DEPTH_UNIT)
            .with_descr("COLLAR ELEVATION"),
    );
    if let Some(uwi) = &drillhole.well_id {
        las.set_well(HeaderItem::new("UWI", uwi.clone()).with_descr("UNIQUE WELL ID"));
    }
}

/// Axis curves plus one curve per member of `group`.
///
/// Categorical members also write their labels as `REFERENCE` parameters.
pub fn add_curve_data(las: &mut LasFile, drillhole: &Drillhole, group: &PropertyGroup) {
    match &group.axis {
        SamplingAxis::Depth { depths } => {
            las.append_curve(
                LasCurve::new(DEPTH_CURVE, depths.clone())
                    .with_unit(DEPTH_UNIT)
                    .with_descr("DEPTH"),
            );
        }
        SamplingAxis::Interval { from, to } => {
            las.append_curve(
                LasCurve::new(DEPTH_CURVE, from.clone())
                    .with_unit(DEPTH_UNIT)
                    .with_descr("FROM"),
            );
            las.append_curve(
                LasCurve::new(TO_CURVE, to.clone())
                    .with_unit(DEPTH_UNIT)
                    .with_descr("TO"),
            );
        }
    }

    for data in drillhole.group_data(group) {
        let mnemonic = curve_mnemonic(las, &data.name);
        if let Some(value_map) = data.values.value_map() {
            for (key, label) in value_map {
                las.params.push(
                    HeaderItem::new(reference_mnemonic(&mnemonic, *key), label.clone())
                        .with_descr(REFERENCE_DESCR),
                );
            }
        }
        las.append_curve(
            LasCurve::new(mnemonic, data.values.to_f64())
                .with_unit(data.units.clone().unwrap_or_default()),
        );
    }
}

/// LAS mnemonic under which the data `name` is written.
///
/// A period ends a mnemonic and a leading `~` or `#` opens a section or a
/// comment, so those become `_`. Names of the axis curves, or of a curve
/// already in `las`, take the first free `_<n>` suffix.
pub fn curve_mnemonic(las: &LasFile, name: &str) -> String {
    let base: String = name
        .trim()
        .chars()
        .enumerate()
        .map(|(i, c)| match c {
            '.' => '_',
            '~' | '#' if i == 0 => '_',
            c => c,
        })
        .collect();

    let taken = |mnemonic: &str| is_axis_curve(mnemonic) || las.has_curve(mnemonic);
    let mnemonic = if taken(base.as_str()) {
        (1..)
            .map(|n| format!("{}_{}", base, n))
            .find(|candidate| !taken(candidate.as_str()))
            .unwrap_or_else(|| base.clone())
    } else {
        base
    };

    if mnemonic != name {
        warn!("Data '{}' is written as LAS curve '{}'", name, mnemonic);
    }
    mnemonic
}

/// Writes `<name>_survey.las`; `None` when the drillhole has no survey.
pub fn write_survey(drillhole: &Drillhole, basepath: &Path) -> Result<Option<PathBuf>> {
    if drillhole.surveys.is_empty() {
        debug!("Drillhole '{}' has no survey to write", drillhole.name);
        return Ok(None);
    }

    let mut las = LasFile::new();
    add_well_data(&mut las, drillhole);
    let surveys = &drillhole.surveys;
    las.append_curve(
        LasCurve::new(DEPTH_CURVE, surveys.iter().map(|s| s.depth).collect()).with_unit(DEPTH_UNIT),
    );
    las.append_curve(LasCurve::new(DIP_CURVE, surveys.iter().map(|s| s.dip).collect()).with_unit("deg"));
    las.append_curve(
        LasCurve::new(AZIMUTH_CURVE, surveys.iter().map(|s| s.azimuth).collect()).with_unit("deg"),
    );

    fs::create_dir_all(basepath)?;
    let path = basepath.join(format!("{}{}.las", drillhole.name, SURVEY_SUFFIX));
    LasWriter::new().write_to_path(&path, &las)?;
    Ok(Some(path))
}

/// Writes one LAS file per property group of `drillhole`.
///
/// With `directory`, files go to `<basepath>/<group>/<name>.las`. Otherwise
/// they sit in `basepath` as `<name>_<group>.las`, which [`import_las`]
/// reads back into the same property group.
///
/// [`import_las`]: crate::import::import_las
///
/// # Errors
///
/// [`Error::NoData`] when the drillhole has no property groups.
pub fn write_curves(drillhole: &Drillhole, basepath: &Path, directory: bool) -> Result<Vec<PathBuf>> {
    if drillhole.property_groups.is_empty() {
        return Err(Error::NoData(drillhole.name.clone()));
    }

    let mut written = Vec::with_capacity(drillhole.property_groups.len());

    for group in &drillhole.property_groups {
        let mut las = LasFile::new();
        add_well_data(&mut las, drillhole);
        add_curve_data(&mut las, drillhole, group);

        let path = if directory {
            let subpath = basepath.join(&group.name);
            fs::create_dir_all(&subpath)?;
            subpath.join(format!("{}.las", drillhole.name))
        } else {
            fs::create_dir_all(basepath)?;
            basepath.join(format!("{}_{}.las", drillhole.name, group.name))
        };

        LasWriter::new().write_to_path(&path, &las)?;
        debug!("Wrote {} curve(s) to {}", las.curves.len(), path.display());
        written.push(path);
    }

    Ok(written)
}

/// Survey and property-group files of one drillhole.
pub fn drillhole_to_las(drillhole: &Drillhole, basepath: &Path, directory: bool) -> Result<Vec<PathBuf>> {
    let mut written: Vec<PathBuf> = write_survey(drillhole, basepath)?.into_iter().collect();
    written.extend(write_curves(drillhole, basepath, directory)?);
    Ok(written)
}

/// Statistics about an export run.
#[derive(Debug, Clone, Default)]
pub struct ExportStats {
    pub drillholes: usize,
    pub files: usize,
    pub output: PathBuf,
}

impl ExportStats {
    pub fn summary(&self) -> String {
        format!(
            "Exported {} drillhole(s) to {} file(s) under {}",
            self.drillholes,
            self.files,
            self.output.display()
        )
    }
}

/// Exports every drillhole of `group` under `<basepath>/<name>`.
///
/// `name` defaults to the group name. Drillholes without data still get
/// their survey written.
pub fn export_las(
    group: &DrillholeGroup,
    basepath: &Path,
    name: Option<&str>,
    directory: bool,
) -> Result<ExportStats> {
    let subpath = basepath.join(name.unwrap_or(&group.name));
    fs::create_dir_all(&subpath)?;

    info!(
        "Exporting drillhole surveys and property group data to {}",
        subpath.display()
    );

    let total = group.drillholes.len();
    let mut stats = ExportStats {
        output: subpath.clone(),
        ..ExportStats::default()
    };

    for (idx, drillhole) in group.drillholes.iter().enumerate() {
        info!("[{}/{}] {}", idx + 1, total, drillhole.name);
        stats.files += write_survey(drillhole, &subpath)?.map_or(0, |_| 1);
        if drillhole.property_groups.is_empty() {
            debug!("Drillhole '{}' has no property groups", drillhole.name);
        } else {
            stats.files += write_curves(drillhole, &subpath, directory)?.len();
        }
        stats.drillholes += 1;
    }

    Ok(stats)
}
