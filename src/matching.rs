//! Decides which drillhole a LAS file belongs to.

use log::{debug, info};

use crate::error::{Error, Result};
use crate::models::LasFile;
use crate::workspace::{Collar, Drillhole, DrillholeGroup};

/// Recognized names of the depth index curve, in lookup order.
pub const DEPTH_ALIASES: [&str; 2] = ["DEPTH", "DEPT"];

/// Name given to drillholes whose file has a blank `WELL` item.
pub const UNKNOWN_WELL: &str = "Unknown";

const COLLAR_TOLERANCE: f64 = 1e-6;

/// Depth samples of the index curve, looked up under either alias.
pub fn get_depths(las: &LasFile) -> Result<&[f64]> {
    DEPTH_ALIASES
        .iter()
        .find_map(|alias| las.curve(alias))
        .map(|curve| curve.data.as_slice())
        .ok_or(Error::MissingDepthCurve)
}

/// Collar from the well `X`, `Y` and `ELEV` items.
///
/// `None` when the file carries none of them; a missing coordinate defaults
/// to zero otherwise.
pub fn get_collar(las: &LasFile) -> Option<Collar> {
    let coords: Vec<Option<f64>> = ["X", "Y", "ELEV"]
        .iter()
        .map(|field| las.well_item(field).and_then(|item| item.as_f64()))
        .collect();

    if coords.iter().all(Option::is_none) {
        return None;
    }
    Some(Collar::new(
        coords[0].unwrap_or(0.0),
        coords[1].unwrap_or(0.0),
        coords[2].unwrap_or(0.0),
    ))
}

pub fn get_well_name(las: &LasFile) -> String {
    las.well_value("WELL").unwrap_or(UNKNOWN_WELL).to_string()
}

pub fn get_well_id(las: &LasFile) -> Option<String> {
    las.well_value("UWI").map(str::to_string)
}

/// First `"<basename> (n)"`, `n >= start`, not used by a drillhole of `group`.
pub fn find_copy_name(group: &DrillholeGroup, basename: &str, start: usize) -> String {
    (start..)
        .map(|n| format!("{} ({})", basename, n))
        .find(|name| group.get_drillhole(name).is_none())
        .unwrap_or_else(|| basename.to_string())
}

/// How a LAS file relates to the drillholes already in a group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    /// Same identity: append to the drillhole at this index.
    Append(usize),
    /// Name taken by a different well: create under a disambiguated name.
    Rename(String),
    /// Name unused: create under the file's name.
    Create(String),
}

/// Compares the identity of `las` against the drillholes of `group`.
pub fn match_drillhole(group: &DrillholeGroup, las: &LasFile) -> MatchOutcome {
    let name = get_well_name(las);
    let collar = get_collar(las);
    let well_id = get_well_id(las);

    let Some(index) = group.drillholes.iter().position(|d| d.name == name) else {
        return MatchOutcome::Create(name);
    };

    let existing = &group.drillholes[index];
    let collar_matches = collar
        .map(|c| c.matches(&existing.collar, COLLAR_TOLERANCE))
        .unwrap_or(true);
    let id_matches = match (&well_id, &existing.well_id) {
        (Some(a), Some(b)) => a == b,
        _ => true,
    };

    if collar_matches && id_matches {
        return MatchOutcome::Append(index);
    }
    debug!(
        "Drillhole '{}' exists with different identity (collar match: {}, id match: {})",
        name, collar_matches, id_matches
    );

    match well_id {
        Some(id) if !id_matches => match_by_well_id(group, id, collar),
        _ => MatchOutcome::Rename(find_copy_name(group, &name, 1)),
    }
}

/// A distinct well identifier names its own drillhole.
fn match_by_well_id(group: &DrillholeGroup, id: String, collar: Option<Collar>) -> MatchOutcome {
    let Some(index) = group.drillholes.iter().position(|d| d.name == id) else {
        return MatchOutcome::Create(id);
    };

    let existing = &group.drillholes[index];
    let same_id = existing.well_id.as_deref().map_or(true, |other| other == id);
    let same_collar = collar
        .map(|c| c.matches(&existing.collar, COLLAR_TOLERANCE))
        .unwrap_or(true);
    if same_id && same_collar {
        MatchOutcome::Append(index)
    } else {
        MatchOutcome::Rename(find_copy_name(group, &id, 1))
    }
}

/// Finds the drillhole `las` should be appended to, or creates one.
///
/// # Errors
///
/// Returns [`Error::MissingDepthCurve`] when the file has no depth index; the
/// group is left untouched in that case.
pub fn create_or_append_drillhole<'g>(
    group: &'g mut DrillholeGroup,
    las: &LasFile,
) -> Result<&'g mut Drillhole> {
    let index = resolve_drillhole(group, las)?;
    Ok(&mut group.drillholes[index])
}

/// Index-returning form of [`create_or_append_drillhole`].
pub fn resolve_drillhole(group: &mut DrillholeGroup, las: &LasFile) -> Result<usize> {
    get_depths(las)?;

    let name = match match_drillhole(group, las) {
        MatchOutcome::Append(index) => {
            debug!("Appending to drillhole '{}'", group.drillholes[index].name);
            return Ok(index);
        }
        MatchOutcome::Rename(name) | MatchOutcome::Create(name) => name,
    };

    info!("Creating drillhole '{}'", name);
    let mut drillhole = Drillhole::new(name);
    if let Some(collar) = get_collar(las) {
        drillhole.collar = collar;
    }
    drillhole.well_id = get_well_id(las);
    group.add_drillhole(drillhole);
    Ok(group.drillholes.len() - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HeaderItem, LasCurve};

    fn las_with_well(name: &str) -> LasFile {
        let mut las = LasFile::new();
        las.set_well(HeaderItem::new("WELL", name));
        las.append_curve(LasCurve::new("DEPTH", vec![0.0, 1.0]));
        las
    }

    #[test]
    fn test_find_copy_name_skips_taken() {
        let mut group = DrillholeGroup::new("g");
        group.add_drillhole(Drillhole::new("dh1"));
        group.add_drillhole(Drillhole::new("dh1 (1)"));
        assert_eq!(find_copy_name(&group, "dh1", 1), "dh1 (2)");
    }

    #[test]
    fn test_collar_absent_when_no_coordinates() {
        assert_eq!(get_collar(&las_with_well("a")), None);
    }

    #[test]
    fn test_collar_partial_defaults_to_zero() {
        let mut las = las_with_well("a");
        las.set_well(HeaderItem::new("Y", "5.5"));
        assert_eq!(get_collar(&las), Some(Collar::new(0.0, 5.5, 0.0)));
    }

    #[test]
    fn test_conflicting_well_id_uses_identifier_name() {
        let mut group = DrillholeGroup::new("g");
        let mut existing = Drillhole::new("a");
        existing.well_id = Some("100/01".to_string());
        group.add_drillhole(existing);

        let mut las = las_with_well("a");
        las.set_well(HeaderItem::new("UWI", "100/02"));
        assert_eq!(
            match_drillhole(&group, &las),
            MatchOutcome::Create("100/02".to_string())
        );

        let mut by_id = Drillhole::new("100/02");
        by_id.well_id = Some("100/02".to_string());
        group.add_drillhole(by_id);
        assert_eq!(match_drillhole(&group, &las), MatchOutcome::Append(1));
    }

    #[test]
    fn test_collar_conflict_with_same_id_renames() {
        let mut group = DrillholeGroup::new("g");
        group.add_drillhole(Drillhole::new("a").with_collar(Collar::new(1.0, 1.0, 1.0)));

        let mut las = las_with_well("a");
        las.set_well(HeaderItem::new("X", "2.0"));
        assert_eq!(
            match_drillhole(&group, &las),
            MatchOutcome::Rename("a (1)".to_string())
        );
    }
}
