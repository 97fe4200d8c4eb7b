//! LAS files → drillhole group.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::error::Result;
use crate::matching::{get_well_name, resolve_drillhole};
use crate::models::LasFile;
use crate::reader::read_las;
use crate::reconcile::{add_curves, AddReport};
use crate::survey::{add_survey, is_survey_file, survey_from_las, SURVEY_SUFFIX};
use crate::workspace::{Drillhole, DrillholeGroup, Workspace};

/// Default name of the group created by [`import_las`].
pub const DEFAULT_GROUP_NAME: &str = "Imported drillholes";

/// Imports one parsed LAS file into `group`.
///
/// Matching picks or creates the drillhole, the survey (if any) replaces the
/// drillhole's survey, then the curves are reconciled into property groups.
pub fn las_to_drillhole<'g>(
    group: &'g mut DrillholeGroup,
    las: &LasFile,
    property_group: Option<&str>,
    survey: Option<&Path>,
) -> Result<&'g mut Drillhole> {
    let (index, _) = import_into(group, las, property_group, survey)?;
    Ok(&mut group.drillholes[index])
}

fn import_into(
    group: &mut DrillholeGroup,
    las: &LasFile,
    property_group: Option<&str>,
    survey: Option<&Path>,
) -> Result<(usize, AddReport)> {
    let index = resolve_drillhole(group, las)?;
    let drillhole = &mut group.drillholes[index];
    if let Some(path) = survey {
        add_survey(path, drillhole)?;
    }
    let report = add_curves(drillhole, las, property_group)?;
    group.sync_property_groups(index);
    Ok((index, report))
}

/// Statistics about an import run.
#[derive(Debug, Clone, Default)]
pub struct ImportStats {
    pub files: usize,
    pub surveys: usize,
    pub curves_added: usize,
    pub curves_skipped: usize,
}

impl ImportStats {
    pub fn summary(&self) -> String {
        format!(
            "Imported {} file(s) and {} survey(s): {} curve(s) added, {} skipped",
            self.files, self.surveys, self.curves_added, self.curves_skipped
        )
    }
}

/// Imports a directory tree of LAS files into the group `name` of `workspace`.
///
/// Files in a subdirectory go to a property group named after it. Files
/// directly under `basepath` named `<WELL>_<group>.las` go to `<group>`, other
/// root files get automatic property groups. Files whose stem
/// ends in `_survey` are surveys: `<stem>_survey.las` / `.csv` is applied to
/// the drillhole read from `<stem>.las` (looked up beside the file, then in
/// `basepath`). Survey LAS files with no data file still produce their
/// drillhole.
pub fn import_las(workspace: &mut Workspace, basepath: &Path, name: &str) -> Result<ImportStats> {
    let group = workspace.get_or_create_group(name);
    let mut stats = ImportStats::default();
    let mut applied: BTreeSet<PathBuf> = BTreeSet::new();

    let mut jobs: Vec<(PathBuf, Option<String>)> = las_files(basepath)?
        .into_iter()
        .filter(|p| !is_survey_file(p))
        .map(|p| (p, None))
        .collect();
    for dir in subdirectories(basepath)? {
        let group_name = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        jobs.extend(
            las_files(&dir)?
                .into_iter()
                .filter(|p| !is_survey_file(p))
                .map(|p| (p, Some(group_name.clone()))),
        );
    }

    info!(
        "Importing {} LAS file(s) from {} into '{}'",
        jobs.len(),
        basepath.display(),
        group.name
    );

    for (idx, (path, property_group)) in jobs.iter().enumerate() {
        info!("[{}/{}] {}", idx + 1, jobs.len(), path.display());
        let las = read_las(path)?;
        let survey = find_survey(path, &las, basepath);
        let property_group = property_group
            .clone()
            .or_else(|| group_from_stem(path, &las));

        let (_, report) = import_into(group, &las, property_group.as_deref(), survey.as_deref())?;
        stats.files += 1;
        stats.curves_added += report.added.len();
        stats.curves_skipped += report.skipped.len();
        if let Some(survey) = survey {
            if applied.insert(survey) {
                stats.surveys += 1;
            }
        }
    }

    for path in las_files(basepath)?.into_iter().filter(|p| is_survey_file(p)) {
        if applied.contains(&path) {
            continue;
        }
        debug!("Survey {} has no data file", path.display());
        let las = read_las(&path)?;
        let index = resolve_drillhole(group, &las)?;
        group.drillholes[index].surveys = survey_from_las(&las, &path)?;
        stats.surveys += 1;
    }

    Ok(stats)
}

/// Property group of a flat export file, `<WELL>_<group>.las`.
fn group_from_stem(path: &Path, las: &LasFile) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    let group = stem
        .strip_prefix(get_well_name(las).as_str())?
        .strip_prefix('_')?;
    (!group.is_empty()).then(|| group.to_string())
}

/// Survey file for the data file at `path`.
///
/// Candidates are named after the file stem and the `WELL` item, with a
/// `.las` or `.csv` extension, beside the file and then in `basepath`.
fn find_survey(path: &Path, las: &LasFile, basepath: &Path) -> Option<PathBuf> {
    let mut stems: Vec<String> = Vec::new();
    if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
        stems.push(stem.to_string());
    }
    if let Some(well) = las.well_value("WELL") {
        stems.push(well.to_string());
    }

    let mut dirs: Vec<&Path> = Vec::new();
    if let Some(parent) = path.parent() {
        dirs.push(parent);
    }
    dirs.push(basepath);

    dirs.iter()
        .flat_map(|dir| {
            stems.iter().flat_map(move |stem| {
                ["las", "csv"]
                    .iter()
                    .map(move |ext| dir.join(format!("{}{}.{}", stem, SURVEY_SUFFIX, ext)))
            })
        })
        .find(|candidate| candidate.is_file())
}

fn las_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| ext.eq_ignore_ascii_case("las"))
                    .unwrap_or(false)
        })
        .collect();
    files.sort();
    Ok(files)
}

fn subdirectories(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    dirs.sort();
    Ok(dirs)
}
