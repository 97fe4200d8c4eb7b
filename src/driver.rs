//! Entry points driven by UI-JSON input files.

use std::path::Path;

use log::info;

use crate::config::{ExportConfig, ImportConfig};
use crate::error::{Error, Result};
use crate::export::{export_las, ExportStats};
use crate::import::{import_las, ImportStats};
use crate::workspace::{fetch_active_workspace, DrillholeGroup, Workspace};

/// Group of `workspace` whose name or uid equals `key`.
pub fn find_group<'w>(workspace: &'w Workspace, key: &str) -> Option<&'w DrillholeGroup> {
    workspace
        .groups
        .iter()
        .find(|g| g.name == key || g.uid.to_string() == key)
}

/// Exports the configured drillhole group to LAS files.
///
/// The workspace is only read.
pub fn run_export<P: AsRef<Path>>(config_path: P) -> Result<ExportStats> {
    let config = ExportConfig::from_file(config_path)?;
    export_las_directory(&config)
}

pub fn export_las_directory(config: &ExportConfig) -> Result<ExportStats> {
    let workspace = Workspace::open(&config.geoh5)?;
    let group = find_group(&workspace, &config.drillhole_group)
        .ok_or_else(|| Error::NotFound(format!("drillhole group '{}'", config.drillhole_group)))?;

    let stats = export_las(group, &config.directory, None, config.use_directories)?;
    info!("{}", stats.summary());
    Ok(stats)
}

/// Imports the configured directory of LAS files into the workspace.
pub fn run_import<P: AsRef<Path>>(config_path: P) -> Result<ImportStats> {
    let config = ImportConfig::from_file(config_path)?;
    import_las_directory(&config)
}

pub fn import_las_directory(config: &ImportConfig) -> Result<ImportStats> {
    if !config.files.is_dir() {
        return Err(Error::Config(format!(
            "'{}' is not a valid directory",
            config.files.display()
        )));
    }

    let stats = fetch_active_workspace(&config.geoh5, |workspace| {
        import_las(workspace, &config.files, &config.name)
    })?;
    info!("{}", stats.summary());
    Ok(stats)
}
