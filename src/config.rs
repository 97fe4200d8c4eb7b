//! UI-JSON input files for the import and export drivers.
//!
//! Each field is either a plain JSON value or a UI-JSON form object carrying
//! it under `"value"`, so both of these are accepted:
//!
//! ```json
//! { "geoh5": "project.json" }
//! { "geoh5": { "label": "Workspace", "value": "project.json" } }
//! ```
//!
//! Relative paths resolve against the directory holding the input file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{Error, Result};
use crate::import::DEFAULT_GROUP_NAME;

pub const IMPORT_TEMPLATE: &str = "import_las_files.ui.json";
pub const EXPORT_TEMPLATE: &str = "export_las_files.ui.json";

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum UiValue<T> {
    Form { value: T },
    Plain(T),
}

impl<T> UiValue<T> {
    fn into_inner(self) -> T {
        match self {
            UiValue::Form { value } | UiValue::Plain(value) => value,
        }
    }
}

type UiField<T> = Option<UiValue<Option<T>>>;

fn field<T>(value: UiField<T>) -> Option<T> {
    value.and_then(UiValue::into_inner)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn required(value: Option<String>, key: &str, source: &Path) -> Result<String> {
    non_blank(value).ok_or_else(|| {
        Error::Config(format!("'{}' must be set in {}", key, source.display()))
    })
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

fn base_dir(path: &Path) -> PathBuf {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn resolve(base: &Path, value: &str) -> PathBuf {
    let path = PathBuf::from(value);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

#[derive(Debug, Deserialize)]
struct RawExport {
    #[serde(default)]
    geoh5: UiField<String>,
    #[serde(default)]
    drillhole_group: UiField<String>,
    #[serde(default)]
    directory: UiField<String>,
    #[serde(default)]
    use_directories: UiField<bool>,
}

/// Settings of the export driver.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportConfig {
    /// Workspace file.
    pub geoh5: PathBuf,
    /// Name or uid of the drillhole group to export.
    pub drillhole_group: String,
    /// Base directory receiving `<group>/...`.
    pub directory: PathBuf,
    /// One subdirectory per property group.
    pub use_directories: bool,
}

impl ExportConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw: RawExport = read_json(path)?;
        let base = base_dir(path);

        Ok(Self {
            geoh5: resolve(&base, &required(field(raw.geoh5), "geoh5", path)?),
            drillhole_group: required(field(raw.drillhole_group), "drillhole_group", path)?,
            directory: non_blank(field(raw.directory))
                .map(|d| resolve(&base, &d))
                .unwrap_or(base),
            use_directories: field(raw.use_directories).unwrap_or(true),
        })
    }
}

#[derive(Debug, Deserialize)]
struct RawImport {
    #[serde(default)]
    geoh5: UiField<String>,
    #[serde(default)]
    files: UiField<String>,
    #[serde(default)]
    name: UiField<String>,
}

/// Settings of the import driver.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportConfig {
    /// Workspace file, created when missing.
    pub geoh5: PathBuf,
    /// Directory tree of LAS files.
    pub files: PathBuf,
    /// Target drillhole group.
    pub name: String,
}

impl ImportConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw: RawImport = read_json(path)?;
        let base = base_dir(path);

        Ok(Self {
            geoh5: resolve(&base, &required(field(raw.geoh5), "geoh5", path)?),
            files: resolve(&base, &required(field(raw.files), "files", path)?),
            name: non_blank(field(raw.name)).unwrap_or_else(|| DEFAULT_GROUP_NAME.to_string()),
        })
    }
}

fn import_template() -> Value {
    json!({
        "title": "LAS files to drillhole group",
        "run_command": "las-drillhole import",
        "geoh5": { "label": "Workspace", "value": "" },
        "files": { "label": "Directory of .las files", "value": "" },
        "name": { "label": "Drillhole group name", "value": DEFAULT_GROUP_NAME },
    })
}

fn export_template() -> Value {
    json!({
        "title": "Drillhole group to LAS files",
        "run_command": "las-drillhole export",
        "geoh5": { "label": "Workspace", "value": "" },
        "drillhole_group": { "label": "Drillhole group", "value": "" },
        "directory": { "label": "Output directory", "value": "" },
        "use_directories": { "label": "Organize by property group", "value": true },
    })
}

/// Writes the import and export UI-JSON templates into `dir`.
pub fn write_uijson<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let mut written = Vec::with_capacity(2);
    for (name, template) in [
        (IMPORT_TEMPLATE, import_template()),
        (EXPORT_TEMPLATE, export_template()),
    ] {
        let path = dir.join(name);
        fs::write(&path, serde_json::to_string_pretty(&template)?)?;
        written.push(path);
    }
    Ok(written)
}
