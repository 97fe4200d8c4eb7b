mod common;

use common::sample_group;
use las_drillhole::config::{write_uijson, ExportConfig, ImportConfig, EXPORT_TEMPLATE, IMPORT_TEMPLATE};
use las_drillhole::survey::read_survey;
use las_drillhole::{driver, fetch_active_workspace, Error, Workspace};
use std::fs;
use tempfile::tempdir;

// ============================================================================
// CONFIGURATION
// ============================================================================

#[test]
fn test_export_config_plain_values() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("export.ui.json");
    fs::write(
        &path,
        r#"{ "geoh5": "project.json", "drillhole_group": "dh_group", "use_directories": false }"#,
    )
    .unwrap();

    let config = ExportConfig::from_file(&path).unwrap();
    assert_eq!(config.geoh5, dir.path().join("project.json"));
    assert_eq!(config.drillhole_group, "dh_group");
    assert_eq!(config.directory, dir.path().to_path_buf());
    assert!(!config.use_directories);
}

#[test]
fn test_export_config_form_values() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("export.ui.json");
    fs::write(
        &path,
        r#"{
            "title": "Drillhole group to LAS files",
            "geoh5": { "label": "Workspace", "value": "/data/project.json" },
            "drillhole_group": { "label": "Drillhole group", "value": "dh_group" },
            "directory": { "label": "Output directory", "value": "out" }
        }"#,
    )
    .unwrap();

    let config = ExportConfig::from_file(&path).unwrap();
    assert_eq!(config.geoh5, std::path::PathBuf::from("/data/project.json"));
    assert_eq!(config.directory, dir.path().join("out"));
    assert!(config.use_directories);
}

#[test]
fn test_import_config_defaults_group_name() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("import.ui.json");
    fs::write(&path, r#"{ "geoh5": "p.json", "files": { "value": "las" }, "name": "" }"#).unwrap();

    let config = ImportConfig::from_file(&path).unwrap();
    assert_eq!(config.files, dir.path().join("las"));
    assert_eq!(config.name, las_drillhole::import::DEFAULT_GROUP_NAME);
}

#[test]
fn test_blank_templates_fail_with_config_error() {
    let dir = tempdir().unwrap();
    let written = write_uijson(dir.path()).unwrap();
    assert_eq!(written.len(), 2);
    assert!(dir.path().join(IMPORT_TEMPLATE).is_file());

    let err = ExportConfig::from_file(dir.path().join(EXPORT_TEMPLATE)).unwrap_err();
    assert!(matches!(err, Error::Config(_)));
    assert!(err.to_string().contains("geoh5"));
}

// ============================================================================
// DRIVERS
// ============================================================================

#[test]
fn test_export_then_import_through_drivers() {
    let dir = tempdir().unwrap();
    let project = dir.path().join("project.json");

    let mut workspace = Workspace::create(&project).unwrap();
    workspace.add_group(sample_group());
    workspace.save().unwrap();

    let export_path = dir.path().join("export.ui.json");
    fs::write(
        &export_path,
        r#"{ "geoh5": "project.json", "drillhole_group": "dh_group", "directory": "out" }"#,
    )
    .unwrap();
    let stats = driver::run_export(&export_path).unwrap();
    assert_eq!(stats.drillholes, 2);
    assert!(dir.path().join("out/dh_group/depth_0/dh1.las").is_file());

    let import_path = dir.path().join("import.ui.json");
    fs::write(
        &import_path,
        r#"{ "geoh5": "project.json", "files": "out/dh_group", "name": "reimported" }"#,
    )
    .unwrap();
    let stats = driver::run_import(&import_path).unwrap();
    assert_eq!(stats.files, 4);

    let reopened = Workspace::open(&project).unwrap();
    assert_eq!(reopened.groups.len(), 2);
    assert_eq!(reopened.get_group("reimported").unwrap().drillholes.len(), 2);
}

#[test]
fn test_export_unknown_group() {
    let dir = tempdir().unwrap();
    Workspace::create(dir.path().join("project.json")).unwrap();
    let path = dir.path().join("export.ui.json");
    fs::write(&path, r#"{ "geoh5": "project.json", "drillhole_group": "missing" }"#).unwrap();

    assert!(matches!(driver::run_export(&path), Err(Error::NotFound(_))));
}

#[test]
fn test_export_group_by_uid() {
    let dir = tempdir().unwrap();
    let project = dir.path().join("project.json");
    let mut workspace = Workspace::create(&project).unwrap();
    let uid = workspace.add_group(sample_group()).uid;
    workspace.save().unwrap();

    let reopened = Workspace::open(&project).unwrap();
    assert_eq!(
        driver::find_group(&reopened, &uid.to_string()).map(|g| g.name.as_str()),
        Some("dh_group")
    );
}

#[test]
fn test_fetch_active_workspace_does_not_save_on_error() {
    let dir = tempdir().unwrap();
    let project = dir.path().join("project.json");
    Workspace::create(&project).unwrap();

    let result: las_drillhole::Result<()> = fetch_active_workspace(&project, |workspace| {
        workspace.get_or_create_group("scratch");
        Err(Error::NotFound("forced".to_string()))
    });
    assert!(result.is_err());
    assert!(Workspace::open(&project).unwrap().groups.is_empty());

    fetch_active_workspace(&project, |workspace| {
        workspace.get_or_create_group("kept");
        Ok(())
    })
    .unwrap();
    assert!(Workspace::open(&project).unwrap().get_group("kept").is_some());
}

// ============================================================================
// MALFORMED SURVEYS
// ============================================================================

#[test]
fn test_malformed_csv_survey_is_surfaced() {
    let dir = tempdir().unwrap();

    let short = dir.path().join("short_survey.csv");
    fs::write(&short, "depth,dip,azimuth\n0,-90\n").unwrap();
    let err = read_survey(&short).unwrap_err();
    assert!(matches!(err, Error::Survey { .. }));
    assert!(err.to_string().contains("row 2"));

    let bad = dir.path().join("bad_survey.csv");
    fs::write(&bad, "0,-90,0\n10,abc,0\n").unwrap();
    assert!(read_survey(&bad).unwrap_err().to_string().contains("abc"));

    let empty = dir.path().join("empty_survey.csv");
    fs::write(&empty, "# depth, dip, azimuth\n").unwrap();
    assert!(matches!(read_survey(&empty), Err(Error::Survey { .. })));
}

#[test]
fn test_las_survey_without_dip_is_surfaced() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("dh_survey.las");
    fs::write(
        &path,
        common::LasBuilder::new()
            .curve("DEPTH", "m")
            .curve("AZIM", "deg")
            .row(&[0.0, 45.0])
            .build(),
    )
    .unwrap();

    let err = read_survey(&path).unwrap_err();
    assert!(matches!(err, Error::MissingCurve { ref curve, .. } if curve == "DIP"));
}
