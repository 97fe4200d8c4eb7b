//! Imports a directory of LAS files into a workspace, then exports the
//! resulting drillhole group back to LAS.
//!
//! ```text
//! cargo run --example convert_directory -- <las-dir> <workspace.json> <out-dir>
//! ```

use std::env;
use std::path::PathBuf;

use las_drillhole::{export_las, fetch_active_workspace, import_las, Workspace};

fn main() -> Result<(), las_drillhole::Error> {
    let mut args = env::args().skip(1).map(PathBuf::from);
    let files = args.next().unwrap_or_else(|| PathBuf::from("las"));
    let project = args.next().unwrap_or_else(|| PathBuf::from("project.json"));
    let output = args.next().unwrap_or_else(|| PathBuf::from("out"));

    // Import, saving the workspace on success
    let stats = fetch_active_workspace(&project, |workspace| {
        import_las(workspace, &files, "Drillholes")
    })?;
    println!("{}", stats.summary());

    // Export with one subdirectory per property group
    let workspace = Workspace::open(&project)?;
    if let Some(group) = workspace.get_group("Drillholes") {
        let stats = export_las(group, &output, None, true)?;
        println!("{}", stats.summary());

        for drillhole in &group.drillholes {
            println!(
                "  {}: {} data, {} property group(s), {} survey station(s)",
                drillhole.name,
                drillhole.data.len(),
                drillhole.property_groups.len(),
                drillhole.surveys.len()
            );
        }
    }

    Ok(())
}
