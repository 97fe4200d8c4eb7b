//! # LAS ⇄ drillhole conversion
//!
//! Converts well-log data between LAS 2.0 files (curves indexed by depth) and a
//! drillhole container (groups of drillholes carrying surveys, depth data and
//! interval data organized into property groups).
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use las_drillhole::{export_las, import_las, Workspace};
//!
//! let mut workspace = Workspace::open("project.json")?;
//!
//! // Drillhole group -> <out>/<group>/<property group>/<drillhole>.las
//! let group = workspace.get_group("Drillholes").unwrap().clone();
//! let stats = export_las(&group, Path::new("out"), None, true)?;
//! println!("{}", stats.summary());
//!
//! // And back into a new group
//! import_las(&mut workspace, Path::new("out/Drillholes"), "Reimported")?;
//! workspace.save()?;
//! # Ok::<(), las_drillhole::Error>(())
//! ```
//!
//! ## Matching
//!
//! A LAS file is appended to the drillhole with the same `WELL` name when its
//! collar (`X`, `Y`, `ELEV`) and `UWI` agree with it. A conflicting `UWI`
//! sends the file to a drillhole named after the identifier; any other
//! conflict creates a sibling named `"<name> (n)"`. See [`matching`].
//!
//! ## Reconciliation
//!
//! A file with a `TO` curve holds interval data, anything else depth data.
//! Curves join a property group with the same sampling or start a new one.
//! Categorical curves keep their value-to-label map through the `~Parameter`
//! section. See [`reconcile`].
//!
//! ## Error Handling
//!
//! ```no_run
//! use las_drillhole::{read_las, get_depths, Error};
//!
//! let las = read_las("dh1.las")?;
//! match get_depths(&las) {
//!     Ok(depths) => println!("{} samples", depths.len()),
//!     Err(Error::MissingDepthCurve) => eprintln!("no DEPTH/DEPT curve"),
//!     Err(err) => eprintln!("Error: {}", err),
//! }
//! # Ok::<(), las_drillhole::Error>(())
//! ```

// Public API modules
pub mod error;
pub mod reader;
pub mod writer;

// Re-export commonly used types
pub use error::{Error, Result};
pub use reader::{read_las, LasReader, LasReaderBuilder};
pub use writer::LasWriter;

pub use export::{drillhole_to_las, export_las, write_curves, write_survey, ExportStats};
pub use import::{import_las, las_to_drillhole, ImportStats};
pub use matching::{create_or_append_drillhole, find_copy_name, get_collar, get_depths};
pub use models::{HeaderItem, LasCurve, LasFile, MnemonicCase};
pub use workspace::{
    fetch_active_workspace, Collar, Data, DataValues, Drillhole, DrillholeGroup, PropertyGroup,
    SamplingAxis, SurveyStation, Workspace,
};

// Conversion building blocks
pub mod config;
pub mod driver;
pub mod export;
pub mod import;
pub mod las;
pub mod matching;
pub mod models;
pub mod reconcile;
pub mod survey;
pub mod workspace;
