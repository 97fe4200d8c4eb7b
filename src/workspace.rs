//! Hierarchical drillhole container.
//!
//! A [`Workspace`] owns [`DrillholeGroup`]s, each owning [`Drillhole`]s. A
//! drillhole holds [`Data`] entities and the [`PropertyGroup`]s that give them
//! a shared sampling axis. The whole tree is persisted as one JSON document.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};

/// JSON has no NaN; null samples are stored as `null`.
mod nan_as_null {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(values: &[f64], serializer: S) -> Result<S::Ok, S::Error> {
        values
            .iter()
            .map(|v| if v.is_nan() { None } else { Some(*v) })
            .collect::<Vec<Option<f64>>>()
            .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<f64>, D::Error> {
        let values = Vec::<Option<f64>>::deserialize(deserializer)?;
        Ok(values.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Collar {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Collar {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Coordinate-wise equality within `tolerance`.
    pub fn matches(&self, other: &Collar, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance
            && (self.y - other.y).abs() <= tolerance
            && (self.z - other.z).abs() <= tolerance
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurveyStation {
    pub depth: f64,
    pub dip: f64,
    pub azimuth: f64,
}

impl SurveyStation {
    pub fn new(depth: f64, dip: f64, azimuth: f64) -> Self {
        Self { depth, dip, azimuth }
    }
}

/// Sampling shared by every member of a property group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SamplingAxis {
    Depth {
        #[serde(with = "nan_as_null")]
        depths: Vec<f64>,
    },
    Interval {
        #[serde(with = "nan_as_null")]
        from: Vec<f64>,
        #[serde(with = "nan_as_null")]
        to: Vec<f64>,
    },
}

impl SamplingAxis {
    pub fn len(&self) -> usize {
        match self {
            SamplingAxis::Depth { depths } => depths.len(),
            SamplingAxis::Interval { from, .. } => from.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Exact match for depths, value-for-value match for intervals.
    pub fn same_as(&self, other: &SamplingAxis) -> bool {
        match (self, other) {
            (SamplingAxis::Depth { depths: a }, SamplingAxis::Depth { depths: b }) => {
                same_values(a, b)
            }
            (
                SamplingAxis::Interval { from: fa, to: ta },
                SamplingAxis::Interval { from: fb, to: tb },
            ) => same_values(fa, fb) && same_values(ta, tb),
            _ => false,
        }
    }

    /// Default property-group name prefix for this kind of sampling.
    pub fn group_prefix(&self) -> &'static str {
        match self {
            SamplingAxis::Depth { .. } => "depth",
            SamplingAxis::Interval { .. } => "interval",
        }
    }
}

fn same_values(a: &[f64], b: &[f64]) -> bool {
    a.len() == b.len()
        && a
            .iter()
            .zip(b)
            .all(|(x, y)| x == y || (x.is_nan() && y.is_nan()))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataValues {
    Float {
        #[serde(with = "nan_as_null")]
        values: Vec<f64>,
    },
    Referenced {
        values: Vec<i64>,
        value_map: BTreeMap<i64, String>,
    },
}

impl DataValues {
    pub fn len(&self) -> usize {
        match self {
            DataValues::Float { values } => values.len(),
            DataValues::Referenced { values, .. } => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn value_map(&self) -> Option<&BTreeMap<i64, String>> {
        match self {
            DataValues::Referenced { value_map, .. } => Some(value_map),
            DataValues::Float { .. } => None,
        }
    }

    /// Values as floating point, the form they take in a LAS curve.
    pub fn to_f64(&self) -> Vec<f64> {
        match self {
            DataValues::Float { values } => values.clone(),
            DataValues::Referenced { values, .. } => values.iter().map(|v| *v as f64).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Data {
    pub uid: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<String>,
    pub values: DataValues,
}

impl Data {
    pub fn new(name: impl Into<String>, values: DataValues) -> Self {
        Self {
            uid: Uuid::new_v4(),
            name: name.into(),
            units: None,
            values,
        }
    }

    pub fn with_units(mut self, units: Option<String>) -> Self {
        self.units = units.filter(|u| !u.is_empty());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyGroup {
    pub uid: Uuid,
    pub name: String,
    pub axis: SamplingAxis,
    pub properties: Vec<Uuid>,
}

impl PropertyGroup {
    pub fn new(name: impl Into<String>, axis: SamplingAxis) -> Self {
        Self {
            uid: Uuid::new_v4(),
            name: name.into(),
            axis,
            properties: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drillhole {
    pub uid: Uuid,
    pub name: String,
    pub collar: Collar,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub well_id: Option<String>,
    #[serde(default)]
    pub surveys: Vec<SurveyStation>,
    #[serde(default)]
    pub data: Vec<Data>,
    #[serde(default)]
    pub property_groups: Vec<PropertyGroup>,
}

impl Drillhole {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            uid: Uuid::new_v4(),
            name: name.into(),
            collar: Collar::default(),
            well_id: None,
            surveys: Vec::new(),
            data: Vec::new(),
            property_groups: Vec::new(),
        }
    }

    pub fn with_collar(mut self, collar: Collar) -> Self {
        self.collar = collar;
        self
    }

    pub fn with_surveys(mut self, surveys: Vec<SurveyStation>) -> Self {
        self.surveys = surveys;
        self
    }

    pub fn get_data(&self, name: &str) -> Option<&Data> {
        self.data.iter().find(|d| d.name == name)
    }

    pub fn data_by_uid(&self, uid: &Uuid) -> Option<&Data> {
        self.data.iter().find(|d| &d.uid == uid)
    }

    pub fn property_group(&self, name: &str) -> Option<&PropertyGroup> {
        self.property_groups.iter().find(|g| g.name == name)
    }

    /// Member data of a property group, in group order.
    pub fn group_data(&self, group: &PropertyGroup) -> Vec<&Data> {
        group
            .properties
            .iter()
            .filter_map(|uid| self.data_by_uid(uid))
            .collect()
    }

    /// Adds `data` under `axis`, joining or creating a property group.
    ///
    /// With `group_name`, the named group is joined when its axis matches and
    /// created when absent. Without it, the first group sharing the axis is
    /// joined, or a new `depth_<n>` / `interval_<n>` group is created.
    /// Returns the name of the group the data landed in.
    pub fn add_data(
        &mut self,
        data: Data,
        axis: SamplingAxis,
        group_name: Option<&str>,
    ) -> Result<String> {
        if data.values.len() != axis.len() {
            return Err(Error::LengthMismatch {
                data: data.name,
                values: data.values.len(),
                axis: axis.len(),
            });
        }

        let index = match group_name {
            Some(name) => match self.property_groups.iter().position(|g| g.name == name) {
                Some(idx) if self.property_groups[idx].axis.same_as(&axis) => idx,
                Some(_) => {
                    return Err(Error::AxisMismatch {
                        data: data.name,
                        group: name.to_string(),
                    })
                }
                None => self.push_group(PropertyGroup::new(name, axis)),
            },
            None => match self.property_groups.iter().position(|g| g.axis.same_as(&axis)) {
                Some(idx) => idx,
                None => {
                    let name = self.next_group_name(axis.group_prefix());
                    self.push_group(PropertyGroup::new(name, axis))
                }
            },
        };

        let group = &mut self.property_groups[index];
        debug!("Adding '{}' to property group '{}'", data.name, group.name);
        group.properties.push(data.uid);
        let group_name = group.name.clone();
        self.data.push(data);
        Ok(group_name)
    }

    fn push_group(&mut self, group: PropertyGroup) -> usize {
        self.property_groups.push(group);
        self.property_groups.len() - 1
    }

    fn next_group_name(&self, prefix: &str) -> String {
        (0..)
            .map(|n| format!("{}_{}", prefix, n))
            .find(|name| self.property_group(name).is_none())
            .unwrap_or_else(|| prefix.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrillholeGroup {
    pub uid: Uuid,
    pub name: String,
    #[serde(default)]
    pub drillholes: Vec<Drillhole>,
    /// Property-group names defined by the children, in order of first use.
    #[serde(default)]
    pub property_groups: Vec<String>,
}

impl DrillholeGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            uid: Uuid::new_v4(),
            name: name.into(),
            drillholes: Vec::new(),
            property_groups: Vec::new(),
        }
    }

    pub fn get_drillhole(&self, name: &str) -> Option<&Drillhole> {
        self.drillholes.iter().find(|d| d.name == name)
    }

    /// Adds a drillhole and returns a handle to it.
    pub fn add_drillhole(&mut self, drillhole: Drillhole) -> &mut Drillhole {
        self.drillholes.push(drillhole);
        let idx = self.drillholes.len() - 1;
        self.sync_property_groups(idx);
        &mut self.drillholes[idx]
    }

    /// Registers the property-group names of one child on the group.
    pub fn sync_property_groups(&mut self, index: usize) {
        let Some(drillhole) = self.drillholes.get(index) else {
            return;
        };
        for group in &drillhole.property_groups {
            if !self.property_groups.contains(&group.name) {
                self.property_groups.push(group.name.clone());
            }
        }
    }
}

/// Root container, persisted as JSON at `path` when it has one.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Workspace {
    #[serde(skip)]
    path: Option<PathBuf>,
    #[serde(default)]
    pub groups: Vec<DrillholeGroup>,
}

impl Workspace {
    /// A workspace that is never written to disk.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Creates an empty workspace file at `path`, replacing any existing one.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let workspace = Self {
            path: Some(path.as_ref().to_path_buf()),
            groups: Vec::new(),
        };
        workspace.save()?;
        Ok(workspace)
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        let mut workspace: Workspace = serde_json::from_str(&text)?;
        workspace.path = Some(path.as_ref().to_path_buf());
        debug!(
            "Opened workspace {} with {} group(s)",
            path.as_ref().display(),
            workspace.groups.len()
        );
        Ok(workspace)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Writes the workspace to its path. No-op for in-memory workspaces.
    pub fn save(&self) -> Result<()> {
        if let Some(path) = &self.path {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, serde_json::to_string_pretty(self)?)?;
            debug!("Saved workspace to {}", path.display());
        }
        Ok(())
    }

    pub fn get_group(&self, name: &str) -> Option<&DrillholeGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn get_group_mut(&mut self, name: &str) -> Option<&mut DrillholeGroup> {
        self.groups.iter_mut().find(|g| g.name == name)
    }

    pub fn add_group(&mut self, group: DrillholeGroup) -> &mut DrillholeGroup {
        self.groups.push(group);
        let idx = self.groups.len() - 1;
        &mut self.groups[idx]
    }

    pub fn get_or_create_group(&mut self, name: &str) -> &mut DrillholeGroup {
        match self.groups.iter().position(|g| g.name == name) {
            Some(idx) => &mut self.groups[idx],
            None => {
                info!("Creating drillhole group '{}'", name);
                self.add_group(DrillholeGroup::new(name))
            }
        }
    }

    /// First drillhole with `name` across all groups.
    pub fn find_drillhole(&self, name: &str) -> Option<&Drillhole> {
        self.groups.iter().find_map(|g| g.get_drillhole(name))
    }
}

/// Opens the workspace at `path` (creating it when missing), runs `f` on it
/// and saves it when `f` succeeds.
///
/// The workspace is dropped on every path out of this function; on error
/// nothing is written.
pub fn fetch_active_workspace<P, T, F>(path: P, f: F) -> Result<T>
where
    P: AsRef<Path>,
    F: FnOnce(&mut Workspace) -> Result<T>,
{
    let path = path.as_ref();
    let mut workspace = if path.exists() {
        Workspace::open(path)?
    } else {
        Workspace::create(path)?
    };
    let output = f(&mut workspace)?;
    workspace.save()?;
    Ok(output)
}
