//! # Project Data Structures
//!
//! The `Project` struct is an in-memory batch of slab calculations that share
//! one set of [`DesignSettings`]. It serializes to human-readable JSON; the
//! engine itself never touches the filesystem.
//!
//! ## Structure
//!
//! ```text
//! Project
//! ├── meta: ProjectMetadata (schema version, engineer, job info, timestamps)
//! ├── settings: DesignSettings (load factor, bar catalogue, shear method, ...)
//! └── items: HashMap<Uuid, CalculationItem> (all slab inputs)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use slab_core::calculations::{CalculationItem, OneWaySlabInput};
//! use slab_core::code_tables::CodeTables;
//! use slab_core::loads::SlabLoads;
//! use slab_core::project::Project;
//!
//! let mut project = Project::new("Jane Engineer", "25-042", "ACME Corp");
//! project.add_item(CalculationItem::OneWaySlab(
//!     OneWaySlabInput::new("S-1", 4.0, SlabLoads::new(0.5, 3.0)),
//! ));
//!
//! let outcomes = project.design_all(CodeTables::standard());
//! assert!(outcomes[0].result.is_ok());
//!
//! let json = project.to_json().unwrap();
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::{CalculationItem, DesignResult};
use crate::code_tables::CodeTables;
use crate::errors::{CalcError, CalcResult};
use crate::settings::DesignSettings;

/// Current schema version of serialized projects
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root project container.
///
/// Items are stored in a flat UUID-keyed map for O(1) lookups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Project metadata (version, engineer, job info)
    pub meta: ProjectMetadata,

    /// Design settings applied to every item
    #[serde(default)]
    pub settings: DesignSettings,

    /// All calculation items, keyed by UUID
    pub items: HashMap<Uuid, CalculationItem>,
}

/// Outcome of designing one project item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignOutcome {
    pub id: Uuid,
    pub label: String,
    pub result: Result<DesignResult, CalcError>,
}

impl Project {
    /// Create a new empty project with default settings.
    ///
    /// # Example
    ///
    /// ```rust
    /// use slab_core::project::Project;
    ///
    /// let project = Project::new("John Doe", "25-001", "Client Corp");
    /// assert_eq!(project.meta.engineer, "John Doe");
    /// ```
    pub fn new(engineer: impl Into<String>, job_id: impl Into<String>, client: impl Into<String>) -> Self {
        let now = Utc::now();
        Project {
            meta: ProjectMetadata {
                version: SCHEMA_VERSION.to_string(),
                engineer: engineer.into(),
                job_id: job_id.into(),
                client: client.into(),
                created: now,
                modified: now,
            },
            settings: DesignSettings::default(),
            items: HashMap::new(),
        }
    }

    /// Builder: replace the design settings
    pub fn with_settings(mut self, settings: DesignSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Add a calculation item to the project.
    ///
    /// Returns the UUID assigned to the item.
    pub fn add_item(&mut self, item: CalculationItem) -> Uuid {
        let id = Uuid::new_v4();
        self.items.insert(id, item);
        self.touch();
        id
    }

    /// Remove a calculation item by UUID.
    ///
    /// Returns the removed item if it existed.
    pub fn remove_item(&mut self, id: &Uuid) -> Option<CalculationItem> {
        let item = self.items.remove(id);
        if item.is_some() {
            self.touch();
        }
        item
    }

    /// Get a calculation item by UUID.
    pub fn get_item(&self, id: &Uuid) -> Option<&CalculationItem> {
        self.items.get(id)
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Design every item with the project settings.
    ///
    /// Items are independent: one failing item does not stop the others.
    /// Outcomes are ordered by label, then id, so the output is stable.
    pub fn design_all(&self, tables: &CodeTables) -> Vec<DesignOutcome> {
        let mut outcomes: Vec<DesignOutcome> = self
            .items
            .iter()
            .map(|(id, item)| DesignOutcome {
                id: *id,
                label: item.label().to_string(),
                result: item.design(tables, &self.settings),
            })
            .collect();
        outcomes.sort_by(|a, b| a.label.cmp(&b.label).then(a.id.cmp(&b.id)));
        debug!(
            "designed {} item(s), {} failed",
            outcomes.len(),
            outcomes.iter().filter(|o| o.result.is_err()).count()
        );
        outcomes
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> CalcResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse from JSON, rejecting settings that would fail every design
    pub fn from_json(json: &str) -> CalcResult<Self> {
        let project: Project = serde_json::from_str(json)?;
        project.settings.validate()?;
        Ok(project)
    }
}

impl Default for Project {
    fn default() -> Self {
        Project::new("", "", "")
    }
}

/// Project metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Name of the responsible engineer
    pub engineer: String,

    /// Job/project number
    pub job_id: String,

    /// Client name
    pub client: String,

    /// When the project was created
    pub created: DateTime<Utc>,

    /// When the project was last modified
    pub modified: DateTime<Utc>,
}
