//! File-backed plan store.
//!
//! Each plan is one YAML document:
//!
//! ```text
//! <root>/
//!   └── plans/
//!       ├── plan_<id>.yaml
//!       └── ...
//! ```

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::planning::Plan;
use crate::ports::{PlanStore, PortError};

const EXTENSION: &str = "yaml";

/// Stores plans as YAML files under `<root>/plans`.
#[derive(Debug, Clone)]
pub struct YamlPlanStore {
    root: PathBuf,
}

impl YamlPlanStore {
    /// A store rooted at `root`; directories are created on first write.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding the plan files.
    #[must_use]
    pub fn plans_dir(&self) -> PathBuf {
        self.root.join("plans")
    }

    /// File for `id`, or `None` when the id cannot name a file in the store.
    fn plan_path(&self, id: &str) -> Option<PathBuf> {
        let valid = !id.is_empty()
            && !id.starts_with('.')
            && id.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
        valid.then(|| self.plans_dir().join(format!("{id}.{EXTENSION}")))
    }

    fn read_plan(path: &Path) -> Result<Option<Plan>, PortError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => serde_yaml::from_str(&contents)
                .map(Some)
                .map_err(|e| format!("Failed to parse plan {}: {e}", path.display()).into()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(format!("Failed to read plan {}: {e}", path.display()).into()),
        }
    }
}

impl PlanStore for YamlPlanStore {
    fn get(&self, id: &str) -> Result<Option<Plan>, PortError> {
        match self.plan_path(id) {
            Some(path) => Self::read_plan(&path),
            None => Ok(None),
        }
    }

    fn set(&self, id: &str, plan: &Plan) -> Result<(), PortError> {
        let path = self.plan_path(id).ok_or_else(|| format!("Invalid plan id: {id:?}"))?;
        let yaml = serde_yaml::to_string(plan)
            .map_err(|e| format!("Failed to serialize plan {id}: {e}"))?;
        std::fs::create_dir_all(self.plans_dir())
            .map_err(|e| format!("Failed to create {}: {e}", self.plans_dir().display()))?;
        std::fs::write(&path, yaml).map_err(|e| format!("Failed to write plan {id}: {e}"))?;
        debug!(path = %path.display(), "saved plan");
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<bool, PortError> {
        let Some(path) = self.plan_path(id) else {
            return Ok(false);
        };
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(format!("Failed to delete plan {id}: {e}").into()),
        }
    }

    fn list(&self) -> Result<Vec<Plan>, PortError> {
        let dir = self.plans_dir();
        let entries = match std::fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(format!("Failed to list {}: {e}", dir.display()).into()),
        };

        let mut plans = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| format!("Failed to list {}: {e}", dir.display()))?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(EXTENSION) {
                continue;
            }
            match Self::read_plan(&path) {
                Ok(Some(plan)) => plans.push(plan),
                Ok(None) => {}
                // Corrupt files are logged and skipped.
                Err(e) => warn!(error = %e, "skipping unreadable plan file"),
            }
        }
        Ok(plans)
    }
}
