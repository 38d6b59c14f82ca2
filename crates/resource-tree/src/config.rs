//! Tree Configuration
//!
//! Every field is defaulted so a partial JSON override is enough.

use serde::{Deserialize, Serialize};

use crate::error::{TreeError, TreeResult};
use crate::sort::SortSpec;

/// Permission required to drag or otherwise restructure resources
pub const DEFAULT_EDIT_PERMISSION: &str = "resources.edit";

/// Movement threshold in pixels before a press turns into a drag
pub const DEFAULT_DRAG_THRESHOLD_PX: f64 = 5.0;

/// Share of a row's height at the top and bottom that means before / after
pub const DEFAULT_EDGE_FRACTION: f64 = 0.25;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    pub read_only: bool,
    pub drag_threshold_px: f64,
    pub edge_fraction: f64,
    pub edit_permission: String,
    pub sort: SortSpec,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            read_only: false,
            drag_threshold_px: DEFAULT_DRAG_THRESHOLD_PX,
            edge_fraction: DEFAULT_EDGE_FRACTION,
            edit_permission: DEFAULT_EDIT_PERMISSION.to_string(),
            sort: SortSpec::default(),
        }
    }
}

impl TreeConfig {
    /// Parse and validate a JSON override
    pub fn from_json(json: &str) -> TreeResult<Self> {
        let config: TreeConfig =
            serde_json::from_str(json).map_err(|e| TreeError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> TreeResult<()> {
        if !(self.edge_fraction > 0.0 && self.edge_fraction <= 0.5) {
            return Err(TreeError::InvalidConfig(format!(
                "edge_fraction must be in (0, 0.5], got {}",
                self.edge_fraction
            )));
        }
        if !(self.drag_threshold_px >= 0.0) {
            return Err(TreeError::InvalidConfig(format!(
                "drag_threshold_px must not be negative, got {}",
                self.drag_threshold_px
            )));
        }
        if self.edit_permission.trim().is_empty() {
            return Err(TreeError::InvalidConfig("edit_permission must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort::{SortKey, SortOrder};

    #[test]
    fn test_partial_override() {
        let config = TreeConfig::from_json(r#"{"read_only": true, "sort": {"key": "modified", "order": "desc"}}"#).unwrap();
        assert!(config.read_only);
        assert_eq!(config.sort, SortSpec::new(SortKey::Modified, SortOrder::Desc));
        assert_eq!(config.drag_threshold_px, DEFAULT_DRAG_THRESHOLD_PX);
        assert_eq!(config.edit_permission, DEFAULT_EDIT_PERMISSION);
    }

    #[test]
    fn test_rejects_bad_edge_fraction() {
        let err = TreeConfig::from_json(r#"{"edge_fraction": 0.75}"#).unwrap_err();
        assert!(matches!(err, TreeError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(TreeConfig::from_json("{read_only").is_err());
    }

    #[test]
    fn test_default_is_valid() {
        assert!(TreeConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_sorts_by_id() {
        let config = TreeConfig::from_json("{}").unwrap();
        assert_eq!(config.sort.key, crate::sort::SortKey::Id);
        assert_eq!(config, TreeConfig::default());
    }
}
