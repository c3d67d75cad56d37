//! Domain records shared by the session, the bulk operations and the
//! gateway implementations.
//!
//! These are storage-agnostic: the database crate maps its rows into them and
//! the in-memory gateway stores them directly.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Status constants
// ---------------------------------------------------------------------------

pub const STATUS_NOT_STARTED: &str = "not-started";
pub const STATUS_ONGOING: &str = "ongoing";
pub const STATUS_COMPLETED: &str = "completed";
pub const STATUS_EXPORTED: &str = "exported";
pub const STATUS_UPLOADED: &str = "uploaded";

/// All valid status strings, in workflow order.
pub const VALID_STATUSES: &[&str] = &[
    STATUS_NOT_STARTED,
    STATUS_ONGOING,
    STATUS_COMPLETED,
    STATUS_EXPORTED,
    STATUS_UPLOADED,
];

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Workflow status of a missing asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AssetStatus {
    #[default]
    NotStarted,
    Ongoing,
    Completed,
    Exported,
    Uploaded,
}

impl AssetStatus {
    /// Convert from a stored string value.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            STATUS_NOT_STARTED => Ok(Self::NotStarted),
            STATUS_ONGOING => Ok(Self::Ongoing),
            STATUS_COMPLETED => Ok(Self::Completed),
            STATUS_EXPORTED => Ok(Self::Exported),
            STATUS_UPLOADED => Ok(Self::Uploaded),
            _ => Err(format!(
                "Invalid status '{s}'. Must be one of: {}",
                VALID_STATUSES.join(", ")
            )),
        }
    }

    /// Convert to the stored string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => STATUS_NOT_STARTED,
            Self::Ongoing => STATUS_ONGOING,
            Self::Completed => STATUS_COMPLETED,
            Self::Exported => STATUS_EXPORTED,
            Self::Uploaded => STATUS_UPLOADED,
        }
    }
}

impl std::fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Requested designer change for a bulk operation.
///
/// `Unassigned` clears the designer; `Unchanged` leaves it alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", content = "designer_id", rename_all = "snake_case")]
pub enum DesignerChange {
    #[default]
    Unchanged,
    Unassigned,
    Assign(DbId),
}

impl DesignerChange {
    /// The designer value to write, or `None` when nothing should be written.
    pub fn target(&self) -> Option<Option<DbId>> {
        match self {
            Self::Unchanged => None,
            Self::Unassigned => Some(None),
            Self::Assign(id) => Some(Some(*id)),
        }
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A brand attached to one asset, with the per-asset reflection state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetBrand {
    pub brand_id: DbId,
    pub name: String,
    pub color: Option<String>,
    pub reflected: bool,
    pub reflected_by: Option<String>,
    pub reflected_at: Option<Timestamp>,
}

/// A tracked missing game asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: DbId,
    pub game_name: String,
    pub provider: String,
    pub brands: Vec<AssetBrand>,
    pub status: AssetStatus,
    pub designer_id: Option<DbId>,
    pub found_by: Option<String>,
    pub date_found: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Asset {
    /// Whether `brand_id` is already attached to this asset.
    pub fn has_brand(&self, brand_id: DbId) -> bool {
        self.brands.iter().any(|b| b.brand_id == brand_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    pub id: DbId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brand {
    pub id: DbId,
    pub name: String,
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Designer {
    pub id: DbId,
    pub name: String,
    pub avatar: Option<String>,
    pub email: Option<String>,
}

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Input for inserting one asset.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct NewAsset {
    #[validate(length(min = 1, max = 300))]
    pub game_name: String,
    #[validate(length(min = 1, max = 200))]
    pub provider: String,
    #[serde(default)]
    pub brand_ids: Vec<DbId>,
    #[serde(default)]
    pub status: AssetStatus,
    pub designer_id: Option<DbId>,
    pub found_by: Option<String>,
    pub date_found: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl NewAsset {
    /// Reject names that are blank once trimmed. Length limits are left to
    /// the `Validate` derive.
    pub fn check_names(&self) -> Result<(), CoreError> {
        if self.game_name.trim().is_empty() {
            return Err(CoreError::Validation("A game name is required".to_string()));
        }
        if self.provider.trim().is_empty() {
            return Err(CoreError::Validation("A provider is required".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewProvider {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewBrand {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub color: Option<String>,
}

/// Partial brand update; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct BrandPatch {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewDesigner {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub avatar: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct DesignerPatch {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub avatar: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
}

/// Remote-side filter: equality on provider (case-insensitive) and status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AssetFilter {
    pub provider: Option<String>,
    pub status: Option<AssetStatus>,
}

impl AssetFilter {
    pub fn matches(&self, asset: &Asset) -> bool {
        let provider_ok = self
            .provider
            .as_deref()
            .map_or(true, |p| crate::normalize::same_provider(p, &asset.provider));
        let status_ok = self.status.map_or(true, |s| s == asset.status);
        provider_ok && status_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_str() {
        for s in VALID_STATUSES {
            assert_eq!(AssetStatus::from_str_value(s).unwrap().as_str(), *s);
        }
        assert!(AssetStatus::from_str_value("done").is_err());
    }

    #[test]
    fn status_serializes_kebab_case() {
        let json = serde_json::to_string(&AssetStatus::NotStarted).unwrap();
        assert_eq!(json, "\"not-started\"");
    }

    #[test]
    fn designer_change_deserializes_all_modes() {
        let unchanged: DesignerChange = serde_json::from_str(r#"{"mode":"unchanged"}"#).unwrap();
        let cleared: DesignerChange = serde_json::from_str(r#"{"mode":"unassigned"}"#).unwrap();
        let assigned: DesignerChange =
            serde_json::from_str(r#"{"mode":"assign","designer_id":7}"#).unwrap();

        assert_eq!(unchanged.target(), None);
        assert_eq!(cleared.target(), Some(None));
        assert_eq!(assigned.target(), Some(Some(7)));
    }

    #[test]
    fn new_asset_requires_names() {
        let input = NewAsset {
            game_name: String::new(),
            provider: "Pragmatic".into(),
            ..Default::default()
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn whitespace_names_are_rejected() {
        let input = NewAsset {
            game_name: "   ".into(),
            provider: "Pragmatic".into(),
            ..Default::default()
        };
        assert!(input.validate().is_ok());
        assert!(matches!(input.check_names(), Err(CoreError::Validation(_))));

        let input = NewAsset {
            game_name: "Wolf Gold".into(),
            provider: "\t".into(),
            ..Default::default()
        };
        assert!(input.check_names().is_err());
    }
}
