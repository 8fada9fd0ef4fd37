use serde::{Deserialize, Serialize};
use unciv_core::{UnitId, Vector2};

/// Category - UI grouping, within a Category the most recent Notification will be shown on top
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotificationCategory {
    General,
    Diplomacy,
    Units,
    War,
    Cities,
}

/// Actions that can be performed when clicking a notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NotificationAction {
    LocationAction { location: Vector2 },
    CivilopediaAction { link: String },
    MapUnitAction { location: Vector2, unit: UnitId },
}

impl NotificationAction {
    /// One location action per given position, for notifications that point at several tiles
    pub fn locations(positions: &[Vector2]) -> Vec<NotificationAction> {
        positions
            .iter()
            .map(|location| NotificationAction::LocationAction { location: *location })
            .collect()
    }
}

/// Represents a game notification with text, icons, and actions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    /// The notification text, untranslated - `[]` marks the parts to translate separately
    pub text: String,
    pub category: NotificationCategory,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub icons: Vec<String>,
    /// Actions on clicking a Notification - activated round-robin style
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub actions: Vec<NotificationAction>,
}

impl Notification {
    pub fn new(text: String, actions: Vec<NotificationAction>, category: NotificationCategory, icons: &[&str]) -> Self {
        Self {
            text,
            category,
            icons: icons.iter().map(|icon| icon.to_string()).collect(),
            actions,
        }
    }
}
