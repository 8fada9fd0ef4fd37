use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlertType {
    Defeated,
    CityConquered,
    RecapturedCivilian,
}

/// A modal the player has to acknowledge; `value` identifies its subject (civ name, city id, unit id)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopupAlert {
    pub alert_type: AlertType,
    pub value: String,
}

impl PopupAlert {
    pub fn new(alert_type: AlertType, value: impl Into<String>) -> Self {
        Self {
            alert_type,
            value: value.into(),
        }
    }
}
