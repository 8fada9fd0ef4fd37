mod civilization;
pub mod diplomacy;
pub mod notification;
pub mod notification_icons;
pub mod popup_alert;

pub use civilization::{Civilization, PlayerType};
pub use notification::{Notification, NotificationAction, NotificationCategory};
pub use notification_icons::NotificationIcon;
pub use popup_alert::{AlertType, PopupAlert};
