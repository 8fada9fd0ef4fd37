/// Icon paths shown next to combat notifications
pub struct NotificationIcon;

impl NotificationIcon {
    pub const CITY: &'static str = "ImprovementIcons/City center";
    pub const DEATH: &'static str = "OtherIcons/DisbandUnit";
    pub const GOLD: &'static str = "StatIcons/Gold";
    pub const QUESTION: &'static str = "OtherIcons/Question";
    /// Crossed swords, used for every fight
    pub const WAR: &'static str = "OtherIcons/Pillage";
}
