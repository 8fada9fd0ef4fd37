mod diplomacy_manager;

pub use diplomacy_manager::{DiplomacyFlags, DiplomacyManager, DiplomaticModifiers, DiplomaticStatus};
