use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;
use unciv_core::unique::Unique;
use unciv_core::{CityId, CivId, UnitId, Vector2};

use crate::civilization::diplomacy::{DiplomacyManager, DiplomaticStatus};
use crate::civilization::notification::{Notification, NotificationAction, NotificationCategory};
use crate::civilization::popup_alert::PopupAlert;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerType {
    AI,
    Human,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Civilization {
    pub id: CivId,
    pub civ_name: String,
    pub player_type: PlayerType,
    pub is_barbarian: bool,
    pub is_city_state: bool,

    pub gold: i32,
    pub happiness: i32,
    pub great_general_points: i32,
    pub techs_researched: usize,
    /// Strategic resource balance; negative means more is used than owned
    pub resources: HashMap<String, i32>,
    /// Civ-wide uniques from nation, policies and wonders
    pub uniques: Vec<Unique>,

    pub units: Vec<UnitId>,
    pub cities: Vec<CityId>,
    pub has_ever_owned_original_capital: bool,
    pub is_destroyed: bool,

    pub diplomacy: BTreeMap<CivId, DiplomacyManager>,
    pub attacks_since_turn_start: Vec<Vector2>,

    pub explored_tiles: HashSet<Vector2>,
    pub viewable_tiles: HashSet<Vector2>,
    /// Tiles where this civ can see units that are invisible to others
    pub viewable_invisible_units_tiles: HashSet<Vector2>,

    pub notifications: Vec<Notification>,
    pub popup_alerts: Vec<PopupAlert>,
}

impl Civilization {
    pub fn new(id: CivId, civ_name: &str) -> Self {
        Self {
            id,
            civ_name: civ_name.to_string(),
            player_type: PlayerType::AI,
            is_barbarian: false,
            is_city_state: false,
            gold: 0,
            happiness: 0,
            great_general_points: 0,
            techs_researched: 0,
            resources: HashMap::new(),
            uniques: Vec::new(),
            units: Vec::new(),
            cities: Vec::new(),
            has_ever_owned_original_capital: false,
            is_destroyed: false,
            diplomacy: BTreeMap::new(),
            attacks_since_turn_start: Vec::new(),
            explored_tiles: HashSet::new(),
            viewable_tiles: HashSet::new(),
            viewable_invisible_units_tiles: HashSet::new(),
            notifications: Vec::new(),
            popup_alerts: Vec::new(),
        }
    }

    pub fn is_human(&self) -> bool {
        self.player_type == PlayerType::Human
    }

    pub fn is_major_civ(&self) -> bool {
        !self.is_barbarian && !self.is_city_state
    }

    /// A civ is defeated once it lost every city, or, before ever founding one, every unit
    pub fn is_defeated(&self) -> bool {
        if self.is_barbarian {
            return false;
        }
        if self.has_ever_owned_original_capital {
            self.cities.is_empty()
        } else {
            self.units.is_empty()
        }
    }

    pub fn is_alive(&self) -> bool {
        !self.is_destroyed && !self.is_defeated()
    }

    pub fn knows(&self, other: CivId) -> bool {
        self.diplomacy.contains_key(&other)
    }

    pub fn get_diplomacy_manager(&self, other: CivId) -> Option<&DiplomacyManager> {
        self.diplomacy.get(&other)
    }

    pub fn get_diplomacy_manager_mut(&mut self, other: CivId) -> Option<&mut DiplomacyManager> {
        self.diplomacy.get_mut(&other)
    }

    /// Only answers for relations this civ tracks; barbarian relations are decided by [crate::game_info::GameInfo::is_at_war]
    pub fn is_at_war_with(&self, other: CivId) -> bool {
        self.get_diplomacy_manager(other)
            .is_some_and(|manager| manager.diplomatic_status == DiplomaticStatus::War)
    }

    pub fn get_resource_amount(&self, resource: &str) -> i32 {
        self.resources.get(resource).copied().unwrap_or(0)
    }

    pub fn add_gold(&mut self, amount: i32) {
        self.gold += amount;
    }

    pub fn add_notification(
        &mut self,
        text: impl Into<String>,
        actions: Vec<NotificationAction>,
        category: NotificationCategory,
        icons: &[&str],
    ) {
        let text = text.into();
        debug!(civ = %self.civ_name, "notification: {}", text);
        self.notifications.push(Notification::new(text, actions, category, icons));
    }

    pub fn add_location_notification(
        &mut self,
        text: impl Into<String>,
        location: Vector2,
        category: NotificationCategory,
        icons: &[&str],
    ) {
        self.add_notification(text, vec![NotificationAction::LocationAction { location }], category, icons);
    }
}
