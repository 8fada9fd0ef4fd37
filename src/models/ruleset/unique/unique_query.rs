use unciv_core::unique::{Conditional, StateForConditionals, Unique, UniqueType};
use unciv_core::{CityId, CivId, UnitId};

use crate::game_info::GameInfo;

impl GameInfo {
    /// Uniques of the unit itself: its type and its promotions
    fn unit_uniques(&self, unit_id: UnitId) -> impl Iterator<Item = &Unique> {
        let unit = self.unit(unit_id);
        let unit_promotions = &self.ruleset.unit_promotions;
        let promotion_uniques = unit
            .promotions
            .promotions
            .iter()
            .filter_map(move |promotion| unit_promotions.get(promotion))
            .flat_map(|promotion| promotion.uniques.iter());
        unit.base_unit(&self.ruleset).uniques.iter().chain(promotion_uniques)
    }

    fn matching<'a>(
        &'a self,
        uniques: impl Iterator<Item = &'a Unique>,
        unique_type: UniqueType,
        state: &StateForConditionals,
    ) -> Vec<&'a Unique> {
        uniques
            .filter(|unique| unique.unique_type == unique_type && !unique.is_triggerable())
            .filter(|unique| self.conditionals_apply(unique, state))
            .collect()
    }

    /// Unit-only uniques whose conditionals hold in `state`
    pub fn unit_matching_uniques(
        &self,
        unit_id: UnitId,
        unique_type: UniqueType,
        state: &StateForConditionals,
    ) -> Vec<&Unique> {
        self.matching(self.unit_uniques(unit_id), unique_type, state)
    }

    /// Unit uniques plus the uniques of the civ owning it
    pub fn unit_matching_uniques_with_civ(
        &self,
        unit_id: UnitId,
        unique_type: UniqueType,
        state: &StateForConditionals,
    ) -> Vec<&Unique> {
        let owner = self.unit(unit_id).owner;
        self.matching(
            self.unit_uniques(unit_id).chain(self.civ(owner).uniques.iter()),
            unique_type,
            state,
        )
    }

    /// Checks the unit's own uniques in its default state
    pub fn unit_has_unique(&self, unit_id: UnitId, unique_type: UniqueType) -> bool {
        let unit = self.unit(unit_id);
        let state = StateForConditionals {
            civ: Some(unit.owner),
            unit: Some(unit_id),
            ..StateForConditionals::default()
        };
        !self.unit_matching_uniques(unit_id, unique_type, &state).is_empty()
    }

    /// City building uniques plus the uniques of the civ owning it
    pub fn city_matching_uniques(
        &self,
        city_id: CityId,
        unique_type: UniqueType,
        state: &StateForConditionals,
    ) -> Vec<&Unique> {
        let city = self.city(city_id);
        self.matching(
            city.uniques.iter().chain(self.civ(city.civ).uniques.iter()),
            unique_type,
            state,
        )
    }

    pub fn civ_matching_uniques(
        &self,
        civ: CivId,
        unique_type: UniqueType,
        state: &StateForConditionals,
    ) -> Vec<&Unique> {
        self.matching(self.civ(civ).uniques.iter(), unique_type, state)
    }

    /// Product of `1 + N%` over the city's uniques of `unique_type` whose city filter (param 1) matches
    pub fn city_aggregate_modifier(&self, city_id: CityId, unique_type: UniqueType) -> f32 {
        let state = StateForConditionals {
            civ: Some(self.city(city_id).civ),
            city: Some(city_id),
            ..StateForConditionals::default()
        };
        self.city_matching_uniques(city_id, unique_type, &state)
            .iter()
            .filter(|unique| self.city_matches_filter(city_id, unique.param(1)))
            .fold(1.0, |modifier, unique| modifier * (1.0 + unique.float_param(0) / 100.0))
    }

    /// Triggered uniques of the unit and its civ that fire on the given trigger
    pub fn unit_triggered_uniques(
        &self,
        unit_id: UnitId,
        trigger: &dyn Fn(&Conditional) -> bool,
    ) -> Vec<Unique> {
        let owner = self.unit(unit_id).owner;
        self.unit_uniques(unit_id)
            .chain(self.civ(owner).uniques.iter())
            .filter(|unique| unique.conditionals.iter().any(|conditional| conditional.is_trigger() && trigger(conditional)))
            .cloned()
            .collect()
    }
}
