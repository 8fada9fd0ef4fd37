use unciv_core::Vector2;

use crate::battle::combatant::Combatant;

/// One way to attack: where to strike from, what to strike, and what moving there leaves over.
#[derive(Debug, Clone, PartialEq)]
pub struct AttackableTile {
    pub tile_to_attack_from: Vector2,
    pub tile_to_attack: Vector2,
    /// Movement left once standing on `tile_to_attack_from`, set-up costs included
    pub movement_left_after_moving_to_attack_tile: f32,
    /// None for empty tiles, which only nukes and air sweeps target
    pub combatant: Option<Combatant>,
}

impl AttackableTile {
    pub fn new(
        tile_to_attack_from: Vector2,
        tile_to_attack: Vector2,
        movement_left_after_moving_to_attack_tile: f32,
        combatant: Option<Combatant>,
    ) -> Self {
        Self {
            tile_to_attack_from,
            tile_to_attack,
            movement_left_after_moving_to_attack_tile,
            combatant,
        }
    }
}
