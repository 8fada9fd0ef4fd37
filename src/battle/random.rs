use rand::rngs::StdRng;
use rand::SeedableRng;
use unciv_core::Vector2;

/// Random source that only depends on the turn and the tile, so reloading a save
/// and repeating the same action gives the same outcome
pub fn seeded_random_for_tile(turn: i32, position: Vector2) -> StdRng {
    let seed = ((turn as u32 as u64) << 32) ^ (position.hash_code() as u32 as u64);
    StdRng::seed_from_u64(seed)
}
