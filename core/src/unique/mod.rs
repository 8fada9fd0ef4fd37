pub mod state_for_conditionals;
pub mod unique;
pub mod unique_type;

pub use state_for_conditionals::StateForConditionals;
pub use unique::{CombatAction, Conditional, Unique};
pub use unique_type::UniqueType;
