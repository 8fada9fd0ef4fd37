//! Evaluation of uniques against the live game: which uniques a holder has,
//! whether their conditionals hold, and the filters they refer to.

mod conditionals;
mod filters;
mod multi_filter;
mod unique_query;

pub use multi_filter::MultiFilter;
pub use unciv_core::unique::{CombatAction, Conditional, StateForConditionals, Unique, UniqueType};
