//! Character data model for vitae.
//!
//! Holds everything the dice engine reads: rated traits grouped by category,
//! Willpower and Blood tracks, and the per-character macro table. This crate
//! knows nothing about dice; see `vt-dice` for expression evaluation.

/// The character aggregate and generation table.
pub mod character;
/// Error types used throughout the crate.
pub mod error;
/// Per-character macro storage.
pub mod macros;
/// Clamped resource counters.
pub mod track;
/// Rated traits, specializations, and category lookup.
pub mod traits;

/// Re-export the character aggregate.
pub use character::{Character, blood_for_generation};
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export macro storage.
pub use macros::{Macro, MacroTable, is_valid_macro_name};
/// Re-export resource tracks.
pub use track::Track;
/// Re-export trait types.
pub use traits::{AbilityGroup, CharacterTraitSet, TraitCategory, TraitEntry, normalize_name};
