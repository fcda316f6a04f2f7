//! Dice-pool expression engine for vitae.
//!
//! Evaluates expressions such as `Dexterity+Melee[Swords]+WP` against a
//! character: macros are expanded, the Willpower marker is checked, the
//! remaining terms are resolved to a pool size, and that many d10s are
//! rolled against a difficulty with crits, 1-cancellation and botches.

pub mod config;
pub mod engine;
pub mod error;
pub mod expression;
/// Token definitions for pool expressions.
pub mod lexer;
pub mod macros;
pub mod pool;
pub mod roll;
pub mod roster;
pub mod willpower;

pub use config::{MAX_DIFFICULTY, MIN_DIFFICULTY, RollConfig};
pub use engine::{RollOutcome, preview_pool, roll_expression};
pub use error::{DiceError, DiceResult};
pub use expression::{ParsedTerm, Sign, TermKind, tokenize};
pub use pool::{PoolResolution, resolve};
pub use roll::{DIE_SIDES, DisplayDie, MAX_POOL, RollResult, classify, roll};
pub use roster::Roster;
pub use willpower::{PendingSpend, WILLPOWER_MARKER, WillpowerClaim, apply_willpower, process_willpower};
