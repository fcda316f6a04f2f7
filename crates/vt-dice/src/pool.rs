//! Pool resolution: turning validated terms into a number of dice.

use serde::{Deserialize, Serialize};
use vt_core::{Character, normalize_name};

use crate::error::{DiceError, DiceResult};
use crate::expression::{self, ParsedTerm, TermKind};
use crate::roll::MAX_POOL;

/// Pseudo-traits that read the character's current Willpower pool.
const CURRENT_WILLPOWER: [&str; 2] = ["currentwillpower", "tempwillpower"];
/// Pseudo-traits that read the character's permanent Willpower rating.
const MAX_WILLPOWER: [&str; 2] = ["willpower", "maxwillpower"];

/// The signed total of an expression and the specializations it used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolResolution {
    /// Signed sum of all terms. May be zero or negative.
    pub total: i32,
    /// True if any term matched one of its trait's specializations.
    pub specialization_used: bool,
    /// Display names of matched specializations, first-encountered order.
    pub specializations_applied: Vec<String>,
}

impl PoolResolution {
    /// Number of dice to roll: the total, floored at zero.
    pub fn dice(&self) -> u32 {
        u32::try_from(self.total).unwrap_or(0)
    }

    /// Short description such as `Dicepool: 5 (using Swords)`.
    pub fn describe(&self) -> String {
        if self.specializations_applied.is_empty() {
            format!("Dicepool: {}", self.total)
        } else {
            format!(
                "Dicepool: {} (using {})",
                self.total,
                self.specializations_applied.join(", ")
            )
        }
    }
}

/// Validate and resolve an expression against a character.
///
/// Fails as a unit: a syntax error or a single unknown trait rejects the
/// whole expression rather than producing a partial total.
pub fn resolve(expression: &str, character: &Character) -> DiceResult<PoolResolution> {
    let terms = expression::tokenize(expression)?;
    resolve_terms(&terms, character)
}

/// Resolve already-tokenized terms against a character.
///
/// A total above [`MAX_POOL`] is rejected rather than rolled.
pub fn resolve_terms(terms: &[ParsedTerm], character: &Character) -> DiceResult<PoolResolution> {
    let mut resolution = PoolResolution::default();

    for term in terms {
        let value = match &term.kind {
            TermKind::Number(n) => saturate(*n),
            TermKind::Trait { name, spec } => {
                let (value, applied) = trait_value(character, name, spec.as_deref())?;
                if let Some(applied) = applied {
                    resolution.specialization_used = true;
                    resolution.specializations_applied.push(applied);
                }
                value
            }
        };
        resolution.total = resolution
            .total
            .saturating_add(term.sign.factor().saturating_mul(value));
    }

    if resolution.dice() > MAX_POOL {
        return Err(DiceError::PoolTooLarge {
            size: resolution.total,
            max: MAX_POOL,
        });
    }

    tracing::debug!(
        character = %character.name,
        total = resolution.total,
        specs = ?resolution.specializations_applied,
        "pool resolved"
    );
    Ok(resolution)
}

/// Value of one named term and the specialization it matched, if any.
///
/// A specialization the trait does not have is not an error; the base value
/// still counts.
fn trait_value(
    character: &Character,
    name: &str,
    spec: Option<&str>,
) -> DiceResult<(i32, Option<String>)> {
    let key = normalize_name(name);
    if CURRENT_WILLPOWER.contains(&key.as_str()) {
        return Ok((character.willpower.current, None));
    }
    if MAX_WILLPOWER.contains(&key.as_str()) {
        return Ok((character.willpower.max, None));
    }

    let (_, entry) = character
        .traits
        .lookup(name)
        .ok_or_else(|| DiceError::UnresolvedTrait(name.to_string()))?;

    let applied = spec
        .and_then(|s| entry.specialization(s))
        .map(str::to_string);
    Ok((saturate(entry.value), applied))
}

/// Returns true if `name` already refers to a trait or Willpower pseudo-trait.
pub(crate) fn names_trait(character: &Character, name: &str) -> bool {
    let key = normalize_name(name);
    CURRENT_WILLPOWER.contains(&key.as_str())
        || MAX_WILLPOWER.contains(&key.as_str())
        || character.traits.lookup(name).is_some()
}

fn saturate(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}
