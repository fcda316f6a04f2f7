//! The roll pipeline: macros → Willpower → validation → resolution → dice.
//!
//! The only state change is the Willpower debit, and it happens last, after
//! the pool has resolved and the dice are rolled. Any earlier failure leaves
//! the character untouched.

use rand::Rng;
use serde::{Deserialize, Serialize};
use vt_core::Character;

use crate::error::DiceResult;
use crate::macros;
use crate::pool::{self, PoolResolution};
use crate::roll::{self, RollResult};
use crate::willpower;

/// Everything a caller needs to present a roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollOutcome {
    /// The expression after macro expansion, Willpower marker removed.
    pub expression: String,
    /// Difficulty the dice were rolled against.
    pub difficulty: u8,
    /// The resolved pool.
    pub pool: PoolResolution,
    /// The classified dice, Willpower success already applied.
    pub roll: RollResult,
    /// Whether a Willpower point was spent.
    pub willpower_spent: bool,
}

impl RollOutcome {
    /// Number of dice actually rolled.
    pub fn pool_size(&self) -> u32 {
        self.pool.dice()
    }
}

/// Evaluate and roll an expression for a character.
///
/// On success, a requested Willpower point has been debited from
/// `character`. On failure nothing has changed.
pub fn roll_expression<R: Rng + ?Sized>(
    character: &mut Character,
    expression: &str,
    difficulty: u8,
    rng: &mut R,
) -> DiceResult<RollOutcome> {
    let expanded = macros::expand(expression, &character.macros);
    let claim = willpower::process_willpower(&expanded, character)?;
    let pool = pool::resolve(&claim.expression, character)?;

    if pool.total < 0 {
        tracing::debug!(total = pool.total, "negative pool rolls no dice");
    }

    let mut roll = roll::roll(pool.dice(), pool.specialization_used, difficulty, rng);
    let willpower_spent = claim.willpower_spent();
    if let Some(spend) = claim.spend {
        willpower::apply_willpower(&mut roll);
        spend.commit(character)?;
    }

    tracing::info!(
        character = %character.name,
        expression,
        pool = pool.total,
        difficulty,
        successes = roll.successes,
        botch = roll.is_botch,
        willpower_spent,
        "roll complete"
    );

    Ok(RollOutcome {
        expression: claim.expression,
        difficulty,
        pool,
        roll,
        willpower_spent,
    })
}

/// Resolve an expression the way [`roll_expression`] would, without rolling
/// or spending anything. A Willpower marker is ignored.
pub fn preview_pool(character: &Character, expression: &str) -> DiceResult<PoolResolution> {
    let expanded = macros::expand(expression, &character.macros);
    let (cleaned, _) = willpower::strip_marker(&expanded);
    pool::resolve(&cleaned, character)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DiceError;
    use crate::roll::DisplayDie;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use vt_core::{CharacterTraitSet, TraitCategory, TraitEntry};

    fn duelist() -> Character {
        let mut traits = CharacterTraitSet::new();
        traits.push(TraitCategory::Attribute, TraitEntry::new("Dexterity", 3));
        traits.push_ability(
            "Skills",
            TraitEntry::new("Melee", 2).with_specialization("Swords"),
        );
        Character::new("Valerius")
            .with_willpower(5)
            .with_current_willpower(2)
            .with_traits(traits)
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(2024)
    }

    #[test]
    fn willpower_roll_end_to_end() {
        let mut c = duelist();
        let out = roll_expression(&mut c, "Dexterity+Melee[Swords]+WP", 6, &mut rng()).unwrap();
        assert_eq!(out.pool_size(), 5);
        assert!(out.pool.specialization_used);
        assert!(out.willpower_spent);
        assert_eq!(out.roll.dice_rolled(), 5);
        assert_eq!(c.willpower.current, 1);
    }

    #[test]
    fn roll_without_marker_keeps_willpower() {
        let mut c = duelist();
        let out = roll_expression(&mut c, "Dexterity+2", 7, &mut rng()).unwrap();
        assert_eq!(out.pool_size(), 5);
        assert!(!out.willpower_spent);
        assert!(!out.roll.dice.contains(&DisplayDie::Willpower));
        assert_eq!(c.willpower.current, 2);
    }

    #[test]
    fn failed_resolution_spends_nothing() {
        let mut c = duelist();
        let before = c.clone();
        assert_eq!(
            roll_expression(&mut c, "Dexterity+Obfuscate+WP", 6, &mut rng()),
            Err(DiceError::UnresolvedTrait("Obfuscate".to_string()))
        );
        assert!(matches!(
            roll_expression(&mut c, "Dexterity+-1+WP", 6, &mut rng()),
            Err(DiceError::Syntax { .. })
        ));
        assert_eq!(c, before);
    }

    #[test]
    fn oversized_pool_fails_before_rolling() {
        let mut c = duelist();
        assert_eq!(
            roll_expression(&mut c, "2000000000+WP", 6, &mut rng()),
            Err(DiceError::PoolTooLarge {
                size: 2_000_000_000,
                max: crate::roll::MAX_POOL,
            })
        );
        assert_eq!(c.willpower.current, 2);
    }

    #[test]
    fn hyphenated_virtue_rolls_without_the_hyphen() {
        let mut c = duelist();
        c.traits
            .push(TraitCategory::Virtue, TraitEntry::new("Self-Control", 4));
        let out = roll_expression(&mut c, "SelfControl", 6, &mut rng()).unwrap();
        assert_eq!(out.pool_size(), 4);
    }

    #[test]
    fn empty_willpower_aborts_before_rolling() {
        let mut c = duelist().with_current_willpower(0);
        assert_eq!(
            roll_expression(&mut c, "Dexterity+WP", 6, &mut rng()),
            Err(DiceError::InsufficientWillpower { current: 0 })
        );
    }

    #[test]
    fn macro_expansion_matches_inline_expression() {
        let mut c = duelist();
        macros::define(&mut c, "Atk", "Dexterity+Melee[Swords]").unwrap();

        let via_macro = roll_expression(&mut c, "Atk+2", 6, &mut rng()).unwrap();
        let inline = roll_expression(&mut c, "Dexterity+Melee[Swords]+2", 6, &mut rng()).unwrap();
        assert_eq!(via_macro.pool, inline.pool);
        assert_eq!(via_macro.roll, inline.roll);
        assert_eq!(via_macro.expression, "Dexterity+Melee[Swords]+2");
    }

    #[test]
    fn macro_plus_willpower_at_roll_time() {
        let mut c = duelist();
        macros::define(&mut c, "Atk", "Dexterity+Melee[Swords]").unwrap();
        let out = roll_expression(&mut c, "Atk+WP", 6, &mut rng()).unwrap();
        assert_eq!(out.pool_size(), 5);
        assert!(out.willpower_spent);
        assert_eq!(c.willpower.current, 1);
    }

    #[test]
    fn negative_pool_rolls_nothing() {
        let mut c = duelist();
        let out = roll_expression(&mut c, "Melee-5", 6, &mut rng()).unwrap();
        assert_eq!(out.pool.total, -3);
        assert_eq!(out.pool_size(), 0);
        assert!(out.roll.dice.is_empty());
        assert!(!out.roll.is_botch);
    }

    #[test]
    fn willpower_on_empty_pool_still_succeeds_once() {
        let mut c = duelist();
        let out = roll_expression(&mut c, "0+WP", 6, &mut rng()).unwrap();
        assert_eq!(out.roll.successes, 1);
        assert_eq!(out.roll.dice, vec![DisplayDie::Willpower]);
    }

    #[test]
    fn preview_does_not_spend() {
        let mut c = duelist();
        macros::define(&mut c, "Atk", "Dexterity+Melee[Swords]").unwrap();
        let r = preview_pool(&c, "Atk + WP").unwrap();
        assert_eq!(r.describe(), "Dicepool: 5 (using Swords)");
        assert_eq!(c.willpower.current, 2);
    }
}
