//! Willpower spending for rolls.
//!
//! Spending is two-phase. [`process_willpower`] strips the `+WP` marker and
//! checks the character can pay, handing back a [`PendingSpend`]. The point
//! is only debited by [`PendingSpend::commit`], which the roll pipeline calls
//! after the pool has resolved and the dice are rolled, so a failed
//! expression never costs Willpower.

use uuid::Uuid;
use vt_core::{Character, CoreError};

use crate::error::{DiceError, DiceResult};
use crate::expression::compact;
use crate::roll::{DisplayDie, RollResult};

/// The marker that spends one point of Willpower, matched case-insensitively.
pub const WILLPOWER_MARKER: &str = "+WP";

/// Remove every Willpower marker from an expression.
///
/// Whitespace is removed first so `+ wp` is recognized. The marker is a
/// control token, not a term, so it is matched anywhere in the text.
/// Returns the cleaned expression and whether a marker was found.
pub fn strip_marker(expression: &str) -> (String, bool) {
    let source = compact(expression);
    let lower = source.to_ascii_lowercase();
    let marker = WILLPOWER_MARKER.to_ascii_lowercase();

    let mut cleaned = String::with_capacity(source.len());
    let mut found = false;
    let mut rest = 0;
    while let Some(offset) = lower[rest..].find(&marker) {
        let at = rest + offset;
        cleaned.push_str(&source[rest..at]);
        rest = at + marker.len();
        found = true;
    }
    cleaned.push_str(&source[rest..]);
    (cleaned, found)
}

/// Returns true if the expression carries a Willpower marker.
pub fn has_marker(expression: &str) -> bool {
    strip_marker(expression).1
}

/// An approved but not yet debited Willpower point.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a pending spend does nothing until committed"]
pub struct PendingSpend {
    character: Uuid,
}

impl PendingSpend {
    /// Debit one Willpower point. Fails without touching the character if
    /// its Willpower ran out since the spend was approved.
    pub fn commit(self, character: &mut Character) -> DiceResult<i32> {
        debug_assert_eq!(
            self.character, character.id,
            "willpower spend committed to a different character"
        );
        character.spend_willpower().map_err(|e| match e {
            CoreError::InsufficientTrack { current, .. } => {
                DiceError::InsufficientWillpower { current }
            }
            other => DiceError::Core(other),
        })
    }
}

/// The cleaned expression plus the Willpower spend it asked for.
#[derive(Debug, PartialEq, Eq)]
pub struct WillpowerClaim {
    /// Expression with the marker removed.
    pub expression: String,
    /// Present if the marker was found and the character can pay.
    pub spend: Option<PendingSpend>,
}

impl WillpowerClaim {
    /// Whether this claim will spend Willpower when committed.
    pub fn willpower_spent(&self) -> bool {
        self.spend.is_some()
    }
}

/// Detect and strip the Willpower marker, checking the character can pay.
///
/// Fails with [`DiceError::InsufficientWillpower`] if the marker is present
/// and the character's current Willpower is below one. Nothing is debited.
pub fn process_willpower(expression: &str, character: &Character) -> DiceResult<WillpowerClaim> {
    let (cleaned, found) = strip_marker(expression);
    if !found {
        return Ok(WillpowerClaim {
            expression: cleaned,
            spend: None,
        });
    }

    if !character.willpower.can_spend(1) {
        tracing::warn!(
            character = %character.name,
            current = character.willpower.current,
            "willpower spend refused"
        );
        return Err(DiceError::InsufficientWillpower {
            current: character.willpower.current,
        });
    }

    Ok(WillpowerClaim {
        expression: cleaned,
        spend: Some(PendingSpend {
            character: character.id,
        }),
    })
}

/// Apply the Willpower automatic success to a finished roll.
///
/// If any 1s were rolled, the Willpower success absorbs one of them instead
/// of adding a success. Otherwise one success is added and shown as a
/// Willpower entry. Botch status is recomputed afterwards.
pub fn apply_willpower(roll: &mut RollResult) {
    if roll.ones_rolled > 0 {
        roll.ones_rolled -= 1;
    } else {
        roll.successes += 1;
        roll.dice.push(DisplayDie::Willpower);
    }
    roll.is_botch = roll.successes == 0 && roll.ones_rolled > 0;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roll::classify;

    fn character(current: i32) -> Character {
        Character::new("Jack")
            .with_willpower(5)
            .with_current_willpower(current)
    }

    #[test]
    fn strip_marker_any_case_and_spacing() {
        assert_eq!(strip_marker("Dexterity+WP"), ("Dexterity".to_string(), true));
        assert_eq!(strip_marker("Dexterity + wp + 2"), ("Dexterity+2".to_string(), true));
        assert_eq!(strip_marker("+Wp+Dexterity"), ("+Dexterity".to_string(), true));
        assert_eq!(strip_marker("Dexterity+Melee"), ("Dexterity+Melee".to_string(), false));
    }

    #[test]
    fn strip_marker_removes_every_occurrence() {
        assert_eq!(strip_marker("Wits+WP+wP"), ("Wits".to_string(), true));
    }

    #[test]
    fn bare_wp_without_plus_is_not_a_marker() {
        assert!(!has_marker("WP+Dexterity"));
        assert!(has_marker("Dexterity+WP"));
    }

    #[test]
    fn claim_without_marker_spends_nothing() {
        let claim = process_willpower("Dexterity", &character(0)).unwrap();
        assert!(!claim.willpower_spent());
        assert_eq!(claim.expression, "Dexterity");
    }

    #[test]
    fn claim_with_no_willpower_fails() {
        assert_eq!(
            process_willpower("Dexterity+WP", &character(0)),
            Err(DiceError::InsufficientWillpower { current: 0 })
        );
    }

    #[test]
    fn claim_does_not_debit_until_commit() {
        let mut c = character(2);
        let claim = process_willpower("Dexterity+WP", &c).unwrap();
        assert_eq!(c.willpower.current, 2);

        let spend = claim.spend.unwrap();
        assert_eq!(spend.commit(&mut c), Ok(1));
        assert_eq!(c.willpower.current, 1);
    }

    #[test]
    fn commit_rechecks_balance() {
        let mut c = character(1);
        let claim = process_willpower("Wits+WP", &c).unwrap();
        c.spend_willpower().unwrap();
        assert_eq!(
            claim.spend.unwrap().commit(&mut c),
            Err(DiceError::InsufficientWillpower { current: 0 })
        );
    }

    #[test]
    fn willpower_absorbs_a_one() {
        let mut r = classify(&[1, 4], false, 6);
        assert!(r.is_botch);
        apply_willpower(&mut r);
        assert_eq!(r.ones_rolled, 0);
        assert_eq!(r.successes, 0);
        assert!(!r.is_botch);
        assert!(!r.dice.contains(&DisplayDie::Willpower));
    }

    #[test]
    fn willpower_adds_a_success_without_ones() {
        let mut r = classify(&[3, 7], false, 6);
        apply_willpower(&mut r);
        assert_eq!(r.successes, 2);
        assert_eq!(r.dice.last(), Some(&DisplayDie::Willpower));
        assert_eq!(r.to_string(), "*3* 7 WP");
    }

    #[test]
    fn willpower_on_empty_pool_is_one_success() {
        let mut r = classify(&[], false, 6);
        apply_willpower(&mut r);
        assert_eq!(r.successes, 1);
        assert_eq!(r.headline(), "1 Success");
    }
}
