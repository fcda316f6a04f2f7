//! The character aggregate handed to the dice engine.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreResult;
use crate::macros::MacroTable;
use crate::traits::CharacterTraitSet;
use crate::track::Track;

/// Blood pool size and blood-per-turn for a vampire of the given generation.
///
/// Returns `None` outside generations 4 through 16.
pub fn blood_for_generation(generation: u8) -> Option<(i32, i32)> {
    let pair = match generation {
        13..=16 => (10, 1),
        12 => (11, 1),
        11 => (12, 1),
        10 => (13, 1),
        9 => (14, 2),
        8 => (15, 3),
        7 => (20, 4),
        6 => (30, 6),
        5 => (40, 8),
        4 => (50, 10),
        _ => return None,
    };
    Some(pair)
}

/// A character snapshot: rated traits, spendable resources, and macros.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    /// Stable identifier.
    pub id: Uuid,
    /// Character name.
    pub name: String,
    /// Generation, when known. Drives the blood pool size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation: Option<u8>,
    /// Rated traits.
    #[serde(default)]
    pub traits: CharacterTraitSet,
    /// Willpower: `max` is the permanent rating, `current` the spendable pool.
    pub willpower: Track,
    /// Blood pool.
    pub blood: Track,
    /// Saved roll expressions.
    #[serde(default)]
    pub macros: MacroTable,
}

impl Character {
    /// Create a character with empty traits and empty resource tracks.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            generation: None,
            traits: CharacterTraitSet::new(),
            willpower: Track::new("Willpower", 0),
            blood: Track::new("Blood", 0),
            macros: MacroTable::new(),
        }
    }

    /// Set the permanent Willpower rating and refill the pool.
    pub fn with_willpower(mut self, max: i32) -> Self {
        self.willpower = Track::new("Willpower", max);
        self
    }

    /// Set the current Willpower pool, clamped to the rating.
    pub fn with_current_willpower(mut self, current: i32) -> Self {
        self.willpower = Track::with_range("Willpower", current, 0, self.willpower.max);
        self
    }

    /// Set the generation and size the blood pool from it. Generations
    /// outside the table leave the blood track untouched.
    pub fn with_generation(mut self, generation: u8) -> Self {
        self.generation = Some(generation);
        if let Some((max, _)) = blood_for_generation(generation) {
            self.blood = Track::new("Blood", max);
        }
        self
    }

    /// Replace the trait set.
    pub fn with_traits(mut self, traits: CharacterTraitSet) -> Self {
        self.traits = traits;
        self
    }

    /// Blood points this character can spend per turn.
    pub fn blood_per_turn(&self) -> Option<i32> {
        self.generation
            .and_then(blood_for_generation)
            .map(|(_, per_turn)| per_turn)
    }

    /// Spend one point of Willpower.
    pub fn spend_willpower(&mut self) -> CoreResult<i32> {
        let remaining = self.willpower.spend(1)?;
        tracing::debug!(character = %self.name, remaining, "willpower spent");
        Ok(remaining)
    }

    /// Restore Willpower to its permanent rating.
    pub fn reset_willpower(&mut self) {
        tracing::info!(character = %self.name, max = self.willpower.max, "willpower reset");
        self.willpower.refill();
    }

    /// Add blood (e.g. successes on a hunting roll), clamped to the pool size.
    pub fn gain_blood(&mut self, amount: u32) -> i32 {
        let delta = i32::try_from(amount).unwrap_or(i32::MAX);
        let current = self.blood.adjust(delta);
        tracing::debug!(character = %self.name, amount, current, "blood gained");
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::traits::{TraitCategory, TraitEntry};

    #[test]
    fn generation_table_edges() {
        assert_eq!(blood_for_generation(13), Some((10, 1)));
        assert_eq!(blood_for_generation(16), Some((10, 1)));
        assert_eq!(blood_for_generation(4), Some((50, 10)));
        assert_eq!(blood_for_generation(3), None);
        assert_eq!(blood_for_generation(17), None);
    }

    #[test]
    fn builder_sets_resources() {
        let c = Character::new("Lucita")
            .with_willpower(5)
            .with_current_willpower(2)
            .with_generation(9);
        assert_eq!(c.willpower.current, 2);
        assert_eq!(c.willpower.max, 5);
        assert_eq!(c.blood.max, 14);
        assert_eq!(c.blood_per_turn(), Some(2));
    }

    #[test]
    fn spend_willpower_until_empty() {
        let mut c = Character::new("Beckett")
            .with_willpower(3)
            .with_current_willpower(1);
        assert_eq!(c.spend_willpower(), Ok(0));
        assert!(matches!(
            c.spend_willpower(),
            Err(CoreError::InsufficientTrack { current: 0, .. })
        ));
    }

    #[test]
    fn reset_willpower_refills() {
        let mut c = Character::new("Beckett")
            .with_willpower(6)
            .with_current_willpower(0);
        c.reset_willpower();
        assert_eq!(c.willpower.current, 6);
    }

    #[test]
    fn gain_blood_clamps_to_pool() {
        let mut c = Character::new("Anarch").with_generation(13);
        c.blood.adjust(-8);
        assert_eq!(c.gain_blood(3), 5);
        assert_eq!(c.gain_blood(30), 10);
    }

    #[test]
    fn json_round_trip_keeps_traits_and_macros() {
        let mut c = Character::new("Theo").with_willpower(4).with_generation(10);
        c.traits.push(TraitCategory::Attribute, TraitEntry::new("Strength", 3));
        c.macros.insert("Punch", "Strength+2").unwrap();

        let json = serde_json::to_string(&c).unwrap();
        let back: Character = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }
}
