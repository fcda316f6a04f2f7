//! Concurrent character registry.
//!
//! Rolls for the same character are serialized: [`Roster::roll`] holds the
//! character's entry for the whole pipeline, so two Willpower rolls racing
//! on a one-point pool cannot both succeed.

use dashmap::DashMap;
use rand::Rng;
use uuid::Uuid;
use vt_core::Character;

use crate::engine::{self, RollOutcome};
use crate::error::{DiceError, DiceResult};

/// Characters keyed by id, shareable across threads.
#[derive(Debug, Default)]
pub struct Roster {
    characters: DashMap<Uuid, Character>,
}

impl Roster {
    /// Create an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a character, returning its id.
    pub fn insert(&self, character: Character) -> Uuid {
        let id = character.id;
        if self.characters.insert(id, character).is_some() {
            tracing::debug!(%id, "character replaced in roster");
        }
        id
    }

    /// A snapshot of a character.
    pub fn get(&self, id: Uuid) -> Option<Character> {
        self.characters.get(&id).map(|c| c.clone())
    }

    /// Remove a character.
    pub fn remove(&self, id: Uuid) -> Option<Character> {
        self.characters.remove(&id).map(|(_, c)| c)
    }

    /// Number of characters.
    pub fn len(&self) -> usize {
        self.characters.len()
    }

    /// Returns true if the roster is empty.
    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    /// Run `f` with exclusive access to one character.
    pub fn with_character<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut Character) -> DiceResult<T>,
    ) -> DiceResult<T> {
        let mut entry = self
            .characters
            .get_mut(&id)
            .ok_or(DiceError::CharacterNotFound(id))?;
        f(entry.value_mut())
    }

    /// Roll an expression for a character, holding it for the duration.
    pub fn roll<R: Rng + ?Sized>(
        &self,
        id: Uuid,
        expression: &str,
        difficulty: u8,
        rng: &mut R,
    ) -> DiceResult<RollOutcome> {
        self.with_character(id, |c| {
            engine::roll_expression(c, expression, difficulty, rng)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use vt_core::{TraitCategory, TraitEntry};

    fn ghoul(willpower: i32) -> Character {
        let mut c = Character::new("Renfield")
            .with_willpower(5)
            .with_current_willpower(willpower);
        c.traits.push(TraitCategory::Attribute, TraitEntry::new("Wits", 2));
        c
    }

    #[test]
    fn insert_get_remove() {
        let roster = Roster::new();
        assert!(roster.is_empty());
        let id = roster.insert(ghoul(3));
        assert_eq!(roster.len(), 1);
        assert_eq!(roster.get(id).map(|c| c.name), Some("Renfield".to_string()));
        assert!(roster.remove(id).is_some());
        assert!(roster.get(id).is_none());
    }

    #[test]
    fn roll_updates_stored_character() {
        let roster = Roster::new();
        let id = roster.insert(ghoul(3));
        let mut rng = StdRng::seed_from_u64(1);
        let out = roster.roll(id, "Wits+WP", 6, &mut rng).unwrap();
        assert!(out.willpower_spent);
        assert_eq!(roster.get(id).map(|c| c.willpower.current), Some(2));
    }

    #[test]
    fn unknown_character() {
        let roster = Roster::new();
        let id = Uuid::new_v4();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            roster.roll(id, "Wits", 6, &mut rng),
            Err(DiceError::CharacterNotFound(id))
        );
    }

    #[test]
    fn concurrent_willpower_rolls_spend_once() {
        let roster = Roster::new();
        let id = roster.insert(ghoul(1));

        let results: Vec<DiceResult<RollOutcome>> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..2u64)
                .map(|seed| {
                    let roster = &roster;
                    s.spawn(move || {
                        let mut rng = StdRng::seed_from_u64(seed);
                        roster.roll(id, "Wits+WP", 6, &mut rng)
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().unwrap())
                .collect()
        });

        let ok = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(ok, 1);
        assert!(results.contains(&Err(DiceError::InsufficientWillpower { current: 0 })));
        assert_eq!(roster.get(id).map(|c| c.willpower.current), Some(0));
    }
}
