//! Resource tracks (Willpower, Blood).
//!
//! A track is a clamped counter. Spending is checked and never goes below
//! the minimum; gains clamp at the maximum.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// A named numeric resource clamped between min and max.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Display name of the track.
    pub name: String,
    /// Current value.
    pub current: i32,
    /// Maximum value (permanent rating).
    pub max: i32,
    /// Minimum value.
    #[serde(default)]
    pub min: i32,
}

impl Track {
    /// Create a full track.
    pub fn new(name: impl Into<String>, max: i32) -> Self {
        Self {
            name: name.into(),
            current: max,
            max,
            min: 0,
        }
    }

    /// Create a track at a specific value, clamped to `[min, max]`.
    pub fn with_range(name: impl Into<String>, current: i32, min: i32, max: i32) -> Self {
        Self {
            name: name.into(),
            current: current.clamp(min, max),
            max,
            min,
        }
    }

    /// Adjust by a delta, clamping to bounds. Returns the new value.
    pub fn adjust(&mut self, delta: i32) -> i32 {
        // Not `clamp`: a hand-edited file may carry min > max.
        self.current = self.current.saturating_add(delta).min(self.max).max(self.min);
        self.current
    }

    /// Returns true if `amount` points can be spent.
    pub fn can_spend(&self, amount: i32) -> bool {
        self.current
            .checked_sub(amount)
            .is_some_and(|left| left >= self.min)
    }

    /// Spend `amount` points. Fails without touching the track if it would
    /// drop below the minimum.
    pub fn spend(&mut self, amount: i32) -> CoreResult<i32> {
        if !self.can_spend(amount) {
            return Err(CoreError::InsufficientTrack {
                track: self.name.clone(),
                current: self.current,
                needed: amount,
            });
        }
        self.current -= amount;
        Ok(self.current)
    }

    /// Restore to the maximum.
    pub fn refill(&mut self) {
        self.current = self.max;
    }

    /// Returns true if the track is at its minimum.
    pub fn is_empty(&self) -> bool {
        self.current <= self.min
    }

    /// Returns true if the track is at its maximum.
    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }
}

impl std::fmt::Display for Track {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}/{}", self.name, self.current, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_starts_full() {
        let t = Track::new("Willpower", 5);
        assert_eq!(t.current, 5);
        assert!(t.is_full());
        assert!(!t.is_empty());
    }

    #[test]
    fn with_range_clamps_initial() {
        let t = Track::with_range("Blood", 40, 0, 13);
        assert_eq!(t.current, 13);
    }

    #[test]
    fn spend_decrements() {
        let mut t = Track::with_range("Willpower", 2, 0, 5);
        assert_eq!(t.spend(1), Ok(1));
        assert_eq!(t.current, 1);
    }

    #[test]
    fn spend_refuses_overdraft() {
        let mut t = Track::with_range("Willpower", 0, 0, 5);
        let err = t.spend(1).unwrap_err();
        assert_eq!(
            err,
            CoreError::InsufficientTrack {
                track: "Willpower".to_string(),
                current: 0,
                needed: 1,
            }
        );
        assert_eq!(t.current, 0);
    }

    #[test]
    fn adjust_clamps_both_ways() {
        let mut t = Track::with_range("Blood", 3, 0, 10);
        assert_eq!(t.adjust(20), 10);
        assert_eq!(t.adjust(-50), 0);
        assert!(t.is_empty());
    }

    #[test]
    fn refill_restores_max() {
        let mut t = Track::with_range("Willpower", 1, 0, 6);
        t.refill();
        assert_eq!(t.current, 6);
    }

    #[test]
    fn display() {
        let t = Track::with_range("Willpower", 2, 0, 5);
        assert_eq!(t.to_string(), "Willpower: 2/5");
    }

    #[test]
    fn extreme_values_from_a_file_do_not_overflow() {
        let mut t: Track = serde_json::from_str(
            r#"{"name":"Willpower","current":-2147483648,"max":5}"#,
        )
        .unwrap();
        assert!(!t.can_spend(1));
        assert!(t.spend(1).is_err());
        assert_eq!(t.current, i32::MIN);
        assert_eq!(t.adjust(i32::MIN), 0);

        let mut full = Track::new("Blood", 10);
        assert_eq!(full.adjust(i32::MAX), 10);
    }
}
