//! d10 pool rolling and success classification.
//!
//! Each die at or above the difficulty scores one success. With an eligible
//! specialization a 10 is a crit worth two. Every rolled 1 cancels one
//! success, lowest successful die first; a roll with no net successes and
//! at least one 1 is a botch.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Number of faces on a pool die.
pub const DIE_SIDES: u8 = 10;

/// Largest pool that will be rolled. Real pools stay well under 30.
pub const MAX_POOL: u32 = 100;

/// One entry of a roll's display, tagged for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayDie {
    /// A rolled 1, or a success a 1 canceled. Shown struck through.
    Canceled(u8),
    /// Below difficulty. Shown in italics.
    Failure(u8),
    /// A plain success.
    Success(u8),
    /// A specialization 10 worth two successes. Shown in bold.
    Crit(u8),
    /// The automatic success bought with Willpower.
    Willpower,
}

impl fmt::Display for DisplayDie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Canceled(v) => write!(f, "~~{v}~~"),
            Self::Failure(v) => write!(f, "*{v}*"),
            Self::Success(v) => write!(f, "{v}"),
            Self::Crit(v) => write!(f, "**{v}**"),
            Self::Willpower => write!(f, "WP"),
        }
    }
}

/// The classified result of one pool roll.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollResult {
    /// Dice in display order: canceled, failures, successes, crits, then
    /// any Willpower entry.
    pub dice: Vec<DisplayDie>,
    /// Net successes after crits and cancellation. Never negative.
    pub successes: u32,
    /// No net successes and at least one 1.
    pub is_botch: bool,
    /// Number of 1s rolled.
    pub ones_rolled: u32,
}

impl RollResult {
    /// Markdown rendering of each die, in display order.
    pub fn formatted(&self) -> Vec<String> {
        self.dice.iter().map(DisplayDie::to_string).collect()
    }

    /// Number of physical dice rolled (Willpower entries excluded).
    pub fn dice_rolled(&self) -> usize {
        self.dice
            .iter()
            .filter(|d| !matches!(d, DisplayDie::Willpower))
            .count()
    }

    /// `BOTCH`, `1 Success`, or `N Successes`.
    pub fn headline(&self) -> String {
        if self.is_botch {
            "BOTCH".to_string()
        } else if self.successes == 1 {
            "1 Success".to_string()
        } else {
            format!("{} Successes", self.successes)
        }
    }
}

impl fmt::Display for RollResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.formatted().join(" "))
    }
}

/// Roll `pool` ten-sided dice and classify them.
pub fn roll<R: Rng + ?Sized>(
    pool: u32,
    specialization: bool,
    difficulty: u8,
    rng: &mut R,
) -> RollResult {
    let faces: Vec<u8> = (0..pool)
        .map(|_| rng.random_range(1..=DIE_SIDES))
        .collect();
    let result = classify(&faces, specialization, difficulty);
    tracing::debug!(
        pool,
        difficulty,
        specialization,
        successes = result.successes,
        botch = result.is_botch,
        "dice rolled"
    );
    result
}

/// Classify already-rolled faces.
///
/// Deterministic: the same faces always give the same result, which is what
/// tests use to inject exact dice.
pub fn classify(faces: &[u8], specialization: bool, difficulty: u8) -> RollResult {
    let is_crit = |v: u8| specialization && v == DIE_SIDES;
    let is_success = |v: u8| v != 1 && (is_crit(v) || v >= difficulty);

    // Stable: equal faces keep draw order.
    let mut order: Vec<usize> = (0..faces.len()).collect();
    order.sort_by_key(|&i| faces[i]);

    let successful: Vec<usize> = order
        .iter()
        .copied()
        .filter(|&i| is_success(faces[i]))
        .collect();
    let gross: u32 = successful
        .iter()
        .map(|&i| if is_crit(faces[i]) { 2 } else { 1 })
        .sum();
    let ones_rolled = count_u32(faces.iter().filter(|&&v| v == 1).count());

    // Each 1 cancels one success, lowest dice first. A crit hit by a
    // single remaining 1 loses one of its two successes and stays visible
    // as a plain success.
    let mut canceled = vec![false; faces.len()];
    let mut halved = vec![false; faces.len()];
    let mut budget = ones_rolled;
    for &i in &successful {
        let worth = if is_crit(faces[i]) { 2 } else { 1 };
        if budget >= worth {
            canceled[i] = true;
            budget -= worth;
        } else if budget > 0 {
            halved[i] = true;
            budget = 0;
        } else {
            break;
        }
    }

    let successes = gross.saturating_sub(ones_rolled);
    let is_botch = successes == 0 && ones_rolled > 0;

    let mut struck = Vec::new();
    let mut failures = Vec::new();
    let mut plain = Vec::new();
    let mut crits = Vec::new();
    for &i in &order {
        let v = faces[i];
        if v == 1 || canceled[i] {
            struck.push(DisplayDie::Canceled(v));
        } else if is_crit(v) && !halved[i] {
            crits.push(DisplayDie::Crit(v));
        } else if is_success(v) {
            plain.push(DisplayDie::Success(v));
        } else {
            failures.push(DisplayDie::Failure(v));
        }
    }

    let mut dice = struck;
    dice.extend(failures);
    dice.extend(plain);
    dice.extend(crits);

    RollResult {
        dice,
        successes,
        is_botch,
        ones_rolled,
    }
}

fn count_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
