use std::path::Path;

use colored::Colorize;
use vt_dice::{MAX_DIFFICULTY, MIN_DIFFICULTY, RollConfig};

/// Flags for a single roll.
pub struct RollOptions {
    pub difficulty: Option<u8>,
    pub seed: Option<u64>,
    pub comment: Option<String>,
    pub feed: bool,
}

pub fn run(path: &Path, expression: &str, opts: &RollOptions) -> Result<(), String> {
    let mut config = RollConfig::default();
    if let Some(difficulty) = opts.difficulty {
        if !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&difficulty) {
            return Err(format!(
                "difficulty must be between {MIN_DIFFICULTY} and {MAX_DIFFICULTY}, got {difficulty}"
            ));
        }
        config = config.with_difficulty(difficulty);
    }
    if let Some(seed) = opts.seed {
        config = config.with_seed(seed);
    }

    let mut character = super::load_character(path)?;
    let mut rng = config.rng();
    let outcome =
        vt_dice::roll_expression(&mut character, expression, config.difficulty, &mut rng)
            .map_err(|e| super::describe(&e))?;

    let mut changed = outcome.willpower_spent;
    let fed = if opts.feed && outcome.roll.successes > 0 {
        changed = true;
        let before = character.blood.current;
        Some(character.gain_blood(outcome.roll.successes) - before)
    } else {
        None
    };
    if changed {
        super::save_character(path, &character)?;
    }

    // Header
    println!(
        "  {} rolls {} {}",
        character.name.bold(),
        outcome.expression,
        format!("(difficulty {})", outcome.difficulty).dimmed()
    );
    if let Some(comment) = &opts.comment {
        println!("  {}", comment.italic());
    }
    println!("  {}", outcome.pool.describe());
    if !outcome.roll.dice.is_empty() {
        println!("  {}", outcome.roll);
    }

    let headline = outcome.roll.headline();
    if outcome.roll.is_botch {
        println!("  {}", headline.red().bold());
    } else if outcome.roll.successes == 0 {
        println!("  {}", headline.yellow());
    } else {
        println!("  {}", headline.green().bold());
    }

    if outcome.willpower_spent {
        println!("  {}", character.willpower);
    }
    if let Some(gained) = fed {
        println!("  {} (+{gained})", character.blood);
    }

    Ok(())
}
