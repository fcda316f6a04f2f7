pub mod macros;
pub mod pool;
pub mod roll;
pub mod show;

use std::fs;
use std::path::Path;

use vt_core::Character;
use vt_dice::DiceError;

/// Read a character file.
fn load_character(path: &Path) -> Result<Character, String> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    let character: Character = serde_json::from_str(&text)
        .map_err(|e| format!("invalid character file {}: {e}", path.display()))?;
    tracing::debug!(name = %character.name, path = %path.display(), "character loaded");
    Ok(character)
}

/// Write a character back after a successful change.
fn save_character(path: &Path, character: &Character) -> Result<(), String> {
    let json = serde_json::to_string_pretty(character)
        .map_err(|e| format!("cannot serialize character: {e}"))?;
    fs::write(path, json + "\n").map_err(|e| format!("cannot write {}: {e}", path.display()))
}

/// Player-facing message, with the precise cause appended when the short
/// message hides it.
fn describe(err: &DiceError) -> String {
    match err {
        DiceError::Syntax { .. } | DiceError::UnresolvedTrait(_) => {
            format!("{} ({err})", err.user_message())
        }
        _ => err.user_message(),
    }
}
