//! Macro expansion and validated macro storage.
//!
//! Expansion substitutes whole terms only: a macro named `Str` never matches
//! inside `Strength`, and a term with a specialization is never a macro
//! reference. Bodies are pasted in place without grouping, and expansion is
//! single-pass, so a body naming another macro is left as-is and fails
//! resolution like any unknown trait.

use vt_core::{Character, CoreError, MacroTable, is_valid_macro_name};

use crate::error::{DiceError, DiceResult};
use crate::expression::{self, Segment, compact};
use crate::pool::{self, PoolResolution};
use crate::willpower;

/// Substitute macro references in an expression.
///
/// Never fails: unknown terms pass through and are rejected later by
/// validation or resolution.
pub fn expand(expression: &str, macros: &MacroTable) -> String {
    let source = compact(expression);
    let mut out = String::with_capacity(source.len());

    for segment in expression::segments(&source) {
        match segment {
            Segment::Operator(op) => out.push(op),
            Segment::Term(term) => match macros.get(term) {
                Some(body) => {
                    tracing::debug!(name = term, body, "macro expanded");
                    out.push_str(&compact(body));
                }
                None => out.push_str(term),
            },
        }
    }
    out
}

/// Split a `Name=Body` definition and validate both halves.
pub fn parse_definition(definition: &str) -> DiceResult<(String, String)> {
    let (name, body) = definition.split_once('=').ok_or_else(|| {
        DiceError::syntax(
            definition,
            "macro must contain '=' separating name and expression",
        )
    })?;
    let (name, body) = (name.trim(), body.trim());
    validate(name, body)?;
    Ok((name.to_string(), compact(body)))
}

/// Check a macro name and body without touching any character.
///
/// The body may not spend Willpower and must be a valid expression.
pub fn validate(name: &str, body: &str) -> DiceResult<()> {
    if willpower::has_marker(body) {
        return Err(DiceError::WillpowerInMacro);
    }
    if !is_valid_macro_name(name) || name.eq_ignore_ascii_case("wp") {
        return Err(CoreError::InvalidMacroName(name.to_string()).into());
    }
    expression::tokenize(body)?;
    Ok(())
}

/// Create a macro. The body must resolve against the character, and the
/// name may not be one of the character's traits.
///
/// Returns the body's resolution so the caller can show the pool size.
pub fn define(character: &mut Character, name: &str, body: &str) -> DiceResult<PoolResolution> {
    validate(name, body)?;
    if character.macros.contains(name) {
        return Err(CoreError::MacroExists(name.to_string()).into());
    }
    if pool::names_trait(character, name) {
        return Err(DiceError::MacroShadowsTrait(name.to_string()));
    }
    let resolution = pool::resolve(body, character)?;
    character.macros.insert(name, &compact(body))?;
    tracing::info!(character = %character.name, name, body, "macro created");
    Ok(resolution)
}

/// Replace an existing macro's body. The new body must resolve.
pub fn update(character: &mut Character, name: &str, body: &str) -> DiceResult<PoolResolution> {
    validate(name, body)?;
    if !character.macros.contains(name) {
        return Err(CoreError::MacroNotFound(name.to_string()).into());
    }
    let resolution = pool::resolve(body, character)?;
    character.macros.replace(name, &compact(body))?;
    tracing::info!(character = %character.name, name, body, "macro updated");
    Ok(resolution)
}

/// Delete a macro.
pub fn delete(character: &mut Character, name: &str) -> DiceResult<()> {
    let removed = character.macros.remove(name)?;
    tracing::info!(character = %character.name, name = %removed.name, "macro deleted");
    Ok(())
}

/// One row of a macro listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroListing {
    /// Macro name.
    pub name: String,
    /// Stored body.
    pub expression: String,
    /// The body's current resolution. Traits can change after a macro is
    /// saved, so this may now fail.
    pub resolution: DiceResult<PoolResolution>,
}

/// List every macro with its current resolution, in insertion order.
pub fn list(character: &Character) -> Vec<MacroListing> {
    character
        .macros
        .iter()
        .map(|m| MacroListing {
            name: m.name.clone(),
            expression: m.expression.clone(),
            resolution: pool::resolve(&m.expression, character),
        })
        .collect()
}
