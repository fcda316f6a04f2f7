//! Error types for the dice engine.

use thiserror::Error;
use uuid::Uuid;
use vt_core::CoreError;

/// Result type for dice engine operations.
pub type DiceResult<T> = Result<T, DiceError>;

/// Errors that can occur while evaluating or storing an expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiceError {
    /// The expression does not follow the `term (op term)*` grammar.
    #[error("invalid expression '{expression}': {reason}")]
    Syntax {
        /// The offending expression.
        expression: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A term names a trait the character does not have.
    #[error("unknown trait: {0}")]
    UnresolvedTrait(String),

    /// The expression adds up to more dice than will ever be rolled.
    #[error("pool of {size} dice exceeds the maximum of {max}")]
    PoolTooLarge {
        /// The resolved pool size.
        size: i32,
        /// The largest pool allowed.
        max: u32,
    },

    /// A Willpower marker was given but the character has none left.
    #[error("not enough willpower to spend (current: {current})")]
    InsufficientWillpower {
        /// Willpower the character had.
        current: i32,
    },

    /// A macro body tried to pre-spend Willpower.
    #[error("macros cannot contain '+WP'; willpower must be added at roll time")]
    WillpowerInMacro,

    /// A macro name would hide a trait of the same name.
    #[error("macro name '{0}' is already a trait")]
    MacroShadowsTrait(String),

    /// No character with this id is held by the roster.
    #[error("character not found: {0}")]
    CharacterNotFound(Uuid),

    /// Character record error.
    #[error("{0}")]
    Core(#[from] CoreError),
}

impl DiceError {
    pub(crate) fn syntax(expression: &str, reason: impl Into<String>) -> Self {
        Self::Syntax {
            expression: expression.to_string(),
            reason: reason.into(),
        }
    }

    /// The message shown to a player.
    ///
    /// Syntax errors and unknown traits collapse into one hint; the variants
    /// stay distinct for callers that need to tell them apart.
    pub fn user_message(&self) -> String {
        match self {
            Self::Syntax { .. } | Self::UnresolvedTrait(_) => {
                "Unable to roll this pool. Check your syntax and traits and try again.".to_string()
            }
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syntax_and_unknown_trait_share_a_user_message() {
        let syntax = DiceError::syntax("Dex++2", "expected a trait or number");
        let unknown = DiceError::UnresolvedTrait("Obfuscate".to_string());
        assert_ne!(syntax, unknown);
        assert_eq!(syntax.user_message(), unknown.user_message());
    }

    #[test]
    fn willpower_message_passes_through() {
        let err = DiceError::InsufficientWillpower { current: 0 };
        assert_eq!(err.user_message(), "not enough willpower to spend (current: 0)");
    }

    #[test]
    fn core_errors_convert() {
        let err: DiceError = CoreError::MacroNotFound("Atk".to_string()).into();
        assert_eq!(err.to_string(), "no macro named 'Atk' found");
    }
}
