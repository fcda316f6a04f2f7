//! Per-character macro storage.
//!
//! A [`MacroTable`] only stores and looks up name → expression pairs.
//! Expression validation lives with the dice engine, which is the only
//! caller allowed to insert.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::traits::normalize_name;

/// A stored macro.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Macro {
    /// Macro name as the player typed it.
    pub name: String,
    /// Raw expression text.
    pub expression: String,
}

/// Named expressions owned by one character, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MacroTable {
    macros: Vec<Macro>,
}

/// Returns true if `name` is a plain identifier (`[A-Za-z_][A-Za-z0-9_]*`).
pub fn is_valid_macro_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

impl MacroTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a macro body by name, case-insensitively.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.find(name).map(|m| m.expression.as_str())
    }

    /// Returns true if a macro with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Store a new macro. Fails if the name is taken or not an identifier.
    pub fn insert(&mut self, name: &str, expression: &str) -> CoreResult<()> {
        if !is_valid_macro_name(name) {
            return Err(CoreError::InvalidMacroName(name.to_string()));
        }
        if self.contains(name) {
            return Err(CoreError::MacroExists(name.to_string()));
        }
        self.macros.push(Macro {
            name: name.to_string(),
            expression: expression.to_string(),
        });
        Ok(())
    }

    /// Replace an existing macro's body, returning the previous body.
    pub fn replace(&mut self, name: &str, expression: &str) -> CoreResult<String> {
        let wanted = normalize_name(name);
        let entry = self
            .macros
            .iter_mut()
            .find(|m| normalize_name(&m.name) == wanted)
            .ok_or_else(|| CoreError::MacroNotFound(name.to_string()))?;
        Ok(std::mem::replace(
            &mut entry.expression,
            expression.to_string(),
        ))
    }

    /// Remove a macro, returning it.
    pub fn remove(&mut self, name: &str) -> CoreResult<Macro> {
        let wanted = normalize_name(name);
        let index = self
            .macros
            .iter()
            .position(|m| normalize_name(&m.name) == wanted)
            .ok_or_else(|| CoreError::MacroNotFound(name.to_string()))?;
        Ok(self.macros.remove(index))
    }

    /// Iterate over stored macros in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Macro> {
        self.macros.iter()
    }

    /// Number of stored macros.
    pub fn len(&self) -> usize {
        self.macros.len()
    }

    /// Returns true if no macros are stored.
    pub fn is_empty(&self) -> bool {
        self.macros.is_empty()
    }

    fn find(&self, name: &str) -> Option<&Macro> {
        let wanted = normalize_name(name);
        self.macros.iter().find(|m| normalize_name(&m.name) == wanted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_get_case_insensitive() {
        let mut table = MacroTable::new();
        table.insert("Atk", "Dexterity+Melee").unwrap();
        assert_eq!(table.get("atk"), Some("Dexterity+Melee"));
        assert_eq!(table.get("ATK"), Some("Dexterity+Melee"));
        assert_eq!(table.get("Soak"), None);
    }

    #[test]
    fn insert_rejects_duplicate_in_any_case() {
        let mut table = MacroTable::new();
        table.insert("Atk", "Dexterity+Melee").unwrap();
        assert_eq!(
            table.insert("ATK", "Strength"),
            Err(CoreError::MacroExists("ATK".to_string()))
        );
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn insert_rejects_bad_names() {
        let mut table = MacroTable::new();
        for bad in ["", "2hit", "my macro", "a-b", "x[y]"] {
            assert_eq!(
                table.insert(bad, "Strength"),
                Err(CoreError::InvalidMacroName(bad.to_string()))
            );
        }
        assert!(table.is_empty());
    }

    #[test]
    fn replace_returns_old_body() {
        let mut table = MacroTable::new();
        table.insert("Atk", "Dexterity+Melee").unwrap();
        let old = table.replace("atk", "Dexterity+Brawl").unwrap();
        assert_eq!(old, "Dexterity+Melee");
        assert_eq!(table.get("Atk"), Some("Dexterity+Brawl"));
    }

    #[test]
    fn replace_and_remove_missing() {
        let mut table = MacroTable::new();
        assert_eq!(
            table.replace("Atk", "Strength"),
            Err(CoreError::MacroNotFound("Atk".to_string()))
        );
        assert!(matches!(table.remove("Atk"), Err(CoreError::MacroNotFound(_))));
    }

    #[test]
    fn iteration_keeps_insertion_order() {
        let mut table = MacroTable::new();
        table.insert("Zeta", "Strength").unwrap();
        table.insert("Alpha", "Wits").unwrap();
        let names: Vec<_> = table.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Zeta", "Alpha"]);
        table.remove("zeta").unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn serializes_as_a_plain_list() {
        let mut table = MacroTable::new();
        table.insert("Atk", "Dexterity+Melee").unwrap();
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"[{"name":"Atk","expression":"Dexterity+Melee"}]"#);
    }
}
