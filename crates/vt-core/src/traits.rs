//! Rated traits and the categories a character sheet groups them into.
//!
//! Every lookup is case-insensitive and ignores whitespace and punctuation,
//! so `AnimalKen` from a compacted roll expression finds the sheet's
//! `Animal Ken`, and `SelfControl` finds `Self-Control`. Sheet annotations
//! after a `*` are not part of a trait's name.

use serde::{Deserialize, Serialize};

/// Normalize a trait, specialization, or macro name for comparison.
///
/// Drops everything from the first `*`, keeps only alphanumerics and `_`,
/// and lowercases.
pub fn normalize_name(name: &str) -> String {
    let base = name.split('*').next().unwrap_or_default();
    base.chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .flat_map(char::to_lowercase)
        .collect()
}

/// One rateable trait: an attribute, ability, discipline, background,
/// virtue, or magic path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitEntry {
    /// Display name as written on the sheet.
    pub name: String,
    /// Dot rating.
    pub value: u32,
    /// Specializations, compared case-insensitively.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub specializations: Vec<String>,
}

impl TraitEntry {
    /// Create a trait with no specializations.
    pub fn new(name: impl Into<String>, value: u32) -> Self {
        Self {
            name: name.into(),
            value,
            specializations: Vec::new(),
        }
    }

    /// Add a single specialization.
    pub fn with_specialization(mut self, spec: impl Into<String>) -> Self {
        self.specializations.push(spec.into());
        self
    }

    /// Add specializations from a sheet cell like `"Swords, Axes"`.
    pub fn with_specializations_csv(mut self, cell: &str) -> Self {
        self.specializations.extend(
            cell.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        );
        self
    }

    /// Returns true if this trait answers to `name`.
    pub fn matches(&self, name: &str) -> bool {
        normalize_name(&self.name) == normalize_name(name)
    }

    /// Find a specialization by name, returning its display form.
    pub fn specialization(&self, spec: &str) -> Option<&str> {
        let wanted = normalize_name(spec);
        self.specializations
            .iter()
            .find(|s| normalize_name(s) == wanted)
            .map(String::as_str)
    }
}

/// The fixed trait categories, in lookup priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TraitCategory {
    /// Physical, social, and mental attributes.
    Attribute,
    /// Talents, skills, and knowledges.
    Ability,
    /// Vampiric disciplines.
    Discipline,
    /// Backgrounds (Resources, Allies, ...).
    Background,
    /// Virtues (Conscience, Self-Control, Courage).
    Virtue,
    /// Thaumaturgy and necromancy paths.
    MagicPath,
}

impl TraitCategory {
    /// Search order used by [`CharacterTraitSet::lookup`]. First match wins.
    pub const SEARCH_ORDER: [TraitCategory; 6] = [
        Self::Attribute,
        Self::Ability,
        Self::Discipline,
        Self::Background,
        Self::Virtue,
        Self::MagicPath,
    ];
}

impl std::fmt::Display for TraitCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Attribute => write!(f, "attribute"),
            Self::Ability => write!(f, "ability"),
            Self::Discipline => write!(f, "discipline"),
            Self::Background => write!(f, "background"),
            Self::Virtue => write!(f, "virtue"),
            Self::MagicPath => write!(f, "magic path"),
        }
    }
}

/// A named group of abilities (e.g. Talents).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityGroup {
    /// Group heading.
    pub name: String,
    /// Abilities in sheet order.
    pub traits: Vec<TraitEntry>,
}

/// Every rated trait on a character sheet, grouped by category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterTraitSet {
    /// Attributes.
    pub attributes: Vec<TraitEntry>,
    /// Abilities by subcategory, in sheet order.
    pub abilities: Vec<AbilityGroup>,
    /// Disciplines.
    pub disciplines: Vec<TraitEntry>,
    /// Backgrounds.
    pub backgrounds: Vec<TraitEntry>,
    /// Virtues.
    pub virtues: Vec<TraitEntry>,
    /// Magic paths.
    pub magic_paths: Vec<TraitEntry>,
}

impl CharacterTraitSet {
    /// Create an empty trait set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a trait by name across all categories in [`TraitCategory::SEARCH_ORDER`].
    pub fn lookup(&self, name: &str) -> Option<(TraitCategory, &TraitEntry)> {
        TraitCategory::SEARCH_ORDER
            .iter()
            .find_map(|&category| self.lookup_in(category, name).map(|t| (category, t)))
    }

    /// Find a trait by name within one category.
    pub fn lookup_in(&self, category: TraitCategory, name: &str) -> Option<&TraitEntry> {
        self.entries(category).find(|t| t.matches(name))
    }

    /// Iterate over the traits of one category in sheet order.
    pub fn entries(&self, category: TraitCategory) -> Box<dyn Iterator<Item = &TraitEntry> + '_> {
        match category {
            TraitCategory::Attribute => Box::new(self.attributes.iter()),
            TraitCategory::Ability => {
                Box::new(self.abilities.iter().flat_map(|g| g.traits.iter()))
            }
            TraitCategory::Discipline => Box::new(self.disciplines.iter()),
            TraitCategory::Background => Box::new(self.backgrounds.iter()),
            TraitCategory::Virtue => Box::new(self.virtues.iter()),
            TraitCategory::MagicPath => Box::new(self.magic_paths.iter()),
        }
    }

    /// Append a trait to a category. Abilities go into the named group,
    /// which is created if missing.
    pub fn push(&mut self, category: TraitCategory, entry: TraitEntry) {
        match category {
            TraitCategory::Attribute => self.attributes.push(entry),
            TraitCategory::Ability => self.push_ability("Abilities", entry),
            TraitCategory::Discipline => self.disciplines.push(entry),
            TraitCategory::Background => self.backgrounds.push(entry),
            TraitCategory::Virtue => self.virtues.push(entry),
            TraitCategory::MagicPath => self.magic_paths.push(entry),
        }
    }

    /// Append an ability to a named group.
    pub fn push_ability(&mut self, group: &str, entry: TraitEntry) {
        match self.abilities.iter_mut().find(|g| g.name == group) {
            Some(existing) => existing.traits.push(entry),
            None => self.abilities.push(AbilityGroup {
                name: group.to_string(),
                traits: vec![entry],
            }),
        }
    }

    /// Total number of traits across all categories.
    pub fn len(&self) -> usize {
        TraitCategory::SEARCH_ORDER
            .iter()
            .map(|&c| self.entries(c).count())
            .sum()
    }

    /// Returns true if no traits are recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
