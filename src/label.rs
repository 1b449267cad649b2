//! # Label Records
//!
//! The six-field textual content of one printable slab label.

use serde::{Deserialize, Serialize};

/// One printable label.
///
/// Every field is optional in practice: an empty string means "absent", and
/// the renderer omits absent fields entirely. Missing keys deserialize as
/// empty strings so partially-written records still load.
///
/// ## Example
///
/// ```
/// use slabel::LabelRecord;
///
/// let label = LabelRecord::new("1999 Base Set", "Charizard")
///     .variation("Holo")
///     .card_number("#4")
///     .grade("MINT", "9");
///
/// assert!(label.has_identity());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LabelRecord {
    /// Year and set, e.g. "1999 Pokémon Base Set"
    pub year_set_line: String,
    /// Player or character name, e.g. "Charizard"
    pub player_line: String,
    /// Variation, e.g. "Holo"
    pub variation_line: String,
    /// Card number, e.g. "#4"
    pub card_number: String,
    /// Grade term, e.g. "MINT"
    pub grade_term: String,
    /// Grade number, e.g. "9"
    pub grade_number: String,
}

impl LabelRecord {
    /// Create a record with the two identifying lines set.
    pub fn new(year_set_line: impl Into<String>, player_line: impl Into<String>) -> Self {
        Self {
            year_set_line: year_set_line.into(),
            player_line: player_line.into(),
            ..Default::default()
        }
    }

    /// Set the variation line.
    pub fn variation(mut self, variation: impl Into<String>) -> Self {
        self.variation_line = variation.into();
        self
    }

    /// Set the card number.
    pub fn card_number(mut self, number: impl Into<String>) -> Self {
        self.card_number = number.into();
        self
    }

    /// Set grade term and grade number.
    pub fn grade(mut self, term: impl Into<String>, number: impl Into<String>) -> Self {
        self.grade_term = term.into();
        self.grade_number = number.into();
        self
    }

    /// The record shown when nothing has been stored yet.
    pub fn sample() -> Self {
        Self::new("1999 Pokémon Base Set", "Charizard")
            .variation("Holo")
            .card_number("#4")
            .grade("MINT", "9")
    }

    /// Whether the year/set or player line is filled in.
    ///
    /// This is the editor's admission rule; the store itself accepts any
    /// record.
    pub fn has_identity(&self) -> bool {
        !self.year_set_line.is_empty() || !self.player_line.is_empty()
    }

    /// Whether all six fields are empty.
    pub fn is_blank(&self) -> bool {
        self.left_lines().all(|(_, s)| s.is_empty()) && self.right_lines().all(|s| s.is_empty())
    }

    /// Left column lines in display order, paired with their bold flag.
    pub fn left_lines(&self) -> impl Iterator<Item = (bool, &str)> {
        [
            (true, self.year_set_line.as_str()),
            (true, self.player_line.as_str()),
            (false, self.variation_line.as_str()),
        ]
        .into_iter()
    }

    /// Right column lines in display order (all bold).
    pub fn right_lines(&self) -> impl Iterator<Item = &str> {
        [
            self.card_number.as_str(),
            self.grade_term.as_str(),
            self.grade_number.as_str(),
        ]
        .into_iter()
    }
}
