//! Step keyword classification against localized keyword tables.
//!
//! Feature files may be written in any language the grammar supports, so the
//! keyword in front of a step is only meaningful relative to the keyword sets
//! of the document's language. [`StepKeywords`] is the seam through which those
//! sets are supplied; [`KeywordTable`] ships the tables for a handful of common
//! languages.

use std::fmt;

/// Semantic category of a step keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum StepKeyword {
    /// Setup preconditions for a scenario.
    Given,
    /// Perform an action when testing behaviour.
    When,
    /// Assert the expected outcome of a scenario.
    Then,
    /// Additional conditions that share context with the previous step.
    And,
    /// Negative or contrasting conditions.
    But,
}

impl StepKeyword {
    /// Return the keyword as a string slice.
    ///
    /// # Examples
    ///
    /// ```
    /// use featuredoc_patterns::StepKeyword;
    ///
    /// assert_eq!(StepKeyword::Given.as_str(), "Given");
    /// assert_eq!(StepKeyword::But.as_str(), "But");
    /// ```
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Given => "Given",
            Self::When => "When",
            Self::Then => "Then",
            Self::And => "And",
            Self::But => "But",
        }
    }
}

impl fmt::Display for StepKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a keyword belongs to none of the five keyword sets.
///
/// Carries the trimmed keyword text for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized step keyword: {0}")]
pub struct UnrecognizedKeyword(pub String);

/// Source of the localized keyword sets for one language.
///
/// Implementations must be immutable once built; the same value is shared by
/// every document assembled in that language.
pub trait StepKeywords: Send + Sync {
    /// Keywords introducing a `Given` step, without surrounding whitespace.
    fn given(&self) -> &[&str];
    /// Keywords introducing a `When` step.
    fn when(&self) -> &[&str];
    /// Keywords introducing a `Then` step.
    fn then(&self) -> &[&str];
    /// Keywords introducing an `And` step.
    fn and(&self) -> &[&str];
    /// Keywords introducing a `But` step.
    fn but(&self) -> &[&str];

    /// Classify raw keyword text from the parse tree.
    ///
    /// The text is trimmed first. Sets are consulted in the order `When`,
    /// `Given`, `Then`, `And`, `But`, so a keyword shared by several sets
    /// (such as the `*` bullet) resolves to the first of them.
    ///
    /// # Errors
    ///
    /// Returns [`UnrecognizedKeyword`] when the keyword is in none of the sets.
    ///
    /// # Examples
    ///
    /// ```
    /// use featuredoc_patterns::{KeywordTable, StepKeyword, StepKeywords};
    ///
    /// let table = KeywordTable::english();
    /// assert_eq!(table.classify("Given "), Ok(StepKeyword::Given));
    /// assert!(table.classify("Gegeben sei").is_err());
    /// ```
    fn classify(&self, keyword: &str) -> Result<StepKeyword, UnrecognizedKeyword> {
        let trimmed = keyword.trim();
        let ordered = [
            (StepKeyword::When, self.when()),
            (StepKeyword::Given, self.given()),
            (StepKeyword::Then, self.then()),
            (StepKeyword::And, self.and()),
            (StepKeyword::But, self.but()),
        ];
        ordered
            .into_iter()
            .find(|(_, set)| set.iter().any(|candidate| *candidate == trimmed))
            .map(|(kw, _)| kw)
            .ok_or_else(|| UnrecognizedKeyword(trimmed.to_string()))
    }
}

/// Built-in keyword sets for a single language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordTable {
    language: &'static str,
    given: &'static [&'static str],
    when: &'static [&'static str],
    then: &'static [&'static str],
    and: &'static [&'static str],
    but: &'static [&'static str],
}

const ENGLISH: KeywordTable = KeywordTable {
    language: "en",
    given: &["*", "Given"],
    when: &["*", "When"],
    then: &["*", "Then"],
    and: &["*", "And"],
    but: &["*", "But"],
};

const GERMAN: KeywordTable = KeywordTable {
    language: "de",
    given: &["*", "Angenommen", "Gegeben sei", "Gegeben seien"],
    when: &["*", "Wenn"],
    then: &["*", "Dann"],
    and: &["*", "Und"],
    but: &["*", "Aber"],
};

const SPANISH: KeywordTable = KeywordTable {
    language: "es",
    given: &["*", "Dado", "Dada", "Dados", "Dadas"],
    when: &["*", "Cuando"],
    then: &["*", "Entonces"],
    and: &["*", "Y", "E"],
    but: &["*", "Pero"],
};

const FRENCH: KeywordTable = KeywordTable {
    language: "fr",
    given: &[
        "*",
        "Soit",
        "Sachant que",
        "Sachant qu'",
        "Sachant",
        "Etant donné que",
        "Etant donné qu'",
        "Etant donné",
        "Etant donnée",
        "Etant donnés",
        "Etant données",
        "Étant donné que",
        "Étant donné qu'",
        "Étant donné",
        "Étant donnée",
        "Étant donnés",
        "Étant données",
    ],
    when: &["*", "Quand", "Lorsque", "Lorsqu'"],
    then: &["*", "Alors", "Donc"],
    and: &["*", "Et que", "Et qu'", "Et"],
    but: &["*", "Mais que", "Mais qu'", "Mais"],
};

const DUTCH: KeywordTable = KeywordTable {
    language: "nl",
    given: &["*", "Gegeven", "Stel"],
    when: &["*", "Als", "Wanneer"],
    then: &["*", "Dan"],
    and: &["*", "En"],
    but: &["*", "Maar"],
};

const BUILT_IN: [KeywordTable; 5] = [ENGLISH, GERMAN, SPANISH, FRENCH, DUTCH];

impl KeywordTable {
    /// English keyword sets.
    #[must_use]
    pub const fn english() -> Self {
        ENGLISH
    }

    /// Look up the built-in table for a language code such as `en` or `fr`.
    ///
    /// Returns `None` for languages without a bundled table.
    #[must_use]
    pub fn for_language(code: &str) -> Option<Self> {
        let code = code.trim();
        BUILT_IN
            .into_iter()
            .find(|table| table.language.eq_ignore_ascii_case(code))
    }

    /// Language code the table belongs to.
    #[must_use]
    pub const fn language(&self) -> &'static str {
        self.language
    }
}

impl Default for KeywordTable {
    fn default() -> Self {
        Self::english()
    }
}

impl StepKeywords for KeywordTable {
    fn given(&self) -> &[&str] {
        self.given
    }

    fn when(&self) -> &[&str] {
        self.when
    }

    fn then(&self) -> &[&str] {
        self.then
    }

    fn and(&self) -> &[&str] {
        self.and
    }

    fn but(&self) -> &[&str] {
        self.but
    }
}
