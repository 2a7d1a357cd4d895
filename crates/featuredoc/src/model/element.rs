//! Scenarios, outlines and backgrounds.

use super::{ExampleTable, FeatureId, Location, Step};

/// Data shared by every kind of feature element.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ElementCore {
    /// Element title.
    pub name: String,
    /// Free text under the title; empty when absent.
    pub description: String,
    /// Position of the element keyword.
    pub location: Location,
    /// Visible tags, followed by any tags derived from comments.
    pub tags: Vec<String>,
    /// Steps in source order.
    pub steps: Vec<Step>,
    /// Handle of the owning feature, set once during assembly.
    pub feature: Option<FeatureId>,
}

impl ElementCore {
    /// Whether `tag` is present, compared exactly.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Append `tag` unless it is already present.
    ///
    /// Returns `true` when the tag was added.
    pub fn add_tag(&mut self, tag: String) -> bool {
        if self.has_tag(&tag) {
            return false;
        }
        self.tags.push(tag);
        true
    }
}

/// A plain scenario.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Scenario {
    /// Shared element data.
    pub core: ElementCore,
    /// Normalized identifier derived from the name.
    pub slug: String,
}

/// A scenario outline and its example tables.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ScenarioOutline {
    /// Shared element data; steps are templates.
    pub core: ElementCore,
    /// Normalized identifier derived from the name.
    pub slug: String,
    /// Example blocks in source order.
    pub examples: Vec<Example>,
}

/// A background. Backgrounds never carry tags or a slug.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Background {
    /// Shared element data.
    pub core: ElementCore,
}

/// An `Examples:` block of an outline.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Example {
    /// Optional title.
    pub name: Option<String>,
    /// Optional free text.
    pub description: Option<String>,
    /// Tags declared on the block.
    pub tags: Vec<String>,
    /// The example rows.
    pub table: ExampleTable,
}

/// A scenario, scenario outline or background within a feature.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FeatureElement {
    /// A plain scenario.
    Scenario(Scenario),
    /// A scenario outline.
    ScenarioOutline(ScenarioOutline),
    /// A background listed among the feature's children.
    Background(Background),
}

impl FeatureElement {
    /// Shared element data.
    #[must_use]
    pub const fn core(&self) -> &ElementCore {
        match self {
            Self::Scenario(s) => &s.core,
            Self::ScenarioOutline(o) => &o.core,
            Self::Background(b) => &b.core,
        }
    }

    /// Mutable shared element data.
    pub fn core_mut(&mut self) -> &mut ElementCore {
        match self {
            Self::Scenario(s) => &mut s.core,
            Self::ScenarioOutline(o) => &mut o.core,
            Self::Background(b) => &mut b.core,
        }
    }

    /// Element title.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.core().name
    }

    /// Position of the element keyword.
    #[must_use]
    pub const fn location(&self) -> Location {
        self.core().location
    }

    /// Tags of the element.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.core().tags
    }

    /// Steps of the element.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.core().steps
    }

    /// Slug of the element; backgrounds have none.
    #[must_use]
    pub fn slug(&self) -> Option<&str> {
        match self {
            Self::Scenario(s) => Some(&s.slug),
            Self::ScenarioOutline(o) => Some(&o.slug),
            Self::Background(_) => None,
        }
    }

    /// Example blocks of an outline; empty for other kinds.
    #[must_use]
    pub fn examples(&self) -> &[Example] {
        match self {
            Self::ScenarioOutline(o) => &o.examples,
            Self::Scenario(_) | Self::Background(_) => &[],
        }
    }
}
