//! The feature at the root of the model.

use derive_more::{Display, From};

use super::{Background, Comment, FeatureElement};

/// Non-owning handle from an element back to its feature.
///
/// The handle is the slug of the feature name. Elements store it instead of a
/// reference so that the feature can own its elements without a cycle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, From)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FeatureId(String);

impl FeatureId {
    /// The handle as a string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A feature file turned into documentation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Feature {
    /// Handle that elements use to refer back to this feature.
    pub id: FeatureId,
    /// Feature title.
    pub name: String,
    /// Free text under the title; empty when absent.
    pub description: String,
    /// Visible feature-level tags.
    pub tags: Vec<String>,
    /// Background shared by all scenarios.
    pub background: Option<Background>,
    /// Scenarios and outlines in source order.
    pub feature_elements: Vec<FeatureElement>,
    /// Comments kept for rendering, in source order.
    pub comments: Vec<Comment>,
    /// Language code of the source document.
    pub language: String,
}

impl Feature {
    /// Find an element by its title.
    #[must_use]
    pub fn element(&self, name: &str) -> Option<&FeatureElement> {
        self.feature_elements.iter().find(|e| e.name() == name)
    }

    /// Whether `element` belongs to this feature.
    #[must_use]
    pub fn owns(&self, element: &FeatureElement) -> bool {
        element.core().feature.as_ref() == Some(&self.id)
    }
}
