//! The feature assembler.
//!
//! [`FeatureAssembler::assemble`] runs the whole pipeline over one parsed
//! document in a single synchronous pass:
//!
//! 1. build the background;
//! 2. collect comments when the comment mode asks for them;
//! 3. build every scenario and outline, hiding configured tags;
//! 4. attach comments to steps by line proximity;
//! 5. derive theme and story tags from comments;
//! 6. discard comment text that is not retained;
//! 7. drop excluded scenarios, or the whole feature.
//!
//! Exclusion runs last, so a derived tag can exclude its scenario. Hidden tags
//! still count for exclusion: hiding only affects what is shown.

use std::sync::Arc;

use featuredoc_patterns::{KeywordTable, NameNormalizer, Slugger, StepKeywords};
use tracing::debug;

use crate::ast::{CommentNode, Document};
use crate::comments::{associate_comments, derive_reference_tags};
use crate::config::Configuration;
use crate::error::MapError;
use crate::mapping::FeatureMapper;
use crate::model::{Comment, Feature, FeatureElement, FeatureId};

/// Language assumed when the document has no `# language:` header.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Builds [`Feature`] models from parsed documents.
///
/// An assembler holds only immutable configuration, so one instance can
/// serve any number of documents, including from several threads at once.
#[derive(Clone)]
pub struct FeatureAssembler {
    config: Configuration,
    keywords: Option<Arc<dyn StepKeywords>>,
    normalizer: Arc<dyn NameNormalizer>,
}

impl FeatureAssembler {
    /// Create an assembler using the built-in keyword tables and [`Slugger`].
    #[must_use]
    pub fn new(config: Configuration) -> Self {
        Self {
            config,
            keywords: None,
            normalizer: Arc::new(Slugger),
        }
    }

    /// Classify step keywords with `keywords` instead of the table chosen
    /// from the document language.
    #[must_use]
    pub fn with_keywords(mut self, keywords: impl StepKeywords + 'static) -> Self {
        self.keywords = Some(Arc::new(keywords));
        self
    }

    /// Compute slugs with `normalizer`.
    #[must_use]
    pub fn with_normalizer(mut self, normalizer: impl NameNormalizer + 'static) -> Self {
        self.normalizer = Arc::new(normalizer);
        self
    }

    /// The configuration this assembler applies.
    #[must_use]
    pub const fn config(&self) -> &Configuration {
        &self.config
    }

    /// Build the model for `document`.
    ///
    /// Returns `Ok(None)` when the feature is excluded by tag, either
    /// directly or because every one of its scenarios was excluded.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::UnrecognizedKeyword`] for a step keyword outside the
    /// language's keyword sets and [`MapError::UnsupportedNode`] for a feature
    /// child the model cannot represent.
    pub fn assemble(&self, document: &Document) -> Result<Option<Feature>, MapError> {
        let node = &document.feature;
        let language = node
            .language
            .clone()
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());
        let fallback = KeywordTable::for_language(&language).unwrap_or_default();
        let keywords = self
            .keywords
            .as_deref()
            .unwrap_or(&fallback as &dyn StepKeywords);
        let mapper = FeatureMapper::new(keywords, self.normalizer.as_ref(), &self.config.hide_tags);
        let mode = self.config.comment_mode;

        let mut background = node
            .background
            .as_ref()
            .map(|background| mapper.map_background(background))
            .transpose()?;

        let mut comments = if mode.collects() {
            collect_comments(&document.comments)
        } else {
            Vec::new()
        };

        let mut elements = Vec::with_capacity(node.children.len());
        let mut source_tags = Vec::with_capacity(node.children.len());
        for child in &node.children {
            elements.push(mapper.map_feature_element(child)?);
            source_tags.push(child.tags().to_vec());
        }

        associate_comments(&mut comments, &mut elements);
        if mode.derives_tags() {
            let hidden = derive_reference_tags(&mut elements, &comments, &self.config.hide_tags);
            for (raw, derived) in source_tags.iter_mut().zip(hidden) {
                raw.extend(derived);
            }
        }
        if !mode.retains() {
            for element in &mut elements {
                for step in &mut element.core_mut().steps {
                    step.comments.clear();
                }
            }
            comments.clear();
        }

        let id = FeatureId::from(self.normalizer.normalize(&node.name));
        if let Some(background) = &mut background {
            background.core.feature = Some(id.clone());
        }
        for element in &mut elements {
            element.core_mut().feature = Some(id.clone());
        }

        let exclude = &self.config.exclude_tags;
        if exclude.matches_any(&node.tags) {
            debug!(feature = %node.name, "feature excluded by tag");
            return Ok(None);
        }

        let total = elements.len();
        let feature_elements: Vec<FeatureElement> = elements
            .into_iter()
            .zip(source_tags)
            .filter(|(element, raw)| {
                let excluded = exclude.matches_any(raw.iter().chain(element.tags()));
                if excluded {
                    debug!(
                        feature = %node.name,
                        element = %element.name(),
                        line = element.location().line,
                        "scenario excluded by tag"
                    );
                }
                !excluded
            })
            .map(|(element, _)| element)
            .collect();

        if total > 0 && feature_elements.is_empty() {
            debug!(feature = %node.name, total, "every scenario excluded, dropping feature");
            return Ok(None);
        }

        debug!(
            feature = %node.name,
            elements = feature_elements.len(),
            excluded = total - feature_elements.len(),
            comments = comments.len(),
            "assembled feature"
        );

        Ok(Some(Feature {
            id,
            name: node.name.clone(),
            description: node.description.clone().unwrap_or_default(),
            tags: mapper.visible_tags(&node.tags),
            background,
            feature_elements,
            comments,
            language,
        }))
    }
}

impl Default for FeatureAssembler {
    fn default() -> Self {
        Self::new(Configuration::default())
    }
}

impl std::fmt::Debug for FeatureAssembler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeatureAssembler")
            .field("config", &self.config)
            .field("custom_keywords", &self.keywords.is_some())
            .finish_non_exhaustive()
    }
}

fn collect_comments(nodes: &[CommentNode]) -> Vec<Comment> {
    let mut comments: Vec<Comment> = nodes
        .iter()
        .map(|node| Comment::new(node.text.trim(), node.position.into()))
        .collect();
    comments.sort_by_key(|comment| comment.location);
    comments
}

#[cfg(test)]
#[expect(clippy::expect_used, reason = "tests use explicit failures for clarity")]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;
    use crate::ast::{
        BackgroundNode, FeatureChild, FeatureNode, Position, RuleNode, ScenarioNode, StepNode,
    };
    use crate::config::{CommentMode, TagSet};
    use crate::model::CommentType;

    fn step(keyword: &str, line: usize) -> StepNode {
        StepNode {
            keyword: keyword.to_string(),
            text: format!("step {line}"),
            argument: None,
            position: Position::new(line, 5),
        }
    }

    fn scenario(name: &str, line: usize, tags: &[&str]) -> FeatureChild {
        FeatureChild::Scenario(ScenarioNode {
            name: name.to_string(),
            description: None,
            tags: tags.iter().map(|t| (*t).to_string()).collect(),
            steps: vec![step("Given ", line + 1), step("Then ", line + 2)],
            position: Position::new(line, 3),
        })
    }

    fn comment(text: &str, line: usize) -> CommentNode {
        CommentNode {
            text: text.to_string(),
            position: Position::new(line, 3),
        }
    }

    /// Feature with a background at line 3, scenarios at lines 7 and 11, and a
    /// comment before each scenario.
    #[fixture]
    fn document() -> Document {
        Document {
            feature: FeatureNode {
                name: "Tagged Feature".to_string(),
                description: None,
                tags: vec!["@feature-tag".to_string(), "@TagsToHideFeature".to_string()],
                language: None,
                background: Some(BackgroundNode {
                    name: String::new(),
                    description: None,
                    steps: vec![step("Given ", 4)],
                    position: Position::new(3, 3),
                }),
                children: vec![
                    scenario("First", 7, &["@scenario-tag-1", "@TagsToHideScenario"]),
                    scenario("Second", 11, &["@scenario-tag-2"]),
                ],
                position: Position::new(2, 1),
            },
            comments: vec![
                comment("  # RI:102069-03 (B-12010) first  ", 6),
                comment("# (B-555)", 10),
            ],
        }
    }

    fn assemble(config: Configuration, document: &Document) -> Option<Feature> {
        FeatureAssembler::new(config)
            .assemble(document)
            .expect("document assembles")
    }

    #[rstest]
    fn builds_background_and_elements_in_order(document: Document) {
        let feature = assemble(Configuration::default(), &document).expect("not excluded");
        assert_eq!(feature.name, "Tagged Feature");
        assert_eq!(feature.description, "");
        assert_eq!(feature.language, DEFAULT_LANGUAGE);
        let names: Vec<_> = feature.feature_elements.iter().map(FeatureElement::name).collect();
        assert_eq!(names, vec!["First", "Second"]);
        let background = feature.background.as_ref().expect("background built");
        assert_eq!(background.core.steps.len(), 1);
        assert_eq!(background.core.feature.as_ref(), Some(&feature.id));
    }

    #[rstest]
    fn every_element_points_back_to_its_feature(document: Document) {
        let feature = assemble(Configuration::default(), &document).expect("not excluded");
        assert_eq!(feature.id.as_str(), "tagged-feature");
        assert!(feature.feature_elements.iter().all(|e| feature.owns(e)));
    }

    #[rstest]
    fn hidden_tags_leave_feature_and_elements(document: Document) {
        let config = Configuration::default()
            .with_hide_tags(TagSet::parse("TagsToHideFeature;tagstohidescenario"));
        let feature = assemble(config, &document).expect("not excluded");
        assert_eq!(feature.tags, vec!["@feature-tag".to_string()]);
        let first = feature.element("First").expect("first scenario");
        assert_eq!(first.tags(), ["@scenario-tag-1".to_string()]);
    }

    #[rstest]
    fn ignore_mode_collects_no_comments(document: Document) {
        let feature = assemble(Configuration::default(), &document).expect("not excluded");
        assert!(feature.comments.is_empty());
        assert!(
            feature
                .feature_elements
                .iter()
                .flat_map(FeatureElement::steps)
                .all(|s| s.comments.is_empty())
        );
    }

    #[rstest]
    fn retain_mode_keeps_trimmed_comments_without_tags(document: Document) {
        let config = Configuration::default().with_comment_mode(CommentMode::Retain);
        let feature = assemble(config, &document).expect("not excluded");
        let texts: Vec<_> = feature.comments.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["# RI:102069-03 (B-12010) first", "# (B-555)"]);
        let first = feature.element("First").expect("first scenario");
        assert_eq!(first.tags().len(), 2);
        let trailing = feature.comments.get(1).expect("second comment").kind;
        assert_eq!(trailing, CommentType::AfterLastStepComment);
    }

    #[rstest]
    fn derive_mode_adds_tags_and_drops_comment_text(document: Document) {
        let config = Configuration::default().with_comment_mode(CommentMode::DeriveTags);
        let feature = assemble(config, &document).expect("not excluded");
        let first = feature.element("First").expect("first scenario");
        assert!(first.core().has_tag("@T_102069_03"));
        assert!(first.core().has_tag("@B_12010"));
        let second = feature.element("Second").expect("second scenario");
        assert_eq!(second.tags(), ["@scenario-tag-2".to_string(), "@B_555".to_string()]);
        assert!(feature.comments.is_empty());
        assert!(
            feature
                .feature_elements
                .iter()
                .flat_map(FeatureElement::steps)
                .all(|s| s.comments.is_empty())
        );
    }

    #[rstest]
    fn derive_and_retain_keeps_both(document: Document) {
        let config =
            Configuration::default().with_comment_mode(CommentMode::DeriveTagsAndRetain);
        let feature = assemble(config, &document).expect("not excluded");
        assert_eq!(feature.comments.len(), 2);
        assert!(
            feature
                .element("Second")
                .expect("second scenario")
                .core()
                .has_tag("@B_555")
        );
    }

    #[rstest]
    #[case("feature-tag")]
    #[case("FEATURE-TAG")]
    #[case("@Feature-Tag")]
    fn feature_tag_exclusion_drops_feature(document: Document, #[case] tag: &str) {
        let config = Configuration::default().with_exclude_tags(TagSet::parse(tag));
        assert!(assemble(config, &document).is_none());
    }

    #[rstest]
    fn scenario_tag_exclusion_drops_only_that_scenario(document: Document) {
        let config = Configuration::default().with_exclude_tags(TagSet::parse("Scenario-Tag-1"));
        let feature = assemble(config, &document).expect("feature survives");
        assert!(feature.element("First").is_none());
        assert!(feature.element("Second").is_some());
        assert_eq!(feature.tags.len(), 2);
    }

    #[rstest]
    fn hidden_tags_still_exclude(document: Document) {
        let config = Configuration::default()
            .with_hide_tags(TagSet::parse("TagsToHideScenario"))
            .with_exclude_tags(TagSet::parse("TagsToHideScenario"));
        let feature = assemble(config, &document).expect("feature survives");
        assert!(feature.element("First").is_none());
    }

    #[rstest]
    fn derived_tag_can_exclude_its_scenario(document: Document) {
        let config = Configuration::default()
            .with_comment_mode(CommentMode::DeriveTags)
            .with_exclude_tags(TagSet::parse("B_555"));
        let feature = assemble(config, &document).expect("feature survives");
        assert!(feature.element("First").is_some());
        assert!(feature.element("Second").is_none());
    }

    #[rstest]
    fn hidden_derived_tags_stay_hidden_but_still_exclude(mut document: Document) {
        if let Some(FeatureChild::Scenario(node)) = document.feature.children.first_mut() {
            node.tags = vec!["@B_12010".to_string(), "@T_102069_03".to_string()];
        }
        let config = Configuration::default()
            .with_comment_mode(CommentMode::DeriveTags)
            .with_hide_tags(TagSet::parse("b_12010;t_102069_03"));
        let feature = assemble(config.clone(), &document).expect("not excluded");
        let first = feature.element("First").expect("first scenario");
        assert!(first.tags().is_empty());

        let mut untagged = document.clone();
        if let Some(FeatureChild::Scenario(node)) = untagged.feature.children.first_mut() {
            node.tags.clear();
        }
        let excluding = config.with_exclude_tags(TagSet::parse("B_12010"));
        let feature = assemble(excluding, &untagged).expect("second scenario survives");
        assert!(feature.element("First").is_none());
        assert!(feature.element("Second").is_some());
    }

    #[rstest]
    fn background_stays_out_of_feature_elements(document: Document) {
        let config = Configuration::default().with_comment_mode(CommentMode::DeriveTags);
        let feature = assemble(config, &document).expect("not excluded");
        assert!(feature.background.is_some());
        assert!(
            feature
                .feature_elements
                .iter()
                .all(|e| !matches!(e, FeatureElement::Background(_)))
        );
    }

    #[rstest]
    fn excluding_every_scenario_drops_feature(document: Document) {
        let config = Configuration::default()
            .with_exclude_tags(TagSet::parse("scenario-tag-1;scenario-tag-2"));
        assert!(assemble(config, &document).is_none());
    }

    #[test]
    fn feature_without_scenarios_is_kept() {
        let document = Document {
            feature: FeatureNode {
                name: "Empty".to_string(),
                description: Some("nothing yet".to_string()),
                tags: Vec::new(),
                language: Some("de".to_string()),
                background: None,
                children: Vec::new(),
                position: Position::new(1, 1),
            },
            comments: Vec::new(),
        };
        let config = Configuration::default().with_exclude_tags(TagSet::parse("anything"));
        let feature = assemble(config, &document).expect("empty feature kept");
        assert_eq!(feature.description, "nothing yet");
        assert_eq!(feature.language, "de");
    }

    #[rstest]
    fn assembling_twice_gives_equal_models(document: Document) {
        let assembler = FeatureAssembler::new(
            Configuration::default()
                .with_comment_mode(CommentMode::DeriveTagsAndRetain)
                .with_hide_tags(TagSet::parse("TagsToHideScenario")),
        );
        let first = assembler.assemble(&document).expect("first run");
        let second = assembler.assemble(&document).expect("second run");
        assert_eq!(first, second);
    }

    #[rstest]
    fn unknown_keyword_fails_the_document(mut document: Document) {
        if let Some(FeatureChild::Scenario(node)) = document.feature.children.first_mut() {
            node.steps.push(step("Perhaps ", 9));
        }
        let err = FeatureAssembler::default()
            .assemble(&document)
            .expect_err("keyword is not English");
        assert_eq!(
            err,
            MapError::UnrecognizedKeyword {
                keyword: "Perhaps".to_string(),
                line: 9
            }
        );
    }

    #[rstest]
    fn rule_children_fail_the_document(mut document: Document) {
        document.feature.children.push(FeatureChild::Rule(RuleNode {
            name: "a rule".to_string(),
            position: Position::new(20, 3),
        }));
        let err = FeatureAssembler::default()
            .assemble(&document)
            .expect_err("rules are unsupported");
        assert!(matches!(err, MapError::UnsupportedNode { line: 20, .. }));
    }

    struct Shouty;

    impl StepKeywords for Shouty {
        fn given(&self) -> &[&str] {
            &["GIVEN"]
        }
        fn when(&self) -> &[&str] {
            &["WHEN"]
        }
        fn then(&self) -> &[&str] {
            &["THEN"]
        }
        fn and(&self) -> &[&str] {
            &["AND"]
        }
        fn but(&self) -> &[&str] {
            &["BUT"]
        }
    }

    #[test]
    fn custom_keywords_override_the_language_table() {
        let document = Document {
            feature: FeatureNode {
                name: "Loud".to_string(),
                description: None,
                tags: Vec::new(),
                language: None,
                background: None,
                children: vec![FeatureChild::Scenario(ScenarioNode {
                    name: "shouting".to_string(),
                    description: None,
                    tags: Vec::new(),
                    steps: vec![step("GIVEN ", 3), step("THEN ", 4)],
                    position: Position::new(2, 3),
                })],
                position: Position::new(1, 1),
            },
            comments: Vec::new(),
        };
        let feature = FeatureAssembler::default()
            .with_keywords(Shouty)
            .assemble(&document)
            .expect("custom keywords apply")
            .expect("not excluded");
        let element = feature.element("shouting").expect("scenario");
        let natives: Vec<_> = element
            .steps()
            .iter()
            .map(|s| s.native_keyword.as_str())
            .collect();
        assert_eq!(natives, vec!["GIVEN ", "THEN "]);
    }
}
