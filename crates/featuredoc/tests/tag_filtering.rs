//! Behavioural tests for tag hiding and tag-based exclusion.

use featuredoc::assembler::FeatureAssembler;
use featuredoc::config::{Configuration, TagSet};
use featuredoc::model::Feature;
use featuredoc::source::assemble_source;
use rstest::rstest;

const SCENARIO_BODY: &str = concat!(
    "    Given some feature\n",
    "    When it runs\n",
    "    Then I should see that this thing happens\n",
);

fn feature_text(feature_tags: &str, scenarios: &[(&str, &str)]) -> String {
    let mut text = format!(
        "# ignore this comment\n{feature_tags}\nFeature: Test\n    In order to do something\n\n"
    );
    for (tags, name) in scenarios {
        text.push_str(&format!("    {tags}\n  Scenario: {name}\n{SCENARIO_BODY}\n"));
    }
    text
}

#[expect(clippy::expect_used, reason = "behavioural tests use explicit panics")]
fn assemble(text: &str, config: Configuration) -> Option<Feature> {
    assemble_source(text, &FeatureAssembler::new(config)).expect("feature assembles")
}

fn names(feature: &Feature) -> Vec<&str> {
    feature.feature_elements.iter().map(|e| e.name()).collect()
}

fn exclude(tags: &str) -> Configuration {
    Configuration::default().with_exclude_tags(TagSet::parse(tags))
}

fn hide(tags: &str) -> Configuration {
    Configuration::default().with_hide_tags(TagSet::parse(tags))
}

#[test]
fn feature_level_exclusion_drops_the_feature() {
    let text = feature_text(
        "@feature-tag @exclude-tag",
        &[("@scenario-tag-1 @scenario-tag-2", "A scenario")],
    );
    assert!(assemble(&text, exclude("exclude-tag")).is_none());
}

#[test]
fn hidden_feature_tag_is_removed_from_output() {
    let text = feature_text(
        "@feature-tag @TagsToHideFeature",
        &[("@scenario-tag-1 @scenario-tag-2", "A scenario")],
    );
    let Some(feature) = assemble(&text, hide("TagsToHideFeature;TagsToHideScenario")) else {
        panic!("feature is not excluded");
    };
    assert_eq!(feature.tags, vec!["@feature-tag".to_string()]);
}

#[test]
fn scenario_level_exclusion_drops_only_that_scenario() {
    let text = feature_text(
        "@feature-tag",
        &[
            ("@scenario-tag-1 @scenario-tag-2", "A scenario"),
            ("@scenario-tag-1 @scenario-tag-2 @exclude-tag", "B scenario"),
            ("@scenario-tag-1 @scenario-tag-2", "C scenario"),
        ],
    );
    let Some(feature) = assemble(&text, exclude("exclude-tag")) else {
        panic!("feature is not excluded");
    };
    assert_eq!(names(&feature), vec!["A scenario", "C scenario"]);
    assert_eq!(feature.tags, vec!["@feature-tag".to_string()]);
}

#[test]
fn hidden_scenario_tag_is_removed_but_scenario_kept() {
    let text = feature_text(
        "@feature-tag",
        &[
            ("@scenario-tag-1 @scenario-tag-2", "A scenario"),
            ("@scenario-tag-1 @scenario-tag-2 @TagsToHideScenario", "B scenario"),
            ("@scenario-tag-1 @scenario-tag-2", "C scenario"),
        ],
    );
    let Some(feature) = assemble(&text, hide("TagsToHideFeature;TagsToHideScenario")) else {
        panic!("feature is not excluded");
    };
    assert_eq!(names(&feature), vec!["A scenario", "B scenario", "C scenario"]);
    let b = feature.element("B scenario").map(|e| e.tags().to_vec());
    assert_eq!(
        b,
        Some(vec![
            "@scenario-tag-1".to_string(),
            "@scenario-tag-2".to_string()
        ])
    );
}

#[test]
fn excluding_every_scenario_drops_the_feature() {
    let text = feature_text(
        "@feature-tag",
        &[
            ("@scenario-tag-1 @scenario-tag-2 @Exclude-Tag", "A scenario"),
            ("@scenario-tag-1 @scenario-tag-2 @exclude-tag", "B scenario"),
        ],
    );
    assert!(assemble(&text, exclude("exclude-tag")).is_none());
}

#[rstest]
#[case("exclude-tag")]
#[case("Exclude-Tag")]
#[case("@EXCLUDE-TAG")]
fn exclusion_ignores_case(#[case] configured: &str) {
    let text = feature_text(
        "@feature-tag",
        &[
            ("@scenario-tag-1 @scenario-tag-2 @Exclude-Tag", "A scenario"),
            ("@scenario-tag-1 @scenario-tag-2 @exclude-tag", "B scenario"),
            ("@scenario-tag-1 @scenario-tag-2 @ExClUdE-tAg", "C scenario"),
            ("@scenario-tag-1 @scenario-tag-2", "D scenario"),
        ],
    );
    let Some(feature) = assemble(&text, exclude(configured)) else {
        panic!("feature is not excluded");
    };
    assert_eq!(names(&feature), vec!["D scenario"]);
}

#[test]
fn hiding_a_tag_does_not_stop_it_excluding() {
    let text = feature_text(
        "@feature-tag",
        &[
            ("@internal", "A scenario"),
            ("@scenario-tag-1", "B scenario"),
        ],
    );
    let config = hide("internal").with_exclude_tags(TagSet::parse("internal"));
    let Some(feature) = assemble(&text, config) else {
        panic!("feature is not excluded");
    };
    assert_eq!(names(&feature), vec!["B scenario"]);
}

#[test]
fn configuration_from_environment_lookup_drives_assembly() {
    let config = Configuration::from_lookup(|key| match key {
        "FEATUREDOC_EXCLUDE_TAGS" => Some("wip".to_string()),
        "FEATUREDOC_HIDE_TAGS" => Some("scenario-tag-1".to_string()),
        _ => None,
    });
    let Ok(config) = config else {
        panic!("valid configuration");
    };
    let text = feature_text(
        "",
        &[
            ("@scenario-tag-1 @WIP", "A scenario"),
            ("@scenario-tag-1 @scenario-tag-2", "B scenario"),
        ],
    );
    let Some(feature) = assemble(&text, config) else {
        panic!("feature is not excluded");
    };
    assert_eq!(names(&feature), vec!["B scenario"]);
    let tags = feature.element("B scenario").map(|e| e.tags().to_vec());
    assert_eq!(tags, Some(vec!["@scenario-tag-2".to_string()]));
}
