//! JSON output of the model, as consumed by rendering collaborators.

use featuredoc::assembler::FeatureAssembler;
use featuredoc::config::{CommentMode, Configuration};
use featuredoc::source::assemble_source;
use serde_json::{Value, json};

#[expect(clippy::expect_used, reason = "behavioural tests use explicit panics")]
#[test]
fn feature_serializes_with_elements_and_comments() {
    let text = concat!(
        "@feature-tag\n",
        "Feature: Serialized\n",
        "  # (B-42)\n",
        "  Scenario: First\n",
        "    Given a step\n",
        "      | a | b |\n",
        "      | 1 | 2 |\n",
    );
    let assembler = FeatureAssembler::new(
        Configuration::default().with_comment_mode(CommentMode::DeriveTagsAndRetain),
    );
    let feature = assemble_source(text, &assembler)
        .expect("feature assembles")
        .expect("not excluded");

    let value = serde_json::to_value(&feature).expect("model serializes");
    let at = |pointer: &str| value.pointer(pointer).cloned().unwrap_or(Value::Null);

    assert_eq!(at("/id"), json!("serialized"));
    assert_eq!(at("/tags"), json!(["@feature-tag"]));
    assert_eq!(at("/language"), json!("en"));

    let scenario = "/feature_elements/0/Scenario";
    assert_eq!(at(&format!("{scenario}/slug")), json!("first"));
    assert_eq!(at(&format!("{scenario}/core/feature")), json!("serialized"));
    assert_eq!(at(&format!("{scenario}/core/tags")), json!(["@B_42"]));
    assert_eq!(at(&format!("{scenario}/core/steps/0/keyword")), json!("Given"));
    assert_eq!(
        at(&format!("{scenario}/core/steps/0/table/header_row")),
        json!(["a", "b"])
    );
    assert_eq!(at("/comments/0/kind"), json!("Normal"));
}
