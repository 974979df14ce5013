//! Behavioral tests for endpoint icon resolution.
//!
//! Covers the documented provider scenarios, rule ordering, and the
//! properties every resolution must hold (determinism, case folding,
//! results drawn only from the table).

use catalog_icons::{
    icon_for_endpoint, resolve_icon, EndpointDescriptor, IconResolver, CustomIconRule,
    ICON_RULES,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn provider_scenarios() {
    let cases = [
        (EndpointDescriptor::new().with_name("ChatGPT"), Some("/assets/openai.svg")),
        (EndpointDescriptor::new().with_models("gemini-1.5-pro"), Some("/assets/google.svg")),
        (EndpointDescriptor::new().with_name("Claude"), Some("/assets/anthropic.svg")),
        (EndpointDescriptor::new().with_base_url("https://api.x.ai/v1"), None),
        (EndpointDescriptor::new().with_name("xAI"), Some("/assets/xai.svg")),
        (EndpointDescriptor::new().with_models("grok-2"), Some("/assets/xai.svg")),
        (EndpointDescriptor::new().with_name("DeepSeek"), Some("/assets/deepseek.svg")),
        (
            EndpointDescriptor::new().with_base_url("https://ark.cn-beijing.volces.com/api/v3"),
            Some("/assets/doubao.svg"),
        ),
        (EndpointDescriptor::new().with_name("豆包"), Some("/assets/doubao.svg")),
        (EndpointDescriptor::new().with_name("月之暗面"), Some("/assets/moonshot.svg")),
        (EndpointDescriptor::new().with_models("moonshot-v1-8k"), Some("/assets/moonshot.svg")),
        (EndpointDescriptor::new().with_name("AI Radio LLM 选荐"), Some("/assets/brand/new-icon.svg")),
        (EndpointDescriptor::new().with_name("propose"), Some("/assets/brand/new-icon.svg")),
    ];

    for (endpoint, expected) in cases {
        assert_eq!(resolve_icon(&endpoint), expected, "{endpoint:?}");
    }
}

#[test]
fn earlier_rule_beats_later_rule() {
    // "google" precedes "anthropic" in the table
    let endpoint = EndpointDescriptor::new()
        .with_name("claude via vertex")
        .with_base_url("https://us-central1-aiplatform.googleapis.com");
    assert_eq!(resolve_icon(&endpoint), Some("/assets/google.svg"));
}

#[test]
fn models_from_config_document() {
    let endpoint: EndpointDescriptor = serde_yaml::from_str(
        "name: Gateway\nmodels:\n  default:\n    - llama-3\n    - deepseek-chat\nbaseURL: https://gateway.local\n",
    )
    .unwrap();
    assert_eq!(resolve_icon(&endpoint), Some("/assets/deepseek.svg"));
}

#[test]
fn override_outside_assets_is_ignored() {
    let endpoint = EndpointDescriptor::new().with_icon_url("/static/logo.png");
    assert_eq!(icon_for_endpoint(&endpoint), None);
}

#[test]
fn custom_rules_loaded_from_json() {
    let rules: Vec<CustomIconRule> = serde_json::from_str(
        r#"[{"keywords":["mistral"],"asset":"/assets/mistral.svg"}]"#,
    )
    .unwrap();
    let resolver = IconResolver::new().with_rules(rules);

    assert_eq!(resolver.custom_len(), 1);
    assert_eq!(
        resolver.resolve(&EndpointDescriptor::new().with_name("mistral-large")),
        Some("/assets/mistral.svg")
    );
    assert_eq!(resolver.resolve(&EndpointDescriptor::new()), None);
}

#[test]
fn loaded_rules_match_case_insensitively_and_ignore_blank_keywords() {
    let rules: Vec<CustomIconRule> = serde_json::from_str(
        r#"[
            {"keywords":["Mistral"],"asset":"/assets/mistral.svg"},
            {"keywords":["","x"],"asset":"/assets/blank.svg"}
        ]"#,
    )
    .unwrap();
    assert_eq!(rules[1].keywords, vec!["x".to_string()]);
    let resolver = IconResolver::new().with_rules(rules);

    assert_eq!(
        resolver.resolve(&EndpointDescriptor::new().with_name("mistral-large")),
        Some("/assets/mistral.svg")
    );
    assert_eq!(
        resolver.resolve(&EndpointDescriptor::new().with_name("gpt-4o")),
        Some("/assets/openai.svg")
    );
}

#[test]
fn empty_list_entries_are_kept_in_search_string() {
    let split = EndpointDescriptor::new().with_models(vec![
        "ai".to_string(),
        String::new(),
        "radio".to_string(),
    ]);
    assert_eq!(split.search_string(), "ai  radio");
    assert_eq!(resolve_icon(&split), None);

    let joined = EndpointDescriptor::new().with_models(vec!["ai".to_string(), "radio".to_string()]);
    assert_eq!(resolve_icon(&joined), Some("/assets/brand/new-icon.svg"));
}

proptest! {
    #[test]
    fn prop_result_comes_from_table(name in ".{0,40}", url in "[a-z:/.]{0,30}") {
        let endpoint = EndpointDescriptor::new().with_name(name).with_base_url(url);
        if let Some(asset) = resolve_icon(&endpoint) {
            prop_assert!(ICON_RULES.iter().any(|rule| rule.asset == asset));
        }
    }

    #[test]
    fn prop_case_insensitive(name in "[a-zA-Z0-9 -]{0,30}") {
        let lower = EndpointDescriptor::new().with_name(name.to_lowercase());
        let upper = EndpointDescriptor::new().with_name(name.to_uppercase());
        prop_assert_eq!(resolve_icon(&lower), resolve_icon(&upper));
    }

    #[test]
    fn prop_branded_keyword_dominates(prefix in "[a-z ]{0,10}", suffix in "[a-z ]{0,10}") {
        let endpoint = EndpointDescriptor::new()
            .with_name(format!("{prefix}re-ai-radio{suffix}"))
            .with_models(vec!["gpt-4o".to_string(), "claude-3".to_string()]);
        prop_assert_eq!(resolve_icon(&endpoint), Some("/assets/brand/new-icon.svg"));
    }
}
