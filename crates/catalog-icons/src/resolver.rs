//! Icon resolution over the rule table
//!
//! Provides [`resolve_icon`] for the built-in table and [`IconResolver`] for
//! tables extended at runtime.

use crate::endpoint::EndpointDescriptor;
use crate::rules::{CustomIconRule, ASSET_PREFIX, ICON_RULES};

/// Resolve the icon asset for an endpoint using the built-in rules
///
/// Returns `None` when no field is present or no rule matches; the caller
/// then falls back to its generic icon.
#[must_use]
pub fn resolve_icon(endpoint: &EndpointDescriptor) -> Option<&'static str> {
    let search = endpoint.search_string();
    if search.is_empty() {
        return None;
    }

    ICON_RULES
        .iter()
        .find(|rule| rule.matches(&search))
        .map(|rule| rule.asset)
}

/// Icon for display, honoring an explicit `iconURL` first
///
/// Only overrides under `/assets/` are trusted; anything else falls through
/// to keyword resolution.
#[must_use]
pub fn icon_for_endpoint(endpoint: &EndpointDescriptor) -> Option<&str> {
    match endpoint.icon_url.as_deref() {
        Some(url) if url.starts_with(ASSET_PREFIX) => Some(url),
        _ => resolve_icon(endpoint),
    }
}

/// Resolver with extra rules evaluated ahead of the built-in table
#[derive(Debug, Clone, Default)]
pub struct IconResolver {
    custom: Vec<CustomIconRule>,
}

impl IconResolver {
    /// Resolver with only the built-in rules
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a custom rule
    ///
    /// Custom rules keep their insertion order and all of them run before
    /// the built-ins.
    #[must_use]
    pub fn with_rule(mut self, rule: CustomIconRule) -> Self {
        self.custom.push(rule);
        self
    }

    /// Append several custom rules
    #[must_use]
    pub fn with_rules(mut self, rules: impl IntoIterator<Item = CustomIconRule>) -> Self {
        self.custom.extend(rules);
        self
    }

    /// Number of custom rules
    #[inline]
    #[must_use]
    pub fn custom_len(&self) -> usize {
        self.custom.len()
    }

    /// Resolve icon asset
    #[must_use]
    pub fn resolve(&self, endpoint: &EndpointDescriptor) -> Option<&str> {
        let search = endpoint.search_string();
        if search.is_empty() {
            return None;
        }

        if let Some(rule) = self.custom.iter().find(|rule| rule.matches(&search)) {
            return Some(rule.asset.as_str());
        }

        ICON_RULES
            .iter()
            .find(|rule| rule.matches(&search))
            .map(|rule| rule.asset)
    }

    /// Icon for display, honoring an explicit `iconURL` first
    #[must_use]
    pub fn icon_for<'a>(&'a self, endpoint: &'a EndpointDescriptor) -> Option<&'a str> {
        match endpoint.icon_url.as_deref() {
            Some(url) if url.starts_with(ASSET_PREFIX) => Some(url),
            _ => self.resolve(endpoint),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_by_name() {
        let endpoint = EndpointDescriptor::new().with_name("gpt-4-turbo");
        assert_eq!(resolve_icon(&endpoint), Some("/assets/openai.svg"));
    }

    #[test]
    fn resolves_by_base_url() {
        let endpoint = EndpointDescriptor::new().with_base_url("https://api.anthropic.com");
        assert_eq!(resolve_icon(&endpoint), Some("/assets/anthropic.svg"));
    }

    #[test]
    fn resolves_by_model_list() {
        let endpoint = EndpointDescriptor::new().with_models(vec!["doubao-pro".to_string()]);
        assert_eq!(resolve_icon(&endpoint), Some("/assets/doubao.svg"));
    }

    #[test]
    fn empty_and_unknown_are_none() {
        assert_eq!(resolve_icon(&EndpointDescriptor::new()), None);
        assert_eq!(
            resolve_icon(&EndpointDescriptor::new().with_name("My Custom Thing")),
            None
        );
    }

    #[test]
    fn branded_rule_wins() {
        let endpoint = EndpointDescriptor::new()
            .with_name("re-AI-Radio")
            .with_base_url("https://api.openai.com/v1");
        assert_eq!(resolve_icon(&endpoint), Some("/assets/brand/new-icon.svg"));
    }

    #[test]
    fn override_under_assets_wins() {
        let endpoint = EndpointDescriptor::new()
            .with_name("gpt-4o")
            .with_icon_url("/assets/custom/proxy.svg");
        assert_eq!(icon_for_endpoint(&endpoint), Some("/assets/custom/proxy.svg"));

        let external = endpoint.clone().with_icon_url("https://cdn.example.com/x.png");
        assert_eq!(icon_for_endpoint(&external), Some("/assets/openai.svg"));
    }

    #[test]
    fn custom_rules_run_first() {
        let resolver = IconResolver::new()
            .with_rule(CustomIconRule::new(["azure"], "/assets/azure.svg"));

        let endpoint = EndpointDescriptor::new()
            .with_name("Azure OpenAI")
            .with_models("gpt-4o");
        assert_eq!(resolver.resolve(&endpoint), Some("/assets/azure.svg"));

        let plain = EndpointDescriptor::new().with_name("Kimi");
        assert_eq!(resolver.resolve(&plain), Some("/assets/moonshot.svg"));

        let pinned = endpoint.with_icon_url("/assets/pinned.svg");
        assert_eq!(resolver.icon_for(&pinned), Some("/assets/pinned.svg"));
    }
}
