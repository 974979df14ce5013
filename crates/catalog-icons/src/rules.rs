//! Provider keyword table
//!
//! Rules are evaluated top to bottom and the first hit wins. Branded rules
//! sit above the generic providers whose keywords they may contain.

use serde::{Deserialize, Deserializer, Serialize};

/// Prefix every served icon asset lives under
pub const ASSET_PREFIX: &str = "/assets/";

/// One entry of the built-in keyword table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconRule {
    /// Short provider name
    pub provider: &'static str,
    /// Lower-case substrings that select this rule
    pub keywords: &'static [&'static str],
    /// Asset path returned on match
    pub asset: &'static str,
}

impl IconRule {
    /// Check whether a lower-cased search string hits any keyword
    #[inline]
    #[must_use]
    pub fn matches(&self, search: &str) -> bool {
        self.keywords.iter().any(|keyword| search.contains(keyword))
    }
}

/// Built-in rules in priority order
pub const ICON_RULES: &[IconRule] = &[
    IconRule {
        provider: "re-ai-radio",
        keywords: &["ai radio llm", "ai radio", "re-ai-radio", "propose"],
        asset: "/assets/brand/new-icon.svg",
    },
    IconRule {
        provider: "openai",
        keywords: &["openai", "chatgpt", "gpt-"],
        asset: "/assets/openai.svg",
    },
    IconRule {
        provider: "google",
        keywords: &["gemini", "google"],
        asset: "/assets/google.svg",
    },
    IconRule {
        provider: "anthropic",
        keywords: &["anthropic", "claude"],
        asset: "/assets/anthropic.svg",
    },
    IconRule {
        provider: "xai",
        keywords: &["xai", "grok"],
        asset: "/assets/xai.svg",
    },
    IconRule {
        provider: "deepseek",
        keywords: &["deepseek"],
        asset: "/assets/deepseek.svg",
    },
    // CJK names have no case, so they match the lower-cased string as-is
    IconRule {
        provider: "doubao",
        keywords: &["doubao", "ark-", "volces", "豆包"],
        asset: "/assets/doubao.svg",
    },
    IconRule {
        provider: "moonshot",
        keywords: &["moonshot", "kimi", "月之暗面"],
        asset: "/assets/moonshot.svg",
    },
];

/// Caller-supplied rule, typically loaded from configuration
///
/// Deserialized rules go through [`CustomIconRule::new`], so keywords are
/// normalized however they are written in the source document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomIconRule {
    /// Substrings that select this rule, compared case-insensitively
    pub keywords: Vec<String>,
    /// Asset path returned on match
    pub asset: String,
}

impl CustomIconRule {
    /// Create rule; keywords are lower-cased and blank ones dropped
    #[must_use]
    pub fn new<I, K>(keywords: I, asset: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
            asset: asset.into(),
        }
    }

    /// Check whether a lower-cased search string hits any keyword
    #[inline]
    #[must_use]
    pub fn matches(&self, search: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| search.contains(keyword.as_str()))
    }
}

impl<'de> Deserialize<'de> for CustomIconRule {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            keywords: Vec<String>,
            asset: String,
        }

        let raw = Raw::deserialize(deserializer)?;
        Ok(Self::new(raw.keywords, raw.asset))
    }
}
