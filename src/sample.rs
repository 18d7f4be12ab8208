// Copyright 2025 the Font Preview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Choosing a sample string for a font from its file name.
//!
//! The choice is a heuristic over substrings of the lowercased name. Matching
//! is by substring rather than by token, so an unrelated word that happens to
//! contain a key (for example `"ja"` in `"Ninja"` or `"tc"` in `"Sketch"`)
//! selects that locale. This is accepted imprecision.
//!
//! The name includes its extension. Every `.ttc` collection therefore contains
//! `"tc"` and selects Traditional Chinese, even `NotoSansJP.ttc`, unless a
//! Simplified Chinese key appears first in the rule order.

/// One of the fixed sample strings a preview can show.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PreviewText {
    /// Simplified Chinese.
    SimplifiedChinese,
    /// Traditional Chinese.
    TraditionalChinese,
    /// Japanese.
    Japanese,
    /// English, used when no other rule matches.
    English,
}

impl PreviewText {
    /// The sample string rendered for this locale.
    pub const fn text(self) -> &'static str {
        match self {
            Self::SimplifiedChinese => "欢迎使用FreeFont Pro",
            Self::TraditionalChinese => "歡迎使用FreeFont Pro",
            Self::Japanese => "FreeFont Proへようこそ",
            Self::English => "Welcome to FreeFont Pro",
        }
    }
}

/// A selection rule: any of `keys` found in the lowercased name selects `text`.
#[derive(Clone, Copy, Debug)]
pub struct Rule {
    /// Lowercase substrings that trigger this rule.
    pub keys: &'static [&'static str],
    /// The sample chosen when the rule matches.
    pub text: PreviewText,
}

/// Selection rules in priority order. The first matching rule wins.
pub const RULES: &[Rule] = &[
    Rule {
        keys: &["cn", "hans"],
        text: PreviewText::SimplifiedChinese,
    },
    Rule {
        keys: &["hc", "hant", "tc"],
        text: PreviewText::TraditionalChinese,
    },
    Rule {
        keys: &["jp", "ja"],
        text: PreviewText::Japanese,
    },
];

/// The sample used when no rule matches.
pub const FALLBACK: PreviewText = PreviewText::English;

/// Selects the sample for a font given its file name.
pub fn select(font_name: &str) -> PreviewText {
    let name = font_name.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.keys.iter().any(|key| name.contains(key)))
        .map_or(FALLBACK, |rule| rule.text)
}
