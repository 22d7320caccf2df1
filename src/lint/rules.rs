//! Rule evaluation for extracted log messages.
//!
//! Rules run in a fixed order, each gated by its toggle in [`RuleConfig`]:
//!
//! 1. `capital_letter`  - never stops later rules
//! 2. `special_symbols` - stops rules 3 and 4 when it fires
//! 3. `only_english`    - stops rule 4 when it fires
//! 4. `sensitive_data`  - policy depends on how the message was built
//!
//! Evaluation is a pure function of the message and the configuration.

use unicode_general_category::{get_general_category, GeneralCategory};

use crate::config::RuleConfig;

use super::{MessageExpression, RuleKind};

/// A blocklist for the sensitive data rule.
#[derive(Debug, Clone, Copy)]
pub struct SensitivePolicy {
    pub words: &'static [&'static str],
}

impl SensitivePolicy {
    /// Case-insensitive substring match against every blocklisted word.
    pub fn matches(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.words.iter().any(|w| lower.contains(w))
    }
}

/// Policy for single literals. "token" is left out so phrases such as
/// "token validated" pass.
pub const LITERAL_POLICY: SensitivePolicy = SensitivePolicy {
    words: &["password", "api_key", "apikey", "secret", "credential"],
};

/// Policy for concatenations, where a "token" prefix usually precedes an
/// interpolated secret value.
pub const CONCAT_POLICY: SensitivePolicy = SensitivePolicy {
    words: &["password", "token", "api_key", "apikey", "secret", "credential"],
};

/// Run all enabled rules against a message.
///
/// Returns the rules that fired, in evaluation order.
pub fn evaluate(message: &MessageExpression, config: &RuleConfig) -> Vec<RuleKind> {
    let text = message.text();
    let mut fired = Vec::new();

    if config.is_enabled(RuleKind::CapitalLetter) && starts_with_capital(text) {
        fired.push(RuleKind::CapitalLetter);
    }

    if config.is_enabled(RuleKind::SpecialSymbols) && has_special_symbols(text) {
        fired.push(RuleKind::SpecialSymbols);
        return fired;
    }

    if config.is_enabled(RuleKind::OnlyEnglish) && !is_english_only(text) {
        fired.push(RuleKind::OnlyEnglish);
        return fired;
    }

    if config.is_enabled(RuleKind::SensitiveData) && has_sensitive_data(message) {
        fired.push(RuleKind::SensitiveData);
    }

    fired
}

/// General category L (Lu, Ll, Lt, Lm, Lo).
fn is_letter(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
    )
}

/// First code point is in category Lu.
pub fn starts_with_capital(text: &str) -> bool {
    text.chars()
        .next()
        .is_some_and(|c| get_general_category(c) == GeneralCategory::UppercaseLetter)
}

/// Contains `!`, `:`, `;`, an ellipsis, or a non-ASCII code point that
/// is not a letter (emoji, symbols, marks, non-ASCII digits and
/// punctuation).
pub fn has_special_symbols(text: &str) -> bool {
    if text.contains("...") {
        return true;
    }
    text.chars()
        .any(|c| matches!(c, '!' | ':' | ';') || (!c.is_ascii() && !is_letter(c)))
}

/// Only ASCII letters, decimal digits (Nd) and whitespace.
pub fn is_english_only(text: &str) -> bool {
    text.chars().all(|c| {
        c.is_ascii_alphabetic()
            || get_general_category(c) == GeneralCategory::DecimalNumber
            || c.is_whitespace()
    })
}

/// Apply the sensitive data policy matching the message's construction.
pub fn has_sensitive_data(message: &MessageExpression) -> bool {
    match message {
        MessageExpression::Literal(text) => LITERAL_POLICY.matches(text),
        MessageExpression::Concatenation { fragments, joined } => {
            fragments.iter().any(|f| CONCAT_POLICY.matches(f)) || CONCAT_POLICY.matches(joined)
        }
    }
}
