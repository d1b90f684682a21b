//! Parsing of the free-form text users send to the bot.
//!
//! Two pieces of syntax are recognised:
//! - the bot mention `@<bot_name>`, of which only the first occurrence is removed;
//! - a `to:<code>` directive selecting the target language. The first match
//!   wins and exactly that span (plus trailing whitespace) is cut from the text.
//!
//! Codes are not validated here; the translation gateway rejects unsupported ones.

use std::sync::LazyLock;

use regex::Regex;

static DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)to:\s*([[:word:]]+)\s*").expect("directive pattern is valid")
});

/// Text to translate plus the language requested by a `to:` directive, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub text: String,
    pub target_language: Option<String>,
}

/// Remove the first `@<bot_name>` and trim the result.
pub fn strip_mention(text: &str, bot_name: &str) -> String {
    let mention = format!("@{bot_name}");
    text.replacen(&mention, "", 1).trim().to_string()
}

/// Split off a `to:<code>` directive. The code is lower-cased.
pub fn extract_directive(text: &str) -> TranslationRequest {
    let Some(caps) = DIRECTIVE.captures(text) else {
        return TranslationRequest {
            text: text.to_string(),
            target_language: None,
        };
    };

    let (Some(span), Some(code)) = (caps.get(0), caps.get(1)) else {
        return TranslationRequest {
            text: text.to_string(),
            target_language: None,
        };
    };

    let mut remaining = String::with_capacity(text.len() - span.len());
    remaining.push_str(&text[..span.start()]);
    remaining.push_str(&text[span.end()..]);

    TranslationRequest {
        text: remaining.trim().to_string(),
        target_language: Some(code.as_str().to_lowercase()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_mention_and_trims() {
        assert_eq!(strip_mention("@translator Hello", "translator"), "Hello");
        assert_eq!(strip_mention("  Hello @translator  ", "translator"), "Hello");
    }

    #[test]
    fn mention_only_leaves_empty_text() {
        assert_eq!(strip_mention("@translator", "translator"), "");
        assert_eq!(strip_mention("  @translator  ", "translator"), "");
    }

    #[test]
    fn only_first_mention_is_stripped() {
        assert_eq!(
            strip_mention("@translator ask @translator", "translator"),
            "ask @translator"
        );
    }

    #[test]
    fn text_without_mention_is_only_trimmed() {
        assert_eq!(strip_mention("  Bonjour ", "translator"), "Bonjour");
    }

    #[test]
    fn leading_directive_is_extracted() {
        assert_eq!(
            extract_directive("to:es Hello"),
            TranslationRequest {
                text: "Hello".to_string(),
                target_language: Some("es".to_string()),
            }
        );
    }

    #[test]
    fn directive_is_case_insensitive_and_lowercased() {
        let request = extract_directive("TO:FR good morning");
        assert_eq!(request.target_language.as_deref(), Some("fr"));
        assert_eq!(request.text, "good morning");
    }

    #[test]
    fn whitespace_after_colon_is_allowed() {
        let request = extract_directive("to:  de Guten Tag");
        assert_eq!(request.target_language.as_deref(), Some("de"));
        assert_eq!(request.text, "Guten Tag");
    }

    #[test]
    fn directive_in_the_middle_is_cut_out() {
        let request = extract_directive("Hello to:es world");
        assert_eq!(request.target_language.as_deref(), Some("es"));
        assert_eq!(request.text, "Hello world");
    }

    #[test]
    fn trailing_directive_is_cut_out() {
        let request = extract_directive("Hello world to:it");
        assert_eq!(request.target_language.as_deref(), Some("it"));
        assert_eq!(request.text, "Hello world");
    }

    #[test]
    fn first_directive_wins_and_is_the_one_removed() {
        let request = extract_directive("to:es Hello to:fr");
        assert_eq!(request.target_language.as_deref(), Some("es"));
        assert_eq!(request.text, "Hello to:fr");
    }

    #[test]
    fn no_directive_leaves_text_untouched() {
        assert_eq!(
            extract_directive("Hello there"),
            TranslationRequest {
                text: "Hello there".to_string(),
                target_language: None,
            }
        );
    }

    #[test]
    fn unsupported_codes_are_not_rejected_here() {
        let request = extract_directive("to:klingon Qapla");
        assert_eq!(request.target_language.as_deref(), Some("klingon"));
        assert_eq!(request.text, "Qapla");
    }

    #[test]
    fn directive_alone_leaves_empty_text() {
        let request = extract_directive("to:es");
        assert_eq!(request.target_language.as_deref(), Some("es"));
        assert_eq!(request.text, "");
    }

    #[test]
    fn colon_without_code_is_not_a_directive() {
        let request = extract_directive("to: ");
        assert_eq!(request.target_language, None);
        assert_eq!(request.text, "to: ");
    }

    #[test]
    fn mention_is_stripped_before_directive_extraction() {
        let text = strip_mention("@translator to:es Hello", "translator");
        let request = extract_directive(&text);
        assert_eq!(request.target_language.as_deref(), Some("es"));
        assert_eq!(request.text, "Hello");
    }
}
