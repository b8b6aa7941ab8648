use std::io;
use thiserror::Error;

/// Errors raised while normalizing or rendering a parse tree
#[derive(Error, Debug)]
pub enum GlossError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid lexicon: {0}")]
    InvalidLexicon(String),

    /// A node's kind differs from the one expected at its position in the tree
    #[error("Structural mismatch: expected {expected}, found {found}")]
    StructuralMismatch { expected: String, found: String },

    /// A grammatical construct with no rendering rule
    #[error("Unsupported construct: {0}")]
    Unsupported(String),

    /// A word missing from the lexicon
    #[error("Lexical gap: no {category} entry for {word:?}")]
    LexicalGap { category: &'static str, word: String },
}

impl GlossError {
    pub fn mismatch(expected: impl Into<String>, found: impl ToString) -> Self {
        GlossError::StructuralMismatch {
            expected: expected.into(),
            found: found.to_string(),
        }
    }
}

/// Result type for translation operations
pub type Result<T> = std::result::Result<T, GlossError>;

/// Trait extension for Option<T> to convert to GlossError
pub trait OptionExt<T> {
    fn ok_or_unsupported<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;

    fn ok_or_gap(self, category: &'static str, word: &str) -> Result<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_unsupported<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.ok_or_else(|| GlossError::Unsupported(f()))
    }

    fn ok_or_gap(self, category: &'static str, word: &str) -> Result<T> {
        self.ok_or_else(|| GlossError::LexicalGap {
            category,
            word: word.to_string(),
        })
    }
}

/// Uppercase the first character of `s`
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

/// Uppercase the first character of `s` if it is a word character
pub fn capitalize_sentence(s: &str) -> String {
    match s.chars().next() {
        Some(first) if first.is_ascii_alphanumeric() || first == '_' => capitalize(s),
        _ => s.to_string(),
    }
}

/// Prefix a noun phrase with its indefinite article.
///
/// Phrases that open with "that " are abstractions and stay bare.
pub fn with_article(noun: &str) -> String {
    if noun.starts_with("that ") {
        return noun.to_string();
    }
    let article = if noun.starts_with(['a', 'e', 'i', 'o', 'u']) {
        "an"
    } else {
        "a"
    };
    format!("{} {}", article, noun)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_article() {
        assert_eq!(with_article("house"), "a house");
        assert_eq!(with_article("apple"), "an apple");
        assert_eq!(with_article("good thing"), "a good thing");
        assert_eq!(with_article("that I talk"), "that I talk");
        assert_eq!(with_article("thatched roof"), "a thatched roof");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("alis"), "Alis");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize_sentence("you talk to me"), "You talk to me");
        assert_eq!(capitalize_sentence(" spaced"), " spaced");
        assert_eq!(capitalize_sentence("élan"), "élan");
        assert_eq!(capitalize_sentence("_x"), "_x");
    }

    #[test]
    fn test_option_ext() {
        let missing: Option<u8> = None;
        let err = missing.ok_or_gap("root word", "klama").unwrap_err();
        assert_eq!(err.to_string(), "Lexical gap: no root word entry for \"klama\"");

        let err = None::<u8>.ok_or_unsupported(|| "quotes".to_string()).unwrap_err();
        assert!(matches!(err, GlossError::Unsupported(ref s) if s == "quotes"));
        assert_eq!(Some(3).ok_or_gap("pronoun", "mi").unwrap(), 3);
    }
}
