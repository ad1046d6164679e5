//! Parse completion replies into annotations

use crate::error::AnnotatorError;
use crate::types::{Annotation, Sentiment};

/// Parse a raw reply into an annotation
///
/// The reply is expected to carry three lines in fixed order — sentiment,
/// category, key themes — each with a literal `": "` separating label from
/// value. Lines past the third are ignored. The themes value is split on
/// commas, each piece trimmed and lowercased, then rejoined with `", "`;
/// an empty themes value stays an empty string.
///
/// No semantic validation happens here: the label text before the
/// separator is not checked, and sentiment/category are accepted as
/// whatever strings the reply carries (see `canonicalize_sentiment` for
/// the opt-in strict step). A reply with fewer than three lines, or a line
/// without the separator, fails with `MalformedResponse`.
pub fn parse_reply(reply: &str) -> Result<Annotation, AnnotatorError> {
    let mut lines = reply.trim().lines();

    let sentiment = field_value(lines.next(), "sentiment")?;
    let category = field_value(lines.next(), "category")?;
    let raw_themes = field_value(lines.next(), "key themes")?;

    Ok(Annotation {
        sentiment,
        category,
        key_themes: normalize_themes(&raw_themes),
    })
}

/// Match the sentiment against the closed expected set, canonicalizing it
///
/// This is the strict-mode step: a recognized value is rewritten to its
/// canonical casing, an unrecognized one fails the record. The default
/// pipeline does not call this.
pub fn canonicalize_sentiment(annotation: &mut Annotation) -> Result<Sentiment, AnnotatorError> {
    match Sentiment::parse(&annotation.sentiment) {
        Some(sentiment) => {
            annotation.sentiment = sentiment.as_str().to_string();
            Ok(sentiment)
        }
        None => Err(AnnotatorError::MalformedResponse(format!(
            "unrecognized sentiment value {:?}",
            annotation.sentiment
        ))),
    }
}

/// Isolate the value after the first `": "` on a line
fn field_value(line: Option<&str>, field: &str) -> Result<String, AnnotatorError> {
    let line = line.ok_or_else(|| {
        AnnotatorError::MalformedResponse(format!("reply has no {} line", field))
    })?;

    let (_, value) = line.split_once(": ").ok_or_else(|| {
        AnnotatorError::MalformedResponse(format!(
            "{} line lacks a ': ' separator: {:?}",
            field, line
        ))
    })?;

    Ok(value.to_string())
}

fn normalize_themes(raw: &str) -> String {
    raw.split(',')
        .map(|theme| theme.trim().to_lowercase())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_well_formed_reply() {
        let reply = "Sentiment: Negative\nCategory: Product Quality\nKey Themes: wrong item, slow refund";
        let annotation = parse_reply(reply).unwrap();
        assert_eq!(annotation.sentiment, "Negative");
        assert_eq!(annotation.category, "Product Quality");
        assert_eq!(annotation.key_themes, "wrong item, slow refund");
    }

    #[test]
    fn test_theme_normalization() {
        let reply = "Sentiment: Negative\nCategory: Delivery\nKey Themes:  Fast Delivery ,DAMAGED Box";
        let annotation = parse_reply(reply).unwrap();
        assert_eq!(annotation.key_themes, "fast delivery, damaged box");
    }

    #[test]
    fn test_two_line_reply_is_malformed() {
        let reply = "Sentiment: Negative\nCategory: Delivery";
        let result = parse_reply(reply);
        assert!(matches!(result, Err(AnnotatorError::MalformedResponse(_))));
    }

    #[test]
    fn test_missing_separator_is_malformed() {
        let reply = "Sentiment Negative\nCategory: Delivery\nKey Themes: slow";
        let result = parse_reply(reply);
        match result {
            Err(AnnotatorError::MalformedResponse(msg)) => {
                assert!(msg.contains("sentiment"));
            }
            other => panic!("expected MalformedResponse, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_reply_is_malformed() {
        assert!(parse_reply("").is_err());
        assert!(parse_reply("   \n  ").is_err());
    }

    #[test]
    fn test_empty_themes_stay_empty_string() {
        let reply = "Sentiment: Neutral\nCategory: Other\nKey Themes: ";
        let annotation = parse_reply(reply).unwrap();
        assert_eq!(annotation.key_themes, "");
    }

    #[test]
    fn test_lines_past_the_third_are_ignored() {
        let reply = "Sentiment: Positive\nCategory: Delivery\nKey Themes: fast\n\nExtra commentary the model added.";
        let annotation = parse_reply(reply).unwrap();
        assert_eq!(annotation.key_themes, "fast");
    }

    #[test]
    fn test_value_keeps_everything_after_first_separator() {
        let reply = "Sentiment: Positive: very\nCategory: Delivery\nKey Themes: fast";
        let annotation = parse_reply(reply).unwrap();
        assert_eq!(annotation.sentiment, "Positive: very");
    }

    #[test]
    fn test_label_text_is_not_checked() {
        // Line order is trusted; label text is not validated
        let reply = "Mood: Positive\nKind: Delivery\nTopics: fast";
        let annotation = parse_reply(reply).unwrap();
        assert_eq!(annotation.sentiment, "Positive");
        assert_eq!(annotation.category, "Delivery");
    }

    #[test]
    fn test_whitespace_only_sentiment_is_accepted() {
        // No semantic validation in the parser
        let reply = "Sentiment:  \nCategory: Delivery\nKey Themes: fast";
        let annotation = parse_reply(reply).unwrap();
        assert_eq!(annotation.sentiment, " ");
    }

    #[test]
    fn test_surrounding_blank_lines_are_trimmed() {
        let reply = "\n\nSentiment: Positive\nCategory: Delivery\nKey Themes: fast\n\n";
        assert!(parse_reply(reply).is_ok());
    }

    #[test]
    fn test_canonicalize_recognized_sentiment() {
        let mut annotation = Annotation {
            sentiment: "negative".to_string(),
            category: "Delivery".to_string(),
            key_themes: "slow".to_string(),
        };
        let sentiment = canonicalize_sentiment(&mut annotation).unwrap();
        assert_eq!(sentiment, Sentiment::Negative);
        assert_eq!(annotation.sentiment, "Negative");
    }

    #[test]
    fn test_canonicalize_rejects_unrecognized_sentiment() {
        let mut annotation = Annotation {
            sentiment: "Mixed".to_string(),
            category: "Delivery".to_string(),
            key_themes: "slow".to_string(),
        };
        let result = canonicalize_sentiment(&mut annotation);
        assert!(matches!(result, Err(AnnotatorError::MalformedResponse(_))));
        // The annotation is left as parsed
        assert_eq!(annotation.sentiment, "Mixed");
    }
}
