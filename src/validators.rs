/// Input validators for chirp bodies
///
/// Bodies are limited to 140 characters counted on the text the author sent,
/// then masked word by word against a fixed block-list.

use crate::error::ValidationError;

pub const MAX_CHIRP_LENGTH: usize = 140;

const PROFANE_WORDS: [&str; 3] = ["kerfuffle", "sharbert", "fornax"];
const PROFANITY_MASK: &str = "****";

/// Validates a chirp body and returns the cleaned text to store
pub fn clean_chirp_body(body: &str) -> Result<String, ValidationError> {
    if body.trim().is_empty() {
        return Err(ValidationError::EmptyField("body".to_string()));
    }

    // Length is checked on the original body, not the masked one
    if body.chars().count() > MAX_CHIRP_LENGTH {
        return Err(ValidationError::TooLong("body".to_string(), MAX_CHIRP_LENGTH));
    }

    Ok(filter_profanity(body))
}

/// Replaces block-listed words with the mask
///
/// Words are split on single spaces and compared case-insensitively as whole
/// words; everything else is kept verbatim, including spacing and punctuation.
pub fn filter_profanity(body: &str) -> String {
    body.split(' ')
        .map(|word| {
            let lower = word.to_lowercase();
            if PROFANE_WORDS.contains(&lower.as_str()) {
                PROFANITY_MASK
            } else {
                word
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masks_block_listed_word() {
        assert_eq!(filter_profanity("this is kerfuffle"), "this is ****");
    }

    #[test]
    fn test_masking_is_case_insensitive() {
        assert_eq!(
            filter_profanity("Sharbert and FORNAX again"),
            "**** and **** again"
        );
    }

    #[test]
    fn test_only_whole_words_are_masked() {
        // Attached punctuation makes it a different word
        assert_eq!(filter_profanity("kerfuffle! kerfuffles"), "kerfuffle! kerfuffles");
    }

    #[test]
    fn test_spacing_is_preserved() {
        assert_eq!(filter_profanity("a  fornax  b"), "a  ****  b");
    }

    #[test]
    fn test_clean_chirp_body_accepts_limit() {
        let body = "a".repeat(MAX_CHIRP_LENGTH);
        assert_eq!(clean_chirp_body(&body).unwrap(), body);
    }

    #[test]
    fn test_clean_chirp_body_rejects_long_body() {
        let body = "a".repeat(MAX_CHIRP_LENGTH + 1);
        assert_eq!(
            clean_chirp_body(&body),
            Err(ValidationError::TooLong("body".to_string(), MAX_CHIRP_LENGTH))
        );
    }

    #[test]
    fn test_length_uses_original_body() {
        // 135 chars of filler + " kerfuffle" = 145 chars, masked it would be 140
        let body = format!("{} kerfuffle", "a".repeat(135));
        assert_eq!(body.chars().count(), 145);
        assert!(clean_chirp_body(&body).is_err());
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let body = "é".repeat(MAX_CHIRP_LENGTH);
        assert!(clean_chirp_body(&body).is_ok());
    }

    #[test]
    fn test_empty_body_rejected() {
        assert!(clean_chirp_body("").is_err());
        assert!(clean_chirp_body("   ").is_err());
    }
}
