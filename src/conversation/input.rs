//! Validation of free-text replies to pending actions

use thiserror::Error;

use crate::features::preferences::{MAX_SEPARATOR_BYTES, MAX_WORD_COUNT};

/// A reply that can't be applied; the message is shown to the user as-is
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Number of words has to be a positive whole number")]
    NumberOfWordsLessThanZero,
    #[error("Number of words can't be more than {}", MAX_WORD_COUNT)]
    NumberOfWordsTooBig,
    #[error("Separator has to be less than {} bytes long", MAX_SEPARATOR_BYTES)]
    SeparatorTooLong,
}

/// Parse a word count reply: a decimal integer in `1..=200`
pub fn parse_word_count(text: &str) -> Result<usize, InputError> {
    let text = text.trim();
    match text.parse::<i64>() {
        Ok(n) if n <= 0 => Err(InputError::NumberOfWordsLessThanZero),
        Ok(n) if n as u64 > MAX_WORD_COUNT as u64 => Err(InputError::NumberOfWordsTooBig),
        Ok(n) => Ok(n as usize),
        Err(_) if is_overflowing_number(text) => Err(InputError::NumberOfWordsTooBig),
        Err(_) => Err(InputError::NumberOfWordsLessThanZero),
    }
}

/// Only digits, but too many of them for an i64
fn is_overflowing_number(text: &str) -> bool {
    let digits = text.strip_prefix('+').unwrap_or(text);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Validate a separator reply and apply the escape rules
///
/// The raw reply must be shorter than 8 bytes. Then `\` becomes a space,
/// `\n` becomes a newline and any other leading backslash is dropped, so
/// `\\` stands for a literal backslash.
pub fn parse_separator(text: &str) -> Result<String, InputError> {
    if text.len() >= MAX_SEPARATOR_BYTES {
        return Err(InputError::SeparatorTooLong);
    }

    let separator = match text {
        "\\" => " ",
        "\\n" => "\n",
        other => match other.strip_prefix('\\') {
            Some(rest) if !rest.is_empty() => rest,
            _ => other,
        },
    };
    Ok(separator.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_count_bounds() {
        assert_eq!(parse_word_count("1"), Ok(1));
        assert_eq!(parse_word_count("200"), Ok(200));
        assert_eq!(parse_word_count(" 5\n"), Ok(5));
        assert_eq!(parse_word_count("201"), Err(InputError::NumberOfWordsTooBig));
        assert_eq!(
            parse_word_count("99999999999999999999999"),
            Err(InputError::NumberOfWordsTooBig)
        );
    }

    #[test]
    fn test_word_count_not_positive() {
        for text in ["0", "-3", "five", "", "3.5", "+", "12 words"] {
            assert_eq!(
                parse_word_count(text),
                Err(InputError::NumberOfWordsLessThanZero),
                "input {text:?}"
            );
        }
    }

    #[test]
    fn test_separator_length() {
        assert_eq!(parse_separator("1234567"), Ok("1234567".to_string()));
        assert_eq!(parse_separator("12345678"), Err(InputError::SeparatorTooLong));
        assert_eq!(parse_separator("123456789"), Err(InputError::SeparatorTooLong));
        // Bytes, not characters: three 3-byte characters
        assert_eq!(parse_separator("★★★"), Err(InputError::SeparatorTooLong));
        assert_eq!(parse_separator("★★"), Ok("★★".to_string()));
    }

    #[test]
    fn test_separator_escapes() {
        assert_eq!(parse_separator("\\"), Ok(" ".to_string()));
        assert_eq!(parse_separator("\\n"), Ok("\n".to_string()));
        assert_eq!(parse_separator("\\\\"), Ok("\\".to_string()));
        assert_eq!(parse_separator("\\\\x"), Ok("\\x".to_string()));
        assert_eq!(parse_separator("\\_"), Ok("_".to_string()));
        assert_eq!(parse_separator("="), Ok("=".to_string()));
        assert_eq!(parse_separator("a\\b"), Ok("a\\b".to_string()));
    }
}
