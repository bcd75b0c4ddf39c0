//! Transport-neutral outbound responses and message chunking
//!
//! The conversation layer only produces these types; the Discord adapter in
//! `message_components` turns them into messages and buttons.
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 2.0.0: Add Response, ChoiceMenu and Outbound; drop embed helpers
//! - 1.0.0: Message chunking utilities

/// Discord message content limit
pub const MESSAGE_LIMIT: usize = 2000;

/// How the transport should present a response's text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Text as-is
    Plain,
    /// Text contains markdown markup (bold, inline code)
    Markdown,
    /// Text is a literal value to be shown verbatim in a code block
    Code,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceStyle {
    Primary,
    Secondary,
    Danger,
}

/// A single button: what the user sees and the opaque payload sent back on click
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub label: String,
    pub payload: String,
    pub style: ChoiceStyle,
}

impl Choice {
    pub fn new(label: impl Into<String>, payload: impl Into<String>, style: ChoiceStyle) -> Self {
        Self {
            label: label.into(),
            payload: payload.into(),
            style,
        }
    }
}

/// Rows of buttons attached to a response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChoiceMenu {
    pub rows: Vec<Vec<Choice>>,
}

impl ChoiceMenu {
    pub fn new(rows: Vec<Vec<Choice>>) -> Self {
        Self { rows }
    }

    /// All button payloads, row by row
    pub fn payloads(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().flatten().map(|c| c.payload.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub text: String,
    pub menu: Option<ChoiceMenu>,
    pub format: Format,
}

impl Response {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            menu: None,
            format: Format::Plain,
        }
    }

    pub fn markdown(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            menu: None,
            format: Format::Markdown,
        }
    }

    pub fn code(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            menu: None,
            format: Format::Code,
        }
    }

    pub fn with_menu(self, menu: ChoiceMenu) -> Self {
        Self {
            menu: Some(menu),
            ..self
        }
    }
}

/// What the transport should do in reply to one inbound event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    /// Post a new message
    Send(Response),
    /// Replace the message whose button was clicked, optionally with a short notice
    Update {
        response: Response,
        notice: Option<String>,
    },
    /// Remove the message whose button was clicked
    Dismiss { notice: Option<String> },
    /// Short acknowledgement visible only to the user
    Notice(String),
    /// Nothing to say
    Nothing,
}

/// Chunk text into pieces that fit Discord limits (UTF-8 safe, line-aware)
///
/// This function splits text respecting:
/// - UTF-8 character boundaries (never splits mid-character)
/// - Line boundaries when possible (prefers splitting at newlines)
/// - Falls back to byte-aware character splitting for very long lines
pub fn chunk_text(text: &str, max_size: usize) -> Vec<String> {
    if text.len() <= max_size {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();

    for line in text.lines() {
        let line_with_newline = format!("{line}\n");
        if current.len() + line_with_newline.len() > max_size {
            if !current.is_empty() {
                chunks.push(current.trim_end_matches('\n').to_string());
                current = String::new();
            }
            // Handle lines longer than max_size (byte-aware)
            if line_with_newline.len() > max_size {
                chunks.extend(chunk_long_line(line, max_size));
            } else {
                current = line_with_newline;
            }
        } else {
            current.push_str(&line_with_newline);
        }
    }
    if !current.is_empty() {
        chunks.push(current.trim_end_matches('\n').to_string());
    }
    chunks
}

/// Split a single long line into chunks respecting UTF-8 boundaries
fn chunk_long_line(line: &str, max_size: usize) -> Vec<String> {
    let mut result = Vec::new();
    let mut current = String::new();

    for ch in line.chars() {
        let ch_len = ch.len_utf8();
        if current.len() + ch_len > max_size && !current.is_empty() {
            result.push(current);
            current = String::new();
        }
        current.push(ch);
    }

    if !current.is_empty() {
        result.push(current);
    }

    result
}

/// Chunk text for message content (2000 character limit)
pub fn chunk_for_message(text: &str) -> Vec<String> {
    chunk_text(text, MESSAGE_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_no_chunk() {
        let result = chunk_text("hello", 100);
        assert_eq!(result, vec!["hello"]);
    }

    #[test]
    fn test_chunk_respects_lines() {
        let text = "line1\nline2\nline3";
        let result = chunk_text(text, 12);
        assert!(result.len() >= 2);
        for chunk in &result {
            assert!(!chunk.ends_with('\n'));
        }
    }

    #[test]
    fn test_chunk_keeps_trailing_spaces_inside_lines() {
        // Space separators must survive chunking
        let text = format!("{}\nword ", "a".repeat(10));
        let result = chunk_text(&text, 12);
        assert_eq!(result.last().unwrap(), "word ");
    }

    #[test]
    fn test_chunk_handles_long_lines() {
        let long_line = "a".repeat(100);
        let result = chunk_text(&long_line, 30);
        assert!(result.len() >= 3);
        for chunk in &result {
            assert!(chunk.len() <= 30);
        }
    }

    #[test]
    fn test_message_limit() {
        let result = chunk_for_message(&"a".repeat(3000));
        assert!(result.len() >= 2);
        assert!(result[0].len() <= MESSAGE_LIMIT);
    }

    #[test]
    fn test_utf8_safety() {
        let text = "Hello 世界! ".repeat(500);
        let chunks = chunk_for_message(&text);
        for chunk in chunks {
            assert!(chunk.len() <= MESSAGE_LIMIT);
            assert!(chunk.chars().count() > 0);
        }
    }

    #[test]
    fn test_response_with_menu() {
        let menu = ChoiceMenu::new(vec![vec![Choice::new(
            "Generate",
            "generate",
            ChoiceStyle::Primary,
        )]]);
        let response = Response::code("a-b-c").with_menu(menu);

        assert_eq!(response.format, Format::Code);
        assert_eq!(
            response.menu.unwrap().payloads().collect::<Vec<_>>(),
            vec!["generate"]
        );
    }
}
