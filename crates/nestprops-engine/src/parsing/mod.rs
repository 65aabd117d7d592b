//! # Parsing
//!
//! Two passes over the input text:
//!
//! 1. **Template expansion** (`template`): `<name>` / `</name>` definitions
//!    are captured and `%name%` references replaced, producing plain text.
//! 2. **Scanning** (`scanner`): each expanded line is classified
//!    (`classify`), keys are qualified against the open prefix blocks
//!    (`prefix`) and values are unescaped and unquoted (`escape`).
//!
//! The result is the ordered line record sequence plus the property table.
//! Every record keeps its raw text and the whitespace around its key and
//! value, which is what lets the renderer reproduce untouched input.

pub mod classify;
pub mod escape;
pub mod prefix;
pub mod scanner;
pub mod template;

use crate::error::ParseError;

pub use scanner::{ParserState, Scanned};

/// Splits text on `\n`. A final newline does not produce an extra empty
/// line, and empty text produces no lines at all.
pub fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let body = text.strip_suffix('\n').unwrap_or(text);
    (!text.is_empty())
        .then(|| body.split('\n'))
        .into_iter()
        .flatten()
}

/// Expands templates, then scans the result.
pub fn parse(input: &str) -> Result<Scanned, ParseError> {
    let expanded = template::expand_templates(input)?;
    let scanned = scanner::scan(&expanded);
    log::debug!(
        "Parsed {} lines into {} properties",
        scanned.lines.len(),
        scanned.properties.len()
    );
    Ok(scanned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_lines_handles_final_newline() {
        assert_eq!(split_lines("a\nb\n").collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(split_lines("a\nb").collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(split_lines("a\n\n").collect::<Vec<_>>(), vec!["a", ""]);
        assert_eq!(split_lines("\n").collect::<Vec<_>>(), vec![""]);
        assert_eq!(split_lines("").count(), 0);
    }

    #[test]
    fn crlf_keeps_carriage_return_on_the_line() {
        assert_eq!(
            split_lines("a = 1\r\nb = 2\r\n").collect::<Vec<_>>(),
            vec!["a = 1\r", "b = 2\r"]
        );
    }

    #[test]
    fn template_errors_abort_the_parse() {
        assert!(matches!(
            parse("a = 1\n%nope%\n"),
            Err(ParseError::UndefinedTemplate { .. })
        ));
    }

    #[test]
    fn templates_are_scanned_in_place() {
        let scanned = parse("<log>\nlevel = info\n</log>\nserver\n{\n%log%\n}\n").unwrap();
        assert_eq!(scanned.properties["server.level"].value, "info");
    }
}
