use crate::parsing::escape::{Trimmed, is_blank, trim};

/// Local facts about a single line, decided without any surrounding context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass<'a> {
    Empty,
    Comment,
    /// `{` alone, or `key {` which opens a block under `key`.
    BlockStart { key: Option<Trimmed<'a>> },
    BlockEnd,
    Property {
        key: Trimmed<'a>,
        /// Text after the first `=`, or `None` for a bare key.
        value: Option<Trimmed<'a>>,
    },
}

/// Classifies individual lines for the scanner.
///
/// The first matching rule wins: blank, comment (`#` or `!`), `{`, `}`,
/// then property.
pub struct LineClassifier;

impl LineClassifier {
    pub fn classify<'a>(&self, line: &'a str) -> LineClass<'a> {
        if is_blank(line) {
            return LineClass::Empty;
        }

        let trimmed = trim(line);
        if trimmed.starts_with('#') || trimmed.starts_with('!') {
            return LineClass::Comment;
        }
        if trimmed == "{" {
            return LineClass::BlockStart { key: None };
        }
        if trimmed == "}" {
            return LineClass::BlockEnd;
        }

        if let Some(eq) = line.find('=') {
            return LineClass::Property {
                key: Trimmed::new(&line[..eq]),
                value: Some(Trimmed::new(&line[eq + 1..])),
            };
        }

        if trimmed.ends_with('{')
            && let Some(brace) = line.rfind('{')
        {
            return LineClass::BlockStart {
                key: Some(Trimmed::new(&line[..brace])),
            };
        }

        LineClass::Property {
            key: Trimmed::new(line),
            value: None,
        }
    }
}
