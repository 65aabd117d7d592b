use std::collections::HashMap;

use crate::models::{LineKind, LineRecord, Property};
use crate::parsing::classify::{LineClass, LineClassifier};
use crate::parsing::escape::{Trimmed, ends_with, trim, trim_end, unescape, unquote};
use crate::parsing::prefix::PrefixStack;
use crate::parsing::split_lines;

/// Grouping state threaded through the scanning loop.
#[derive(Debug, Default)]
pub struct ParserState {
    pub prefixes: PrefixStack,
    /// Most recent bare key. Every `{` seen while it is set opens a block
    /// under it; only an assignment line clears it.
    pub pending_prefix: Option<String>,
}

/// Line records and property table produced by a scan.
#[derive(Debug, Default)]
pub struct Scanned {
    pub lines: Vec<LineRecord>,
    pub properties: HashMap<String, Property>,
}

/// Scans template-expanded text into line records and properties.
pub fn scan(expanded: &str) -> Scanned {
    let classifier = LineClassifier;
    let mut state = ParserState::default();
    let mut out = Scanned::default();
    let mut lines = split_lines(expanded);

    while let Some(line) = lines.next() {
        let class = classifier.classify(line);
        log::trace!("{class:?}: {line:?}");

        match class {
            LineClass::Empty => out.lines.push(LineRecord::empty(line)),
            LineClass::Comment => out.lines.push(LineRecord::comment(line)),
            LineClass::BlockStart { key: None } => {
                if let Some(prefix) = &state.pending_prefix {
                    state.prefixes.push(prefix.as_str());
                }
                out.lines.push(LineRecord::block_start(line, None));
            }
            LineClass::BlockStart { key: Some(key) } => {
                state.pending_prefix = Some(key.core.to_string());
                state.prefixes.push(key.core);
                out.lines.push(LineRecord::block_start(line, Some(key.core)));
            }
            LineClass::BlockEnd => {
                state.prefixes.pop();
                out.lines.push(LineRecord::block_end(line));
            }
            LineClass::Property { key, value } => {
                scan_property(line, key, value, &mut state, &mut lines, &mut out);
            }
        }
    }

    out
}

fn scan_property<'a>(
    line: &str,
    key: Trimmed<'_>,
    value: Option<Trimmed<'_>>,
    state: &mut ParserState,
    rest: &mut impl Iterator<Item = &'a str>,
    out: &mut Scanned,
) {
    let qualified = state.prefixes.qualify(key.core);

    let mut record = LineRecord {
        raw_text: line.to_string(),
        kind: LineKind::Property,
        qualified_key: Some(qualified.clone()),
        bare_key: key.core.to_string(),
        before_key: key.leading.to_string(),
        after_key: key.trailing.to_string(),
        before_value: " ".to_string(),
        after_value: String::new(),
        has_no_assignment: false,
    };

    let raw_value = match value {
        None => {
            // A bare key may open a block on a following line.
            state.pending_prefix = Some(key.core.to_string());
            record.has_no_assignment = true;
            if record.after_key.is_empty() {
                record.after_key.push(' ');
            }
            String::new()
        }
        Some(value) => {
            state.pending_prefix = None;
            if !value.core.is_empty() {
                record.before_value = value.leading.to_string();
            }
            record.after_value = value.trailing.to_string();
            unescape(value.core)
        }
    };
    out.lines.push(record);

    let value = match trim_end(&raw_value).strip_suffix('\\') {
        Some(first) => {
            let mut joined = unquote(trim_end(first)).to_string();
            for next in rest.by_ref() {
                out.lines.push(LineRecord::continuation(next));
                let piece = trim(next);
                if ends_with(piece, '\\') {
                    let piece = piece.strip_suffix('\\').unwrap_or(piece);
                    joined.push_str(unquote(trim_end(piece)));
                } else {
                    joined.push_str(unquote(piece));
                    break;
                }
            }
            joined
        }
        None => unquote(&raw_value).to_string(),
    };

    if let Some(previous) = out
        .properties
        .insert(qualified.clone(), Property::parsed(qualified.clone(), value))
    {
        log::debug!(
            "Duplicate key {qualified}: value {:?} replaced by a later line",
            previous.value
        );
    }
}
