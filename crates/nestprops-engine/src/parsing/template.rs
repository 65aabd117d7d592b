//! # Template Expansion
//!
//! Pre-pass that runs before any other parsing. A template is defined by
//! wrapping raw lines in `<name>` / `</name>` marker lines and used by a
//! `%name%` line, which is replaced by the captured lines:
//!
//! ```text
//! <defaults>
//! timeout = 30
//! retries = 3
//! </defaults>
//!
//! primary
//! {
//!     %defaults%
//! }
//! ```
//!
//! Markers are recognised after trimming whitespace from the line. Captured
//! lines are stored verbatim and substituted verbatim: expansion is not
//! recursive, and the scanner later classifies substituted lines as if they
//! had been written at the reference site.

use std::collections::HashMap;

use crate::error::ParseError;
use crate::parsing::escape::trim;
use crate::parsing::split_lines;

/// Expands all template definitions and references in `input`.
///
/// Every output line is newline-terminated. Definition blocks are removed
/// from the output. A later definition with the same name replaces the
/// earlier one for references that follow it.
pub fn expand_templates(input: &str) -> Result<String, ParseError> {
    let mut out = String::with_capacity(input.len());
    let mut templates: HashMap<&str, Vec<&str>> = HashMap::new();
    let mut lines = split_lines(input).enumerate();

    while let Some((idx, line)) = lines.next() {
        let line_no = idx + 1;
        let trimmed = trim(line);

        if trimmed.starts_with("</") {
            return Err(ParseError::malformed(
                line_no,
                format!("closing tag {trimmed} has no matching definition"),
            ));
        } else if let Some(tag) = trimmed.strip_prefix('<') {
            let name = tag
                .strip_suffix('>')
                .ok_or_else(|| ParseError::malformed(line_no, "template tag is missing '>'"))?;
            if name.is_empty() {
                return Err(ParseError::malformed(line_no, "template name is empty"));
            }

            let close = format!("</{name}>");
            let mut body = Vec::new();
            let mut closed = false;
            for (_, line) in lines.by_ref() {
                if trim(line) == close {
                    closed = true;
                    break;
                }
                body.push(line);
            }
            if !closed {
                return Err(ParseError::malformed(
                    line_no,
                    format!("template <{name}> is never closed"),
                ));
            }

            log::debug!("Defined template {name} with {} lines", body.len());
            if templates.insert(name, body).is_some() {
                log::debug!("Template {name} redefined at line {line_no}");
            }
        } else if let Some(reference) = trimmed.strip_prefix('%') {
            let name = reference
                .strip_suffix('%')
                .filter(|name| !name.is_empty())
                .ok_or_else(|| {
                    ParseError::malformed(line_no, format!("invalid template reference {trimmed}"))
                })?;

            let body = templates
                .get(name)
                .ok_or_else(|| ParseError::UndefinedTemplate {
                    name: name.to_string(),
                    line: line_no,
                })?;

            log::debug!("Expanding template {name} at line {line_no}");
            for body_line in body {
                out.push_str(body_line);
                out.push('\n');
            }
        } else {
            out.push_str(line);
            out.push('\n');
        }
    }

    Ok(out)
}
