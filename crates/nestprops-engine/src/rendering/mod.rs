//! # Rendering
//!
//! Walks the line records in order and writes text in one of two modes:
//!
//! - **Original format**: untouched lines are written back byte for byte.
//!   Properties changed through `put` are rebuilt from the whitespace kept
//!   around their key and value, and collapse onto one escaped line.
//! - **Pretty print**: indentation is normalised to the block depth,
//!   comments are trimmed and runs of blank lines collapse to one.
//!
//! Lines whose property has been removed are skipped, along with any
//! continuation lines that belonged to them.

use std::collections::HashMap;

use crate::models::{LineKind, LineRecord, Property};
use crate::parsing::escape::{render_value, trim};

/// How text is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub pretty_print: bool,
    /// Spaces per block level in pretty mode.
    pub indent_width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            pretty_print: false,
            indent_width: 4,
        }
    }
}

impl RenderOptions {
    pub fn original() -> Self {
        Self::default()
    }

    pub fn pretty() -> Self {
        Self {
            pretty_print: true,
            ..Self::default()
        }
    }
}

/// What to do with continuation lines following a property line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Continuation {
    Verbatim,
    Skip,
}

pub struct Renderer {
    options: RenderOptions,
}

impl Renderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Renders every record, each newline-terminated.
    pub fn render(&self, lines: &[LineRecord], properties: &HashMap<String, Property>) -> String {
        let pretty = self.options.pretty_print;
        let mut out = String::new();
        let mut depth = 0usize;
        let mut last_emitted: Option<LineKind> = None;
        let mut continuation = Continuation::Skip;

        for record in lines {
            let emitted = match record.kind {
                LineKind::Empty => {
                    if pretty {
                        if last_emitted == Some(LineKind::Empty) {
                            false
                        } else {
                            out.push('\n');
                            true
                        }
                    } else {
                        self.emit(&mut out, &record.raw_text);
                        true
                    }
                }
                LineKind::Comment => {
                    let text = if pretty {
                        trim(&record.raw_text)
                    } else {
                        record.raw_text.as_str()
                    };
                    self.emit(&mut out, text);
                    true
                }
                LineKind::Property => {
                    let property = record
                        .qualified_key
                        .as_deref()
                        .and_then(|key| properties.get(key));
                    continuation = match property {
                        Some(property) => self.render_property(&mut out, record, property, depth),
                        None => Continuation::Skip,
                    };
                    property.is_some()
                }
                LineKind::MultilineContinuation => {
                    if continuation == Continuation::Verbatim {
                        self.emit(&mut out, &record.raw_text);
                        true
                    } else {
                        false
                    }
                }
                LineKind::BlockStart => {
                    if pretty {
                        let mut line = self.indent(depth);
                        if !record.bare_key.is_empty() {
                            line.push_str(&record.bare_key);
                            line.push(' ');
                        }
                        line.push('{');
                        self.emit(&mut out, &line);
                    } else {
                        self.emit(&mut out, &record.raw_text);
                    }
                    depth += 1;
                    true
                }
                LineKind::BlockEnd => {
                    depth = depth.saturating_sub(1);
                    if pretty {
                        let line = format!("{}}}", self.indent(depth));
                        self.emit(&mut out, &line);
                    } else {
                        self.emit(&mut out, &record.raw_text);
                    }
                    true
                }
            };

            if emitted {
                last_emitted = Some(record.kind);
            }
        }

        out
    }

    fn render_property(
        &self,
        out: &mut String,
        record: &LineRecord,
        property: &Property,
        depth: usize,
    ) -> Continuation {
        if self.options.pretty_print {
            let mut line = self.indent(depth);
            line.push_str(&record.bare_key);
            if !property.value.is_empty() {
                line.push_str(" = ");
                line.push_str(&render_value(&property.value));
            }
            self.emit(out, &line);
            return Continuation::Skip;
        }

        if !property.dirty {
            self.emit(out, &record.raw_text);
            return Continuation::Verbatim;
        }

        let mut line = format!("{}{}{}", record.before_key, record.bare_key, record.after_key);
        line.push('=');
        line.push_str(&record.before_value);
        line.push_str(&render_value(&property.value));
        line.push_str(&record.after_value);
        self.emit(out, &line);
        Continuation::Skip
    }

    fn indent(&self, depth: usize) -> String {
        " ".repeat(depth * self.options.indent_width)
    }

    fn emit(&self, out: &mut String, line: &str) {
        out.push_str(line);
        out.push('\n');
    }
}
