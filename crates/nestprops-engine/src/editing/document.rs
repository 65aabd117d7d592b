use std::collections::HashMap;
use std::io::Read;

use crate::error::ParseError;
use crate::models::{LineRecord, Property};
use crate::parsing::{self, Scanned, escape::trim};
use crate::rendering::{RenderOptions, Renderer};

/// A parsed properties document.
///
/// Holds two views that are kept consistent:
///
/// - the ordered **line records**, which drive rendering and are only ever
///   appended to, never reordered or deleted;
/// - the **property table**, the single authority for current values.
///
/// Comments, formatting and property order survive a parse/render round
/// trip. New properties and comments are appended at the end.
///
/// ```
/// use nestprops_engine::Document;
///
/// let mut doc = Document::parse("server\n{\n    port = 80\n}\n").unwrap();
/// assert_eq!(doc.get("server.port"), "80");
///
/// doc.put("server.port", "8080");
/// assert_eq!(doc.text(false), "server\n{\n    port = 8080\n}\n");
/// ```
#[derive(Debug, Clone)]
pub struct Document {
    lines: Vec<LineRecord>,
    properties: HashMap<String, Property>,
    /// Whether the last rendered line ends with a newline.
    final_newline: bool,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            properties: HashMap::new(),
            final_newline: true,
        }
    }

    /// Parses a complete input text.
    ///
    /// Fails only on template errors; any other irregularity in the input
    /// is tolerated.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let Scanned { lines, properties } = parsing::parse(input)?;
        Ok(Self {
            lines,
            properties,
            final_newline: input.is_empty() || input.ends_with('\n'),
        })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ParseError> {
        Self::parse(std::str::from_utf8(bytes)?)
    }

    /// Reads the whole stream into memory, then parses it.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, ParseError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Self::from_bytes(&bytes)
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    /// The trimmed value of `key`, or an empty string if it doesn't exist.
    pub fn get(&self, key: &str) -> String {
        self.get_or(key, "")
    }

    /// The value of `key`, or `default` if it doesn't exist.
    pub fn get_or(&self, key: &str, default: &str) -> String {
        self.properties
            .get(key)
            .map_or_else(|| default.to_string(), |p| p.value.clone())
    }

    /// True if the value is exactly `true`, `1` or `yes`.
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.properties.get(key) {
            Some(property) => matches!(property.value.as_str(), "true" | "1" | "yes"),
            None => default,
        }
    }

    /// Sets a value and returns the previous one, or an empty string.
    ///
    /// An existing property keeps its position and formatting. A new one is
    /// appended as a `key = value` line.
    pub fn put(&mut self, key: &str, value: &str) -> String {
        if let Some(property) = self.properties.get_mut(key) {
            log::trace!("Updating {key}");
            return property.update(value);
        }

        log::trace!("Appending {key}");
        self.push_line(LineRecord::property(key, value));
        self.properties
            .insert(key.to_string(), Property::created(key, value));
        String::new()
    }

    /// Removes a property. Its lines stay in the sequence but are no longer
    /// rendered, even if the key is later added again.
    pub fn remove(&mut self, key: &str) {
        if self.properties.remove(key).is_none() {
            return;
        }

        log::trace!("Removing {key}");
        for record in &mut self.lines {
            if record.qualified_key.as_deref() == Some(key) {
                record.qualified_key = None;
            }
        }
    }

    pub fn put_empty_line(&mut self) {
        self.push_line(LineRecord::empty(""));
    }

    /// Appends a comment, adding a `# ` marker unless it already starts with
    /// `#` or `!`. Blank comments are ignored.
    pub fn put_comment(&mut self, comment: &str) {
        let comment = trim(comment);
        if comment.is_empty() {
            return;
        }

        let line = if comment.starts_with('#') || comment.starts_with('!') {
            comment.to_string()
        } else {
            format!("# {comment}")
        };
        self.push_line(LineRecord::comment(line));
    }

    /// All keys, in no particular order.
    pub fn keys(&self) -> Vec<String> {
        self.properties.keys().cloned().collect()
    }

    /// All values, in no particular order.
    pub fn values(&self) -> Vec<String> {
        self.properties.values().map(|p| p.value.clone()).collect()
    }

    /// Number of properties.
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// The line records in rendering order.
    pub fn lines(&self) -> &[LineRecord] {
        &self.lines
    }

    /// Renders the document in original format, or pretty printed.
    pub fn text(&self, pretty_print: bool) -> String {
        self.render(&RenderOptions {
            pretty_print,
            ..RenderOptions::default()
        })
    }

    pub fn render(&self, options: &RenderOptions) -> String {
        let mut text = Renderer::new(*options).render(&self.lines, &self.properties);
        if !self.final_newline && text.ends_with('\n') {
            text.pop();
        }
        text
    }

    fn push_line(&mut self, record: LineRecord) {
        self.final_newline = true;
        self.lines.push(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LineKind;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn get_missing_key_falls_back() {
        let doc = Document::parse("a = 1\n").unwrap();
        assert_eq!(doc.get("missing.key"), "");
        assert_eq!(doc.get_or("missing.key", "fallback"), "fallback");
        assert!(!doc.has_key("missing.key"));
        assert_eq!(doc.get_or("a", "fallback"), "1");
    }

    #[test]
    fn empty_value_is_not_missing() {
        let doc = Document::parse("a =\n").unwrap();
        assert!(doc.has_key("a"));
        assert_eq!(doc.get_or("a", "fallback"), "");
    }

    #[rstest]
    #[case("true", true)]
    #[case("1", true)]
    #[case("yes", true)]
    #[case("no", false)]
    #[case("0", false)]
    #[case("false", false)]
    #[case("TRUE", false)]
    #[case("Yes", false)]
    #[case("", false)]
    fn get_bool_values(#[case] value: &str, #[case] expected: bool) {
        let doc = Document::parse(&format!("x = {value}\n")).unwrap();
        assert_eq!(doc.get_bool("x", false), expected);
        assert_eq!(doc.get_bool("x", true), expected);
    }

    #[test]
    fn get_bool_missing_uses_default() {
        let doc = Document::new();
        assert!(doc.get_bool("x", true));
        assert!(!doc.get_bool("x", false));
    }

    #[test]
    fn put_existing_returns_previous_and_keeps_position() {
        let mut doc = Document::parse("a = 1\nb = 2\n").unwrap();
        assert_eq!(doc.put("a", "10"), "1");
        assert_eq!(doc.get("a"), "10");
        assert_eq!(doc.lines().len(), 2);
        assert_eq!(doc.text(false), "a = 10\nb = 2\n");
    }

    #[test]
    fn put_new_appends_one_line() {
        let mut doc = Document::parse("a = 1\n# note\n").unwrap();
        assert_eq!(doc.put("new.key", "v"), "");
        assert_eq!(doc.lines().len(), 3);
        assert_eq!(doc.lines()[2].kind, LineKind::Property);
        assert_eq!(doc.text(false), "a = 1\n# note\nnew.key = v\n");
    }

    #[test]
    fn put_on_bare_key_adds_assignment() {
        let mut doc = Document::parse("flag\n").unwrap();
        doc.put("flag", "on");
        assert_eq!(doc.text(false), "flag = on\n");
    }

    #[test]
    fn put_multiline_value_is_escaped() {
        let mut doc = Document::new();
        doc.put("new-multiline", "this takes \nmultiple \nlines");
        assert_eq!(
            doc.text(false),
            "new-multiline = this takes \\\n    multiple \\\n    lines\n"
        );
    }

    #[test]
    fn put_leading_whitespace_is_escaped() {
        let mut doc = Document::parse("str = x\n").unwrap();
        doc.put("str", "   \t127.0.0.1");
        assert_eq!(doc.text(false), "str = \\ \\ \\ \\\t127.0.0.1\n");
        assert_eq!(doc.get("str"), "   \t127.0.0.1");
    }

    #[rstest]
    #[case("x\\", "x\\")]
    #[case("ends in slash \\  ", "ends in slash \\  ")]
    #[case("\"literal\"", "\"literal\"")]
    #[case("'single'", "'single'")]
    #[case("two\nlines\\", "twolines\\")]
    fn put_value_survives_reparse(#[case] value: &str, #[case] expected: &str) {
        let mut doc = Document::parse("a = 1\nb = 2\n").unwrap();
        doc.put("a", value);

        for pretty in [false, true] {
            let reparsed = Document::parse(&doc.text(pretty)).unwrap();
            assert_eq!(reparsed.get("a"), expected);
            assert_eq!(reparsed.get("b"), "2");
            assert_eq!(reparsed.len(), 2);
        }
    }

    #[test]
    fn dirty_multiline_collapses_to_one_line() {
        let mut doc = Document::parse("m = a \\\n    b\nz = 1\n").unwrap();
        doc.put("m", "ab2");
        assert_eq!(doc.text(false), "m = ab2\nz = 1\n");
    }

    #[test]
    fn remove_skips_line_and_continuations() {
        let mut doc = Document::parse("keep = 1\nremoveme = a \\\n  b\nafter = 2\n").unwrap();
        doc.remove("removeme");
        assert!(!doc.has_key("removeme"));
        assert_eq!(doc.lines().len(), 4);
        assert_eq!(doc.text(false), "keep = 1\nafter = 2\n");
    }

    #[test]
    fn remove_missing_key_is_a_no_op() {
        let mut doc = Document::parse("a = 1\n").unwrap();
        doc.remove("b");
        assert_eq!(doc.text(false), "a = 1\n");
    }

    #[test]
    fn put_after_remove_appends_instead_of_reviving() {
        let mut doc = Document::parse("a = 1\nb = 2\n").unwrap();
        doc.remove("a");
        doc.put("a", "3");
        assert_eq!(doc.text(false), "b = 2\na = 3\n");
    }

    #[test]
    fn put_comment_adds_marker() {
        let mut doc = Document::new();
        doc.put_comment("  A new comment!  ");
        doc.put_comment("! already marked");
        doc.put_comment("#tight");
        doc.put_comment("   ");
        assert_eq!(doc.text(false), "# A new comment!\n! already marked\n#tight\n");
    }

    #[test]
    fn put_empty_line_appends_blank() {
        let mut doc = Document::parse("a = 1\n").unwrap();
        doc.put_empty_line();
        doc.put("b", "2");
        assert_eq!(doc.text(false), "a = 1\n\nb = 2\n");
    }

    #[test]
    fn keys_and_values_snapshot_the_table() {
        let doc = Document::parse("b = 2\na = 1\na = 3\n").unwrap();
        let mut keys = doc.keys();
        keys.sort();
        assert_eq!(keys, vec!["a", "b"]);
        let mut values = doc.values();
        values.sort();
        assert_eq!(values, vec!["2", "3"]);
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn missing_final_newline_is_preserved() {
        let doc = Document::parse("a = 1\nb = 2").unwrap();
        assert_eq!(doc.text(false), "a = 1\nb = 2");
    }

    #[test]
    fn appending_restores_final_newline() {
        let mut doc = Document::parse("a = 1").unwrap();
        doc.put("b", "2");
        assert_eq!(doc.text(false), "a = 1\nb = 2\n");
    }

    #[test]
    fn from_bytes_rejects_invalid_utf8() {
        assert!(matches!(
            Document::from_bytes(&[b'a', b'=', 0xff]),
            Err(ParseError::InvalidUtf8(_))
        ));
    }

    #[test]
    fn from_reader_parses_stream() {
        let doc = Document::from_reader("k = v\n".as_bytes()).unwrap();
        assert_eq!(doc.get("k"), "v");
    }

    #[test]
    fn utf8_keys_and_values() {
        let doc = Document::parse("嗨 = 世界\n").unwrap();
        assert_eq!(doc.get("嗨"), "世界");
        assert_eq!(doc.text(false), "嗨 = 世界\n");
    }
}
