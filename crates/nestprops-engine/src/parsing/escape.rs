//! # Escape Codec
//!
//! Whitespace escaping and quoting rules for property values, plus the
//! structured trim used by the scanner to keep formatting metadata.
//!
//! `escape` is only used when rendering and `unescape`/`unquote` only when
//! parsing. They are not exact inverses: round-trip fidelity comes from the
//! whitespace stored on each line record, not from re-deriving text from a
//! value.

/// Characters treated as whitespace by the format.
pub const WHITESPACE: &[char] = &[' ', '\n', '\r', '\t', '\x0B', '\x0C'];

/// Indentation written after an escaped newline.
pub const CONTINUATION_INDENT: &str = "    ";

pub fn is_ws(c: char) -> bool {
    WHITESPACE.contains(&c)
}

/// A trimmed token along with the whitespace removed from either side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trimmed<'a> {
    pub core: &'a str,
    pub leading: &'a str,
    pub trailing: &'a str,
}

impl<'a> Trimmed<'a> {
    /// Splits `text` into leading whitespace, core and trailing whitespace.
    ///
    /// A whitespace-only input yields an empty core with all of the input as
    /// `leading`.
    pub fn new(text: &'a str) -> Self {
        let start = text.len() - text.trim_start_matches(WHITESPACE).len();
        let (leading, rest) = text.split_at(start);
        let core = rest.trim_end_matches(WHITESPACE);
        Trimmed {
            core,
            leading,
            trailing: &rest[core.len()..],
        }
    }
}

pub fn trim(text: &str) -> &str {
    text.trim_matches(WHITESPACE)
}

pub fn trim_end(text: &str) -> &str {
    text.trim_end_matches(WHITESPACE)
}

pub fn is_blank(text: &str) -> bool {
    text.chars().all(is_ws)
}

/// True if the last non-whitespace character of `text` is `ch`.
pub fn ends_with(text: &str, ch: char) -> bool {
    trim_end(text).ends_with(ch)
}

/// Backslash-escapes leading whitespace and turns embedded newlines into
/// continuation lines.
pub fn escape(value: &str) -> String {
    let Some(start) = value.find(|c: char| !is_ws(c)) else {
        return value.to_string();
    };

    let (leading, rest) = value.split_at(start);
    let mut out = String::with_capacity(value.len() + leading.len() * 2);
    for c in leading.chars() {
        out.push('\\');
        out.push(c);
    }
    out.push_str(&rest.replace('\n', &format!("\\\n{CONTINUATION_INDENT}")));
    out
}

/// Escapes `value` for writing after `=`.
///
/// A line whose text would read back differently, either because a layer of
/// quotes would be stripped or because a trailing `\` would continue onto the
/// next line, is wrapped in double quotes instead. Everything between the
/// quotes survives parsing as is.
pub fn render_value(value: &str) -> String {
    let segments: Vec<&str> = value.split('\n').collect();
    if !segments.iter().any(|segment| needs_quotes(segment)) {
        return escape(value);
    }

    let mut out = String::with_capacity(value.len() + 2 * segments.len());
    for (i, segment) in segments.into_iter().enumerate() {
        if i > 0 {
            out.push_str("\\\n");
            out.push_str(CONTINUATION_INDENT);
        }
        if needs_quotes(segment) {
            out.push('"');
            out.push_str(segment);
            out.push('"');
        } else if i == 0 {
            out.push_str(&escape(segment));
        } else {
            out.push_str(segment);
        }
    }
    out
}

fn needs_quotes(segment: &str) -> bool {
    let trimmed = trim(segment);
    trimmed.ends_with('\\') || unquote(trimmed).len() != trimmed.len()
}

/// Reverses leading-whitespace escaping: consumes `\<char>` pairs from the
/// start of the token, then keeps the remainder verbatim.
pub fn unescape(token: &str) -> String {
    if !token.starts_with('\\') {
        return token.to_string();
    }

    let mut out = String::with_capacity(token.len());
    let mut rest = token;
    loop {
        let mut chars = rest.chars();
        match (chars.next(), chars.next()) {
            (Some('\\'), Some(escaped)) => {
                out.push(escaped);
                rest = &rest[1 + escaped.len_utf8()..];
            }
            _ => break,
        }
    }
    out.push_str(rest);
    out
}

/// Strips one layer of matching single or double quotes.
///
/// Tokens of two characters or fewer are left alone, so `""` stays as is.
pub fn unquote(token: &str) -> &str {
    let bytes = token.as_bytes();
    if bytes.len() > 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'\'' || first == b'"') {
            return &token[1..token.len() - 1];
        }
    }
    token
}
