/// What a physical line holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Property,
    Comment,
    Empty,
    /// A line folded into the value of the property above it.
    MultilineContinuation,
    BlockStart,
    BlockEnd,
}

/// One line of the document, with enough formatting detail to render it
/// back the way it was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRecord {
    /// The line exactly as read, without its newline.
    pub raw_text: String,
    pub kind: LineKind,
    /// Fully qualified key, set on property lines only. Used to look the
    /// current value up at render time; cleared when the key is removed.
    pub qualified_key: Option<String>,
    /// Key as written on this line. On a `key {` block start, the key that
    /// opens the block.
    pub bare_key: String,
    pub before_key: String,
    pub after_key: String,
    pub before_value: String,
    pub after_value: String,
    /// The line has a key but no `=`.
    pub has_no_assignment: bool,
}

impl LineRecord {
    fn with_kind(raw_text: impl Into<String>, kind: LineKind) -> Self {
        Self {
            raw_text: raw_text.into(),
            kind,
            qualified_key: None,
            bare_key: String::new(),
            before_key: String::new(),
            after_key: " ".to_string(),
            before_value: " ".to_string(),
            after_value: String::new(),
            has_no_assignment: false,
        }
    }

    pub fn empty(raw_text: impl Into<String>) -> Self {
        Self::with_kind(raw_text, LineKind::Empty)
    }

    pub fn comment(raw_text: impl Into<String>) -> Self {
        Self::with_kind(raw_text, LineKind::Comment)
    }

    pub fn continuation(raw_text: impl Into<String>) -> Self {
        Self::with_kind(raw_text, LineKind::MultilineContinuation)
    }

    pub fn block_start(raw_text: impl Into<String>, key: Option<&str>) -> Self {
        let mut record = Self::with_kind(raw_text, LineKind::BlockStart);
        if let Some(key) = key {
            record.bare_key = key.to_string();
        }
        record
    }

    pub fn block_end(raw_text: impl Into<String>) -> Self {
        Self::with_kind(raw_text, LineKind::BlockEnd)
    }

    /// A property line as written by `put`: `key = value`.
    pub fn property(key: &str, value: &str) -> Self {
        let mut record = Self::with_kind(format!("{key} = {value}"), LineKind::Property);
        record.qualified_key = Some(key.to_string());
        record.bare_key = key.to_string();
        record
    }
}
