/// Stack of open prefix blocks used to qualify bare keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefixStack {
    segments: Vec<String>,
}

impl PrefixStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, segment: impl Into<String>) {
        self.segments.push(segment.into());
    }

    /// Closes the innermost prefix. Unmatched closes are a no-op.
    pub fn pop(&mut self) {
        self.segments.pop();
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Prepends every active segment, each followed by `.`.
    pub fn qualify(&self, bare_key: &str) -> String {
        let mut key = String::new();
        for segment in &self.segments {
            key.push_str(segment);
            key.push('.');
        }
        key.push_str(bare_key);
        key
    }
}
