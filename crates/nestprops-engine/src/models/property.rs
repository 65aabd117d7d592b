/// Current value of one fully qualified key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub key: String,
    /// Trimmed, unescaped and unquoted value. May be empty.
    pub value: String,
    /// Set once the value is created or replaced through `put`. A dirty
    /// multi-line value is rendered collapsed onto one escaped line.
    pub dirty: bool,
}

impl Property {
    pub fn parsed(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            dirty: false,
        }
    }

    pub fn created(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            dirty: true,
            ..Self::parsed(key, value)
        }
    }

    /// Replaces the value, marking the property dirty. Returns the old value.
    pub fn update(&mut self, value: impl Into<String>) -> String {
        self.dirty = true;
        std::mem::replace(&mut self.value, value.into())
    }
}
