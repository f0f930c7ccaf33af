use std::fmt;

/// A group as written at an accessor's use site: `m.group(2)`, `m["year"]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GroupRef {
    /// Group number; 0 is the whole match.
    Index(usize),
    Name(String),
}

impl GroupRef {
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }
}

impl From<usize> for GroupRef {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<&str> for GroupRef {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

/// Renders the way it appears in "no such group" messages: `3`, `'name'`.
impl fmt::Display for GroupRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "{index}"),
            Self::Name(name) => write!(f, "'{name}'"),
        }
    }
}
