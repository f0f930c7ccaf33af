#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for regex capture-group analysis.
//!
//! Two layers:
//! - **Descriptors**: one [`GroupDescriptor`] per capturing group, collected
//!   in pattern order into a [`GroupSequence`]
//! - **Outcomes**: [`AnalysisOutcome`] pairs a sequence with the failure case
//!   ([`PatternError`]) reported by the dialect's own compiler
//!
//! Nothing here computes anything; the scanner and the host-facing facade live
//! in `regroup-lib`.

use std::fmt;

mod invariants;


// ============================================================================
// Descriptors
// ============================================================================

/// Whether a group is guaranteed to hold a value on a successful match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Presence {
    /// Always participates when the whole pattern matches.
    Definite,
    /// May be absent even though the whole pattern matched.
    MaybeAbsent,
}

impl Presence {
    pub fn from_mandatory(mandatory: bool) -> Self {
        if mandatory {
            Self::Definite
        } else {
            Self::MaybeAbsent
        }
    }

    pub fn is_definite(self) -> bool {
        self == Self::Definite
    }
}

/// One capturing group: its name (if any) and whether it is mandatory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct GroupDescriptor {
    pub name: Option<String>,
    pub mandatory: bool,
}

impl GroupDescriptor {
    pub fn new(name: Option<String>, mandatory: bool) -> Self {
        Self { name, mandatory }
    }

    pub fn unnamed(mandatory: bool) -> Self {
        Self::new(None, mandatory)
    }

    pub fn named(name: impl Into<String>, mandatory: bool) -> Self {
        Self::new(Some(name.into()), mandatory)
    }

    #[inline]
    pub fn presence(&self) -> Presence {
        Presence::from_mandatory(self.mandatory)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl fmt::Display for GroupDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.name.as_deref().unwrap_or("_");
        let kind = if self.mandatory { "mandatory" } else { "optional" };
        write!(f, "({name}, {kind})")
    }
}

/// Capturing groups in opening order.
///
/// Position `i` holds the group the dialect numbers `i + 1`; group 0 (the
/// whole match) is implicit and never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct GroupSequence(Vec<GroupDescriptor>);

impl GroupSequence {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GroupDescriptor> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[GroupDescriptor] {
        &self.0
    }

    /// Looks up a group by the dialect's 1-based number. Group 0 is not stored.
    pub fn by_number(&self, number: usize) -> Option<&GroupDescriptor> {
        number.checked_sub(1).and_then(|i| self.0.get(i))
    }

    pub fn by_name(&self, name: &str) -> Option<&GroupDescriptor> {
        self.0.iter().find(|g| g.name.as_deref() == Some(name))
    }

    /// True when every group participates in every match (vacuously true when empty).
    pub fn all_mandatory(&self) -> bool {
        self.0.iter().all(|g| g.mandatory)
    }

    /// Named groups in pattern order.
    pub fn named(&self) -> impl Iterator<Item = (&str, &GroupDescriptor)> {
        self.0
            .iter()
            .filter_map(|g| g.name.as_deref().map(|name| (name, g)))
    }

    pub fn into_vec(self) -> Vec<GroupDescriptor> {
        self.0
    }
}

impl From<Vec<GroupDescriptor>> for GroupSequence {
    fn from(groups: Vec<GroupDescriptor>) -> Self {
        Self(groups)
    }
}

impl FromIterator<GroupDescriptor> for GroupSequence {
    fn from_iter<T: IntoIterator<Item = GroupDescriptor>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for GroupSequence {
    type Item = GroupDescriptor;
    type IntoIter = std::vec::IntoIter<GroupDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a GroupSequence {
    type Item = &'a GroupDescriptor;
    type IntoIter = std::slice::Iter<'a, GroupDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for GroupSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, group) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{group}")?;
        }
        f.write_str("]")
    }
}

// ============================================================================
// Outcomes
// ============================================================================

/// Diagnostic raised by the dialect's compiler, carried verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, thiserror::Error)]
#[error("{message}")]
pub struct PatternError {
    pub message: String,
    /// Byte offset into the pattern, when the compiler reports one.
    pub position: Option<usize>,
}

impl PatternError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            position: None,
        }
    }

    pub fn at(message: impl Into<String>, position: usize) -> Self {
        Self {
            message: message.into(),
            position: Some(position),
        }
    }
}

/// Result of analyzing one `(pattern, verbose)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisOutcome {
    Groups(GroupSequence),
    Invalid(PatternError),
}

impl AnalysisOutcome {
    pub fn groups(&self) -> Option<&GroupSequence> {
        match self {
            Self::Groups(groups) => Some(groups),
            Self::Invalid(_) => None,
        }
    }

    pub fn error(&self) -> Option<&PatternError> {
        match self {
            Self::Groups(_) => None,
            Self::Invalid(err) => Some(err),
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Groups(_))
    }

    pub fn into_result(self) -> Result<GroupSequence, PatternError> {
        match self {
            Self::Groups(groups) => Ok(groups),
            Self::Invalid(err) => Err(err),
        }
    }
}

impl From<Result<GroupSequence, PatternError>> for AnalysisOutcome {
    fn from(result: Result<GroupSequence, PatternError>) -> Self {
        match result {
            Ok(groups) => Self::Groups(groups),
            Err(err) => Self::Invalid(err),
        }
    }
}

// ============================================================================
// Verbose Resolution
// ============================================================================

/// Statically inferred state of the dialect's verbose flag at a call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerboseResolution {
    On,
    Off,
    /// The flags expression could not be evaluated statically.
    Unknown,
}

impl VerboseResolution {
    /// The flag value, or `None` when the analysis must abstain.
    pub fn known(self) -> Option<bool> {
        match self {
            Self::On => Some(true),
            Self::Off => Some(false),
            Self::Unknown => None,
        }
    }

    /// Combines both operands of a bitwise-or of flags.
    ///
    /// A verbose operand sets the bit regardless of the other side, so `On`
    /// wins over `Unknown`.
    pub fn or(self, other: Self) -> Self {
        match (self, other) {
            (Self::On, _) | (_, Self::On) => Self::On,
            (Self::Unknown, _) | (_, Self::Unknown) => Self::Unknown,
            (Self::Off, Self::Off) => Self::Off,
        }
    }
}

impl From<bool> for VerboseResolution {
    fn from(verbose: bool) -> Self {
        if verbose { Self::On } else { Self::Off }
    }
}
