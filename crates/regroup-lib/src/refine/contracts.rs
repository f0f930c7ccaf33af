use std::ops::Range;

use indexmap::IndexMap;
use regroup_core::{GroupSequence, Presence};

use super::GroupRef;
use crate::Error;
use crate::diagnostics::{DiagnosticKind, Diagnostics};

/// Type of a single group access after checking the reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupValue {
    Definite,
    MaybeAbsent,
    /// The reference was reported; downstream inference should not complain again.
    Error,
}

impl From<Presence> for GroupValue {
    fn from(presence: Presence) -> Self {
        match presence {
            Presence::Definite => Self::Definite,
            Presence::MaybeAbsent => Self::MaybeAbsent,
        }
    }
}

/// Group access by number or name.
///
/// Group 0 is the whole match and always present.
pub fn group(groups: &GroupSequence, group_ref: &GroupRef) -> Result<Presence, Error> {
    let descriptor = match group_ref {
        GroupRef::Index(0) => return Ok(Presence::Definite),
        GroupRef::Index(number) => groups.by_number(*number),
        GroupRef::Name(name) => groups.by_name(name),
    };
    descriptor
        .map(|d| d.presence())
        .ok_or_else(|| Error::NoSuchGroup(group_ref.clone()))
}

/// Like [`group`], reporting unknown references at the use site.
pub fn check_group(
    groups: &GroupSequence,
    group_ref: &GroupRef,
    span: Range<usize>,
    diagnostics: &mut Diagnostics,
) -> GroupValue {
    match group(groups, group_ref) {
        Ok(presence) => presence.into(),
        Err(_) => {
            let builder = diagnostics
                .report(DiagnosticKind::NoSuchGroup, span)
                .message(group_ref.to_string());
            let builder = match group_ref {
                GroupRef::Index(_) => builder.hint(match groups.len() {
                    1 => "the pattern has 1 group".to_string(),
                    n => format!("the pattern has {n} groups"),
                }),
                GroupRef::Name(_) => builder,
            };
            builder.emit();
            GroupValue::Error
        }
    }
}

/// One slot per group, in order.
pub fn groups_tuple(groups: &GroupSequence) -> Vec<Presence> {
    groups.iter().map(|d| d.presence()).collect()
}

/// Shape of the name-to-value mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupDict {
    entries: IndexMap<String, Presence>,
}

impl GroupDict {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<Presence> {
        self.entries.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Presence)> {
        self.entries.iter().map(|(k, &v)| (k.as_str(), v))
    }

    /// Keys whose value is guaranteed.
    pub fn required_keys(&self) -> impl Iterator<Item = &str> {
        self.iter()
            .filter(|(_, presence)| presence.is_definite())
            .map(|(k, _)| k)
    }
}

pub fn groupdict(groups: &GroupSequence) -> GroupDict {
    GroupDict {
        entries: groups
            .named()
            .map(|(name, d)| (name.to_string(), d.presence()))
            .collect(),
    }
}

/// Element of the list returned when splitting by the pattern.
///
/// A group that did not take part in a split leaves a gap, so any optional
/// group makes elements possibly absent.
pub fn split_item(groups: &GroupSequence) -> Presence {
    Presence::from_mandatory(groups.all_mandatory())
}

/// Element shape of find-all results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FindallShape {
    /// One string per match: the whole match, or the single group.
    Flat,
    /// One tuple of strings per match. Non-participating groups are empty strings.
    Tuple(usize),
}

pub fn findall_shape(groups: &GroupSequence) -> FindallShape {
    match groups.len() {
        0 | 1 => FindallShape::Flat,
        n => FindallShape::Tuple(n),
    }
}

/// A match object as seen through its pattern's groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchShape<'g> {
    groups: &'g GroupSequence,
}

impl<'g> MatchShape<'g> {
    pub fn groups(&self) -> &'g GroupSequence {
        self.groups
    }

    pub fn group(&self, group_ref: &GroupRef) -> Result<Presence, Error> {
        group(self.groups, group_ref)
    }

    pub fn check_group(
        &self,
        group_ref: &GroupRef,
        span: Range<usize>,
        diagnostics: &mut Diagnostics,
    ) -> GroupValue {
        check_group(self.groups, group_ref, span, diagnostics)
    }

    pub fn groups_tuple(&self) -> Vec<Presence> {
        groups_tuple(self.groups)
    }

    pub fn groupdict(&self) -> GroupDict {
        groupdict(self.groups)
    }
}

/// Result of `search`, `match` and `fullmatch`, and each `finditer` item.
///
/// Only the outer result may be "no match"; group types live on the shape.
pub fn whole_match(groups: &GroupSequence) -> MatchShape<'_> {
    MatchShape { groups }
}

/// The argument handed to a substitution callback.
pub fn sub_callback(groups: &GroupSequence) -> MatchShape<'_> {
    whole_match(groups)
}
