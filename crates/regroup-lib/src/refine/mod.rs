//! What each accessor on a match or pattern object can return.
//!
//! Everything here is driven by the [`GroupSequence`](regroup_core::GroupSequence)
//! alone; the host maps the shapes onto its own types.

mod contracts;
mod group_ref;


pub use contracts::{
    FindallShape, GroupDict, GroupValue, MatchShape, check_group, findall_shape, group,
    groupdict, groups_tuple, split_item, sub_callback, whole_match,
};
pub use group_ref::GroupRef;
