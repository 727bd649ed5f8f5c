//! # Record Grouping
//!
//! Reshapes flat records into entity-keyed collections whose key order and
//! entry order are deterministic for a given input order.

mod collection;
mod grouper;
mod mappers;

pub use collection::{CompositeKey, GroupKey, GroupedCollection};
pub use grouper::{
    distinct_by, group_by_entity_and_date, group_by_key, group_sequenced, regroup_by_entity,
    SequencedMapping,
};
pub use mappers::{CollectionMapper, InteractionMapper, MembershipMapper};
