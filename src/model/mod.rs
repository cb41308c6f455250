//! # Index Metadata Model
//!
//! Plain DTOs for the metadata the checks read: index lists, indices and
//! their mapping trees.
//!
//! Design rule: no I/O, no logging, no cluster client types here.
//! This module is pure data.

pub mod value;
pub mod mapping_tree;
pub mod index;
pub mod index_list;

pub use value::MappingValue;
pub use mapping_tree::MappingTree;
pub use index::Index;
pub use index_list::{IndexGroup, IndexList};
