//! Dynamic fetch over the campaign / ad group relationship.
//!
//! A fetch names the fields to populate and the filters to apply; the
//! engine turns that into one joined SELECT and folds the rows back into
//! partially populated entities.

pub mod assembler;
pub mod catalog;
pub mod compiler;
pub mod condition;
pub mod engine;
pub mod error;
pub mod executor;
pub mod selector;
pub mod types;

pub use engine::FetchEngine;
pub use error::FetchError;
pub use executor::{JoinQuery, JoinStore, JoinType, RawRow};
pub use types::{FetchRequest, FetchResult, FilterOperator, QueryFilter};
