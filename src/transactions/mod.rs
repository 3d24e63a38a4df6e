//! The steps of a run.

mod delete_tag;
mod prune_releases;

pub use delete_tag::*;
pub use prune_releases::*;
