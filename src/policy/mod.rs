//! Persistence of learned value tables, one file per agent name.

mod metadata;
mod store;

pub use metadata::{PolicyMetadata, PolicySnapshot};
pub use store::{FilePolicyStore, PolicyConfig, PolicyStore};
