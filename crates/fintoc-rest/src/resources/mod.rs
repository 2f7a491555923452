//! Resource wrappers that expose sub-managers
//!
//! Most resources are plain [`Resource`](crate::resource::Resource) values.
//! Links and bank accounts additionally own collections of their own, so
//! they get thin wrappers that lazily build the scoped managers on first
//! access.

mod account;
mod link;

pub use account::Account;
pub use link::Link;
