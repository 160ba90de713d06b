//! Core module - domain types and the convenience store API

pub mod store;
pub mod types;

pub use store::{filtered_list, list, DomainPassword, GenericCredential};
pub use types::*;
