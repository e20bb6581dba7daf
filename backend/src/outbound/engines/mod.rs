//! Engine adapters implementing the domain's collaborator ports.

pub mod canned_transformer;

pub use canned_transformer::{CannedTextTransformer, FailingTextTransformer};
