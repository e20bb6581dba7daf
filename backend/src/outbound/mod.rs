//! Outbound adapters implementing the domain's storage and collaborator
//! ports.

pub mod engines;
pub mod persistence;
