//! Backend library modules for the recording capture service.
//!
//! The crate follows a hexagonal layout: `domain` holds entities, ports,
//! and services; `inbound` adapts HTTP requests onto the domain; `outbound`
//! implements the storage and collaborator ports; `server` wires the pieces
//! into an Actix application.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

pub use domain::trace::TraceId;
pub use middleware::trace::Trace;
