//! Persistence adapters: Diesel/PostgreSQL for production, in-memory for
//! tests and DB-less runs.

pub mod diesel_recording_repository;
pub mod diesel_session_repository;
pub mod diesel_user_repository;
mod error_mapping;
pub mod memory;
pub mod models;
pub mod pool;
pub mod schema;

pub use diesel_recording_repository::DieselRecordingRepository;
pub use diesel_session_repository::DieselSessionRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use memory::{MemoryRecordingRepository, MemorySessionRepository, MemoryUserRepository};
pub use pool::{DbPool, PoolConfig, PoolError};
