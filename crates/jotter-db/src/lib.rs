//! # jotter-db
//!
//! PostgreSQL persistence for jotter.
//!
//! This crate provides:
//! - A lazily-connected [`Gateway`] that owns the process-wide pool
//! - Connection strategy selection for direct and pooled (serverless) hosts
//! - [`PgNoteRepository`], the PostgreSQL `NoteRepository`
//! - Seeding and round-trip verification used by `jotter-admin`
//!
//! ## Example
//!
//! ```rust,ignore
//! use jotter_db::{ConfigResolver, CreateNoteRequest, Database, NoteRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConfigResolver::from_env().get()?;
//!     let db = Database::new(config);
//!
//!     // No connection has been made yet; this call builds the pool.
//!     let note = db.notes.create(CreateNoteRequest::new("Hello", "World")).await?;
//!     println!("Created note: {}", note.id);
//!     Ok(())
//! }
//! ```
pub mod gateway;
#[cfg(any(test, feature = "mock"))]
pub mod memory;
pub mod notes;
pub mod pool;
pub mod seed;

use std::sync::Arc;

// Re-export core types
pub use jotter_core::*;

pub use gateway::Gateway;
#[cfg(feature = "migrations")]
pub use gateway::run_migrations;
#[cfg(any(test, feature = "mock"))]
pub use memory::MemoryNoteRepository;
pub use notes::PgNoteRepository;
pub use pool::{create_pool_with_config, log_pool_metrics, ConnectionStrategy, PoolConfig};
pub use seed::{demo_notes, seed_notes, verify_round_trip, SeedReport};

/// Combined database context.
#[derive(Clone)]
pub struct Database {
    /// Lazily-built pool holder shared by every repository.
    pub gateway: Arc<Gateway>,
    /// Note repository for CRUD operations.
    pub notes: Arc<PgNoteRepository>,
}

impl Database {
    /// Create a database context. Does not connect.
    pub fn new(config: Arc<Config>) -> Self {
        Self::from_gateway(Arc::new(Gateway::new(config)))
    }

    /// Create a database context over an existing gateway.
    pub fn from_gateway(gateway: Arc<Gateway>) -> Self {
        Self {
            notes: Arc::new(PgNoteRepository::new(gateway.clone())),
            gateway,
        }
    }

    /// Build the pool now instead of on first use.
    pub async fn connect(&self) -> Result<()> {
        self.gateway.pool().await.map(|_| ())
    }
}
