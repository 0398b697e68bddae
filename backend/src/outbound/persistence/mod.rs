//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the entry and user repository ports backed
//! by PostgreSQL via `diesel-async` and a `bb8` pool.
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types.
//! - **Internal models**: row structs (`models.rs`) and the schema
//!   (`schema.rs`) never leave this module.
//! - **Strongly typed errors**: database failures map onto the port error
//!   enums; constraint violations keep a client-safe message.
//!
//! # Example
//!
//! ```no_run
//! use bloglist::outbound::persistence::{
//!     DbPool, DieselEntryRepository, DieselUserRepository, PoolConfig, run_migrations,
//! };
//!
//! # async fn wire() -> Result<(), bloglist::outbound::persistence::PoolError> {
//! let url = "postgres://localhost/bloglist";
//! run_migrations(url).await?;
//! let pool = DbPool::new(PoolConfig::new(url)).await?;
//! let entries = DieselEntryRepository::new(pool.clone());
//! let users = DieselUserRepository::new(pool);
//! # let _ = (entries, users);
//! # Ok(())
//! # }
//! ```

mod diesel_basic_error_mapping;
mod diesel_entry_repository;
mod diesel_user_repository;
mod models;
mod pool;
mod schema;

pub use diesel_entry_repository::DieselEntryRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, MIGRATIONS, PoolConfig, PoolError, run_migrations};
