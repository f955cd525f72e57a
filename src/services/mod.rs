// Service exports
pub mod memory;
pub mod postgres;
pub mod store;

pub use memory::{FetchCounts, InMemoryStore};
pub use postgres::PostgresStore;
pub use store::{CandidateStore, StoreError};
