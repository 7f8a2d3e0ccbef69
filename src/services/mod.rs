// Service exports
pub mod memory;
pub mod postgres;
pub mod store;

pub use memory::MemoryStore;
pub use postgres::{PoolOptions, PostgresStore};
pub use store::{FollowStore, ProfileStore, ReviewStore, StoreError, StoreHealth};
