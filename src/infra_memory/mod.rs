mod affinity_source_memory;
mod friend_request_repo_memory;
mod friendship_repo_memory;
mod store;

pub use store::{MemoryStore, MemoryTx};
