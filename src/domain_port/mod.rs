// store

mod affinity_source;

pub use affinity_source::*;

// repo

mod friend_request_repo;
mod friendship_repo;

pub use friend_request_repo::*;
pub use friendship_repo::*;

mod repo_tx;

pub use repo_tx::*;
