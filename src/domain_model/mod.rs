mod affinity;
mod circle;
mod friend_request;
mod friendship;
mod progress;
mod user;

pub use affinity::*;
pub use circle::*;
pub use friend_request::*;
pub use friendship::*;
pub use progress::*;
pub use user::*;
