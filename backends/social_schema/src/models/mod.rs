pub mod comment;
pub mod follower;
pub mod media;
pub mod post;
pub mod user;

pub use comment::{Comment, NewComment};
pub use follower::{Follower, NewFollower};
pub use media::{Media, NewMedia};
pub use post::{NewPost, Post};
pub use user::{NewUser, User};
