//! Comments data access for the mflix sample database.
//!
//! [`CommentsDao`] wraps the `comments` collection: posting, editing and
//! deleting a user's own comments, and reporting the most active commenters.

pub mod comments;
pub mod config;
pub mod error;
pub mod model;
pub mod mongo;

pub use comments::{parse_object_id, CommentsDao};
pub use config::Config;
pub use error::DaoError;
pub use model::{Comment, CommenterCount, User};
