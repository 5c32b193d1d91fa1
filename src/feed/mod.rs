//! Social feed of photo proofs.
//!
//! Each task gets at most one post, created by its first photo and updated by
//! its second. Posts collect likes and comments.

mod post;
mod store;

pub use post::{Comment, FeedPost, PostImage};
pub use store::{FeedError, InMemoryFeedStore};
