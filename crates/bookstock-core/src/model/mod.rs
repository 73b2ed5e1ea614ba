pub mod book;
pub mod ids;

pub use book::{Book, NewBook};
pub use ids::BookId;
