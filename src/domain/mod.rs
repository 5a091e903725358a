pub mod entry;
pub mod feed_list;

pub use entry::{identifier_for, Entry};
pub use feed_list::FeedList;
