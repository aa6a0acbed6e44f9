pub mod channel;
pub mod entry;

pub use channel::{ChannelMetadata, FeedDocument};
pub use entry::{NormalizedEntry, RawEntry, RawFeed};
