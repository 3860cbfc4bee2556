mod feeds;
mod storage;

pub use feeds::{
    gamemonetize::GameMonetizeClient, gamepix::GamePixClient, FeedClient, RawRecord,
};
pub use storage::fs_store::FileSystemStore;
