pub mod download;
pub mod lifetime;
pub mod storage;
pub mod time;
pub mod timer;
