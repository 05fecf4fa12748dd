pub mod common;
pub mod feed;
pub mod proxy;
