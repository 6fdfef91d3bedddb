pub mod entity;
pub mod error;
pub mod storage;
pub mod store;
