#![forbid(unsafe_code)]

pub mod gateway;
pub mod sqlite;

pub use gateway::{keys, load_or, save, InMemoryGateway, KeyValueGateway, StorageError, Store};
