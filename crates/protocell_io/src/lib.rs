//! Persistence for Protocell components.
//!
//! Components serialize into a generic nested key-value
//! [`storage::StorageContainer`], which in turn reads and writes JSON
//! files. Compound and process maps use string-encoded integer keys.

pub mod error;
pub mod persistence;
pub mod storage;

pub use error::{IoError, Result};
pub use persistence::{load_container, save_container, ContainerCodec};
pub use storage::StorageContainer;
