//! vidproxy storage library
//!
//! This crate provides the `Storage` trait the HTTP handlers talk to, plus an S3
//! implementation and an in-process implementation for development and tests.
//!
//! # Storage key format
//!
//! Every uploaded video is stored under `videos/{uuid}_{file_name}`. The random
//! UUID is what makes keys unique; file names may repeat freely. Key generation
//! lives in the `keys` module so all callers stay consistent.

mod attributes;
pub mod factory;
pub mod keys;
#[cfg(feature = "storage-memory")]
pub mod memory;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
#[cfg(feature = "storage-memory")]
pub use memory::MemoryStorage;
#[cfg(feature = "storage-s3")]
pub use s3::{S3Credentials, S3Storage};
pub use traits::{ObjectHead, Storage, StorageError, StorageResult};
pub use vidproxy_core::StorageBackend;
