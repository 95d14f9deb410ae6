//! colonnade-storage
//!
//! Wide-column engines and the read path built on them: the engine seam
//! ([`engine::WideColumnStore`]), an in-memory and an S3-backed engine, the
//! range query engine, and the per-family record stores.

pub mod client;
pub mod config;
pub mod conversations;
pub mod engine;
pub mod error;
pub mod memory;
pub mod metrics;
pub mod objects;
pub mod query;
pub mod s3;
