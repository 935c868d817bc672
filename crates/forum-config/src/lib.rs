#![forbid(unsafe_code)]
#![deny(
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Write-once configuration for the forum client.
//!
//! Layout: `model.rs` (raw inputs and the merged [`AppConfig`]), `store.rs` (the write-once
//! [`ConfigStore`] plus the process-global instance), `defaults.rs` (fallback values).

pub mod defaults;
pub mod error;
pub mod model;
pub mod store;

pub use error::{ConfigError, ConfigResult};
pub use model::{AppConfig, ConfigInputs};
pub use store::{ConfigStore, global};
