//! Property source abstractions
//!
//! Supports multiple property sources:
//! - `FileSource`: `.properties` file (working directory or resource directory)
//! - `RemoteSource`: parameter store prefix enabled by a trigger variable
//! - `MemorySource`: In-memory for testing

mod traits;
mod properties_format;
mod file;
mod remote;
mod memory;

pub use traits::{PropertySource, SharedSource};
pub use file::{FileSource, FileLocation};
pub use remote::{RemoteSource, RemoteBackend, EnvLookup, process_env, DEFAULT_PREFIX_VARIABLE};
pub use memory::MemorySource;
