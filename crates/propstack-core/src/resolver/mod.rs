//! Property resolution
//!
//! - `PrefixResolver`: config entries and flattened secrets below one parameter store prefix
//! - `PropertyLayerMerger`: ordered, last-write-wins merge of property sources
//! - `PropertiesLoader`: the default five-layer stack

mod prefix_resolver;
mod layer_merger;
mod loader;

pub use prefix_resolver::PrefixResolver;
pub use layer_merger::PropertyLayerMerger;
pub use loader::{PropertiesLoader, LoaderOptions, load_properties};
