//! Typed Key-Value store for the Dev Mobile storefront.
//!
//! Plays the role browser local storage plays for the web storefront: a flat
//! namespace of string keys holding JSON documents. Values are serialized
//! with `serde_json` on the way in and out.
//!
//! # Example
//!
//! ```rust
//! use devmobile_cache::Cache;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Prefs {
//!     theme: String,
//! }
//!
//! let cache = Cache::in_memory();
//! cache.set("prefs", &Prefs { theme: "dark".into() }).unwrap();
//!
//! let prefs: Option<Prefs> = cache.get("prefs").unwrap();
//! assert_eq!(prefs.unwrap().theme, "dark");
//!
//! cache.delete("prefs").unwrap();
//! assert!(!cache.exists("prefs").unwrap());
//! ```

mod backend;
mod error;
mod kv;

pub use backend::{FileBackend, KvBackend, MemoryBackend};
pub use error::CacheError;
pub use kv::Cache;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileBackend, KvBackend, MemoryBackend};
}
