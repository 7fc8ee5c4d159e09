//! Rule set acquisition: bundled data, files and downloads.
//!
//! Everything here resolves to a plain [`RuleSet`](crate::RuleSet) before it
//! reaches the matcher.

pub mod format;
pub mod loader;
pub mod online;

pub use format::{parse_json, parse_text, to_json, ListFormat};
#[cfg(feature = "bundled")]
pub use loader::EmbeddedLoader;
pub use loader::{save_json, FileLoader, MemoryLoader, NilLoader, RuleLoader, RuleSource};
pub use online::{OnlineLoader, DEFAULT_FETCH_TIMEOUT, DEFAULT_LIST_URL};
