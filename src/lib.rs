//! Public Suffix - rule matching engine for the Public Suffix List
//!
//! Decides whether a host is a public suffix (`com`, `co.uk`), under which
//! anyone may register names, or a registrable domain below one
//! (`yahoo.com`). Typical callers are cookie scoping and site isolation.
//!
//! - Host and label syntax validation
//! - Exact, wildcard (`*`) and exception (`!`) rules
//! - Rule sets from the bundled list, JSON or plain-text files, or a download
//! - A swappable current-rules registry for hot reloads
//!
//! # Example
//!
//! ```rust
//! use public_suffix_r::{is_unrestricted, match_host, Rule, RuleSet};
//!
//! let rules: RuleSet = ["com", "*.kawasaki.jp", "!city.kawasaki.jp"]
//!     .into_iter()
//!     .map(Rule::parse)
//!     .collect();
//!
//! // `com` is a public suffix, `example.com` is not
//! assert!(match_host("com", &rules).unwrap().is_restricted);
//! assert!(is_unrestricted("example.com", &rules));
//!
//! // Wildcard and exception
//! assert!(!is_unrestricted("foo.kawasaki.jp", &rules));
//! assert!(is_unrestricted("city.kawasaki.jp", &rules));
//!
//! // Invalid or unknown hosts are never unrestricted
//! assert!(match_host("example..com", &rules).is_none());
//! assert!(!is_unrestricted("example.org", &rules));
//! ```
//!
//! # Rule Syntax
//!
//! | Rule | Meaning |
//! |------|---------|
//! | `co.uk` | `co.uk` is a public suffix |
//! | `*.ck` | every label under `ck` is a public suffix |
//! | `!www.ck` | `www.ck` is registrable despite `*.ck` |
//!
//! Labels are compared case-sensitively and without IDNA conversion.

pub mod error;
pub mod matcher;
pub mod registry;
pub mod source;
pub mod syntax;
pub mod types;

// Re-export commonly used items
pub use error::{Result, SourceErrorKind, SuffixError};
pub use matcher::{is_unrestricted, match_host, public_suffix, registrable_domain};
pub use registry::RuleRegistry;
pub use syntax::{is_valid_host, validate_host, validate_label, MAX_HOST_LENGTH, MAX_LABEL_LENGTH};
pub use types::{Match, Rule, RuleSet};

// Re-export source types
#[cfg(feature = "bundled")]
pub use source::EmbeddedLoader;
pub use source::{
    save_json, FileLoader, ListFormat, MemoryLoader, NilLoader, OnlineLoader, RuleLoader,
    RuleSource, DEFAULT_FETCH_TIMEOUT, DEFAULT_LIST_URL,
};
