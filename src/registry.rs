//! Holder for the current rule set.
//!
//! Readers take an `Arc` snapshot and match against it without holding any
//! lock; a reload builds the new rule set first and then swaps the pointer.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::Result;
use crate::matcher;
use crate::source::RuleLoader;
use crate::types::{Match, RuleSet};

/// Swappable, shareable current rule set
#[derive(Debug)]
pub struct RuleRegistry {
    current: RwLock<Arc<RuleSet>>,
    version: AtomicU64,
}

impl RuleRegistry {
    /// Create a registry holding `rules` as version 1
    pub fn new(rules: RuleSet) -> Self {
        Self {
            current: RwLock::new(Arc::new(rules)),
            version: AtomicU64::new(1),
        }
    }

    /// Create a registry from a loader
    pub fn from_loader(loader: &dyn RuleLoader) -> Result<Self> {
        Ok(Self::new(loader.load()?))
    }

    /// Registry holding the bundled list
    #[cfg(feature = "bundled")]
    pub fn bundled() -> Result<Self> {
        Self::from_loader(&crate::source::EmbeddedLoader)
    }

    /// Current rule set. Stays valid even if replaced afterwards.
    pub fn snapshot(&self) -> Arc<RuleSet> {
        self.current.read().clone()
    }

    /// Number of swaps so far, starting at 1
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }

    /// Swap in a new rule set, returning the new version
    pub fn replace(&self, rules: RuleSet) -> u64 {
        let rules = Arc::new(rules);
        let mut current = self.current.write();
        *current = rules;
        self.version.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Load from `loader` and swap it in.
    ///
    /// On failure the current rule set is kept.
    pub fn reload(&self, loader: &dyn RuleLoader) -> Result<u64> {
        match loader.load() {
            Ok(rules) => {
                let count = rules.len();
                let version = self.replace(rules);
                tracing::info!(version, rules = count, "public suffix rules reloaded");
                Ok(version)
            }
            Err(e) => {
                tracing::warn!(error = %e, "public suffix reload failed, keeping current rules");
                Err(e)
            }
        }
    }

    /// [`matcher::match_host`] against the current snapshot
    pub fn match_host(&self, candidate: &str) -> Option<Match> {
        matcher::match_host(candidate, &self.snapshot())
    }

    /// [`matcher::is_unrestricted`] against the current snapshot
    pub fn is_unrestricted(&self, candidate: &str) -> bool {
        matcher::is_unrestricted(candidate, &self.snapshot())
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new(RuleSet::default())
    }
}
