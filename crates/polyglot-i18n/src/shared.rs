//! Process-wide registry with snapshot reads.
//!
//! [`SharedRegistry`] publishes immutable [`Registry`] snapshots through
//! [`arc_swap::ArcSwap`]. Readers take a snapshot and resolve against it for
//! the whole call, so a concurrent language switch never tears a lookup.
//! Writers are serialized: each mutation runs on a private clone of the
//! current snapshot and is published only if it succeeds.
//!
//! # Example
//!
//! ```
//! use polyglot_i18n::{Registry, SharedRegistry, Values};
//!
//! let shared = SharedRegistry::new(Registry::new("en", [("hi", "Hi {name}")]).unwrap());
//! shared
//!     .update(|r| r.add_complete("de", [("hi", "Hallo {name}")]).map(|_| ()))
//!     .unwrap();
//! shared.set_active_language("de").unwrap();
//!
//! let values = Values::new().with("name", "Ada");
//! assert_eq!(shared.resolve("hi", &values).unwrap(), "Hallo Ada");
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use arc_swap::ArcSwap;

use crate::error::Result;
use crate::registry::Registry;
use crate::resolve;
use crate::value::Values;

/// A registry shared between threads.
pub struct SharedRegistry {
    current: ArcSwap<Registry>,
    writer: Mutex<()>,
}

impl SharedRegistry {
    /// Publish `registry` as the first snapshot.
    #[must_use]
    pub fn new(registry: Registry) -> Self {
        Self {
            current: ArcSwap::from_pointee(registry),
            writer: Mutex::new(()),
        }
    }

    /// The current snapshot. Wait-free.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Registry> {
        self.current.load_full()
    }

    /// Apply `mutate` to a copy of the current registry and publish the
    /// copy if `mutate` succeeds. On error the published snapshot is left
    /// untouched.
    pub fn update<T>(&self, mutate: impl FnOnce(&mut Registry) -> Result<T>) -> Result<T> {
        // The guarded data is `()`, so a poisoned lock carries no broken state.
        let _guard = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let mut next = Registry::clone(&self.current.load());
        let out = mutate(&mut next)?;
        self.current.store(Arc::new(next));
        Ok(out)
    }

    /// Switch the active language of the published registry.
    pub fn set_active_language(&self, language: &str) -> Result<()> {
        self.update(|registry| registry.set_active_language(language).map(|_| ()))
    }

    /// The active language of the current snapshot.
    #[must_use]
    pub fn active_language(&self) -> String {
        self.current.load().active_language().to_string()
    }

    /// Resolve against one stable snapshot.
    pub fn resolve(&self, key: &str, values: &Values) -> Result<String> {
        resolve::resolve(&self.current.load(), key, values)
    }

    /// Replace the published registry wholesale.
    pub fn replace(&self, registry: Registry) {
        let _guard = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        self.current.store(Arc::new(registry));
    }
}

impl std::fmt::Debug for SharedRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedRegistry")
            .field("current", &self.snapshot())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::I18nError;
    use std::sync::Barrier;
    use std::thread;

    fn registry() -> Registry {
        let mut registry = Registry::new("en", [("hi", "Hi"), ("bye", "Bye")]).unwrap();
        registry
            .add_complete("de", [("hi", "Hallo"), ("bye", "Tschüss")])
            .unwrap();
        registry
    }

    #[test]
    fn snapshot_survives_later_updates() {
        let shared = SharedRegistry::new(registry());
        let before = shared.snapshot();
        shared.set_active_language("de").unwrap();
        assert_eq!(before.active_language(), "en");
        assert_eq!(shared.active_language(), "de");
        assert_eq!(shared.resolve("hi", &Values::new()), Ok("Hallo".into()));
    }

    #[test]
    fn failed_update_publishes_nothing() {
        let shared = SharedRegistry::new(registry());
        let before = shared.snapshot();
        let err = shared
            .update(|r| {
                r.add_complete("fr", [("hi", "Salut"), ("bye", "Salut")])?;
                r.set_active_language("xx")?;
                Ok(())
            })
            .unwrap_err();
        assert_eq!(err, I18nError::language_not_found("xx"));
        assert!(Arc::ptr_eq(&before, &shared.snapshot()));
        assert!(!shared.snapshot().contains_language("fr"));
    }

    #[test]
    fn replace_publishes_new_registry() {
        let shared = SharedRegistry::new(registry());
        shared.replace(Registry::new("fr", [("hi", "Salut")]).unwrap());
        assert_eq!(shared.active_language(), "fr");
        assert_eq!(shared.resolve("hi", &Values::new()), Ok("Salut".into()));
    }

    #[test]
    fn concurrent_readers_see_whole_languages() {
        let shared = Arc::new(SharedRegistry::new(registry()));
        let barrier = Arc::new(Barrier::new(5));

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let s = Arc::clone(&shared);
                let b = Arc::clone(&barrier);
                thread::spawn(move || {
                    b.wait();
                    for _ in 0..500 {
                        let snapshot = s.snapshot();
                        let hi = resolve::resolve(&snapshot, "hi", &Values::new()).unwrap();
                        let bye = resolve::resolve(&snapshot, "bye", &Values::new()).unwrap();
                        let pair = (hi.as_str(), bye.as_str());
                        assert!(
                            pair == ("Hi", "Bye") || pair == ("Hallo", "Tschüss"),
                            "torn read: {pair:?}"
                        );
                    }
                })
            })
            .collect();

        barrier.wait();
        for i in 0..200 {
            let language = if i % 2 == 0 { "de" } else { "en" };
            shared.set_active_language(language).unwrap();
        }

        for handle in readers {
            handle.join().unwrap();
        }
    }
}
