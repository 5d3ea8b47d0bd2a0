#![forbid(unsafe_code)]

//! Localization registry and template resolution.
//!
//! Resolves symbolic keys (`i18n:title`) into language-specific strings and
//! post-processes them with runtime values through a small template
//! language: conditional branches, count-driven inflection and named-value
//! injection.
//!
//! # How the pieces fit
//! - [`Registry`] owns the key schema, one complete [`LanguageTable`] per
//!   language, and the active-language pointer.
//! - [`TemplateEngine`] evaluates one raw template against a [`Values`] bag.
//! - [`resolve`] composes the two; [`Localizer`] applies it to the
//!   translatable inputs of a property bag.
//! - [`SharedRegistry`] publishes registry snapshots for multi-threaded hosts.
//!
//! ```
//! use polyglot_i18n::{Registry, Values, resolve};
//!
//! let mut registry = Registry::new("en", [("inbox", "{user}, you have {n} new ($n)->message")])
//!     .unwrap();
//! registry
//!     .add_complete("de", [("inbox", "{user}, $[n==1]->'eine neue Nachricht'|'{n} neue Nachrichten'")])
//!     .unwrap();
//!
//! let values = Values::new().with("user", "Ada").with("n", 1);
//! assert_eq!(
//!     resolve(&registry, "inbox", &values).unwrap(),
//!     "Ada, you have 1 new message"
//! );
//!
//! registry.set_active_language("de").unwrap();
//! assert_eq!(
//!     resolve(&registry, "inbox", &values).unwrap(),
//!     "Ada, eine neue Nachricht"
//! );
//! ```

pub mod config;
pub mod error;
pub mod localize;
pub mod plural;
pub mod registry;
pub mod resolve;
pub mod shared;
pub mod table;
pub mod template;
pub mod value;

pub use config::RegistryConfig;
pub use error::{I18nError, Result};
pub use localize::Localizer;
pub use plural::{EnglishInflector, Inflector};
pub use registry::{CoverageReport, LanguageCoverage, Registry};
pub use resolve::{KEY_PREFIX, is_key_token, parse_key_token, resolve, resolve_token, resolve_with};
pub use shared::SharedRegistry;
pub use table::LanguageTable;
pub use template::{TemplateEngine, interpolate};
pub use value::{Value, Values};
