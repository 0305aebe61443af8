//! MediaWiki template-call rendering and biographical status inference.
//!
//! A raw call such as `{{convert|12|mi}}` is split at top-level pipes
//! ([`scan`]), bound onto the renderer's parameter names ([`args`]) and
//! turned into display text by the renderer registered under its name
//! ([`renderers`]). Unknown names are reported, never rendered.
//!
//! ```
//! assert_eq!(wikitmpl::render_call("{{decade|1987}}").as_deref(), Some("1980s"));
//! assert_eq!(wikitmpl::render_call("{{no such template}}"), None);
//! ```

pub mod args;
pub mod bio;
pub mod config;
pub mod helpers;
pub mod parallel;
pub mod renderers;
pub mod scan;

pub use args::{bind, parse, ArgValue, Arguments};
pub use bio::{BioVerdict, Classifier, DateParts, Inferencer, NoClassifier, PersonDocument, PersonRecord};
pub use config::{ConfigError, RenderConfig, UnknownPolicy};
pub use renderers::{is_known, lookup, render, render_call, Renderer};
pub use scan::tokenize;
