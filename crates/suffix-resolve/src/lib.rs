#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

//! Environment-suffix module resolution for bundler pipelines.
//!
//! Given a module request such as `./button` resolved from `/app/widgets`,
//! this crate decides whether an environment-specific variant like
//! `/app/widgets/button.production.js` exists on disk and, if so, rewrites
//! the request to it. Call sites never mention the suffix; the environment
//! tag comes from configuration (by default the `NODE_ENV` variable, read
//! once at construction).
//!
//! The decision engine ([`SuffixResolver`]) is host-free: it takes the
//! request, filters it through the configured include/exclude patterns,
//! derives the candidate name from the naming template, and confirms the
//! candidate with a single asynchronous existence probe against an injected
//! file system. The thin host adapter ([`EnvSuffixPlugin`]) packages the
//! engine as a before-resolve hook for the host bundler.

pub mod config;
pub mod error;
pub mod fs;
pub mod naming;
pub mod pattern;
pub mod plugin;
pub mod resolver;

pub use config::{Eligibility, RawOptions, SuffixConfig, SuffixOptions, SUFFIX_ENV_VAR};
pub use error::Error;
pub use fs::{join_request, OsFs, ResolverFs};
pub use naming::{NameFn, NameTemplate};
pub use pattern::{PathPredicate, PatternSet};
pub use plugin::{EnvSuffixPlugin, HookAction, PluginHost, ResolveHook};
pub use resolver::{DeclineReason, ModuleRequest, Resolution, SuffixResolver};
