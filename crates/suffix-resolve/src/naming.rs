//! Candidate-name derivation.
//!
//! Turns an original module path into the environment-specific candidate
//! path. Pure string transformation; the file system is never touched here.

use std::fmt;
use std::sync::Arc;

/// Token replaced with the final path segment of the original module path.
pub const NAME_TOKEN: &str = "[name]";

/// Token replaced with the configured environment suffix.
pub const SUFFIX_TOKEN: &str = "[suffix]";

/// Caller-supplied naming function from original path to candidate path.
pub type NameFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// How the candidate substitute path is derived from an original path.
pub enum NameTemplate {
    /// Template string containing the `[name]` and `[suffix]` tokens,
    /// applied to the final path segment.
    Template(String),
    /// Delegate to the caller's function, which is solely responsible for
    /// producing the candidate path.
    Function(NameFn),
}

impl NameTemplate {
    /// Wrap a template string.
    #[must_use]
    pub fn template(template: impl Into<String>) -> Self {
        Self::Template(template.into())
    }

    /// Wrap a literal naming function.
    #[must_use]
    pub fn function(f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        Self::Function(Arc::new(f))
    }

    /// Derive the candidate path for `original`.
    ///
    /// The original path is split on its last `/` or `\`; the template is
    /// applied to the final segment and rejoined with `/`. A path with no
    /// separator (or with an empty directory or final segment) is not
    /// derivable and comes back unchanged.
    #[must_use]
    pub fn derive(&self, original: &str, suffix: &str) -> String {
        match self {
            Self::Function(f) => f(original),
            Self::Template(template) => {
                let Some(sep) = original.rfind(['/', '\\']) else {
                    return original.to_string();
                };
                let (dir, name) = (&original[..sep], &original[sep + 1..]);
                if dir.is_empty() || name.is_empty() {
                    return original.to_string();
                }
                let renamed = template
                    .replacen(NAME_TOKEN, name, 1)
                    .replacen(SUFFIX_TOKEN, suffix, 1);
                format!("{dir}/{renamed}")
            }
        }
    }
}

impl fmt::Debug for NameTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Template(t) => f.debug_tuple("NameTemplate::Template").field(t).finish(),
            Self::Function(_) => f.write_str("NameTemplate::Function(..)"),
        }
    }
}
