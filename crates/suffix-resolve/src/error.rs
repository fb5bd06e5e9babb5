use thiserror::Error;

/// Errors raised while normalizing plugin options.
///
/// Only construction can fail. Resolution itself always settles to a
/// [`Resolution`](crate::Resolution) value; probe failures and ineligible
/// requests decline the substitution instead of surfacing an error.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex_lite::Error,
    },

    #[error("no suffix configured and `{var}` is not set")]
    SuffixMissing { var: &'static str },
}
