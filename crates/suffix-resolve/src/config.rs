//! Plugin options and their normalized form.
//!
//! Callers hand over a [`SuffixOptions`] (or its plain-data twin
//! [`RawOptions`], for hosts that read plugin settings out of a JSON
//! bundler config). Normalization runs once, at construction: union fields
//! collapse into canonical [`PatternSet`] / [`NameTemplate`] values, the
//! default suffix is read from the environment exactly once, and the result
//! is an immutable [`SuffixConfig`] the engine keeps for its lifetime.

use crate::error::Error;
use crate::naming::NameTemplate;
use crate::pattern::PatternSet;
use serde::Deserialize;

/// Environment variable consulted when no suffix is configured.
pub const SUFFIX_ENV_VAR: &str = "NODE_ENV";

/// Extension managed when none is configured.
pub const DEFAULT_EXT: &str = "js";

/// Naming template applied when none is configured.
pub const DEFAULT_OUTPUT: &str = "[name].[suffix]";

/// Exclusion applied to context directories by default: anything under a
/// vendored-dependencies directory.
const DEFAULT_EXCLUDE_CONTEXT: &str = "node_modules";

/// Exclusion applied to raw requests by default: bare specifiers (anything
/// that does not start with a dot-relative marker).
const DEFAULT_EXCLUDE_REQUEST: &str = r"^[^.]";

/// How requests are filtered before a substitution is attempted.
#[derive(Debug)]
pub enum Eligibility {
    /// A request is eligible unless its context directory or its raw
    /// request string matches an exclusion set.
    ExcludeOnly {
        exclude_context: PatternSet,
        exclude_request: PatternSet,
    },
    /// Evaluated against the extension-qualified candidate file
    /// (context joined with request, plus the configured extension):
    /// eligible iff `include` matches and `exclude` does not.
    IncludeExclude {
        include: PatternSet,
        exclude: PatternSet,
    },
}

/// Caller-facing options. All fields are optional; anything left unset
/// falls back to the defaults described on [`SuffixConfig::from_options`].
#[derive(Debug, Default)]
pub struct SuffixOptions {
    /// File extension this instance manages.
    pub ext: Option<String>,
    /// Environment tag to inject into candidate names.
    pub suffix: Option<String>,
    /// Exclusion over raw request strings (exclude-only mode).
    pub exclude_request: Option<PatternSet>,
    /// Exclusion over context directories (exclude-only mode).
    pub exclude_context: Option<PatternSet>,
    /// Inclusion over candidate files. Setting this (or `exclude`) selects
    /// include+exclude mode.
    pub include: Option<PatternSet>,
    /// Exclusion over candidate files (include+exclude mode).
    pub exclude: Option<PatternSet>,
    /// Naming template for candidate paths.
    pub output: Option<NameTemplate>,
}

impl SuffixOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_ext(mut self, ext: impl Into<String>) -> Self {
        self.ext = Some(ext.into());
        self
    }

    #[must_use]
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = Some(suffix.into());
        self
    }

    #[must_use]
    pub fn with_exclude_request(mut self, patterns: PatternSet) -> Self {
        self.exclude_request = Some(patterns);
        self
    }

    #[must_use]
    pub fn with_exclude_context(mut self, patterns: PatternSet) -> Self {
        self.exclude_context = Some(patterns);
        self
    }

    #[must_use]
    pub fn with_include(mut self, patterns: PatternSet) -> Self {
        self.include = Some(patterns);
        self
    }

    #[must_use]
    pub fn with_exclude(mut self, patterns: PatternSet) -> Self {
        self.exclude = Some(patterns);
        self
    }

    #[must_use]
    pub fn with_output(mut self, output: NameTemplate) -> Self {
        self.output = Some(output);
        self
    }
}

/// Plain-data options as they appear in a JSON bundler config. Pattern
/// fields are regex sources; field names match the original camelCase
/// plugin options.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawOptions {
    pub ext: Option<String>,
    pub suffix: Option<String>,
    pub exclude_request: Option<Vec<String>>,
    pub exclude_context: Option<Vec<String>>,
    pub include: Option<Vec<String>>,
    pub exclude: Option<Vec<String>>,
    pub output: Option<String>,
}

impl RawOptions {
    /// Compile the pattern lists into [`SuffixOptions`].
    ///
    /// # Errors
    /// Returns [`Error::InvalidPattern`] if any regex source fails to
    /// compile.
    pub fn into_options(self) -> Result<SuffixOptions, Error> {
        fn compile(list: Option<Vec<String>>) -> Result<Option<PatternSet>, Error> {
            list.map(PatternSet::compile).transpose()
        }

        Ok(SuffixOptions {
            ext: self.ext,
            suffix: self.suffix,
            exclude_request: compile(self.exclude_request)?,
            exclude_context: compile(self.exclude_context)?,
            include: compile(self.include)?,
            exclude: compile(self.exclude)?,
            output: self.output.map(NameTemplate::Template),
        })
    }
}

/// Immutable configuration held by one engine instance.
#[derive(Debug)]
pub struct SuffixConfig {
    /// File extension appended to probed candidate files.
    pub ext: String,
    /// Environment tag substituted into candidate names.
    pub suffix: String,
    /// Request filtering mode.
    pub eligibility: Eligibility,
    /// Candidate-name derivation.
    pub output: NameTemplate,
}

impl SuffixConfig {
    /// Normalize caller options into a fixed configuration.
    ///
    /// Defaults: extension `"js"`; suffix from the `NODE_ENV` environment
    /// variable, read here and never again; naming template
    /// `"[name].[suffix]"`. When neither `include` nor `exclude` is set,
    /// exclude-only mode applies with `node_modules` contexts and bare
    /// (non-dot-relative) requests excluded. Setting either selects
    /// include+exclude mode, where the include set defaults to candidate
    /// files ending in the configured extension and the exclude set to
    /// `node_modules` paths.
    ///
    /// # Errors
    /// [`Error::SuffixMissing`] when no suffix is configured and the
    /// environment variable is unset or empty; [`Error::InvalidPattern`]
    /// when a default pattern set fails to compile.
    pub fn from_options(options: SuffixOptions) -> Result<Self, Error> {
        let suffix = match options.suffix {
            Some(suffix) if !suffix.is_empty() => suffix,
            _ => std::env::var(SUFFIX_ENV_VAR)
                .ok()
                .filter(|value| !value.is_empty())
                .ok_or(Error::SuffixMissing { var: SUFFIX_ENV_VAR })?,
        };
        let ext = options.ext.unwrap_or_else(|| DEFAULT_EXT.to_string());

        let eligibility = if options.include.is_some() || options.exclude.is_some() {
            let include = match options.include {
                Some(include) => include,
                None => {
                    let wanted = format!(".{ext}");
                    PatternSet::predicate(move |path| path.ends_with(&wanted))
                }
            };
            let exclude = match options.exclude {
                Some(exclude) => exclude,
                None => PatternSet::compile([DEFAULT_EXCLUDE_CONTEXT])?,
            };
            Eligibility::IncludeExclude { include, exclude }
        } else {
            let exclude_context = match options.exclude_context {
                Some(set) => set,
                None => PatternSet::compile([DEFAULT_EXCLUDE_CONTEXT])?,
            };
            let exclude_request = match options.exclude_request {
                Some(set) => set,
                None => PatternSet::compile([DEFAULT_EXCLUDE_REQUEST])?,
            };
            Eligibility::ExcludeOnly {
                exclude_context,
                exclude_request,
            }
        };

        let output = options
            .output
            .unwrap_or_else(|| NameTemplate::template(DEFAULT_OUTPUT));

        Ok(Self {
            ext,
            suffix,
            eligibility,
            output,
        })
    }

    /// Normalize plain-data options.
    ///
    /// # Errors
    /// Same failure modes as [`Self::from_options`], plus invalid regex
    /// sources from the raw pattern lists.
    pub fn from_raw(raw: RawOptions) -> Result<Self, Error> {
        Self::from_options(raw.into_options()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_defaults_select_exclude_only_mode() {
        let config = SuffixConfig::from_options(SuffixOptions::new().with_suffix("production"))
            .unwrap();
        assert_eq!(config.ext, "js");
        assert_eq!(config.suffix, "production");
        match &config.eligibility {
            Eligibility::ExcludeOnly {
                exclude_context,
                exclude_request,
            } => {
                assert!(exclude_context.matches("/app/node_modules/lodash"));
                assert!(!exclude_context.matches("/app/widgets"));
                assert!(exclude_request.matches("lodash"));
                assert!(!exclude_request.matches("./button"));
            }
            Eligibility::IncludeExclude { .. } => panic!("expected exclude-only mode"),
        }
    }

    #[test]
    fn test_include_selects_include_exclude_mode() {
        let options = SuffixOptions::new()
            .with_suffix("production")
            .with_include(PatternSet::compile([r"\.js$"]).unwrap());
        let config = SuffixConfig::from_options(options).unwrap();
        match &config.eligibility {
            Eligibility::IncludeExclude { include, exclude } => {
                assert!(include.matches("/app/widgets/button.js"));
                assert!(exclude.matches("/app/node_modules/lodash/index.js"));
            }
            Eligibility::ExcludeOnly { .. } => panic!("expected include+exclude mode"),
        }
    }

    #[test]
    fn test_default_include_matches_managed_extension() {
        let options = SuffixOptions::new()
            .with_suffix("production")
            .with_ext("mjs")
            .with_exclude(PatternSet::empty());
        let config = SuffixConfig::from_options(options).unwrap();
        match &config.eligibility {
            Eligibility::IncludeExclude { include, .. } => {
                assert!(include.matches("/app/widgets/button.mjs"));
                assert!(!include.matches("/app/widgets/button.js"));
            }
            Eligibility::ExcludeOnly { .. } => panic!("expected include+exclude mode"),
        }
    }

    #[test]
    #[serial]
    fn test_suffix_falls_back_to_environment() {
        std::env::set_var(SUFFIX_ENV_VAR, "staging");
        let config = SuffixConfig::from_options(SuffixOptions::new()).unwrap();
        assert_eq!(config.suffix, "staging");
        std::env::remove_var(SUFFIX_ENV_VAR);
    }

    #[test]
    #[serial]
    fn test_missing_suffix_is_a_construction_error() {
        std::env::remove_var(SUFFIX_ENV_VAR);
        let err = SuffixConfig::from_options(SuffixOptions::new()).unwrap_err();
        assert!(matches!(err, Error::SuffixMissing { .. }));
    }

    #[test]
    fn test_raw_options_camel_case_and_compilation() {
        let raw: RawOptions = serde_json::from_str(
            r#"{
                "ext": "jsx",
                "suffix": "production",
                "excludeContext": ["node_modules", "vendor"],
                "output": "[name]-[suffix]"
            }"#,
        )
        .unwrap();
        let config = SuffixConfig::from_raw(raw).unwrap();
        assert_eq!(config.ext, "jsx");
        assert_eq!(
            config.output.derive("/app/button", "production"),
            "/app/button-production"
        );
        match &config.eligibility {
            Eligibility::ExcludeOnly { exclude_context, .. } => {
                assert!(exclude_context.matches("/app/vendor/button"));
            }
            Eligibility::IncludeExclude { .. } => panic!("expected exclude-only mode"),
        }
    }

    #[test]
    fn test_raw_options_invalid_pattern_names_the_source() {
        let raw: RawOptions =
            serde_json::from_str(r#"{"suffix": "production", "include": ["("]}"#).unwrap();
        let err = SuffixConfig::from_raw(raw).unwrap_err();
        match err {
            Error::InvalidPattern { pattern, .. } => assert_eq!(pattern, "("),
            Error::SuffixMissing { .. } => panic!("expected an invalid-pattern error"),
        }
    }
}
