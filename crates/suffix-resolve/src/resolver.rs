//! The resolution decision engine.
//!
//! One call per resolution attempt: join the request onto its context, test
//! eligibility, derive the candidate name, and confirm it on disk with a
//! single asynchronous probe. Every failure mode declines the substitution;
//! nothing escapes the async boundary as an error.

use crate::config::{Eligibility, SuffixConfig};
use crate::fs::ResolverFs;
use std::sync::Arc;
use tracing::info;

/// One module resolution attempt, as handed over by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleRequest {
    /// Raw specifier the host was asked to resolve (e.g. `./button`).
    pub specifier: String,
    /// Directory the specifier is relative to.
    pub context: String,
}

impl ModuleRequest {
    #[must_use]
    pub fn new(specifier: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            specifier: specifier.into(),
            context: context.into(),
        }
    }
}

/// Why a request was left to the host's default resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclineReason {
    /// The eligibility patterns ruled the request out; no probe was issued.
    Excluded,
    /// The derived candidate file is absent or unreadable.
    NotFound,
}

/// Outcome of one resolution attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The substitute was confirmed on disk; the host should rewrite the
    /// request to this path. The configured extension is not part of the
    /// value — the host's own resolution appends it, as it would have for
    /// the original request.
    Accepted(String),
    /// Proceed with the host's normal resolution chain.
    Declined(DeclineReason),
}

impl Resolution {
    /// The accepted substitute path, if any.
    #[must_use]
    pub fn accepted(&self) -> Option<&str> {
        match self {
            Self::Accepted(path) => Some(path),
            Self::Declined(_) => None,
        }
    }

    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

/// Decides, per request, whether an environment-suffixed variant exists and
/// should replace the original.
///
/// Stateless across calls: each [`resolve`](Self::resolve) is an
/// independent eligibility check followed by at most one existence probe,
/// so any number of resolutions may be in flight concurrently. The
/// configuration is fixed at construction.
pub struct SuffixResolver {
    config: SuffixConfig,
    fs: Arc<dyn ResolverFs>,
}

impl SuffixResolver {
    #[must_use]
    pub fn new(config: SuffixConfig, fs: Arc<dyn ResolverFs>) -> Self {
        Self { config, fs }
    }

    #[must_use]
    pub fn config(&self) -> &SuffixConfig {
        &self.config
    }

    /// Resolve one request.
    ///
    /// Always settles to a [`Resolution`]: ineligible requests decline
    /// without touching the file system, and a failed probe — absent file
    /// or any I/O error — declines as well. The probe runs at most once;
    /// there is no retry and no fallback chain.
    pub async fn resolve(&self, request: &ModuleRequest) -> Resolution {
        let module_path = self.fs.join(&request.context, &request.specifier);

        if !self.eligible(request, &module_path) {
            return Resolution::Declined(DeclineReason::Excluded);
        }

        let candidate = self
            .config
            .output
            .derive(&module_path, &self.config.suffix);
        let candidate_file = format!("{candidate}.{}", self.config.ext);

        match self.fs.probe(&candidate_file).await {
            Ok(()) => {
                info!(
                    request = %request.specifier,
                    substitute = %candidate,
                    "resolved environment-suffixed module"
                );
                Resolution::Accepted(candidate)
            }
            Err(_) => Resolution::Declined(DeclineReason::NotFound),
        }
    }

    fn eligible(&self, request: &ModuleRequest, module_path: &str) -> bool {
        match &self.config.eligibility {
            Eligibility::ExcludeOnly {
                exclude_context,
                exclude_request,
            } => {
                !exclude_context.matches(&request.context)
                    && !exclude_request.matches(&request.specifier)
            }
            Eligibility::IncludeExclude { include, exclude } => {
                let candidate_file = format!("{module_path}.{}", self.config.ext);
                include.matches(&candidate_file) && !exclude.matches(&candidate_file)
            }
        }
    }
}
