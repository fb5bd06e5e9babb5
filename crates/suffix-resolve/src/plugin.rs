//! Host-facing plugin surface.
//!
//! The host bundler owns the resolution pipeline; this adapter only
//! registers a before-resolve hook with it and maps the engine's outcome to
//! a pass-through or a rewrite. It is deliberately thin so that
//! [`SuffixResolver`] stays testable without any host present.

use crate::config::{SuffixConfig, SuffixOptions};
use crate::error::Error;
use crate::fs::{OsFs, ResolverFs};
use crate::resolver::{ModuleRequest, Resolution, SuffixResolver};
use futures::future::BoxFuture;
use std::sync::Arc;
use tracing::info;

/// What the host should do with a request after the hook ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookAction {
    /// Proceed with the host's normal resolution chain, request unchanged.
    Continue,
    /// Rewrite the request to this module path before resolving it.
    Rewrite(String),
}

/// A before-resolve callback, invoked by the host once per resolution
/// attempt. Exactly one [`HookAction`] is produced per invocation.
pub trait ResolveHook: Send + Sync {
    fn before_resolve<'a>(&'a self, request: &'a ModuleRequest) -> BoxFuture<'a, HookAction>;
}

/// Registration point supplied by the host at build-pipeline setup time.
pub trait PluginHost {
    /// Register a hook to run before each module resolution.
    fn on_before_resolve(&mut self, hook: Arc<dyn ResolveHook>);
}

/// The environment-suffix plugin: one configured engine instance, packaged
/// for host registration.
pub struct EnvSuffixPlugin {
    resolver: Arc<SuffixResolver>,
}

impl EnvSuffixPlugin {
    /// Build the plugin against the local file system.
    ///
    /// # Errors
    /// Fails when the options cannot be normalized (missing suffix or an
    /// invalid pattern).
    pub fn new(options: SuffixOptions) -> Result<Self, Error> {
        Self::with_fs(options, Arc::new(OsFs))
    }

    /// Build the plugin against a host-supplied file system.
    ///
    /// # Errors
    /// Same failure modes as [`Self::new`].
    pub fn with_fs(options: SuffixOptions, fs: Arc<dyn ResolverFs>) -> Result<Self, Error> {
        let config = SuffixConfig::from_options(options)?;
        Ok(Self {
            resolver: Arc::new(SuffixResolver::new(config, fs)),
        })
    }

    /// The engine behind this plugin, for host-free use.
    #[must_use]
    pub fn resolver(&self) -> &SuffixResolver {
        &self.resolver
    }

    /// Register with the host. Invoked once at build-pipeline setup.
    pub fn apply(self, host: &mut dyn PluginHost) {
        let config = self.resolver.config();
        info!(
            suffix = %config.suffix,
            ext = %config.ext,
            "resolving environment-suffixed module variants"
        );
        host.on_before_resolve(Arc::new(self));
    }
}

impl ResolveHook for EnvSuffixPlugin {
    fn before_resolve<'a>(&'a self, request: &'a ModuleRequest) -> BoxFuture<'a, HookAction> {
        Box::pin(async move {
            match self.resolver.resolve(request).await {
                Resolution::Accepted(path) => HookAction::Rewrite(path),
                Resolution::Declined(_) => HookAction::Continue,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    /// Minimal host: records registered hooks and replays requests at them.
    #[derive(Default)]
    struct RecordingHost {
        hooks: Vec<Arc<dyn ResolveHook>>,
    }

    impl PluginHost for RecordingHost {
        fn on_before_resolve(&mut self, hook: Arc<dyn ResolveHook>) {
            self.hooks.push(hook);
        }
    }

    struct SingleFileFs(&'static str);

    impl ResolverFs for SingleFileFs {
        fn join(&self, base: &str, relative: &str) -> String {
            crate::fs::join_request(base, relative)
        }

        fn probe<'a>(&'a self, path: &'a str) -> BoxFuture<'a, io::Result<()>> {
            let found = path == self.0;
            Box::pin(async move {
                if found {
                    Ok(())
                } else {
                    Err(io::Error::from(io::ErrorKind::NotFound))
                }
            })
        }
    }

    fn plugin() -> EnvSuffixPlugin {
        EnvSuffixPlugin::with_fs(
            SuffixOptions::new().with_suffix("production"),
            Arc::new(SingleFileFs("/app/widgets/button.production.js")),
        )
        .unwrap()
    }

    #[test]
    fn test_apply_registers_one_hook() {
        let mut host = RecordingHost::default();
        plugin().apply(&mut host);
        assert_eq!(host.hooks.len(), 1);
    }

    #[tokio::test]
    async fn test_hook_rewrites_confirmed_variants() {
        let mut host = RecordingHost::default();
        plugin().apply(&mut host);

        let action = host.hooks[0]
            .before_resolve(&ModuleRequest::new("./button", "/app/widgets"))
            .await;
        assert_eq!(
            action,
            HookAction::Rewrite("/app/widgets/button.production".to_string())
        );
    }

    #[tokio::test]
    async fn test_hook_passes_through_on_any_decline() {
        let mut host = RecordingHost::default();
        plugin().apply(&mut host);
        let hook = &host.hooks[0];

        // Excluded and not-found collapse to the same pass-through.
        let excluded = hook
            .before_resolve(&ModuleRequest::new("lodash", "/app/widgets"))
            .await;
        let missing = hook
            .before_resolve(&ModuleRequest::new("./missing", "/app/widgets"))
            .await;
        assert_eq!(excluded, HookAction::Continue);
        assert_eq!(missing, HookAction::Continue);
    }
}
