//! File-system seam borrowed from the host.
//!
//! The host bundler owns path joining and file access; the engine only
//! borrows them, one probe per resolution attempt. Hosts with virtual or
//! remote file systems implement [`ResolverFs`] themselves; [`OsFs`] covers
//! the common case of modules on the local disk.

use futures::future::BoxFuture;
use std::io;

/// Host-owned path primitives used during resolution.
pub trait ResolverFs: Send + Sync {
    /// Join a relative request onto its context directory.
    fn join(&self, base: &str, relative: &str) -> String;

    /// Check that `path` names a readable file.
    ///
    /// Resolves to `Err` iff the path does not exist or cannot be read. The
    /// engine issues this at most once per resolution attempt and discards
    /// the error itself; absence and I/O failure are indistinguishable to
    /// callers.
    fn probe<'a>(&'a self, path: &'a str) -> BoxFuture<'a, io::Result<()>>;
}

/// Join `relative` onto `base` for `/`-separated module paths, collapsing
/// `.` and `..` segments. An absolute `relative` replaces `base`.
#[must_use]
pub fn join_request(base: &str, relative: &str) -> String {
    let joined = if relative.starts_with('/') {
        relative.to_string()
    } else {
        format!("{}/{relative}", base.trim_end_matches('/'))
    };

    let absolute = joined.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();
    for segment in joined.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if matches!(segments.last(), Some(&"..")) {
                    segments.push("..");
                } else if segments.pop().is_none() && !absolute {
                    segments.push("..");
                }
            }
            other => segments.push(other),
        }
    }

    let body = segments.join("/");
    if absolute {
        format!("/{body}")
    } else {
        body
    }
}

/// [`ResolverFs`] backed by the local file system via `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFs;

impl ResolverFs for OsFs {
    fn join(&self, base: &str, relative: &str) -> String {
        join_request(base, relative)
    }

    fn probe<'a>(&'a self, path: &'a str) -> BoxFuture<'a, io::Result<()>> {
        Box::pin(async move {
            let meta = tokio::fs::metadata(path).await?;
            if meta.is_file() {
                Ok(())
            } else {
                Err(io::Error::new(io::ErrorKind::InvalidInput, "not a file"))
            }
        })
    }
}
