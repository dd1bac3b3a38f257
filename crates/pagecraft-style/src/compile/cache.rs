//! Change-detecting injection of stylesheet text into a sink.

use std::hash::Hasher;

use crate::logging::targets;

/// Destination for compiled stylesheet text.
///
/// `scope` identifies the managed style block; a sink replaces whatever it
/// previously held for that scope.
pub trait StyleSink {
    fn apply(&mut self, scope: &str, text: &str);
}

/// Sink that keeps every write in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    writes: Vec<(String, String)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All writes, oldest first, as `(scope, text)`.
    pub fn writes(&self) -> &[(String, String)] {
        &self.writes
    }

    /// Number of writes received.
    pub fn write_count(&self) -> usize {
        self.writes.len()
    }

    /// The most recently written text.
    pub fn last(&self) -> Option<&str> {
        self.writes.last().map(|(_, text)| text.as_str())
    }
}

impl StyleSink for MemorySink {
    fn apply(&mut self, scope: &str, text: &str) {
        self.writes.push((scope.to_string(), text.to_string()));
    }
}

struct Fnv1aHasher(u64);

impl Fnv1aHasher {
    fn new() -> Self {
        Self(14695981039346656037u64)
    }
}

impl Hasher for Fnv1aHasher {
    fn finish(&self) -> u64 {
        self.0
    }

    fn write(&mut self, bytes: &[u8]) {
        const PRIME: u64 = 1099511628211;
        for byte in bytes {
            self.0 ^= u64::from(*byte);
            self.0 = self.0.wrapping_mul(PRIME);
        }
    }
}

/// 64-bit FNV-1a hash of the text.
///
/// Stable across runs and platforms.
pub fn content_hash(text: &str) -> u64 {
    let mut hasher = Fnv1aHasher::new();
    hasher.write(text.as_bytes());
    hasher.finish()
}

/// A sink that skips writes whose content hash matches the last write.
#[derive(Debug)]
pub struct CachedSink<S> {
    scope: String,
    sink: S,
    last_hash: Option<u64>,
}

impl<S: StyleSink> CachedSink<S> {
    /// Wrap a sink. The first injection always writes.
    pub fn new(scope: impl Into<String>, sink: S) -> Self {
        Self {
            scope: scope.into(),
            sink,
            last_hash: None,
        }
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// The wrapped sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Hash of the last text written, if any.
    pub fn last_hash(&self) -> Option<u64> {
        self.last_hash
    }

    /// Forget the last hash so the next injection writes unconditionally.
    pub fn invalidate(&mut self) {
        self.last_hash = None;
    }

    /// Write `text` unless it hashes the same as the previous write.
    ///
    /// Returns whether the sink was written.
    pub fn inject_if_changed(&mut self, text: &str) -> bool {
        let hash = content_hash(text);
        if self.last_hash == Some(hash) {
            tracing::trace!(
                target: targets::INJECT,
                scope = %self.scope,
                hash,
                "unchanged, skipping write"
            );
            return false;
        }

        self.sink.apply(&self.scope, text);
        self.last_hash = Some(hash);
        tracing::debug!(
            target: targets::INJECT,
            scope = %self.scope,
            hash,
            bytes = text.len(),
            "stylesheet injected"
        );
        true
    }

    /// Unwrap the sink.
    pub fn into_inner(self) -> S {
        self.sink
    }
}

/// Inject `text` through `sink`, skipping the write when nothing changed.
pub fn inject_if_changed<S: StyleSink>(text: &str, sink: &mut CachedSink<S>) -> bool {
    sink.inject_if_changed(text)
}
