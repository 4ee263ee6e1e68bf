//! Executable presence detection.

/// Answers whether a named executable resolves on the search path.
pub trait PresenceProbe: Send + Sync {
    fn is_present(&self, executable: &str) -> bool;
}

/// Probe backed by a real `PATH` lookup.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathProbe;

impl PresenceProbe for PathProbe {
    fn is_present(&self, executable: &str) -> bool {
        which::which(executable).is_ok()
    }
}
