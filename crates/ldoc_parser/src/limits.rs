//! Resource limits for reading untrusted input.

/// Default maximum nesting depth for objects and arrays.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Limits applied while reading.
///
/// Reading is recursive, so the nesting depth bounds stack usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadLimits {
    /// Maximum nesting depth. The top-level object is depth 1.
    /// `None` disables the check.
    pub max_depth: Option<usize>,
}

impl ReadLimits {
    pub const fn new(max_depth: Option<usize>) -> Self {
        Self { max_depth }
    }

    /// No limits at all.
    pub const fn unlimited() -> Self {
        Self { max_depth: None }
    }
}

impl Default for ReadLimits {
    fn default() -> Self {
        Self::new(Some(DEFAULT_MAX_DEPTH))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits() {
        assert_eq!(ReadLimits::default().max_depth, Some(DEFAULT_MAX_DEPTH));
        assert_eq!(ReadLimits::unlimited().max_depth, None);
    }
}
