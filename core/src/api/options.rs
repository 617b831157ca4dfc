//! Configuration options for the Lauren compiler.

use crate::parser::DEFAULT_MAX_DEPTH;

/// Configuration options for compilation.
///
/// # Example
///
/// ```
/// use lauren_core::api::CompileOptions;
///
/// let options = CompileOptions { max_depth: 64 };
/// assert_eq!(CompileOptions::default().max_depth, 256);
/// # let _ = options;
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    /// Maximum parse-tree nesting depth accepted before emission.
    ///
    /// Emission recurses once per tree level, so this also bounds the
    /// compiler's stack use.
    ///
    /// Default: 256
    pub max_depth: usize,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
