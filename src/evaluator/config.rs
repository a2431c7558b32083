//! Engine Configuration for FHIRPath Evaluation
//!
//! This module provides configuration types and defaults for the FhirPathEngine.

/// Engine configuration for FhirPathEngine
///
/// # Examples
///
/// ```rust
/// use octofhir_fhirpath_lite::evaluator::EngineConfig;
///
/// // Use default configuration
/// let config = EngineConfig::default();
/// assert_eq!(config.max_recursion_depth, 100);
///
/// // Or use builder pattern methods
/// let config = EngineConfig::default()
///     .with_max_recursion_depth(150)
///     .with_cache_size(2000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Maximum recursion depth for expression evaluation
    ///
    /// This limits how deeply nested expressions can be evaluated to prevent
    /// stack overflow. Default: 100
    pub max_recursion_depth: usize,

    /// Enable AST caching
    ///
    /// When enabled, compiled expressions are cached by their source text.
    /// Default: true
    pub enable_ast_cache: bool,

    /// Maximum size of AST cache
    ///
    /// Least recently used entries are evicted when the limit is reached.
    /// Default: 1000
    pub max_cache_size: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_recursion_depth: 100,
            enable_ast_cache: true,
            max_cache_size: 1000,
        }
    }
}

impl EngineConfig {
    /// Create new configuration with all defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum recursion depth
    ///
    /// # Arguments
    /// * `depth` - Maximum recursion depth (recommended: 50-200)
    pub fn with_max_recursion_depth(mut self, depth: usize) -> Self {
        self.max_recursion_depth = depth;
        self
    }

    /// Enable or disable AST caching
    pub fn with_ast_cache(mut self, enabled: bool) -> Self {
        self.enable_ast_cache = enabled;
        self
    }

    /// Set maximum cache size
    ///
    /// # Arguments
    /// * `size` - Maximum number of cached AST entries (recommended: 100-10000)
    pub fn with_cache_size(mut self, size: usize) -> Self {
        self.max_cache_size = size;
        self
    }

    /// Create testing configuration
    ///
    /// Shallow recursion limit and no caching, for predictable test behavior.
    pub fn for_testing() -> Self {
        Self {
            max_recursion_depth: 20,
            enable_ast_cache: false,
            max_cache_size: 10,
        }
    }

    /// Whether compiled expressions should be cached
    pub fn cache_enabled(&self) -> bool {
        self.enable_ast_cache && self.max_cache_size > 0
    }

    /// Validate configuration values
    ///
    /// Returns warnings for potentially problematic settings.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.max_recursion_depth == 0 {
            warnings.push("max_recursion_depth is 0; every evaluation will fail".to_string());
        } else if self.max_recursion_depth > 1000 {
            warnings.push(format!(
                "max_recursion_depth {} may overflow the stack",
                self.max_recursion_depth
            ));
        }

        if self.enable_ast_cache && self.max_cache_size == 0 {
            warnings.push("AST cache is enabled but max_cache_size is 0".to_string());
        }

        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.max_recursion_depth, 100);
        assert!(config.enable_ast_cache);
        assert_eq!(config.max_cache_size, 1000);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_builders() {
        let config = EngineConfig::new()
            .with_max_recursion_depth(10)
            .with_ast_cache(true)
            .with_cache_size(0);
        assert_eq!(config.max_recursion_depth, 10);
        assert!(!config.cache_enabled());
        assert_eq!(config.validate().len(), 1);
    }
}
