//! Naming conventions of the emitted C

use serde::{Deserialize, Serialize};

/// Names used in generated code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodegenConfig {
    /// Universal value type, declared as `typedef void *ANY_TYPE;`
    pub any_type: String,
    /// Prefix of lifted function names
    pub function_prefix: String,
    /// Suffix of lifted function names
    pub function_suffix: String,
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            any_type: "kv_any_t".to_string(),
            function_prefix: "kv_abs".to_string(),
            function_suffix: "_f".to_string(),
        }
    }
}

impl CodegenConfig {
    /// Name of the `index`-th lifted function
    #[must_use]
    pub fn function_name(&self, index: usize) -> String {
        format!("{}{index}{}", self.function_prefix, self.function_suffix)
    }
}
