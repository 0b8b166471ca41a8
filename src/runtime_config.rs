//! # Runtime Configuration Module
//!
//! Environment variable-based configuration for the dispatch pipeline.
//!
//! ## Environment Variables
//!
//! ### `BRRTR_MOUNT_ROOT`
//!
//! Prefix the application is mounted under (e.g. `/app`). It is stripped from every
//! request path before handler lookup; requests outside it match no handler.
//!
//! Default: empty (mounted at `/`)
//!
//! ### `BRRTR_STRICT_BINDING`
//!
//! When `true`, a backing object whose runtime type does not match the declared
//! parameter type is a binding error instead of an unresolved parameter.
//! Accepts `true`/`false`/`1`/`0`/`yes`/`no`, case-insensitive.
//!
//! Default: `false`
//!
//! Invalid values fall back to the default.
//!
//! ## Usage
//!
//! ```rust
//! use brrtrouter_backing::runtime_config::RuntimeConfig;
//! use brrtrouter_backing::dispatcher::Dispatcher;
//!
//! let config = RuntimeConfig::from_env();
//! let dispatcher = Dispatcher::from_config(&config);
//! assert_eq!(dispatcher.mount_root(), config.mount_root);
//! ```

use crate::binding::BindingPolicy;
use std::env;

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Prefix stripped from request paths before lookup (default: empty)
    pub mount_root: String,
    /// How type mismatches on backing parameters are treated (default: lenient)
    pub binding_policy: BindingPolicy,
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    pub fn from_vars<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mount_root = var("BRRTR_MOUNT_ROOT")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .unwrap_or_default();
        let strict = var("BRRTR_STRICT_BINDING")
            .and_then(|v| parse_bool(&v))
            .unwrap_or(false);
        RuntimeConfig {
            mount_root,
            binding_policy: BindingPolicy::from_strict(strict),
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn test_empty_environment_is_default() {
        assert_eq!(RuntimeConfig::from_vars(vars(&[])), RuntimeConfig::default());
        assert_eq!(RuntimeConfig::default().binding_policy, BindingPolicy::Lenient);
    }

    #[test]
    fn test_mount_root_trailing_slash_trimmed() {
        let cfg = RuntimeConfig::from_vars(vars(&[("BRRTR_MOUNT_ROOT", "/app/")]));
        assert_eq!(cfg.mount_root, "/app");
    }

    #[test]
    fn test_strict_binding_values() {
        for v in ["true", "TRUE", "1", "yes"] {
            let cfg = RuntimeConfig::from_vars(vars(&[("BRRTR_STRICT_BINDING", v)]));
            assert_eq!(cfg.binding_policy, BindingPolicy::Strict, "value {v}");
        }
        for v in ["false", "0", "garbage", ""] {
            let cfg = RuntimeConfig::from_vars(vars(&[("BRRTR_STRICT_BINDING", v)]));
            assert_eq!(cfg.binding_policy, BindingPolicy::Lenient, "value {v}");
        }
    }
}
