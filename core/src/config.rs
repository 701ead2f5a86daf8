use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Environment variable overriding [`EngineConfig::strategy`].
pub const ENV_STRATEGY: &str = "WAYFINDER_STRATEGY";

/// Environment variable overriding [`EngineConfig::self_loops`].
pub const ENV_SELF_LOOPS: &str = "WAYFINDER_SELF_LOOPS";

/// How the engine picks the next vertex to settle.
///
/// Both strategies settle vertices in the same order and therefore produce
/// identical distances and predecessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueStrategy {
    /// Lazy-deletion binary heap, O((V + E) log V).
    #[default]
    BinaryHeap,
    /// Scan every unvisited vertex for the minimum, O(V²).
    LinearScan,
}

/// What `Graph::add_edge` does with an edge whose endpoints are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelfLoopPolicy {
    /// Accept the call and record nothing.
    #[default]
    Ignore,
    /// Fail with `GraphError::SelfLoop`.
    Reject,
}

impl FromStr for QueueStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "binary_heap" | "heap" => Ok(Self::BinaryHeap),
            "linear_scan" | "linear" => Ok(Self::LinearScan),
            _ => Err(ConfigError::UnknownStrategy(s.to_string())),
        }
    }
}

impl FromStr for SelfLoopPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ignore" => Ok(Self::Ignore),
            "reject" => Ok(Self::Reject),
            _ => Err(ConfigError::UnknownSelfLoopPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for QueueStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::BinaryHeap => "binary_heap",
            Self::LinearScan => "linear_scan",
        })
    }
}

impl fmt::Display for SelfLoopPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ignore => "ignore",
            Self::Reject => "reject",
        })
    }
}

/// Engine settings. Every field has a default, so a config file only needs
/// the keys it changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub strategy: QueueStrategy,
    pub self_loops: SelfLoopPolicy,
}

impl EngineConfig {
    /// Read a JSON config file. Missing keys keep their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Apply `WAYFINDER_*` overrides from the process environment.
    pub fn with_env(self) -> Result<Self, ConfigError> {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary lookup. Unset or empty values
    /// leave the current setting in place.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|s| !s.trim().is_empty());

        if let Some(s) = get(ENV_STRATEGY) {
            self.strategy = s.parse()?;
        }
        if let Some(s) = get(ENV_SELF_LOOPS) {
            self.self_loops = s.parse()?;
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.strategy, QueueStrategy::BinaryHeap);
        assert_eq!(cfg.self_loops, SelfLoopPolicy::Ignore);
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!("heap".parse::<QueueStrategy>().unwrap(), QueueStrategy::BinaryHeap);
        assert_eq!(" Linear ".parse::<QueueStrategy>().unwrap(), QueueStrategy::LinearScan);
        assert_eq!("REJECT".parse::<SelfLoopPolicy>().unwrap(), SelfLoopPolicy::Reject);
        assert!("fibonacci".parse::<QueueStrategy>().is_err());
        assert!("drop".parse::<SelfLoopPolicy>().is_err());
    }

    #[test]
    fn test_partial_json() {
        let cfg: EngineConfig = serde_json::from_str(r#"{"strategy": "linear_scan"}"#).unwrap();
        assert_eq!(cfg.strategy, QueueStrategy::LinearScan);
        assert_eq!(cfg.self_loops, SelfLoopPolicy::Ignore);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let res: Result<EngineConfig, _> = serde_json::from_str(r#"{"max_hops": 3}"#);
        assert!(res.is_err());
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> =
            [(ENV_STRATEGY, "linear"), (ENV_SELF_LOOPS, "")].into_iter().collect();
        let cfg = EngineConfig::default()
            .with_overrides(|k| env.get(k).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(cfg.strategy, QueueStrategy::LinearScan);
        // Empty value leaves the default.
        assert_eq!(cfg.self_loops, SelfLoopPolicy::Ignore);
    }

    #[test]
    fn test_override_bad_value() {
        let res = EngineConfig::default().with_overrides(|k| {
            (k == ENV_SELF_LOOPS).then(|| "sometimes".to_string())
        });
        assert!(matches!(res, Err(ConfigError::UnknownSelfLoopPolicy(_))));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wayfinder.json");
        std::fs::write(&path, r#"{"self_loops": "reject"}"#).unwrap();
        let cfg = EngineConfig::from_file(&path).unwrap();
        assert_eq!(cfg.self_loops, SelfLoopPolicy::Reject);
        assert!(EngineConfig::from_file(dir.path().join("missing.json")).is_err());
    }
}
