//! Engine configuration.
//!
//! Plain data with serde support, so a host application can embed it in
//! whatever configuration file it already has. Missing fields take their
//! defaults.
//!
//! None of these settings touch the unit table, the white fallback of the
//! mixer, or the matching metric. They only choose defaults for input the
//! caller left unspecified.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::unit::Unit;

/// Number of matches returned when the caller does not ask for a limit.
pub const DEFAULT_MATCH_LIMIT: usize = 5;

/// Tunable defaults for mixing and matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum number of catalog matches. Default: 5.
    pub match_limit: usize,
    /// Unit assumed for a base with no unit label. Default: generic unit.
    pub base_unit: Unit,
    /// Unit assumed for a tint with no unit label. Default: gram.
    pub tint_unit: Unit,
    /// Weigh `kg`-tagged quantities as grams. Default: true.
    ///
    /// Goods priced per kilogram are dispensed and recorded in grams, so
    /// their quantities must not be scaled by 1000 again.
    pub kilograms_as_grams: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            match_limit: DEFAULT_MATCH_LIMIT,
            base_unit: Unit::Generic,
            tint_unit: Unit::Gram,
            kilograms_as_grams: true,
        }
    }
}

impl EngineConfig {
    /// Check the configuration for values the engine cannot use.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroMatchLimit`] if `match_limit` is zero.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.match_limit == 0 {
            return Err(ConfigError::ZeroMatchLimit);
        }
        Ok(())
    }
}

/// Errors from [`EngineConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A limit of zero would make every match request empty.
    #[error("match_limit must be at least 1")]
    ZeroMatchLimit,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.match_limit, 5);
        assert_eq!(config.base_unit, Unit::Generic);
        assert_eq!(config.tint_unit, Unit::Gram);
        assert!(config.kilograms_as_grams);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{ "match_limit": 20, "tint_unit": "ounce" }"#).unwrap();
        assert_eq!(
            config,
            EngineConfig {
                match_limit: 20,
                tint_unit: Unit::Ounce,
                ..EngineConfig::default()
            }
        );
    }

    #[test]
    fn empty_json_is_default() {
        let config: EngineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn zero_limit_is_rejected() {
        let config = EngineConfig {
            match_limit: 0,
            ..EngineConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroMatchLimit));
        assert_eq!(
            ConfigError::ZeroMatchLimit.to_string(),
            "match_limit must be at least 1"
        );
    }

    #[test]
    fn roundtrips_through_json() {
        let config = EngineConfig {
            match_limit: 12,
            base_unit: Unit::Gallon,
            tint_unit: Unit::Milliliter,
            kilograms_as_grams: false,
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
