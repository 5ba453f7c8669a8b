//! Register configuration

use serde::Deserialize;

use core_kernel::Timezone;
use domain_accounting::InsuranceRatio;

use crate::error::CliError;

/// Register configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RegisterConfig {
    /// Clinic name printed on documents
    pub clinic_name: String,
    /// Time zone used for visit and issue dates
    pub timezone: Timezone,
    /// Log level
    pub log_level: String,
    /// Emit logs as JSON lines
    pub log_json: bool,
    /// Insurance ratio used when a request does not name one
    pub default_insurance_ratio: InsuranceRatio,
}

impl Default for RegisterConfig {
    fn default() -> Self {
        Self {
            clinic_name: "どうぶつ病院".to_string(),
            timezone: Timezone::default(),
            log_level: "info".to_string(),
            log_json: false,
            default_insurance_ratio: InsuranceRatio::Half,
        }
    }
}

impl RegisterConfig {
    /// Loads configuration from `REGISTER_*` environment variables
    pub fn from_env() -> Result<Self, CliError> {
        Self::from_environment(config::Environment::with_prefix("REGISTER"))
    }

    /// Loads configuration from an environment source
    pub fn from_environment(environment: config::Environment) -> Result<Self, CliError> {
        let config = config::Config::builder()
            .add_source(environment)
            .build()?
            .try_deserialize()?;
        Ok(config)
    }
}
