use std::env;

use crate::error::FleetError;

pub const DEFAULT_CONFLICT_WINDOW_MIN: i64 = 60;
pub const DEFAULT_APPROACHING_WINDOW_MIN: i64 = 30;
pub const DEFAULT_SERVICE_SOON_DAYS: i64 = 14;
pub const DEFAULT_SERVICE_SOON_KM: f64 = 500.0;

/// Tunable thresholds for the derived-state services. Every knob has a
/// default, so `FleetConfig::default()` is always usable; `from_env` only
/// fails when a variable is set to something unparseable.
#[derive(Debug, Clone)]
pub struct FleetConfig {
    pub conflict_window_minutes: i64,
    pub approaching_window_minutes: i64,
    pub service_soon_days: i64,
    pub service_soon_km: f64,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            conflict_window_minutes: DEFAULT_CONFLICT_WINDOW_MIN,
            approaching_window_minutes: DEFAULT_APPROACHING_WINDOW_MIN,
            service_soon_days: DEFAULT_SERVICE_SOON_DAYS,
            service_soon_km: DEFAULT_SERVICE_SOON_KM,
        }
    }
}

impl FleetConfig {
    pub fn from_env() -> Result<Self, FleetError> {
        Ok(Self {
            conflict_window_minutes: env_i64(
                "FLEET_CONFLICT_WINDOW_MIN",
                DEFAULT_CONFLICT_WINDOW_MIN,
            )?,
            approaching_window_minutes: env_i64(
                "FLEET_APPROACHING_WINDOW_MIN",
                DEFAULT_APPROACHING_WINDOW_MIN,
            )?,
            service_soon_days: env_i64("FLEET_SERVICE_SOON_DAYS", DEFAULT_SERVICE_SOON_DAYS)?,
            service_soon_km: env_f64("FLEET_SERVICE_SOON_KM", DEFAULT_SERVICE_SOON_KM)?,
        })
    }
}

fn env_i64(key: &str, default: i64) -> Result<i64, FleetError> {
    let Ok(raw) = env::var(key) else {
        return Ok(default);
    };
    let value: i64 = raw
        .trim()
        .parse()
        .map_err(|err| FleetError::Config(format!("invalid {key}: {err}")))?;
    if value < 0 {
        return Err(FleetError::Config(format!("invalid {key}: must not be negative")));
    }
    Ok(value)
}

fn env_f64(key: &str, default: f64) -> Result<f64, FleetError> {
    let Ok(raw) = env::var(key) else {
        return Ok(default);
    };
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|err| FleetError::Config(format!("invalid {key}: {err}")))?;
    if !value.is_finite() || value < 0.0 {
        return Err(FleetError::Config(format!(
            "invalid {key}: must be a non-negative number"
        )));
    }
    Ok(value)
}
