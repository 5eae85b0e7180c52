//! # Hotel Settings
//!
//! Loads the [`Settings`] the engine evaluates against.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     OASIS_MIN_BOOKING_LENGTH=2                                         │
//! │     OASIS_BREAKFAST_PRICE=1500        (minor units)                    │
//! │                                                                         │
//! │  2. TOML Settings File (--settings / OASIS_SETTINGS)                   │
//! │     [booking] table, every key optional                                │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     1 to 90 nights, 8 guests, ₹15.00 breakfast                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Settings File Format
//! ```toml
//! # settings.toml
//! [booking]
//! min_booking_length = 3
//! max_booking_length = 90
//! max_guests_per_booking = 8
//! breakfast_price = 1500      # minor units
//! require_observations = false
//! ```

use std::path::Path;
use std::str::FromStr;

use oasis_core::validation::validate_settings;
use oasis_core::{ConfigurationError, Money, Settings};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{DeskError, DeskResult};

pub const ENV_MIN_BOOKING_LENGTH: &str = "OASIS_MIN_BOOKING_LENGTH";
pub const ENV_MAX_BOOKING_LENGTH: &str = "OASIS_MAX_BOOKING_LENGTH";
pub const ENV_MAX_GUESTS_PER_BOOKING: &str = "OASIS_MAX_GUESTS_PER_BOOKING";
pub const ENV_BREAKFAST_PRICE: &str = "OASIS_BREAKFAST_PRICE";
pub const ENV_REQUIRE_OBSERVATIONS: &str = "OASIS_REQUIRE_OBSERVATIONS";

// =============================================================================
// Defaults
// =============================================================================

pub const DEFAULT_MIN_BOOKING_LENGTH: u32 = 1;
pub const DEFAULT_MAX_BOOKING_LENGTH: u32 = 90;
pub const DEFAULT_MAX_GUESTS_PER_BOOKING: u32 = 8;
pub const DEFAULT_BREAKFAST_PRICE: Money = Money::from_cents(1500);

// =============================================================================
// Settings File
// =============================================================================

/// The `[booking]` table of the settings file.
///
/// Keys left out fall through to the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BookingTable {
    pub min_booking_length: Option<u32>,
    pub max_booking_length: Option<u32>,
    pub max_guests_per_booking: Option<u32>,
    /// Minor units.
    pub breakfast_price: Option<i64>,
    pub require_observations: Option<bool>,
}

/// Complete settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsFile {
    #[serde(default)]
    pub booking: BookingTable,
}

impl SettingsFile {
    /// Reads a settings file from disk.
    pub fn read(path: &Path) -> DeskResult<Self> {
        info!(?path, "Loading hotel settings from file");
        let contents = std::fs::read_to_string(path).map_err(|source| DeskError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| DeskError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }
}

// =============================================================================
// Loading
// =============================================================================

/// Loads settings from the optional file and the process environment.
///
/// ## Load Order (later overrides earlier)
/// 1. Default values
/// 2. Settings file
/// 3. Environment variables
pub fn load(path: Option<&Path>) -> DeskResult<Settings> {
    let file = match path {
        Some(path) => SettingsFile::read(path)?,
        None => {
            debug!("No settings file given, using defaults");
            SettingsFile::default()
        }
    };

    Ok(resolve(&file.booking, |name| std::env::var(name).ok())?)
}

/// Merges defaults, the file table and environment values, then validates.
///
/// `env` looks up one variable by name. A variable that is set but blank is
/// reported as missing rather than silently ignored.
pub fn resolve<F>(table: &BookingTable, env: F) -> Result<Settings, ConfigurationError>
where
    F: Fn(&str) -> Option<String>,
{
    let settings = Settings {
        min_booking_length: env_override::<u32, _>(&env, ENV_MIN_BOOKING_LENGTH)?
            .or(table.min_booking_length)
            .unwrap_or(DEFAULT_MIN_BOOKING_LENGTH),
        max_booking_length: env_override::<u32, _>(&env, ENV_MAX_BOOKING_LENGTH)?
            .or(table.max_booking_length)
            .unwrap_or(DEFAULT_MAX_BOOKING_LENGTH),
        max_guests_per_booking: env_override::<u32, _>(&env, ENV_MAX_GUESTS_PER_BOOKING)?
            .or(table.max_guests_per_booking)
            .unwrap_or(DEFAULT_MAX_GUESTS_PER_BOOKING),
        breakfast_price: env_override::<i64, _>(&env, ENV_BREAKFAST_PRICE)?
            .or(table.breakfast_price)
            .map(Money::from_cents)
            .unwrap_or(DEFAULT_BREAKFAST_PRICE),
        require_observations: env_override::<bool, _>(&env, ENV_REQUIRE_OBSERVATIONS)?
            .or(table.require_observations)
            .unwrap_or(false),
    };

    validate_settings(&settings)?;

    debug!(
        min = settings.min_booking_length,
        max = settings.max_booking_length,
        max_guests = settings.max_guests_per_booking,
        breakfast_cents = settings.breakfast_price.cents(),
        "Hotel settings resolved"
    );

    Ok(settings)
}

fn env_override<T, F>(env: &F, name: &'static str) -> Result<Option<T>, ConfigurationError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = env(name) else {
        return Ok(None);
    };

    let value = raw.trim();
    if value.is_empty() {
        return Err(ConfigurationError::MissingSetting { name });
    }

    debug!(setting = name, value, "Overriding setting from environment");
    value
        .parse::<T>()
        .map(Some)
        .map_err(|err: T::Err| ConfigurationError::InvalidSetting {
            name,
            reason: format!("'{value}' ({err})"),
        })
}

// =============================================================================
// Unit Tests
// =============================================================================
