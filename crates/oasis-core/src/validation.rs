//! # Validation Module
//!
//! Checks on the data the engine is handed: hotel settings and cabins.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Dashboard form                                                │
//! │  ├── Basic format checks (empty, number)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS CRATE                                                   │
//! │  ├── validate_settings  → ConfigurationError (fatal)                   │
//! │  ├── validate_cabin     → Violations (cabin editor)                    │
//! │  └── admission::validate → Violations (booking form)                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database                                                     │
//! │  ├── NOT NULL constraints                                              │
//! │  └── no-overlap exclusion constraint on bookings                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{ConfigurationError, Field, ViolationReason, Violations};
use crate::money::Money;
use crate::types::{CabinSnapshot, Settings};

/// Lowest regular price a cabin may have.
pub const MIN_REGULAR_PRICE: Money = Money::from_cents(1);

/// Result type for settings checks.
pub type SettingsResult<T> = Result<T, ConfigurationError>;

// =============================================================================
// Settings
// =============================================================================

/// Validates the hotel settings before an evaluation.
///
/// ## Rules
/// - `minBookingLength` ≥ 1
/// - `maxBookingLength` ≥ `minBookingLength`
/// - `maxGuestsPerBooking` ≥ 1
/// - `breakfastPrice` ≥ 0
///
/// ## Example
/// ```rust
/// use oasis_core::validation::validate_settings;
/// use oasis_core::{Money, Settings};
///
/// let mut settings = Settings {
///     min_booking_length: 1,
///     max_booking_length: 30,
///     max_guests_per_booking: 4,
///     breakfast_price: Money::from_major(15),
///     require_observations: false,
/// };
/// assert!(validate_settings(&settings).is_ok());
///
/// settings.min_booking_length = 0;
/// assert!(validate_settings(&settings).is_err());
/// ```
pub fn validate_settings(settings: &Settings) -> SettingsResult<()> {
    if settings.min_booking_length == 0 {
        return Err(ConfigurationError::InvalidSetting {
            name: "minBookingLength",
            reason: "must be at least 1 night".to_string(),
        });
    }

    if settings.max_booking_length < settings.min_booking_length {
        return Err(ConfigurationError::InvalidSetting {
            name: "maxBookingLength",
            reason: format!(
                "{} is below minBookingLength {}",
                settings.max_booking_length, settings.min_booking_length
            ),
        });
    }

    if settings.max_guests_per_booking == 0 {
        return Err(ConfigurationError::InvalidSetting {
            name: "maxGuestsPerBooking",
            reason: "must be at least 1 guest".to_string(),
        });
    }

    if settings.breakfast_price.is_negative() {
        return Err(ConfigurationError::InvalidSetting {
            name: "breakfastPrice",
            reason: format!("cannot be negative, got {}", settings.breakfast_price),
        });
    }

    Ok(())
}

// =============================================================================
// Cabins
// =============================================================================

/// Validates a cabin as entered in the cabin editor.
///
/// ## Rules
/// - `maxCapacity` ≥ 1
/// - `regularPrice` ≥ [`MIN_REGULAR_PRICE`]
/// - `discount` ≥ 0 and ≤ `regularPrice`
///
/// All rules are checked; every failure is returned.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Cabin editor: Save                                                     │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_cabin ← THIS FUNCTION                                        │
/// │       │                                                                 │
/// │       ├── Err(violations) → messages under each input                  │
/// │       │                                                                 │
/// │       └── Ok → cabin row is written by the cabin service               │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_cabin(cabin: &CabinSnapshot) -> Result<(), Violations> {
    let mut violations = Violations::new();

    if cabin.max_capacity == 0 {
        violations.push(Field::MaxCapacity, ViolationReason::CapacityTooSmall);
    }

    if cabin.regular_price < MIN_REGULAR_PRICE {
        violations.push(
            Field::RegularPrice,
            ViolationReason::RegularPriceTooLow {
                min: MIN_REGULAR_PRICE,
            },
        );
    }

    if cabin.discount.is_negative() {
        violations.push(Field::Discount, ViolationReason::NegativeDiscount);
    } else if cabin.discount > cabin.regular_price {
        violations.push(Field::Discount, ViolationReason::DiscountAboveRegularPrice);
    }

    violations.into_result()
}

// =============================================================================
// Unit Tests
// =============================================================================
