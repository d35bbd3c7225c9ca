//! Validation for records entering the store
//!
//! The roast timer never validates anything; these checks run where bean and
//! roast records are created.

use rust_decimal::Decimal;

// ============================================================================
// Bean Validations
// ============================================================================

/// Validate a bean has a name
pub fn validate_bean_name(name: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("Bean name is required");
    }
    Ok(())
}

/// Validate a bean has an origin
pub fn validate_bean_origin(origin: &str) -> Result<(), &'static str> {
    if origin.trim().is_empty() {
        return Err("Origin is required");
    }
    Ok(())
}

pub fn validate_quantity_pounds(quantity: Decimal) -> Result<(), &'static str> {
    if quantity < Decimal::ZERO {
        return Err("Quantity cannot be negative");
    }
    Ok(())
}

pub fn validate_cost_per_pound(cost: Decimal) -> Result<(), &'static str> {
    if cost < Decimal::ZERO {
        return Err("Cost per pound cannot be negative");
    }
    Ok(())
}

/// Validate cupping score is on the 100 point scale
pub fn validate_cupping_score(score: Decimal) -> Result<(), &'static str> {
    if score < Decimal::ZERO || score > Decimal::from(100) {
        return Err("Cupping score must be between 0 and 100");
    }
    Ok(())
}

/// Validate a manual inventory adjustment actually changes something
pub fn validate_adjustment_amount(amount: Decimal) -> Result<(), &'static str> {
    if amount.is_zero() {
        return Err("Adjustment amount must be non-zero");
    }
    Ok(())
}

// ============================================================================
// Roast Validations
// ============================================================================

/// Validate green and roasted weights
pub fn validate_roast_weights(green: Decimal, roasted: Decimal) -> Result<(), &'static str> {
    if green <= Decimal::ZERO {
        return Err("Green weight must be positive");
    }
    if roasted <= Decimal::ZERO {
        return Err("Roasted weight must be positive");
    }
    if roasted > green {
        return Err("Roasted weight must be less than or equal to green weight");
    }
    Ok(())
}

pub fn validate_personal_rating(rating: i32) -> Result<(), &'static str> {
    if !(1..=10).contains(&rating) {
        return Err("Rating must be between 1 and 10");
    }
    Ok(())
}

pub fn validate_humidity(humidity: Decimal) -> Result<(), &'static str> {
    if humidity < Decimal::ZERO || humidity > Decimal::from(100) {
        return Err("Humidity must be between 0 and 100%");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_validate_bean_name() {
        assert!(validate_bean_name("Ethiopia Guji").is_ok());
        assert!(validate_bean_name("").is_err());
        assert!(validate_bean_name("   ").is_err());
    }

    #[test]
    fn test_validate_bean_origin() {
        assert!(validate_bean_origin("Colombia").is_ok());
        assert!(validate_bean_origin("\t").is_err());
    }

    #[test]
    fn test_validate_quantity_and_cost() {
        assert!(validate_quantity_pounds(Decimal::ZERO).is_ok());
        assert!(validate_quantity_pounds(dec("5.5")).is_ok());
        assert!(validate_quantity_pounds(dec("-0.1")).is_err());

        assert!(validate_cost_per_pound(dec("7.25")).is_ok());
        assert!(validate_cost_per_pound(dec("-1")).is_err());
    }

    #[test]
    fn test_validate_cupping_score() {
        assert!(validate_cupping_score(dec("86.5")).is_ok());
        assert!(validate_cupping_score(Decimal::ZERO).is_ok());
        assert!(validate_cupping_score(Decimal::from(100)).is_ok());
        assert!(validate_cupping_score(dec("100.25")).is_err());
        assert!(validate_cupping_score(dec("-1")).is_err());
    }

    #[test]
    fn test_validate_adjustment_amount() {
        assert!(validate_adjustment_amount(dec("2.5")).is_ok());
        assert!(validate_adjustment_amount(dec("-1.25")).is_ok());
        assert!(validate_adjustment_amount(dec("0.000")).is_err());
    }

    #[test]
    fn test_validate_roast_weights() {
        assert!(validate_roast_weights(dec("250"), dec("212.5")).is_ok());
        assert!(validate_roast_weights(dec("250"), dec("250")).is_ok());
        assert_eq!(
            validate_roast_weights(Decimal::ZERO, dec("200")),
            Err("Green weight must be positive")
        );
        assert_eq!(
            validate_roast_weights(dec("250"), Decimal::ZERO),
            Err("Roasted weight must be positive")
        );
        assert!(validate_roast_weights(dec("250"), dec("260")).is_err());
    }

    #[test]
    fn test_validate_personal_rating() {
        assert!(validate_personal_rating(1).is_ok());
        assert!(validate_personal_rating(10).is_ok());
        assert!(validate_personal_rating(0).is_err());
        assert!(validate_personal_rating(11).is_err());
    }

    #[test]
    fn test_validate_humidity() {
        assert!(validate_humidity(dec("45")).is_ok());
        assert!(validate_humidity(dec("101")).is_err());
    }
}
