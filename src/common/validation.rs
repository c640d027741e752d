// src/common/validation.rs

use rust_decimal::Decimal;
use validator::{ValidationError, ValidationErrors};

// ---
// Validações manuais (campos Option<Option<Decimal>> que o derive não alcança)
// ---

pub fn not_negative(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: Option<&Decimal>,
) {
    if let Some(val) = value {
        if val.is_sign_negative() && !val.is_zero() {
            let mut err = ValidationError::new("range");
            err.add_param("min".into(), &0.0);
            err.message = Some("Value cannot be negative".into());
            errors.add(field, err);
        }
    }
}

pub fn percentage(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: Option<&Decimal>,
) {
    if let Some(val) = value {
        if *val < Decimal::ZERO || *val > Decimal::ONE_HUNDRED {
            let mut err = ValidationError::new("range");
            err.add_param("min".into(), &0.0);
            err.add_param("max".into(), &100.0);
            err.message = Some("Value must be between 0 and 100".into());
            errors.add(field, err);
        }
    }
}

pub fn into_result(errors: ValidationErrors) -> Result<(), ValidationErrors> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
