//! Tests for core_kernel error types

use core_kernel::error::CoreError;
use core_kernel::money::MoneyError;
use core_kernel::temporal::TemporalError;

#[test]
fn test_core_error_validation() {
    let error = CoreError::validation("Invalid input");

    match error {
        CoreError::Validation(msg) => assert_eq!(msg, "Invalid input"),
        _ => panic!("Expected Validation error"),
    }
}

#[test]
fn test_core_error_not_found() {
    let error = CoreError::not_found("Damage #7");
    assert_eq!(error.to_string(), "Not found: Damage #7");
}

#[test]
fn test_core_error_configuration() {
    let error = CoreError::configuration("bad delay");
    assert!(matches!(error, CoreError::Configuration(_)));
}

#[test]
fn test_money_error_converts() {
    let error: CoreError = MoneyError::InvalidAmount("x".to_string()).into();
    assert!(matches!(error, CoreError::Money(_)));
    assert_eq!(error.to_string(), "Money error: Invalid amount: x");
}

#[test]
fn test_temporal_error_converts() {
    let error: CoreError = TemporalError::UnknownTimezone("Mars".to_string()).into();
    assert!(matches!(error, CoreError::Temporal(_)));
}
