use super::*;

#[yare::parameterized(
    not_found = { CoreError::not_found("kiosk 7"), "NOT_FOUND", "kiosk 7" },
    invalid_argument = { CoreError::invalid_argument("missing name"), "INVALID_ARGUMENT", "missing name" },
    internal = { CoreError::Internal("boom".to_owned()), "INTERNAL", "boom" },
)]
fn as_str_and_message(err: CoreError, code: &str, message: &str) {
    assert_eq!(err.as_str(), code);
    assert_eq!(err.message(), message);
}

#[test]
fn display_includes_code_and_message() {
    let err = CoreError::not_found("sign 3");
    assert_eq!(err.to_string(), "NOT_FOUND: sign 3");
}
