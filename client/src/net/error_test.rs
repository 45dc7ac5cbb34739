use super::*;

#[test]
fn from_response_reads_current_error_shape() {
    let body = r#"{"code":400,"error_code":"invalid_credentials","msg":"Invalid login credentials"}"#;
    let err = AuthError::from_response(400, body);
    assert_eq!(err.code, AuthErrorCode::InvalidCredentials);
    assert_eq!(err.message, "Invalid login credentials");
}

#[test]
fn from_response_reads_legacy_error_shape() {
    let body = r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#;
    let err = AuthError::from_response(400, body);
    assert_eq!(err.code, AuthErrorCode::InvalidCredentials);
    assert_eq!(err.message, "Invalid login credentials");
}

#[test]
fn from_response_keeps_unknown_code_message() {
    let body = r#"{"error_code":"signup_disabled","msg":"Signups not allowed for this instance"}"#;
    let err = AuthError::from_response(422, body);
    assert_eq!(err.code, AuthErrorCode::Unknown);
    assert_eq!(err.to_string(), "Signups not allowed for this instance");
}

#[test]
fn from_response_non_json_falls_back_to_status() {
    let err = AuthError::from_response(502, "<html>bad gateway</html>");
    assert_eq!(err.code, AuthErrorCode::Unknown);
    assert_eq!(err.message, "auth request failed: 502");
}

#[test]
fn from_response_429_without_code_is_rate_limited() {
    let err = AuthError::from_response(429, "{}");
    assert_eq!(err.code, AuthErrorCode::RateLimited);
}

#[test]
fn from_wire_maps_known_codes() {
    assert_eq!(AuthErrorCode::from_wire("email_not_confirmed"), AuthErrorCode::EmailNotConfirmed);
    assert_eq!(AuthErrorCode::from_wire("email_exists"), AuthErrorCode::UserAlreadyExists);
    assert_eq!(AuthErrorCode::from_wire("weak_password"), AuthErrorCode::WeakPassword);
    assert_eq!(AuthErrorCode::from_wire("over_email_send_rate_limit"), AuthErrorCode::RateLimited);
    assert_eq!(AuthErrorCode::from_wire("something_new"), AuthErrorCode::Unknown);
}

#[test]
fn fetch_error_display() {
    assert_eq!(FetchError::Status(503).to_string(), "unexpected status: 503");
    assert_eq!(FetchError::Unauthenticated.to_string(), "no active session");
}
