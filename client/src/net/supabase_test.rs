use super::*;

fn config() -> BackendConfig {
    BackendConfig {
        supabase_url: "https://abcd1234.supabase.co".to_owned(),
        supabase_anon_key: "anon".to_owned(),
        site_url: "http://localhost:3000".to_owned(),
    }
}

#[test]
fn storage_key_uses_project_ref() {
    assert_eq!(storage_key("https://abcd1234.supabase.co"), "sb-abcd1234-auth-token");
    assert_eq!(storage_key("http://localhost:54321"), "sb-localhost-auth-token");
    assert_eq!(storage_key("not a url"), "sb-local-auth-token");
}

#[test]
fn auth_endpoints_format_expected_paths() {
    let base = config().supabase_url;
    assert_eq!(password_grant_url(&base), "https://abcd1234.supabase.co/auth/v1/token?grant_type=password");
    assert_eq!(refresh_grant_url(&base), "https://abcd1234.supabase.co/auth/v1/token?grant_type=refresh_token");
    assert_eq!(logout_url(&base), "https://abcd1234.supabase.co/auth/v1/logout");
}

#[test]
fn signup_url_encodes_verification_redirect() {
    assert_eq!(
        signup_url(&config()).unwrap(),
        "https://abcd1234.supabase.co/auth/v1/signup?redirect_to=http%3A%2F%2Flocalhost%3A3000%2Fauth%3Fmode%3Dlogin"
    );
}

#[test]
fn list_url_filters_by_owner_and_orders_newest_first() {
    assert_eq!(
        list_assessments_url(&config().supabase_url, "u-1").unwrap(),
        "https://abcd1234.supabase.co/rest/v1/assessments?select=*&user_id=eq.u-1&order=created_at.desc"
    );
}

#[test]
fn find_url_scopes_by_id_and_owner() {
    assert_eq!(
        find_assessment_url(&config().supabase_url, "u-1", "a-9").unwrap(),
        "https://abcd1234.supabase.co/rest/v1/assessments?select=*&id=eq.a-9&user_id=eq.u-1&limit=1"
    );
}

#[test]
fn token_body_with_expires_at_is_used_verbatim() {
    let body = r#"{
        "access_token": "at", "token_type": "bearer", "expires_in": 3600,
        "expires_at": 1700003600, "refresh_token": "rt",
        "user": { "id": "u-1", "email": "a@b.com", "role": "authenticated" }
    }"#;
    let session = session_from_token_body(body, 0).unwrap();
    assert_eq!(session.expires_at, 1_700_003_600);
    assert_eq!(session.user, SessionUser { id: "u-1".to_owned(), email: "a@b.com".to_owned() });
}

#[test]
fn token_body_without_expires_at_uses_expires_in() {
    let body = r#"{"access_token":"at","expires_in":60,"refresh_token":"rt","user":{"id":"u-1","email":"a@b.com"}}"#;
    let session = session_from_token_body(body, 1_000).unwrap();
    assert_eq!(session.expires_at, 1_060);
}

#[test]
fn malformed_token_body_is_service_error_not_network() {
    let err = session_from_token_body("{}", 0).unwrap_err();
    assert_eq!(err.code, AuthErrorCode::Unavailable);
    assert_eq!(
        crate::state::auth_form::describe_auth_error(&err),
        "Sign-in is temporarily unavailable. Please try again later."
    );
}

#[test]
fn malformed_signup_body_is_service_error() {
    let err = signup_outcome_from_body("not json", 0).unwrap_err();
    assert_eq!(err.code, AuthErrorCode::Unavailable);
}

#[test]
fn signup_body_without_tokens_is_pending_verification() {
    let body = r#"{"id":"u-2","email":"new@b.com","confirmation_sent_at":"2024-01-01T00:00:00Z"}"#;
    assert_eq!(signup_outcome_from_body(body, 0).unwrap(), SignUpOutcome::VerificationPending);
}

#[test]
fn signup_body_with_tokens_is_confirmed() {
    let body = r#"{"access_token":"at","expires_in":60,"refresh_token":"rt","user":{"id":"u-2","email":"new@b.com"}}"#;
    let outcome = signup_outcome_from_body(body, 0).unwrap();
    assert!(matches!(outcome, SignUpOutcome::Confirmed(ref s) if s.user.id == "u-2"));
}

#[test]
fn with_config_caches_configuration() {
    let client = SupabaseClient::with_config(config());
    assert_eq!(client.cached_config(), Some(config()));
    assert_eq!(SupabaseClient::default().cached_config(), None);
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn server_side_stubs_report_absent_session() {
    let client = SupabaseClient::default();
    assert_eq!(crate::testing::block_on(client.current_session()), None);
    assert!(crate::testing::block_on(client.sign_out()).is_ok());
    let err = crate::testing::block_on(client.sign_in("a@b.com", "pw")).unwrap_err();
    assert_eq!(err.code, crate::net::error::AuthErrorCode::Unavailable);
}
