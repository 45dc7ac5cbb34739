//! Hosted auth + data service client.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`, session persisted in
//! `localStorage`.
//! Server-side (SSR): stubs reporting no session and an unavailable service,
//! since these calls are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Transport and decode failures are mapped into `AuthError`/`FetchError` so
//! views can degrade to a notification instead of panicking during hydration.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "supabase_test.rs"]
mod supabase_test;

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
#[cfg(any(test, feature = "hydrate"))]
use serde::Deserialize;

use super::assessments::AssessmentRepository;
use super::error::{AuthError, FetchError};
#[cfg(any(test, feature = "hydrate"))]
use super::error::AuthErrorCode;
use super::session::{Listener, SessionEvents, SessionStore, SignUpOutcome, Subscription};
use super::types::{Assessment, BackendConfig, Session, SessionUser};
#[cfg(feature = "hydrate")]
use super::types::{AuthChange, sort_newest_first};

/// Where the host serves [`BackendConfig`].
pub const CONFIG_ENDPOINT: &str = "/api/config";

// =============================================================================
// URL + PAYLOAD HELPERS
// =============================================================================

/// `localStorage` key holding the persisted session for a service URL.
#[cfg(any(test, feature = "hydrate"))]
fn storage_key(service_url: &str) -> String {
    let project_ref = url::Url::parse(service_url)
        .ok()
        .and_then(|u| u.host_str().and_then(|h| h.split('.').next()).map(str::to_owned))
        .unwrap_or_else(|| "local".to_owned());
    format!("sb-{project_ref}-auth-token")
}

#[cfg(any(test, feature = "hydrate"))]
fn password_grant_url(base: &str) -> String {
    format!("{base}/auth/v1/token?grant_type=password")
}

#[cfg(any(test, feature = "hydrate"))]
fn refresh_grant_url(base: &str) -> String {
    format!("{base}/auth/v1/token?grant_type=refresh_token")
}

#[cfg(any(test, feature = "hydrate"))]
fn logout_url(base: &str) -> String {
    format!("{base}/auth/v1/logout")
}

#[cfg(any(test, feature = "hydrate"))]
fn signup_url(config: &BackendConfig) -> Result<String, url::ParseError> {
    let redirect_to = format!("{}/auth?mode=login", config.site_url);
    let url = url::Url::parse_with_params(
        &format!("{}/auth/v1/signup", config.supabase_url),
        &[("redirect_to", redirect_to.as_str())],
    )?;
    Ok(url.into())
}

#[cfg(any(test, feature = "hydrate"))]
fn list_assessments_url(base: &str, user_id: &str) -> Result<String, url::ParseError> {
    let url = url::Url::parse_with_params(
        &format!("{base}/rest/v1/assessments"),
        &[
            ("select", "*"),
            ("user_id", &format!("eq.{user_id}")),
            ("order", "created_at.desc"),
        ],
    )?;
    Ok(url.into())
}

#[cfg(any(test, feature = "hydrate"))]
fn find_assessment_url(base: &str, user_id: &str, id: &str) -> Result<String, url::ParseError> {
    let url = url::Url::parse_with_params(
        &format!("{base}/rest/v1/assessments"),
        &[
            ("select", "*"),
            ("id", &format!("eq.{id}")),
            ("user_id", &format!("eq.{user_id}")),
            ("limit", "1"),
        ],
    )?;
    Ok(url.into())
}

#[cfg(any(test, feature = "hydrate"))]
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    expires_in: Option<i64>,
    expires_at: Option<i64>,
    user: SessionUser,
}

#[cfg(any(test, feature = "hydrate"))]
impl TokenResponse {
    fn into_session(self, now: i64) -> Session {
        let expires_at = self
            .expires_at
            .unwrap_or_else(|| now + self.expires_in.unwrap_or(0));
        Session { access_token: self.access_token, refresh_token: self.refresh_token, expires_at, user: self.user }
    }
}

/// Decode a token-grant response body into a session.
#[cfg(any(test, feature = "hydrate"))]
fn session_from_token_body(body: &str, now: i64) -> Result<Session, AuthError> {
    serde_json::from_str::<TokenResponse>(body)
        .map(|t| t.into_session(now))
        .map_err(|e| malformed_body(&e))
}

/// A 2xx body that does not decode means the service misbehaved, not the network.
#[cfg(any(test, feature = "hydrate"))]
fn malformed_body(err: &serde_json::Error) -> AuthError {
    #[cfg(feature = "hydrate")]
    log::warn!("malformed auth response: {err}");
    AuthError::new(AuthErrorCode::Unavailable, format!("malformed auth response: {err}"))
}

/// A sign-up body with tokens means the backend auto-confirmed the account.
#[cfg(any(test, feature = "hydrate"))]
fn signup_outcome_from_body(body: &str, now: i64) -> Result<SignUpOutcome, AuthError> {
    let value: serde_json::Value = serde_json::from_str(body).map_err(|e| malformed_body(&e))?;
    if value.get("access_token").is_some() {
        return session_from_token_body(body, now).map(SignUpOutcome::Confirmed);
    }
    Ok(SignUpOutcome::VerificationPending)
}

// =============================================================================
// CLIENT
// =============================================================================

/// Session store and assessment repository backed by the hosted service.
pub struct SupabaseClient {
    #[cfg_attr(not(feature = "hydrate"), allow(dead_code))]
    config_endpoint: String,
    config: Mutex<Option<BackendConfig>>,
    events: SessionEvents,
}

impl SupabaseClient {
    #[must_use]
    pub fn new(config_endpoint: impl Into<String>) -> Self {
        Self { config_endpoint: config_endpoint.into(), config: Mutex::new(None), events: SessionEvents::new() }
    }

    /// Client with configuration already known, skipping the `/api/config` fetch.
    #[must_use]
    pub fn with_config(config: BackendConfig) -> Self {
        let client = Self::new(CONFIG_ENDPOINT);
        *client.config.lock().unwrap_or_else(PoisonError::into_inner) = Some(config);
        client
    }

    #[must_use]
    pub fn cached_config(&self) -> Option<BackendConfig> {
        self.config.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl Default for SupabaseClient {
    fn default() -> Self {
        Self::new(CONFIG_ENDPOINT)
    }
}

#[cfg(feature = "hydrate")]
mod browser {
    use super::*;

    #[allow(clippy::cast_possible_truncation)]
    pub(super) fn now_secs() -> i64 {
        (js_sys::Date::now() / 1000.0) as i64
    }

    fn local_storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }

    pub(super) fn load_session(key: &str) -> Option<Session> {
        let raw = local_storage()?.get_item(key).ok().flatten()?;
        serde_json::from_str(&raw).ok()
    }

    pub(super) fn store_session(key: &str, session: &Session) {
        let Some(storage) = local_storage() else {
            return;
        };
        if let Ok(raw) = serde_json::to_string(session) {
            if storage.set_item(key, &raw).is_err() {
                log::warn!("failed to persist session");
            }
        }
    }

    pub(super) fn clear_session(key: &str) {
        if let Some(storage) = local_storage() {
            let _ = storage.remove_item(key);
        }
    }

    /// POST a JSON body to an auth endpoint and return the raw success body.
    pub(super) async fn post_auth(
        url: &str,
        config: &BackendConfig,
        bearer: Option<&str>,
        body: &serde_json::Value,
    ) -> Result<String, AuthError> {
        let mut req = gloo_net::http::Request::post(url).header("apikey", &config.supabase_anon_key);
        if let Some(token) = bearer {
            req = req.header("Authorization", &format!("Bearer {token}"));
        }
        let resp = req
            .json(body)
            .map_err(|e| AuthError::network(e.to_string()))?
            .send()
            .await
            .map_err(|e| AuthError::network(e.to_string()))?;
        let status = resp.status();
        let text = resp.text().await.map_err(|e| AuthError::network(e.to_string()))?;
        if !resp.ok() {
            return Err(AuthError::from_response(status, &text));
        }
        Ok(text)
    }

    /// GET rows from the table endpoint on behalf of `session`.
    pub(super) async fn get_rows(
        url: &str,
        config: &BackendConfig,
        session: &Session,
    ) -> Result<Vec<Assessment>, FetchError> {
        let resp = gloo_net::http::Request::get(url)
            .header("apikey", &config.supabase_anon_key)
            .header("Authorization", &format!("Bearer {}", session.access_token))
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        if !resp.ok() {
            return Err(FetchError::Status(resp.status()));
        }
        resp.json::<Vec<Assessment>>()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))
    }
}

#[cfg(feature = "hydrate")]
impl SupabaseClient {
    async fn config(&self) -> Result<BackendConfig, String> {
        if let Some(config) = self.cached_config() {
            return Ok(config);
        }
        let resp = gloo_net::http::Request::get(&self.config_endpoint)
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(format!("config request failed: {}", resp.status()));
        }
        let config: BackendConfig = resp.json().await.map_err(|e| e.to_string())?;
        *self.config.lock().unwrap_or_else(PoisonError::into_inner) = Some(config.clone());
        Ok(config)
    }

    async fn auth_config(&self) -> Result<BackendConfig, AuthError> {
        self.config().await.map_err(|e| {
            log::warn!("backend config unavailable: {e}");
            AuthError::unavailable()
        })
    }

    async fn refresh(&self, config: &BackendConfig, refresh_token: &str) -> Result<Session, AuthError> {
        let body = serde_json::json!({ "refresh_token": refresh_token });
        let text = browser::post_auth(&refresh_grant_url(&config.supabase_url), config, None, &body).await?;
        session_from_token_body(&text, browser::now_secs())
    }

    fn adopt_session(&self, config: &BackendConfig, session: &Session, change: AuthChange) {
        browser::store_session(&storage_key(&config.supabase_url), session);
        self.events.emit(&change);
    }

    async fn session_and_config(&self) -> Result<(BackendConfig, Session), FetchError> {
        let config = self.config().await.map_err(|e| {
            log::warn!("backend config unavailable: {e}");
            FetchError::Unavailable
        })?;
        let session = self.current_session().await.ok_or(FetchError::Unauthenticated)?;
        Ok((config, session))
    }
}

#[async_trait(?Send)]
impl SessionStore for SupabaseClient {
    async fn current_session(&self) -> Option<Session> {
        #[cfg(feature = "hydrate")]
        {
            let config = self.auth_config().await.ok()?;
            let key = storage_key(&config.supabase_url);
            let session = browser::load_session(&key)?;
            if !session.is_expired(browser::now_secs()) {
                return Some(session);
            }
            match self.refresh(&config, &session.refresh_token).await {
                Ok(refreshed) => {
                    log::debug!("session refreshed");
                    self.adopt_session(&config, &refreshed, AuthChange::TokenRefreshed(refreshed.clone()));
                    Some(refreshed)
                }
                Err(e) => {
                    log::warn!("session refresh failed: {e}");
                    browser::clear_session(&key);
                    self.events.emit(&AuthChange::SignedOut);
                    None
                }
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            None
        }
    }

    fn on_session_change(&self, listener: Listener) -> Subscription {
        self.events.subscribe(listener)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        #[cfg(feature = "hydrate")]
        {
            let config = self.auth_config().await?;
            let body = serde_json::json!({ "email": email, "password": password });
            let text = browser::post_auth(&password_grant_url(&config.supabase_url), &config, None, &body).await?;
            let session = session_from_token_body(&text, browser::now_secs())?;
            self.adopt_session(&config, &session, AuthChange::SignedIn(session.clone()));
            Ok(session)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (email, password);
            Err(AuthError::unavailable())
        }
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome, AuthError> {
        #[cfg(feature = "hydrate")]
        {
            let config = self.auth_config().await?;
            let url = signup_url(&config).map_err(|_| AuthError::unavailable())?;
            let body = serde_json::json!({ "email": email, "password": password });
            let text = browser::post_auth(&url, &config, None, &body).await?;
            let outcome = signup_outcome_from_body(&text, browser::now_secs())?;
            if let SignUpOutcome::Confirmed(session) = &outcome {
                self.adopt_session(&config, session, AuthChange::SignedIn(session.clone()));
            }
            Ok(outcome)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (email, password);
            Err(AuthError::unavailable())
        }
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        #[cfg(feature = "hydrate")]
        {
            // No config means nothing could have been persisted.
            let Ok(config) = self.auth_config().await else {
                return Ok(());
            };
            let key = storage_key(&config.supabase_url);
            let Some(session) = browser::load_session(&key) else {
                return Ok(());
            };
            browser::clear_session(&key);
            self.events.emit(&AuthChange::SignedOut);
            let body = serde_json::json!({});
            browser::post_auth(&logout_url(&config.supabase_url), &config, Some(&session.access_token), &body)
                .await
                .map(|_| ())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Ok(())
        }
    }
}

#[async_trait(?Send)]
impl AssessmentRepository for SupabaseClient {
    async fn list_assessments(&self, owner: &SessionUser) -> Result<Vec<Assessment>, FetchError> {
        #[cfg(feature = "hydrate")]
        {
            let (config, session) = self.session_and_config().await?;
            let url = list_assessments_url(&config.supabase_url, &owner.id).map_err(|_| FetchError::Unavailable)?;
            let mut items = browser::get_rows(&url, &config, &session).await?;
            sort_newest_first(&mut items);
            Ok(items)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = owner;
            Err(FetchError::Unavailable)
        }
    }

    async fn find_assessment(&self, owner: &SessionUser, id: &str) -> Result<Option<Assessment>, FetchError> {
        #[cfg(feature = "hydrate")]
        {
            let (config, session) = self.session_and_config().await?;
            let url =
                find_assessment_url(&config.supabase_url, &owner.id, id).map_err(|_| FetchError::Unavailable)?;
            let rows = browser::get_rows(&url, &config, &session).await?;
            Ok(rows.into_iter().next())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (owner, id);
            Err(FetchError::Unavailable)
        }
    }
}
