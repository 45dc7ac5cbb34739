//! Login/sign-up form state machine.
//!
//! SYSTEM CONTEXT
//! ==============
//! The auth page holds one `AuthForm` in a signal. A submission moves it
//! `Idle -> Submitting`, the async call runs against the session store, and
//! `finish` folds the result back into the form and yields the notice and
//! optional navigation the page should perform.

#[cfg(test)]
#[path = "auth_form_test.rs"]
mod auth_form_test;

use crate::net::error::{AuthError, AuthErrorCode};
use crate::net::session::{SessionStore, SignUpOutcome};
use crate::state::toast::Notice;
use crate::util::route;

/// Which form the auth page shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    Login,
    Signup,
}

impl AuthMode {
    /// Parse the `mode` query value. Absent or unknown values mean login.
    #[must_use]
    pub fn from_query(raw: Option<&str>) -> Self {
        match raw {
            Some("signup") => Self::Signup,
            _ => Self::Login,
        }
    }

    #[must_use]
    pub fn as_query(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Signup => "signup",
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Login => Self::Signup,
            Self::Signup => Self::Login,
        }
    }

    #[must_use]
    pub fn heading(self) -> &'static str {
        match self {
            Self::Login => "Welcome Back",
            Self::Signup => "Create Account",
        }
    }

    #[must_use]
    pub fn submit_label(self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Signup => "Sign Up",
        }
    }

    #[must_use]
    pub fn toggle_prompt(self) -> &'static str {
        match self {
            Self::Login => "Don't have an account? Sign up",
            Self::Signup => "Already have an account? Login",
        }
    }
}

/// Submission lifecycle within a mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Submitting,
}

/// Credentials captured when a submission starts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    pub mode: AuthMode,
    pub email: String,
    pub password: String,
}

/// Result of asking the form to start a submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitStart {
    Started(Credentials),
    /// A submission is already in flight.
    Busy,
    Invalid(Notice),
}

/// What the session store reported for a submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Submitted {
    SignedIn,
    AccountConfirmed,
    VerificationPending { email: String },
}

/// What the page should do after a submission settles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthOutcome {
    pub notice: Notice,
    pub navigate_to: Option<&'static str>,
}

const INVALID_CREDENTIALS_HINT: &str = "Invalid email or password. Please check your credentials and make sure \
                                        you have verified your email address.";

/// Friendly description for an auth failure, keyed on its code.
#[must_use]
pub fn describe_auth_error(err: &AuthError) -> String {
    match err.code {
        AuthErrorCode::InvalidCredentials => INVALID_CREDENTIALS_HINT.to_owned(),
        AuthErrorCode::EmailNotConfirmed => {
            "Please verify your email address before logging in. Check your inbox for the confirmation link."
                .to_owned()
        }
        AuthErrorCode::UserAlreadyExists => {
            "An account with this email already exists. Try logging in instead.".to_owned()
        }
        AuthErrorCode::WeakPassword => "Please choose a stronger password (at least 6 characters).".to_owned(),
        AuthErrorCode::RateLimited => "Too many attempts. Please wait a moment and try again.".to_owned(),
        AuthErrorCode::Network => "Could not reach the server. Check your connection and try again.".to_owned(),
        AuthErrorCode::Unavailable => "Sign-in is temporarily unavailable. Please try again later.".to_owned(),
        AuthErrorCode::Unknown => err.message.clone(),
    }
}

/// Form contents plus submission state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthForm {
    pub mode: AuthMode,
    pub phase: Phase,
    pub email: String,
    pub password: String,
    pub last_error: Option<String>,
}

impl AuthForm {
    #[must_use]
    pub fn new(mode: AuthMode) -> Self {
        Self { mode, ..Self::default() }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Submitting
    }

    #[must_use]
    pub fn inputs_disabled(&self) -> bool {
        self.is_loading()
    }

    /// Switch between login and sign-up, dropping any stale error.
    ///
    /// Refused while a submission is in flight, so its result still lands on
    /// the mode it was made in. Returns whether the mode changed.
    pub fn toggle_mode(&mut self) -> bool {
        if self.is_loading() {
            return false;
        }
        self.mode = self.mode.toggled();
        self.last_error = None;
        true
    }

    /// Enter `Submitting` and capture credentials, unless already submitting
    /// or a field is empty.
    pub fn begin_submit(&mut self) -> SubmitStart {
        if self.is_loading() {
            return SubmitStart::Busy;
        }
        let email = self.email.trim();
        if email.is_empty() || self.password.is_empty() {
            return SubmitStart::Invalid(Notice::error("Error", "Please enter your email and password."));
        }
        self.phase = Phase::Submitting;
        self.last_error = None;
        SubmitStart::Started(Credentials { mode: self.mode, email: email.to_owned(), password: self.password.clone() })
    }

    /// Leave `Submitting` and decide the notice and navigation.
    ///
    /// Field contents are preserved in every case.
    pub fn finish(&mut self, result: Result<Submitted, AuthError>) -> AuthOutcome {
        self.phase = Phase::Idle;
        match result {
            Ok(Submitted::SignedIn) => AuthOutcome {
                notice: Notice::success("Success", "Logged in successfully!"),
                navigate_to: Some(route::DASHBOARD),
            },
            Ok(Submitted::AccountConfirmed) => AuthOutcome {
                notice: Notice::success("Account created", "Your account has been created successfully!"),
                navigate_to: Some(route::DASHBOARD),
            },
            Ok(Submitted::VerificationPending { email }) => {
                self.mode = AuthMode::Login;
                AuthOutcome {
                    notice: Notice::success(
                        "Check your email",
                        format!("We sent a verification link to {email}. Verify your email, then log in."),
                    ),
                    navigate_to: None,
                }
            }
            Err(err) => {
                let description = describe_auth_error(&err);
                self.last_error = Some(description.clone());
                AuthOutcome { notice: Notice::error("Error", description), navigate_to: None }
            }
        }
    }
}

/// Send captured credentials to the session store.
pub async fn submit_credentials(store: &dyn SessionStore, creds: &Credentials) -> Result<Submitted, AuthError> {
    match creds.mode {
        AuthMode::Login => store
            .sign_in(&creds.email, &creds.password)
            .await
            .map(|_| Submitted::SignedIn),
        AuthMode::Signup => match store.sign_up(&creds.email, &creds.password).await? {
            SignUpOutcome::VerificationPending => Ok(Submitted::VerificationPending { email: creds.email.clone() }),
            SignUpOutcome::Confirmed(_) => Ok(Submitted::AccountConfirmed),
        },
    }
}
