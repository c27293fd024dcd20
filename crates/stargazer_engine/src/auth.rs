use stargazer_core::{Credentials, FormError, Registration, SignInForm, SignUpForm};
use stargazer_logging::{sg_info, sg_warn};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthOutcome {
    pub success: bool,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error(transparent)]
    InvalidForm(#[from] FormError),
    #[error("auth backend error: {0}")]
    Backend(String),
}

/// The managed identity backend, seen only through login and register.
#[async_trait::async_trait]
pub trait Authenticator: Send + Sync {
    async fn login(&self, credentials: &Credentials) -> Result<AuthOutcome, AuthError>;

    async fn register(&self, registration: &Registration) -> Result<AuthOutcome, AuthError>;
}

/// Validates the submitted form, then asks the backend to log in.
pub async fn sign_in(
    authenticator: &dyn Authenticator,
    form: &SignInForm,
) -> Result<AuthOutcome, AuthError> {
    let credentials = form.validate()?;
    let outcome = authenticator.login(&credentials).await?;
    log_outcome("login", &credentials.email, &outcome);
    Ok(outcome)
}

/// Validates the submitted form, then asks the backend to register.
pub async fn sign_up(
    authenticator: &dyn Authenticator,
    form: &SignUpForm,
) -> Result<AuthOutcome, AuthError> {
    let registration = form.validate()?;
    let outcome = authenticator.register(&registration).await?;
    log_outcome("register", &registration.credentials.email, &outcome);
    Ok(outcome)
}

fn log_outcome(action: &str, email: &str, outcome: &AuthOutcome) {
    if outcome.success {
        sg_info!("{} succeeded for {}", action, email);
    } else {
        sg_warn!(
            "{} rejected for {}: {}",
            action,
            email,
            outcome.message.as_deref().unwrap_or("no reason given")
        );
    }
}
