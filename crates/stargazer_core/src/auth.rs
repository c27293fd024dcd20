use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Please fill all the fields")]
    MissingFields,
}

/// Sign-in inputs as collected at submit time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

/// Sign-up inputs as collected at submit time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SignUpForm {
    pub username: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub username: String,
    pub phone: String,
    pub credentials: Credentials,
}

impl SignInForm {
    pub fn validate(&self) -> Result<Credentials, FormError> {
        let email = required(&self.email)?;
        let password = required_secret(&self.password)?;
        Ok(Credentials { email, password })
    }
}

impl SignUpForm {
    pub fn validate(&self) -> Result<Registration, FormError> {
        let username = required(&self.username)?;
        let phone = required(&self.phone)?;
        let credentials = SignInForm {
            email: self.email.clone(),
            password: self.password.clone(),
        }
        .validate()?;
        Ok(Registration {
            username,
            phone,
            credentials,
        })
    }
}

fn required(value: &str) -> Result<String, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(FormError::MissingFields)
    } else {
        Ok(trimmed.to_string())
    }
}

// Passwords are kept verbatim; only an empty one is rejected.
fn required_secret(value: &str) -> Result<String, FormError> {
    if value.is_empty() {
        Err(FormError::MissingFields)
    } else {
        Ok(value.to_string())
    }
}
