//! Stargazer engine: NASA request gateway and effect execution.
mod auth;
mod engine;
mod gateway;
mod types;

pub use auth::{sign_in, sign_up, AuthError, AuthOutcome, Authenticator};
pub use engine::EngineHandle;
pub use gateway::{Gateway, GatewaySettings, ReqwestGateway};
pub use types::{EngineEvent, FailureKind, FetchError};
