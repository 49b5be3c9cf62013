//! Shared-secret authorization gate.
//!
//! Every route sits behind [`require`]; a request that fails the check is
//! answered with 401 and never reaches a handler.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::{ServerError, server::ServerState};

/// Credential check applied to the raw `Authorization` header value.
///
/// The router only needs a yes/no answer, so a real scheme can replace
/// [`SharedSecret`] without touching routing.
pub trait Credentials: Send + Sync {
    fn authorize(&self, header: &str) -> bool;
}

/// Placeholder credentials: the header must equal the configured secret
/// exactly. Not a real authentication mechanism.
pub struct SharedSecret {
    secret: String,
}

impl SharedSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        SharedSecret {
            secret: secret.into(),
        }
    }
}

impl Credentials for SharedSecret {
    fn authorize(&self, header: &str) -> bool {
        header == self.secret
    }
}

pub(crate) async fn require(
    State(state): State<ServerState>,
    request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let authorized = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| state.credentials.authorize(value));

    if !authorized {
        return Err(ServerError::Unauthorized);
    }

    Ok(next.run(request).await)
}
