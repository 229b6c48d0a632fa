use serde::Serialize;
use tracing::info;

use geolens_common::error::Result;
use geolens_common::{TokenPair, UserAccount};

use crate::GeoLensClient;

#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

impl GeoLensClient {
    /// Exchange credentials for a token pair and install it in the session.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenPair> {
        let tokens: TokenPair = self
            .transport()
            .post(
                "/auth/login",
                &serde_json::json!({ "email": email, "password": password }),
            )
            .await?;
        self.session().store(&tokens);
        info!(email, "Logged in");
        Ok(tokens)
    }

    /// Create an account. The server issues tokens immediately, so a
    /// successful registration is also a login.
    pub async fn register(&self, registration: &Registration) -> Result<TokenPair> {
        let tokens: TokenPair = self.transport().post("/auth/register", registration).await?;
        self.session().store(&tokens);
        info!(email = registration.email.as_str(), "Registered");
        Ok(tokens)
    }

    /// Invalidate the session server-side and drop the local tokens. The
    /// local tokens go away even if the server call fails.
    pub async fn logout(&self) -> Result<()> {
        let result = self.transport().post_empty("/auth/logout").await;
        self.session().clear();
        info!("Logged out");
        result
    }

    /// The account behind the current session.
    pub async fn me(&self) -> Result<UserAccount> {
        self.transport().get("/users/me").await
    }
}
