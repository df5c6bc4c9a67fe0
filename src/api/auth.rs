//! Client-credentials token acquisition.

use std::fmt;

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, error, info};

use crate::config::Credentials;
use crate::converters;
use crate::error::{FinderError, Result};

/// Opaque bearer credential.
///
/// Lives as long as the session that acquired it and is never refreshed.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    pub fn new<S: Into<String>>(value: S) -> Self {
        Self(value.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(<redacted>)")
    }
}

/// Requests bearer tokens from the accounts service.
#[derive(Debug, Clone)]
pub struct TokenProvider {
    client: Client,
    token_url: String,
}

impl TokenProvider {
    pub fn new<S: Into<String>>(client: Client, token_url: S) -> Self {
        Self {
            client,
            token_url: token_url.into(),
        }
    }

    /// Exchange client credentials for a token.
    ///
    /// Issues exactly one POST; there is no retry.
    ///
    /// # Errors
    ///
    /// Returns `Auth` when credentials are blank or the response carries no
    /// token, and `Connection` when the request itself fails.
    pub async fn acquire(&self, credentials: &Credentials) -> Result<Token> {
        if !credentials.is_complete() {
            error!("Client id or secret not configured");
            return Err(FinderError::Auth("client credentials are missing".to_string()));
        }

        debug!("POST {}", self.token_url);

        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
        ];

        let response = self
            .client
            .post(&self.token_url)
            .form(&form)
            .send()
            .await
            .inspect_err(|e| error!("Token request failed: {}", e))?;
        let status = response.status();
        let text = response.text().await?;

        let data: Value = serde_json::from_str(&text).map_err(|e| {
            error!("Token endpoint returned non-JSON body (status {})", status);
            FinderError::Auth(format!("missing token: {}", e))
        })?;

        let token = converters::parse_access_token(&data)
            .inspect_err(|e| error!("No token received (status {}): {}", status, e))?;

        info!("Access token acquired");
        Ok(Token::new(token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_server::{closed_port_url, StubServer};

    #[test]
    fn test_token_debug_is_redacted() {
        let token = Token::new("BQDsecretvalue");
        assert_eq!(format!("{:?}", token), "Token(<redacted>)");
        assert_eq!(token.value(), "BQDsecretvalue");
    }

    #[tokio::test]
    async fn test_blank_credentials_fail_without_request() {
        // Unroutable URL: any request would fail with a connection error.
        let provider = TokenProvider::new(Client::new(), "http://127.0.0.1:9/api/token");
        let err = provider
            .acquire(&Credentials::new("", "secret"))
            .await
            .unwrap_err();
        assert!(matches!(err, FinderError::Auth(_)));
    }

    #[tokio::test]
    async fn test_acquire_posts_client_credentials_form() {
        let mut server = StubServer::start(vec![(
            200,
            r#"{"access_token":"BQDtoken","token_type":"Bearer","expires_in":3600}"#,
        )])
        .await;
        let provider = TokenProvider::new(Client::new(), format!("{}/api/token", server.url));

        let token = provider
            .acquire(&Credentials::new("my-id", "my-secret"))
            .await
            .unwrap();
        assert_eq!(token.value(), "BQDtoken");

        let request = server.next_request().await;
        assert_eq!(request.method(), "POST");
        assert_eq!(request.target(), "/api/token");
        assert_eq!(
            request.header("content-type"),
            Some("application/x-www-form-urlencoded")
        );
        assert_eq!(
            request.body,
            "grant_type=client_credentials&client_id=my-id&client_secret=my-secret"
        );
    }

    #[tokio::test]
    async fn test_acquire_without_access_token_is_auth_error() {
        let mut server = StubServer::start(vec![
            (200, r#"{"token_type":"Bearer","expires_in":3600}"#),
            (400, r#"{"error":"invalid_client","error_description":"Invalid client secret"}"#),
            (200, "<html>maintenance</html>"),
        ])
        .await;
        let provider = TokenProvider::new(Client::new(), format!("{}/api/token", server.url));
        let credentials = Credentials::new("my-id", "my-secret");

        for _ in 0..3 {
            let err = provider.acquire(&credentials).await.unwrap_err();
            assert!(matches!(err, FinderError::Auth(ref m) if m.starts_with("missing token")));
            assert_eq!(server.next_request().await.method(), "POST");
        }
    }

    #[tokio::test]
    async fn test_acquire_transport_failure_is_connection_error() {
        let url = format!("{}/api/token", closed_port_url().await);
        let provider = TokenProvider::new(Client::new(), url);

        let err = provider
            .acquire(&Credentials::new("my-id", "my-secret"))
            .await
            .unwrap_err();
        assert!(matches!(err, FinderError::Connection(_)));
    }
}
