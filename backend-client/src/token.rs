/// Supplies the bearer token attached to every backend request.
///
/// The session/credential store lives outside this crate; injecting it as
/// an explicit dependency keeps the client usable and testable without a
/// browser-like global.
pub trait TokenProvider: Send + Sync {
    /// Current bearer token, or `None` when the session holds no credential.
    ///
    /// A request sent without a token will come back 401 and surface as
    /// [`crate::ClientError::Unauthorized`]; redirecting to login is the
    /// surrounding shell's job, not this crate's.
    fn bearer_token(&self) -> Option<String>;
}

/// Fixed-token provider for tools and tests
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl TokenProvider for StaticTokenProvider {
    fn bearer_token(&self) -> Option<String> {
        Some(self.token.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_provider_returns_token() {
        let provider = StaticTokenProvider::new("abc123");
        assert_eq!(provider.bearer_token(), Some("abc123".to_string()));
    }
}
