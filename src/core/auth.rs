//! Access token authorization.
//!
//! Tokens are opaque strings loaded once from configuration. A
//! request may carry one in the `u` query parameter, the `token`
//! query parameter, or the `Authorization` header, checked in that
//! order. Only the first one found is considered.

use subtle::{Choice, ConstantTimeEq};

/// Token candidates carried by a request
///
/// Built from the decoded query pairs; the header value is attached
/// separately with [`Credentials::with_authorization`].
#[derive(Clone, Default)]
pub struct Credentials {
    pub u: Option<String>,

    pub token: Option<String>,

    pub authorization: Option<String>,
}

impl Credentials {
    /// Collect the first `u` and the first `token` query parameter
    ///
    /// Repeated keys never shadow the first occurrence.
    pub fn from_query_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut credentials = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "u" if credentials.u.is_none() => credentials.u = Some(value),
                "token" if credentials.token.is_none() => credentials.token = Some(value),
                _ => {}
            }
        }
        credentials
    }

    /// Credentials that no gate accepts
    pub fn rejected() -> Self {
        Self {
            u: Some(String::new()),
            ..Self::default()
        }
    }

    pub fn with_authorization(mut self, value: Option<&str>) -> Self {
        self.authorization = value.map(str::to_string);
        self
    }

    /// The token to check, by precedence `u` > `token` > header
    ///
    /// A `Bearer ` scheme prefix on the header is removed, so the
    /// header carries either `<token>` or `Bearer <token>`. Configured
    /// tokens cannot contain spaces, which keeps the two forms apart.
    pub fn token(&self) -> Option<&str> {
        if let Some(u) = &self.u {
            return Some(u);
        }
        if let Some(token) = &self.token {
            return Some(token);
        }
        self.authorization
            .as_deref()
            .map(|h| h.strip_prefix("Bearer ").unwrap_or(h))
    }
}

/// Immutable set of accepted access tokens
pub struct AuthGate {
    tokens: Vec<String>,
}

impl AuthGate {
    /// Create a gate from configured tokens
    ///
    /// Empty strings are dropped so that an empty query parameter
    /// can never authorize.
    pub fn new<I>(tokens: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut tokens: Vec<String> = tokens.into_iter().filter(|t| !t.is_empty()).collect();
        tokens.sort();
        tokens.dedup();
        Self { tokens }
    }

    /// Exact membership test
    ///
    /// Every configured token is compared, each in constant time, so
    /// the scan does not stop at the first match.
    pub fn is_valid(&self, candidate: &str) -> bool {
        let mut found = Choice::from(0);
        for token in &self.tokens {
            found |= token.as_bytes().ct_eq(candidate.as_bytes());
        }
        found.into()
    }

    /// Decide whether a request's credentials are accepted
    pub fn authorize(&self, credentials: &Credentials) -> bool {
        credentials
            .token()
            .map(|token| self.is_valid(token))
            .unwrap_or(false)
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }
}
