//! Access token checks

use prompthub::core::auth::{AuthGate, Credentials};

fn gate() -> AuthGate {
    AuthGate::new(vec!["alpha".to_string(), "beta".to_string()])
}

fn credentials(u: Option<&str>, token: Option<&str>, header: Option<&str>) -> Credentials {
    Credentials {
        u: u.map(str::to_string),
        token: token.map(str::to_string),
        authorization: None,
    }
    .with_authorization(header)
}

#[test]
fn test_each_source_accepted() {
    let gate = gate();

    assert!(gate.authorize(&credentials(Some("alpha"), None, None)));
    assert!(gate.authorize(&credentials(None, Some("beta"), None)));
    assert!(gate.authorize(&credentials(None, None, Some("alpha"))));
    assert!(gate.authorize(&credentials(None, None, Some("Bearer beta"))));
}

#[test]
fn test_first_source_wins() {
    let gate = gate();

    // A bad `u` is not rescued by a good `token` or header
    assert!(!gate.authorize(&credentials(Some("wrong"), Some("alpha"), Some("beta"))));
    assert!(!gate.authorize(&credentials(None, Some("wrong"), Some("alpha"))));
}

#[test]
fn test_missing_or_empty_rejected() {
    let gate = gate();

    assert!(!gate.authorize(&Credentials::default()));
    assert!(!gate.authorize(&credentials(Some(""), None, None)));
    assert!(!gate.is_valid("alph"));
    assert!(!gate.is_valid("alphaa"));
}

#[test]
fn test_no_tokens_configured_rejects_all() {
    let gate = AuthGate::new(Vec::<String>::new());

    assert_eq!(gate.token_count(), 0);
    assert!(!gate.is_valid("anything"));
    assert!(!gate.is_valid(""));
}
