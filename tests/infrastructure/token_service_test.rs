use chrono::Duration;
use factura::infrastructure::auth::{AuthError, TokenService};

const SECRET: &str = "unit-test-secret";

#[test]
fn given_issued_token_when_verified_then_claims_are_preserved() {
    let tokens = TokenService::new(SECRET);

    let token = tokens.issue("admin").unwrap();
    let claims = tokens.verify(&token).unwrap();

    assert_eq!(claims.sub, "admin");
    assert_eq!(claims.exp - claims.iat, 8 * 3600);
}

#[test]
fn given_expired_token_when_verified_then_is_rejected() {
    // past the 60s leeway jsonwebtoken applies by default
    let tokens = TokenService::new(SECRET).with_ttl(Duration::seconds(-120));

    let token = tokens.issue("admin").unwrap();
    let result = tokens.verify(&token);

    assert!(matches!(result, Err(AuthError::TokenExpired)));
}

#[test]
fn given_token_signed_with_other_secret_when_verified_then_is_rejected() {
    let token = TokenService::new("other-secret").issue("admin").unwrap();

    let result = TokenService::new(SECRET).verify(&token);

    assert!(matches!(result, Err(AuthError::InvalidToken(_))));
}

#[test]
fn given_malformed_token_when_verified_then_is_rejected() {
    let tokens = TokenService::new(SECRET);

    assert!(tokens.verify("not-a-token").is_err());
    assert!(tokens.verify("").is_err());
}

#[test]
fn given_custom_ttl_when_issued_then_expiry_matches() {
    let tokens = TokenService::new(SECRET).with_ttl(Duration::hours(1));

    let token = tokens.issue("admin").unwrap();
    let claims = tokens.verify(&token).unwrap();

    assert_eq!(claims.exp - claims.iat, 3600);
}
