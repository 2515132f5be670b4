//! HS256 JSON Web Token implementation of the [`TokenIssuer`] port.
//!
//! Tokens carry `sub` (the username), `iat` and `exp`. Expiry is checked
//! without leeway.

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::domain::ports::{TokenError, TokenIssuer};
use crate::domain::{AuthToken, Username};

use super::fingerprint::key_fingerprint;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    exp: i64,
}

/// Signs and validates bearer tokens with a shared secret.
#[derive(Clone)]
pub struct JwtTokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl_secs: i64,
    fingerprint: String,
}

impl JwtTokenIssuer {
    /// Issuer signing with `secret`; tokens live for `ttl`.
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl_secs: i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX),
            fingerprint: key_fingerprint(secret),
        }
    }

    /// Fingerprint of the signing secret, safe to log.
    pub fn key_fingerprint(&self) -> &str {
        &self.fingerprint
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, username: &Username) -> Result<AuthToken, TokenError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: username.as_str().to_owned(),
            iat: now,
            exp: now.saturating_add(self.ttl_secs),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map(AuthToken::new)
            .map_err(|err| TokenError::encoding(err.to_string()))
    }

    fn resolve(&self, token: &str) -> Result<Username, TokenError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation).map_err(|err| {
            match err.kind() {
                ErrorKind::ExpiredSignature => TokenError::expired(),
                _ => TokenError::invalid(err.to_string()),
            }
        })?;
        Username::new(&data.claims.sub).map_err(|err| TokenError::invalid(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    const SECRET: &[u8] = b"test-signing-secret-with-enough-bytes";

    #[fixture]
    fn issuer() -> JwtTokenIssuer {
        JwtTokenIssuer::new(SECRET, Duration::from_secs(3600))
    }

    fn alice() -> Username {
        Username::new("alice").expect("valid username")
    }

    fn signed(claims: &Claims, secret: &[u8]) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret),
        )
        .expect("encode claims")
    }

    #[rstest]
    fn issued_tokens_resolve_to_their_subject(issuer: JwtTokenIssuer) {
        let token = issuer.issue(&alice()).expect("issue");

        assert_eq!(issuer.resolve(token.as_str()), Ok(alice()));
    }

    #[rstest]
    fn expired_tokens_are_rejected(issuer: JwtTokenIssuer) {
        let now = Utc::now().timestamp();
        let token = signed(
            &Claims {
                sub: "alice".to_owned(),
                iat: now - 7200,
                exp: now - 3600,
            },
            SECRET,
        );

        assert_eq!(issuer.resolve(&token), Err(TokenError::expired()));
    }

    #[rstest]
    fn foreign_signatures_are_invalid(issuer: JwtTokenIssuer) {
        let now = Utc::now().timestamp();
        let token = signed(
            &Claims {
                sub: "alice".to_owned(),
                iat: now,
                exp: now + 60,
            },
            b"some-other-secret",
        );

        assert!(matches!(
            issuer.resolve(&token),
            Err(TokenError::Invalid { .. })
        ));
    }

    #[rstest]
    #[case("")]
    #[case("not.a.jwt")]
    fn garbage_is_invalid(issuer: JwtTokenIssuer, #[case] token: &str) {
        assert!(matches!(
            issuer.resolve(token),
            Err(TokenError::Invalid { .. })
        ));
    }

    #[rstest]
    fn blank_subjects_are_invalid(issuer: JwtTokenIssuer) {
        let now = Utc::now().timestamp();
        let token = signed(
            &Claims {
                sub: "   ".to_owned(),
                iat: now,
                exp: now + 60,
            },
            SECRET,
        );

        assert!(matches!(
            issuer.resolve(&token),
            Err(TokenError::Invalid { .. })
        ));
    }

    #[rstest]
    fn fingerprint_is_derived_from_the_secret(issuer: JwtTokenIssuer) {
        assert_eq!(issuer.key_fingerprint(), key_fingerprint(SECRET));
    }
}
