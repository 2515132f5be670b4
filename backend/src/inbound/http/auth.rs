//! Bearer token extraction.
//!
//! Every `/api/*` route except `/api/auth` takes a [`BearerUser`]; the
//! resolved username is then passed explicitly to the domain call.

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::{Ready, ready};
use tracing::debug;

use crate::domain::ports::TokenError;
use crate::domain::{Error, Username};

use super::state::HttpState;

/// Authenticated caller resolved from `Authorization: Bearer <token>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerUser(Username);

impl BearerUser {
    /// The verified token subject.
    pub fn username(&self) -> &Username {
        &self.0
    }

    /// Consume the extractor, keeping the username.
    pub fn into_inner(self) -> Username {
        self.0
    }
}

fn bearer_token(req: &HttpRequest) -> Result<&str, Error> {
    let value = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("missing bearer token"))?
        .to_str()
        .map_err(|_| Error::unauthorized("malformed authorization header"))?;
    let (scheme, token) = value
        .trim()
        .split_once(' ')
        .ok_or_else(|| Error::unauthorized("malformed authorization header"))?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(Error::unauthorized("authorization scheme must be Bearer"));
    }
    let token = token.trim();
    if token.is_empty() {
        return Err(Error::unauthorized("missing bearer token"));
    }
    Ok(token)
}

fn map_token_error(error: TokenError) -> Error {
    debug!(%error, "bearer token rejected");
    match error {
        TokenError::Expired => Error::unauthorized("token expired"),
        TokenError::Invalid { .. } | TokenError::Encoding { .. } => {
            Error::unauthorized("invalid token")
        }
    }
}

fn resolve(req: &HttpRequest) -> Result<BearerUser, Error> {
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("HTTP state is not registered"))?;
    let token = bearer_token(req)?;
    state
        .tokens
        .resolve(token)
        .map(BearerUser)
        .map_err(map_token_error)
}

impl FromRequest for BearerUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(resolve(req))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use rstest::rstest;

    #[rstest]
    #[case("Bearer abc.def.ghi", "abc.def.ghi")]
    #[case("bearer   abc.def.ghi ", "abc.def.ghi")]
    fn extracts_token_after_scheme(#[case] header: &str, #[case] expected: &str) {
        let req = TestRequest::default()
            .insert_header((AUTHORIZATION, header))
            .to_http_request();

        assert_eq!(bearer_token(&req).ok(), Some(expected));
    }

    #[rstest]
    #[case(None)]
    #[case(Some("Basic YWxpY2U6cHc="))]
    #[case(Some("Bearer"))]
    #[case(Some("Bearer    "))]
    fn rejects_missing_or_foreign_credentials(#[case] header: Option<&str>) {
        let mut builder = TestRequest::default();
        if let Some(value) = header {
            builder = builder.insert_header((AUTHORIZATION, value));
        }
        let req = builder.to_http_request();

        let error = bearer_token(&req).expect_err("no usable token");
        assert_eq!(error.code(), crate::domain::ErrorCode::Unauthorized);
    }

    #[rstest]
    #[case(TokenError::expired(), "token expired")]
    #[case(TokenError::invalid("bad signature"), "invalid token")]
    fn token_errors_do_not_leak_details(#[case] error: TokenError, #[case] message: &str) {
        assert_eq!(map_token_error(error).message(), message);
    }
}
