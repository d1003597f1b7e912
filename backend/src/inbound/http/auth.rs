//! Bearer credential extraction for HTTP handlers.
//!
//! Handlers name the caller they need in their signature: [`Caller`] for
//! routes that require a credential, [`OptionalCaller`] for public routes that
//! merely note who is looking.
//!
//! | Request                         | `Caller` | `OptionalCaller`  |
//! |---------------------------------|----------|-------------------|
//! | no `Authorization: Bearer` value | 401      | anonymous         |
//! | token fails verification        | 403      | anonymous         |
//! | valid token                     | caller   | caller            |

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::{Ready, ready};
use tracing::debug;

use crate::domain::{Error, ErrorCode, Principal};

use super::state::HttpState;

const BEARER_PREFIX: &str = "Bearer ";

/// Pull the token out of `Authorization: Bearer <token>`.
fn bearer_token(req: &HttpRequest) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix(BEARER_PREFIX)?.trim();
    (!token.is_empty()).then_some(token)
}

fn state(req: &HttpRequest) -> Result<&web::Data<HttpState>, Error> {
    req.app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("HTTP state is not configured"))
}

fn authenticate(req: &HttpRequest) -> Result<Principal, Error> {
    let token = bearer_token(req)
        .ok_or_else(|| Error::unauthorized("Access denied. No token provided."))?;
    state(req)?.tokens.verify(token).map_err(|err| {
        debug!(error = %err, "bearer token rejected");
        Error::forbidden("Invalid token.")
    })
}

/// Authenticated caller; rejects the request when no valid token is present.
#[derive(Debug, Clone, Copy)]
pub struct Caller(pub Principal);

impl FromRequest for Caller {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req).map(Caller))
    }
}

/// Caller identity when a valid token is present, otherwise anonymous.
#[derive(Debug, Clone, Copy)]
pub struct OptionalCaller(pub Option<Principal>);

impl FromRequest for OptionalCaller {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let principal = match authenticate(req) {
            Ok(principal) => Ok(Some(principal)),
            Err(err) if err.code() == ErrorCode::InternalError => Err(err),
            Err(_) => Ok(None),
        };
        ready(principal.map(OptionalCaller))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test as actix_test};
    use rstest::rstest;

    use super::*;
    use crate::domain::ports::{
        MockListingCommand, MockListingQuery, MockTokenVerifier, TokenVerificationError,
    };
    use crate::domain::{Role, UserId};

    const GOOD_TOKEN: &str = "good-token";

    fn http_state(user: UserId) -> HttpState {
        let mut tokens = MockTokenVerifier::new();
        tokens.expect_verify().returning(move |token| {
            if token == GOOD_TOKEN {
                Ok(Principal::new(user, Role::Customer))
            } else {
                Err(TokenVerificationError::invalid("bad signature"))
            }
        });
        HttpState::new(
            Arc::new(MockListingCommand::new()),
            Arc::new(MockListingQuery::new()),
            Arc::new(tokens),
        )
    }

    async fn call(user: UserId, path: &str, authorization: Option<&str>) -> (StatusCode, String) {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(http_state(user)))
                .route(
                    "/required",
                    web::get().to(|caller: Caller| async move {
                        HttpResponse::Ok().body(caller.0.id().to_string())
                    }),
                )
                .route(
                    "/optional",
                    web::get().to(|caller: OptionalCaller| async move {
                        let body = caller
                            .0
                            .map_or_else(|| "anonymous".to_owned(), |p| p.id().to_string());
                        HttpResponse::Ok().body(body)
                    }),
                ),
        )
        .await;

        let mut request = actix_test::TestRequest::get().uri(path);
        if let Some(value) = authorization {
            request = request.insert_header((AUTHORIZATION, value));
        }
        let response = actix_test::call_service(&app, request.to_request()).await;
        let status = response.status();
        let body = actix_test::read_body(response).await;
        (status, String::from_utf8_lossy(&body).into_owned())
    }

    #[rstest]
    #[case(None, StatusCode::UNAUTHORIZED)]
    #[case(Some("Basic dXNlcjpwYXNz"), StatusCode::UNAUTHORIZED)]
    #[case(Some("Bearer "), StatusCode::UNAUTHORIZED)]
    #[case(Some("Bearer forged"), StatusCode::FORBIDDEN)]
    #[actix_web::test]
    async fn required_caller_rejects_missing_or_bad_tokens(
        #[case] authorization: Option<&str>,
        #[case] expected: StatusCode,
    ) {
        let (status, _) = call(UserId::random(), "/required", authorization).await;
        assert_eq!(status, expected);
    }

    #[rstest]
    #[actix_web::test]
    async fn required_caller_accepts_valid_token() {
        let user = UserId::random();
        let (status, body) = call(user, "/required", Some("Bearer good-token")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, user.to_string());
    }

    #[rstest]
    #[case(None, "anonymous")]
    #[case(Some("Bearer forged"), "anonymous")]
    #[actix_web::test]
    async fn optional_caller_falls_back_to_anonymous(
        #[case] authorization: Option<&str>,
        #[case] expected: &str,
    ) {
        let (status, body) = call(UserId::random(), "/optional", authorization).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, expected);
    }
}
