//! JWT authentication middleware for protecting API endpoints.
//!
//! The middleware extracts the bearer token from the Authorization header,
//! resolves it to an account through the [`BearerAuthenticator`] registered
//! as app data, and injects an [`AuthContext`] into the request. Routes that
//! belong to one role wrap themselves with [`JwtAuth::require`]; a verified
//! account of the other role is turned away with 403.
//!
//! Rejections are answered directly with the JSON error body instead of
//! being raised as service errors.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::InternalError,
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};
use uuid::Uuid;

use cm_core::{AuthError, BearerAuthenticator, DomainError, Identity, Principal, Role};

use crate::handlers::error::handle_domain_error;

/// Authenticated account injected into requests
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Account id from the token subject
    pub user_id: Uuid,
    /// Username as currently stored
    pub username: String,
    /// Role the account belongs to
    pub role: Role,
}

impl AuthContext {
    /// The principal handed to the services
    pub fn principal(&self) -> Principal {
        Principal::new(self.user_id, self.role)
    }
}

impl From<Identity> for AuthContext {
    fn from(identity: Identity) -> Self {
        Self {
            user_id: identity.id,
            username: identity.username,
            role: identity.role,
        }
    }
}

/// JWT authentication middleware factory
#[derive(Debug, Clone, Copy)]
pub struct JwtAuth {
    /// Role a verified account must have
    required_role: Role,
}

impl JwtAuth {
    /// Accept only accounts of `role`
    pub fn require(role: Role) -> Self {
        Self {
            required_role: role,
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            required_role: self.required_role,
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    required_role: Role,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let required_role = self.required_role;

        Box::pin(async move {
            match authenticate(&req, required_role).await {
                Ok(context) => {
                    req.extensions_mut().insert(context);
                    let response = service.call(req).await?;
                    Ok(response.map_into_left_body())
                }
                Err(error) => {
                    log::debug!("Rejected {} {}: {}", req.method(), req.path(), error);
                    let response = handle_domain_error(&error);
                    Ok(req.into_response(response).map_into_right_body())
                }
            }
        })
    }
}

/// Runs the request through TokenPresent -> TokenValid -> IdentityResolved -> Authorized
async fn authenticate(
    req: &ServiceRequest,
    required: Role,
) -> Result<AuthContext, DomainError> {
    let token = extract_bearer_token(req).ok_or(AuthError::Unauthenticated)?;

    let authenticator = req
        .app_data::<web::Data<dyn BearerAuthenticator>>()
        .cloned()
        .ok_or_else(|| DomainError::Configuration {
            message: "no bearer authenticator registered".to_string(),
        })?;

    let identity = authenticator.authenticate_bearer(&token).await?;

    if identity.role != required {
        return Err(AuthError::Forbidden { required }.into());
    }

    Ok(AuthContext::from(identity))
}

/// Extracts Bearer token from Authorization header
///
/// The scheme name is matched case-insensitively.
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?.trim();
    let (scheme, token) = value.split_once(char::is_whitespace)?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    Some(token.trim())
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req.extensions().get::<AuthContext>().cloned().ok_or_else(|| {
            let error = DomainError::from(AuthError::Unauthenticated);
            InternalError::from_response("Authentication required", handle_domain_error(&error))
                .into()
        });

        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test;

    #[::core::prelude::v1::test]
    fn test_extract_bearer_token() {
        let req = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer test_token_123"))
            .to_srv_request();

        assert_eq!(extract_bearer_token(&req), Some("test_token_123".to_string()));

        let req_no_bearer = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "test_token_123"))
            .to_srv_request();

        assert_eq!(extract_bearer_token(&req_no_bearer), None);

        for header in [
            "bearer test_token_123",
            "BEARER test_token_123",
            "Bearer  test_token_123",
        ] {
            let req = test::TestRequest::default()
                .insert_header((AUTHORIZATION, header))
                .to_srv_request();
            assert_eq!(extract_bearer_token(&req), Some("test_token_123".to_string()));
        }

        let req_basic = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Basic dXNlcjpwdw=="))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req_basic), None);

        let req_empty = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer "))
            .to_srv_request();
        assert_eq!(extract_bearer_token(&req_empty), None);

        let req_no_header = test::TestRequest::default().to_srv_request();
        assert_eq!(extract_bearer_token(&req_no_header), None);
    }

    #[::core::prelude::v1::test]
    fn test_auth_context_principal() {
        let identity = Identity::new(Role::Student, "alice", "hash");
        let id = identity.id;
        let context = AuthContext::from(identity);

        let principal = context.principal();
        assert_eq!(principal.id, id);
        assert!(principal.is_student());
        assert_eq!(context.username, "alice");
    }
}
