/// JWT Authentication Middleware
///
/// Validates the bearer token from the Authorization header and injects the
/// claims into request extensions for route handlers. Each failure mode
/// answers 401 with its own code (TOKEN_MISSING, TOKEN_MALFORMED,
/// TOKEN_EXPIRED, TOKEN_INVALID) so clients can tell a stale token from a
/// forged one.

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage, HttpResponse,
};
use futures::future::LocalBoxFuture;
use std::rc::Rc;

use crate::auth::verify_access_token;
use crate::configuration::JwtSettings;
use crate::error::TokenError;

pub struct JwtMiddleware {
    jwt_config: JwtSettings,
}

impl JwtMiddleware {
    pub fn new(jwt_config: JwtSettings) -> Self {
        Self { jwt_config }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtMiddlewareService<S>;
    type Future = std::future::Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        std::future::ready(Ok(JwtMiddlewareService {
            service: Rc::new(service),
            jwt_config: self.jwt_config.clone(),
        }))
    }
}

pub struct JwtMiddlewareService<S> {
    service: Rc<S>,
    jwt_config: JwtSettings,
}

impl<S, B> Service<ServiceRequest> for JwtMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let bearer = req
            .headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "))
            .map(|t| t.to_string());

        let token = match bearer {
            Some(token) => token,
            None => {
                tracing::warn!("Missing or non-bearer Authorization header");
                return reject(TokenError::Missing);
            }
        };

        match verify_access_token(&token, &self.jwt_config) {
            Ok(claims) => {
                req.extensions_mut().insert(claims.clone());

                tracing::debug!(
                    user_id = %claims.sub,
                    "Access token verified"
                );

                let service = self.service.clone();
                Box::pin(async move { service.call(req).await })
            }
            Err(reason) => reject(reason),
        }
    }
}

fn reject<R>(reason: TokenError) -> LocalBoxFuture<'static, Result<R, Error>> {
    let response = HttpResponse::Unauthorized().json(serde_json::json!({
        "error": reason.to_string(),
        "code": reason.code(),
    }));
    Box::pin(async move {
        Err(actix_web::error::InternalError::from_response(reason, response).into())
    })
}
