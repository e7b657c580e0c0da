use crate::error::ApiError;
use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::{Error, ResponseError};
use std::future::{Ready, ready};
use std::pin::Pin;
use std::rc::Rc;

pub const API_KEY_HEADER: &str = "X-API-Key";

/// # API Key Guard
///
/// Middleware comparing the `X-API-Key` header against the configured secret
/// by exact string equality. A missing or mismatching key is answered with
/// `403 {"detail": "Invalid API key"}` before the wrapped service runs.
///
/// ```ignore
/// web::scope("/validate-emails")
///     .wrap(ApiKeyGuard::new(config.api_secret_key.clone()))
///     .configure(email::configure_routes)
/// ```
pub struct ApiKeyGuard {
    secret: Rc<str>,
}

impl ApiKeyGuard {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: Rc::from(secret.into()),
        }
    }
}

pub struct ApiKeyMiddleware<S> {
    service: S,
    secret: Rc<str>,
}

impl<S> ApiKeyMiddleware<S> {
    fn is_authorized(&self, req: &ServiceRequest) -> bool {
        req.headers()
            .get(API_KEY_HEADER)
            .and_then(|h| h.to_str().ok())
            .is_some_and(|key| key == &*self.secret)
    }
}

impl<S, B> Service<ServiceRequest> for ApiKeyMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Pin<Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if !self.is_authorized(&req) {
            tracing::warn!(
                path = %req.path(),
                header_present = req.headers().contains_key(API_KEY_HEADER),
                "rejected request with invalid API key"
            );
            let response = ApiError::InvalidApiKey.error_response().map_into_right_body();
            return Box::pin(ready(Ok(req.into_response(response))));
        }

        let fut = self.service.call(req);
        Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
    }
}

impl<S, B> Transform<S, ServiceRequest> for ApiKeyGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = ApiKeyMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ApiKeyMiddleware {
            service,
            secret: Rc::clone(&self.secret),
        }))
    }
}
