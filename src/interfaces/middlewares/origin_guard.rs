use actix_cors::Cors;
use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    Error,
};
use futures_util::future::{ok, Ready, LocalBoxFuture};
use std::{rc::Rc, sync::Arc, task::{Context, Poll}};

use crate::errors::AppError;

/// Which browser origins may call the API. An empty allow-list admits every
/// origin; requests without an `Origin` header are always admitted.
#[derive(Debug, Clone, Default)]
pub struct OriginPolicy {
    allowed: Arc<Vec<String>>,
}

impl OriginPolicy {
    pub fn new(origins: Vec<String>) -> Self {
        OriginPolicy {
            allowed: Arc::new(origins),
        }
    }

    pub fn allows_any_origin(&self) -> bool {
        self.allowed.is_empty()
    }

    pub fn allows(&self, origin: Option<&str>) -> bool {
        match origin {
            None => true,
            Some(_) if self.allows_any_origin() => true,
            Some(origin) => self.allowed.iter().any(|allowed| allowed == origin),
        }
    }

    /// CORS response headers for permitted origins. Credentials are allowed,
    /// so the request origin is echoed back rather than `*`. Preflights get
    /// back whatever request headers they asked for.
    pub fn cors(&self) -> Cors {
        let policy = self.clone();

        Cors::default()
            .allowed_origin_fn(move |origin, _req_head| {
                origin
                    .to_str()
                    .map(|o| policy.allows(Some(o)))
                    .unwrap_or(false)
            })
            .allowed_methods(vec!["GET", "POST", "OPTIONS"])
            .allow_any_header()
            .supports_credentials()
            .max_age(3600)
    }
}

/// Rejects requests whose `Origin` is not permitted with a JSON 403.
pub struct OriginGuard {
    policy: OriginPolicy,
}

impl OriginGuard {
    pub fn new(policy: OriginPolicy) -> Self {
        OriginGuard { policy }
    }
}

impl<S, B> Transform<S, ServiceRequest> for OriginGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = OriginGuardService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(OriginGuardService {
            service: Rc::new(service),
            policy: self.policy.clone(),
        })
    }
}

pub struct OriginGuardService<S> {
    service: Rc<S>,
    policy: OriginPolicy,
}

impl<S, B> Service<ServiceRequest> for OriginGuardService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let allowed = match req.headers().get(header::ORIGIN) {
            None => true,
            Some(value) => value
                .to_str()
                .map(|origin| self.policy.allows(Some(origin)))
                .unwrap_or(false),
        };

        if !allowed {
            tracing::warn!(
                "Rejected request from disallowed origin {:?} to {}",
                req.headers().get(header::ORIGIN),
                req.path()
            );
            let response = AppError::CorsRejected.to_http_response();
            return Box::pin(async move { Ok(req.into_response(response).map_into_right_body()) });
        }

        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}
