//! HTTP server setup and request dispatch.
//!
//! # Responsibilities
//! - Create the Axum router with a single catch-all handler
//! - Wire up middleware (tracing, request timeout)
//! - Forward every request, path preserved, to the one configured upstream
//! - Apply the request/response interceptors around the forwarding call
//! - Return a generic error response when forwarding fails

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::uri::{Authority, Scheme},
    http::{header, Request, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use hyper_tls::HttpsConnector;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ProxyConfig;
use crate::http::request::enrich_request_headers;
use crate::http::response::ResponseInterceptor;
use crate::session::CredentialStore;

/// Returned to clients when forwarding fails; upstream detail stays in the log.
const GENERIC_FAILURE_BODY: &str = "Something went wrong. Please try again.";

/// Error building the server from configuration.
#[derive(Debug, Error)]
pub enum ServerBuildError {
    #[error("invalid upstream URL: {0}")]
    InvalidUpstream(#[from] axum::http::uri::InvalidUri),

    #[error("upstream URL is missing its {0}")]
    MissingComponent(&'static str),
}

/// Scheme and authority of the upstream, parsed once at startup.
#[derive(Clone)]
pub struct UpstreamTarget {
    scheme: Scheme,
    authority: Authority,
}

impl UpstreamTarget {
    pub fn from_base_url(base_url: &str) -> Result<Self, ServerBuildError> {
        let uri: Uri = base_url.parse()?;
        let scheme = uri
            .scheme()
            .cloned()
            .ok_or(ServerBuildError::MissingComponent("scheme"))?;
        let authority = uri
            .authority()
            .cloned()
            .ok_or(ServerBuildError::MissingComponent("authority"))?;
        Ok(Self { scheme, authority })
    }

    /// Rebase a client URI onto the upstream, path and query preserved.
    pub fn rebase(&self, original: &Uri) -> Uri {
        let mut parts = original.clone().into_parts();
        parts.scheme = Some(self.scheme.clone());
        parts.authority = Some(self.authority.clone());
        Uri::from_parts(parts).unwrap_or_else(|_| original.clone())
    }
}

/// Application state injected into the handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<CredentialStore>,
    pub client: Client<HttpsConnector<HttpConnector>, Body>,
    pub interceptor: Arc<ResponseInterceptor>,
    pub upstream: UpstreamTarget,
}

/// HTTP server for the session proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Build the server from a validated configuration and a shared store.
    pub fn new(config: ProxyConfig, store: Arc<CredentialStore>) -> Result<Self, ServerBuildError> {
        let upstream = UpstreamTarget::from_base_url(&config.upstream_url)?;

        let client = Client::builder(TokioExecutor::new()).build::<_, Body>(HttpsConnector::new());

        let interceptor = Arc::new(ResponseInterceptor::new(
            store.clone(),
            config.upstream_url.clone(),
            config.external_url.clone(),
        ));

        let state = AppState {
            store,
            client,
            interceptor,
            upstream,
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ProxyConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(proxy_handler))
            .route("/", any(proxy_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream_url,
            external = %self.config.external_url,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }
}

/// Main proxy handler.
///
/// One exchange: enrich headers, forward to the upstream, intercept the
/// response, relay it with the body streaming through untouched.
async fn proxy_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let (parts, body) = request.into_parts();
    let path = parts.uri.path().to_string();
    let method = parts.method.clone();

    tracing::debug!(method = %method, path = %path, "Proxying request");

    let uri = state.upstream.rebase(&parts.uri);
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(headers) = builder.headers_mut() {
        for (name, value) in parts.headers.iter() {
            // Host is derived from the upstream URI; the rest pass through.
            if name == header::HOST {
                continue;
            }
            headers.append(name.clone(), value.clone());
        }
        enrich_request_headers(headers, &state.store);
    }

    let outbound = match builder.body(body) {
        Ok(req) => req,
        Err(e) => {
            tracing::error!(path = %path, error = %e, "Failed to build upstream request");
            return generic_failure();
        }
    };

    match state.client.request(outbound).await {
        Ok(response) => {
            let (mut response_parts, response_body) = response.into_parts();
            response_parts.status = state.interceptor.apply(
                &parts.headers,
                response_parts.status,
                &mut response_parts.headers,
            );
            Response::from_parts(response_parts, Body::new(response_body))
        }
        Err(e) => {
            tracing::error!(path = %path, error = %e, "Forwarding to upstream failed");
            generic_failure()
        }
    }
}

/// Fixed plain-text failure response; never leaks upstream detail.
fn generic_failure() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_FAILURE_BODY).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rebase_preserves_path_and_query() {
        let target = UpstreamTarget::from_base_url("https://data.example.org/").unwrap();
        let original: Uri = "/thredds/wms/file.nc?service=WMS".parse().unwrap();
        let rebased = target.rebase(&original);
        assert_eq!(
            rebased.to_string(),
            "https://data.example.org/thredds/wms/file.nc?service=WMS"
        );
    }

    #[test]
    fn test_from_base_url_requires_scheme() {
        assert!(matches!(
            UpstreamTarget::from_base_url("data.example.org"),
            Err(ServerBuildError::MissingComponent(_))
        ));
    }
}
