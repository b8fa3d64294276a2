use std::future::Future;
use std::pin::Pin;
use std::time::{Duration, Instant};

use http::StatusCode;
use log::{debug, info};
use reqwest::{Request, Response, Url};
use tower::{Layer, Service};

/// Logs every outgoing request and its response status and latency.
///
/// Query values that carry credentials (`corpsecret`, `access_token`, ...) are
/// replaced with `[REDACTED]` before logging.
#[derive(Debug, Clone, Default)]
pub struct LoggingMiddleware {
    verbose: bool,
}

impl LoggingMiddleware {
    pub fn new() -> Self {
        Self { verbose: false }
    }

    /// Log at `debug` level with direction markers instead of `info`.
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }
}

impl<S> Layer<S> for LoggingMiddleware
where
    S: Service<Request, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Service = LoggingMiddlewareService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        LoggingMiddlewareService {
            inner,
            verbose: self.verbose,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoggingMiddlewareService<S> {
    inner: S,
    verbose: bool,
}

const SENSITIVE_FIELDS: &[&str] = &[
    "access_token",
    "corpsecret",
    "secret",
    "token",
    "password",
    "authorization",
];

fn is_sensitive(key: &str) -> bool {
    SENSITIVE_FIELDS.iter().any(|s| key.eq_ignore_ascii_case(s))
}

pub(crate) fn redact_url(url: &Url) -> String {
    let query = url
        .query_pairs()
        .map(|(key, value)| {
            if is_sensitive(&key) {
                format!("{key}=[REDACTED]")
            } else {
                format!("{key}={value}")
            }
        })
        .collect::<Vec<_>>()
        .join("&");

    let mut base = url.clone();
    base.set_query(None);
    if query.is_empty() {
        base.to_string()
    } else {
        format!("{base}?{query}")
    }
}

fn log_request(method: &str, url: &str, verbose: bool) {
    if verbose {
        debug!("[Wecom] >>> {} {}", method, url);
    } else {
        info!("[Wecom] {} {}", method, url);
    }
}

fn log_response(url: &str, status: StatusCode, duration: Duration, verbose: bool) {
    if verbose {
        debug!(
            "[Wecom] <<< {} {} ({:?})",
            status.as_u16(),
            status.canonical_reason().unwrap_or(""),
            duration
        );
    } else {
        info!("[Wecom] {} -> {} ({:?})", url, status.as_u16(), duration);
    }
}

impl<S, Error> Service<Request> for LoggingMiddlewareService<S>
where
    S: Service<Request, Response = Response, Error = Error> + Send + Clone + 'static,
    S::Future: Send,
    Error: std::fmt::Display + Send + 'static,
{
    type Response = Response;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let method = req.method().as_str().to_string();
        let url = redact_url(req.url());
        let verbose = self.verbose;
        let mut inner = self.inner.clone();

        Box::pin(async move {
            log_request(&method, &url, verbose);

            let start = Instant::now();
            match inner.call(req).await {
                Ok(response) => {
                    log_response(&url, response.status(), start.elapsed(), verbose);
                    Ok(response)
                }
                Err(e) => {
                    info!("[Wecom] {} failed after {:?}: {}", url, start.elapsed(), e);
                    Err(e)
                }
            }
        })
    }
}
