use std::{convert::Infallible, future::Future, net::SocketAddr, sync::Arc};

use hyper::{body::Bytes, HeaderMap, Method};
use tracing::info;
use warp::{filters::BoxedFilter, path::FullPath, reply::Response, Filter, Rejection, Reply};

use crate::{
    config::{ProxyConfig, ProxyRule},
    errors::ProxyError,
    proxy::{error_response, Forwarder},
};

/// Builds the routes of the proxy: every path matched by a rule is
/// forwarded, everything else is served from the static directory, if
/// any, or answers 404.
pub fn routes(config: ProxyConfig) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let forwarder = Forwarder::new(config.timeout);
    let fallback = fallback(&config);
    let config = Arc::new(config);

    let proxy = warp::path::full()
        .and(warp::any().map(move || Arc::clone(&config)))
        .and_then(match_rule)
        .untuple_one()
        .and(warp::any().map(move || forwarder.clone()))
        .and(warp::method())
        .and(warp::query::raw().or(warp::any().map(String::new)).unify())
        .and(warp::header::headers_cloned())
        .and(warp::body::bytes())
        .and_then(forward);

    proxy
        .or(fallback)
        .unify()
        .with(warp::trace::request())
}

/// Binds the proxy to the configured address. The returned future serves
/// until `shutdown` completes.
///
/// # Errors
///
/// Errors if the address cannot be bound.
pub fn bind<F>(
    config: ProxyConfig,
    shutdown: F,
) -> Result<(SocketAddr, impl Future<Output = ()>), ProxyError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = config.addr();
    let (addr, server) = warp::serve(routes(config))
        .try_bind_with_graceful_shutdown(addr, shutdown)
        .map_err(ProxyError::Bind)?;
    info!(%addr, "listening");
    Ok((addr, server))
}

fn fallback(config: &ProxyConfig) -> BoxedFilter<(Response,)> {
    match config.static_dir {
        Some(ref dir) => warp::fs::dir(dir.clone())
            .map(|file: warp::fs::File| file.into_response())
            .boxed(),
        None => warp::any()
            .and_then(|| async { Err::<Response, Rejection>(warp::reject::not_found()) })
            .boxed(),
    }
}

async fn match_rule(
    path: FullPath,
    config: Arc<ProxyConfig>,
) -> Result<(FullPath, ProxyRule), Rejection> {
    match config.rule_for(path.as_str()) {
        Some(rule) => Ok((path, rule.clone())),
        None => Err(warp::reject::not_found()),
    }
}

async fn forward(
    path: FullPath,
    rule: ProxyRule,
    forwarder: Forwarder,
    method: Method,
    query: String,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, Infallible> {
    Ok(forwarder
        .forward(&rule, method, path.as_str(), Some(&query), headers, body)
        .await
        .unwrap_or_else(|err| error_response(&err)))
}
