use std::time::Instant;

use warp::http::{Method, StatusCode};
use warp::path::FullPath;
use warp::reject::Rejection;
use warp::reply::{Reply, Response};
use warp::Filter;

/// Wraps `filter` so every request is logged on arrival and again with its
/// status and latency once the reply is ready.
pub fn with_request_logging<F, T>(
    filter: F,
) -> impl Filter<Extract = (Response,), Error = Rejection> + Clone
where
    F: Filter<Extract = (T,), Error = Rejection> + Clone + Send + Sync + 'static,
    T: Reply,
{
    warp::any()
        .and(warp::path::full())
        .and(warp::method())
        .map(|path: FullPath, method: Method| {
            tracing::debug!(path = %path.as_str(), method = %method, "incoming request");
            (path, method, Instant::now())
        })
        .and(filter)
        .map(|(path, method, start): (FullPath, Method, Instant), reply: T| {
            let response = reply.into_response();
            log_response(
                response.status(),
                path.as_str(),
                method.as_str(),
                start.elapsed().as_millis(),
            );
            response
        })
}

/// Logs a finished request at a level matching its status class.
pub fn log_response(status: StatusCode, path: &str, method: &str, duration_ms: u128) {
    let code = status.as_u16();
    if status.is_server_error() {
        tracing::error!(status = code, path, method, duration_ms, "server error");
    } else if status.is_client_error() {
        tracing::warn!(status = code, path, method, duration_ms, "client error");
    } else {
        tracing::info!(status = code, path, method, duration_ms, "request completed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::TestLogSubscriber;
    use tracing::Level;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::Registry;

    #[tokio::test]
    async fn logs_request_and_completion() {
        let subscriber = TestLogSubscriber::new();
        let registry = Registry::default().with(subscriber.clone().into_layer::<Registry>());
        let _guard = tracing::subscriber::set_default(registry);

        let route = warp::path!("ping")
            .and(warp::get())
            .map(|| warp::reply::json(&"pong"));

        let response = warp::test::request()
            .method("GET")
            .path("/ping")
            .reply(&with_request_logging(route))
            .await;
        assert_eq!(response.status(), StatusCode::OK);

        let entries = subscriber.entries();
        assert!(entries
            .iter()
            .any(|e| e.level == Level::DEBUG && e.message == "incoming request"));
        let done = entries
            .iter()
            .find(|e| e.message == "request completed")
            .expect("completion logged");
        assert_eq!(done.field("status"), Some("200"));
        assert_eq!(done.field("path"), Some("/ping"));
    }

    #[test]
    fn level_follows_status_class() {
        let subscriber = TestLogSubscriber::new();
        let registry = Registry::default().with(subscriber.clone().into_layer::<Registry>());

        tracing::subscriber::with_default(registry, || {
            log_response(StatusCode::OK, "/api/game_state", "GET", 1);
            log_response(StatusCode::CONFLICT, "/api/join", "POST", 1);
            log_response(StatusCode::INTERNAL_SERVER_ERROR, "/api/action", "POST", 1);
        });

        let levels: Vec<Level> = subscriber.entries().iter().map(|e| e.level).collect();
        assert_eq!(levels, vec![Level::INFO, Level::WARN, Level::ERROR]);
    }
}
