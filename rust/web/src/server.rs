use std::convert::Infallible;
use std::net::{SocketAddr, ToSocketAddrs};

use thiserror::Error;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use warp::filters::body::BodyDeserializeError;
use warp::filters::BoxedFilter;
use warp::http::StatusCode;
use warp::reply::{Reply, Response};
use warp::{Filter, Rejection};

use crate::config::ServerConfig;
use crate::dto::{ActionRequest, JoinRequest};
use crate::errors::ErrorResponse;
use crate::handlers;
use crate::middleware::with_request_logging;
use crate::table::{SharedTable, Table, TableError};

/// Largest JSON body the API accepts.
const MAX_BODY_BYTES: u64 = 16 * 1024;

/// What every route needs: the resolved config and the table handle.
#[derive(Debug, Clone)]
pub struct AppContext {
    config: ServerConfig,
    table: SharedTable,
}

impl AppContext {
    pub fn new(config: ServerConfig) -> Result<Self, ServerError> {
        let table = Table::open(&config)?.shared();
        Ok(Self { config, table })
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn table(&self) -> SharedTable {
        SharedTable::clone(&self.table)
    }
}

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to bind to address: {0}")]
    BindError(#[from] std::io::Error),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Table error: {0}")]
    Table(#[from] TableError),
}

#[derive(Debug, Clone)]
pub struct WebServer {
    context: AppContext,
}

impl WebServer {
    pub fn new(config: ServerConfig) -> Result<Self, ServerError> {
        let context = AppContext::new(config)?;
        Ok(Self { context })
    }

    pub fn from_context(context: AppContext) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &AppContext {
        &self.context
    }

    pub async fn start(self) -> Result<ServerHandle, ServerError> {
        let WebServer { context } = self;
        let bind_addr = Self::bind_addr(context.config())?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let routes = Self::routes(&context);
        let shutdown_signal = async move {
            let _ = shutdown_rx.await;
        };

        let (addr, server_future) = warp::serve(routes)
            .try_bind_with_graceful_shutdown(bind_addr, shutdown_signal)
            .map_err(Self::map_warp_error)?;

        tracing::info!(%addr, "holdem server listening");

        let task = tokio::spawn(async move {
            server_future.await;
            Ok(())
        });

        Ok(ServerHandle::new(addr, shutdown_tx, task, context))
    }

    fn bind_addr(config: &ServerConfig) -> Result<SocketAddr, ServerError> {
        let host = config.host.as_str();

        if let Ok(addr) = host.parse::<SocketAddr>() {
            return Ok(addr);
        }

        if let Ok(ip) = host.parse::<std::net::IpAddr>() {
            return Ok(SocketAddr::new(ip, config.port));
        }

        let candidate = format!("{}:{}", host, config.port);
        let mut addrs = candidate.to_socket_addrs().map_err(|err| {
            ServerError::ConfigError(format!("failed to resolve address `{candidate}`: {err}"))
        })?;

        addrs.next().ok_or_else(|| {
            ServerError::ConfigError(format!("failed to resolve address `{candidate}`"))
        })
    }

    fn map_warp_error(err: warp::Error) -> ServerError {
        use std::error::Error as StdError;

        if let Some(io_err) = err
            .source()
            .and_then(|source| source.downcast_ref::<std::io::Error>())
        {
            return ServerError::BindError(std::io::Error::new(io_err.kind(), io_err.to_string()));
        }

        ServerError::ConfigError(err.to_string())
    }

    /// Every route, with rejections turned into JSON errors and each
    /// request logged.
    pub fn routes(context: &AppContext) -> BoxedFilter<(Response,)> {
        let routes = Self::health_route()
            .or(Self::api_routes(context))
            .unify()
            .or_else(|err: Rejection| async move {
                Ok::<_, Rejection>((rejection_response(err),))
            });

        with_request_logging(routes).boxed()
    }

    fn health_route() -> BoxedFilter<(Response,)> {
        warp::path("health")
            .and(warp::get())
            .and(warp::path::end())
            .map(|| handlers::health().into_response())
            .boxed()
    }

    fn api_routes(context: &AppContext) -> BoxedFilter<(Response,)> {
        let table = context.table();

        let join = warp::path!("api" / "join")
            .and(warp::post())
            .and(Self::with_table(table.clone()))
            .and(Self::json_body::<JoinRequest>())
            .then(handlers::join);

        let start = warp::path!("api" / "start")
            .and(warp::post())
            .and(Self::with_table(table.clone()))
            .then(handlers::start);

        let action = warp::path!("api" / "action")
            .and(warp::post())
            .and(Self::with_table(table.clone()))
            .and(Self::json_body::<ActionRequest>())
            .then(handlers::submit_action);

        let state = warp::path!("api" / "game_state")
            .and(warp::get())
            .and(Self::with_table(table.clone()))
            .then(handlers::game_state);

        let reset = warp::path!("api" / "reset")
            .and(warp::post())
            .and(Self::with_table(table))
            .then(handlers::reset);

        join.or(start)
            .unify()
            .or(action)
            .unify()
            .or(state)
            .unify()
            .or(reset)
            .unify()
            .boxed()
    }

    fn with_table(
        table: SharedTable,
    ) -> impl Filter<Extract = (SharedTable,), Error = Infallible> + Clone {
        warp::any().map(move || SharedTable::clone(&table))
    }

    fn json_body<T>() -> impl Filter<Extract = (T,), Error = Rejection> + Clone
    where
        T: serde::de::DeserializeOwned + Send,
    {
        warp::body::content_length_limit(MAX_BODY_BYTES).and(warp::body::json())
    }
}

/// Turns warp rejections into the same JSON error shape the handlers use.
fn rejection_response(err: Rejection) -> Response {
    if err.is_not_found() {
        return ErrorResponse::new("not_found", "No such route")
            .into_response(StatusCode::NOT_FOUND);
    }
    if let Some(e) = err.find::<BodyDeserializeError>() {
        return handlers::table::malformed_body(e.to_string());
    }
    if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        return ErrorResponse::new("payload_too_large", "Request body too large")
            .into_response(StatusCode::PAYLOAD_TOO_LARGE);
    }
    if err.find::<warp::reject::UnsupportedMediaType>().is_some() {
        return handlers::table::malformed_body("Expected a JSON body");
    }
    if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        return ErrorResponse::new("method_not_allowed", "Method not allowed")
            .into_response(StatusCode::METHOD_NOT_ALLOWED);
    }

    tracing::error!(rejection = ?err, "unhandled rejection");
    ErrorResponse::new("internal_error", "Internal server error")
        .into_response(StatusCode::INTERNAL_SERVER_ERROR)
}

#[derive(Debug)]
pub struct ServerHandle {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<Result<(), ServerError>>>,
    context: AppContext,
}

impl ServerHandle {
    fn new(
        addr: SocketAddr,
        shutdown: oneshot::Sender<()>,
        task: JoinHandle<Result<(), ServerError>>,
        context: AppContext,
    ) -> Self {
        Self {
            addr,
            shutdown: Some(shutdown),
            task: Some(task),
            context,
        }
    }

    pub fn address(&self) -> SocketAddr {
        self.addr
    }

    pub fn context(&self) -> &AppContext {
        &self.context
    }

    pub async fn shutdown(mut self) -> Result<(), ServerError> {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }

        if let Some(task) = self.task.take() {
            match task.await {
                Ok(result) => result?,
                Err(err) => {
                    return Err(ServerError::ConfigError(format!(
                        "server task join error: {err}"
                    )))
                }
            }
        }

        Ok(())
    }
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }

        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
