//! One parameterized service template, instantiated by each service binary
//!
//! Boot order: configuration, tracing, schema, database lifecycle, router,
//! HTTP server. On SIGINT/SIGTERM the readiness gate closes, in-flight
//! requests drain, and the pool is closed last.

use crate::config::{AppConfig, ConfigError};
use crate::descriptor::ServiceDescriptor;
use crate::lifecycle::{ConnectionLifecycle, LifecycleError};
use crate::mount::{MountError, RouteSet, RouterMount};
use crate::telemetry;
use actix_middleware::{CorrelationIdMiddleware, MetricsMiddleware};
use actix_web::middleware::NormalizePath;
use actix_web::{App, HttpServer};
use db_pool::{initialize_schema, PgDatabase, SchemaDefinition, SchemaError};
use sqlx::PgPool;
use std::io;
use std::sync::Arc;
use tracing::{error, info, warn};

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    #[error(transparent)]
    Mount(#[from] MountError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("http server failed: {0}")]
    Server(#[source] io::Error),
}

type RouteFactory = Box<dyn FnOnce(PgPool) -> Arc<dyn RouteSet> + Send>;

/// A service reduced to what differs between instances
pub struct ServiceTemplate {
    descriptor: ServiceDescriptor,
    schema: SchemaDefinition,
    default_port: u16,
    routes: RouteFactory,
}

impl ServiceTemplate {
    /// `routes` builds the handler set once the database pool is ready
    pub fn new<F>(name: &str, schema: SchemaDefinition, default_port: u16, routes: F) -> Self
    where
        F: FnOnce(PgPool) -> Arc<dyn RouteSet> + Send + 'static,
    {
        Self {
            descriptor: ServiceDescriptor::new(name),
            schema,
            default_port,
            routes: Box::new(routes),
        }
    }

    pub fn descriptor(&self) -> &ServiceDescriptor {
        &self.descriptor
    }

    pub fn schema(&self) -> &SchemaDefinition {
        &self.schema
    }

    /// Run the service until a termination signal arrives
    pub async fn run(self) -> Result<(), StartupError> {
        dotenvy::dotenv().ok();
        telemetry::init_tracing();

        let ServiceTemplate {
            descriptor,
            schema,
            default_port,
            routes,
        } = self;

        let config = AppConfig::from_env(&descriptor.name)?;
        config.database.log_config();
        let retry = config.connect_retry.retry_config();

        info!(
            service = %descriptor.name,
            env = %config.server.app_env,
            "Starting service"
        );

        initialize_schema(&config.database, &schema, retry.clone()).await?;

        let mut lifecycle = ConnectionLifecycle::new(
            PgDatabase::new(config.database.clone()),
            retry,
            config.server.shutdown_timeout(),
        );
        let gate = lifecycle.gate();

        let shutdown = shutdown_signal();
        tokio::pin!(shutdown);

        let pool = tokio::select! {
            result = lifecycle.startup() => result?,
            _ = &mut shutdown => {
                info!(service = %descriptor.name, "Shutdown signal received during startup");
                return Ok(());
            }
        };

        let mut mount = RouterMount::new(gate.clone());
        if let Err(e) = mount.mount(descriptor.clone(), routes(pool)) {
            stop_lifecycle(&mut lifecycle).await;
            return Err(e.into());
        }

        let host = config.server.host.clone();
        let port = config.server.port.unwrap_or(default_port);
        let service_name = descriptor.name.clone();
        let server_mount = mount.clone();

        let server = match HttpServer::new(move || {
            App::new()
                .wrap(MetricsMiddleware::new(&service_name))
                .wrap(CorrelationIdMiddleware)
                .wrap(tracing_actix_web::TracingLogger::default())
                .wrap(NormalizePath::trim())
                .configure(|cfg| server_mount.configure(cfg))
        })
        .workers(config.server.workers)
        .shutdown_timeout(config.server.shutdown_timeout_secs)
        .disable_signals()
        .bind((host.as_str(), port))
        {
            Ok(server) => server.run(),
            Err(source) => {
                stop_lifecycle(&mut lifecycle).await;
                return Err(StartupError::Bind {
                    addr: format!("{host}:{port}"),
                    source,
                });
            }
        };

        info!(
            service = %descriptor.name,
            "Listening on http://{}:{}{}",
            host, port, descriptor.url_prefix
        );

        let server_handle = server.handle();
        let server_task = tokio::spawn(server);
        tokio::pin!(server_task);

        let mut server_error = None;
        tokio::select! {
            result = &mut server_task => {
                match result {
                    Ok(Ok(())) => info!("HTTP server stopped"),
                    Ok(Err(e)) => {
                        error!(error = %e, "HTTP server failed");
                        server_error = Some(e);
                    }
                    Err(e) => {
                        error!(error = %e, "HTTP server task panicked");
                        server_error = Some(io::Error::new(io::ErrorKind::Other, e.to_string()));
                    }
                }
            }
            _ = &mut shutdown => {
                info!(service = %descriptor.name, "Shutdown signal received");
                gate.close();
                server_handle.stop(true).await;
                if let Err(e) = server_task.await {
                    warn!(error = %e, "HTTP server task did not finish cleanly");
                }
            }
        }

        stop_lifecycle(&mut lifecycle).await;
        info!(service = %descriptor.name, "Service shut down");

        match server_error {
            Some(e) => Err(StartupError::Server(e)),
            None => Ok(()),
        }
    }
}

async fn stop_lifecycle(lifecycle: &mut ConnectionLifecycle<PgDatabase>) {
    if let Err(e) = lifecycle.shutdown().await {
        warn!(error = %e, "Lifecycle shutdown skipped");
    }
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = terminate.recv() => {},
                }
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler, listening for Ctrl+C only");
                wait_for_ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    wait_for_ctrl_c().await;
}

async fn wait_for_ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
}
