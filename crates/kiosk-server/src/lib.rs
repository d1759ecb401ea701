// SPDX-License-Identifier: Apache-2.0

//! `kioskd` — the long-lived process hosting the kiosk `Display` service.
//!
//! Wires the transport-agnostic [`kiosk_core::DisplayService`] to a gRPC
//! listener (plus an optional health-only HTTP listener) and owns process
//! concerns the core never touches: configuration, logging, TLS, and
//! graceful shutdown.

pub mod config;
pub mod transport;

use std::sync::Arc;

use kiosk_core::DisplayService;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::transport::grpc::DisplayGrpc;
use crate::transport::health::build_health_router;

/// Initialize the global tracing subscriber from `config`. Uses
/// `try_init` so it is safe to call more than once (e.g. from tests).
pub fn init_tracing(config: &Config) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let result = match config.log_format.as_str() {
        "json" => tracing_subscriber::fmt().with_env_filter(filter).json().try_init(),
        _ => tracing_subscriber::fmt().with_env_filter(filter).try_init(),
    };
    drop(result);
}

/// Run `kioskd` until the process receives a shutdown signal.
pub async fn run(config: Config) -> anyhow::Result<()> {
    init_tracing(&config);

    let service = Arc::new(DisplayService::with_session_lifetime(config.session_lifetime()));

    let grpc_addr = format!("{}:{}", config.host, config.grpc_port);
    let grpc = DisplayGrpc::new(Arc::clone(&service));
    let router = grpc.into_router(config.auth_token.clone());

    info!(addr = %grpc_addr, tls = config.tls, "kioskd listening");

    let health_addr = config.health_port.map(|port| format!("{}:{}", config.host, port));
    let tls_enabled = config.tls;
    let tls_cert = config.tls_cert.clone();
    let tls_key = config.tls_key.clone();

    let grpc_task = tokio::spawn(async move {
        let result = if tls_enabled {
            let (Some(cert_path), Some(key_path)) = (&tls_cert, &tls_key) else {
                anyhow::bail!("--tls requires both --tls-cert and --tls-key");
            };
            let cert = std::fs::read(cert_path)?;
            let key = std::fs::read(key_path)?;
            let identity = tonic::transport::Identity::from_pem(cert, key);
            let tls = tonic::transport::ServerTlsConfig::new().identity(identity);
            router.tls_config(tls)?.serve(grpc_addr.parse()?).await?;
            Ok(())
        } else {
            router.serve(grpc_addr.parse()?).await?;
            Ok(())
        };
        result
    });

    let health_task = health_addr.map(|addr| {
        let service = Arc::clone(&service);
        tokio::spawn(async move {
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            info!(addr, "health probe listening");
            axum::serve(listener, build_health_router(service)).await.map_err(anyhow::Error::from)
        })
    });

    tokio::select! {
        result = grpc_task => {
            match result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => error!("gRPC server error: {e:#}"),
                Err(e) => error!("gRPC server task panicked: {e:#}"),
            }
        }
        _ = async {
            match health_task {
                Some(task) => {
                    match task.await {
                        Ok(Ok(())) => {}
                        Ok(Err(e)) => error!("health server error: {e:#}"),
                        Err(e) => error!("health server task panicked: {e:#}"),
                    }
                }
                None => std::future::pending::<()>().await,
            }
        } => {}
    }

    Ok(())
}
