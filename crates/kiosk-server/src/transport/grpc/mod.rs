// SPDX-License-Identifier: Apache-2.0

//! gRPC transport implementing the `kiosk.v1.Display` service.

pub mod convert;
mod service;

use std::sync::Arc;
use std::time::Instant;

use kiosk_core::DisplayService;

use super::auth::AuthInterceptor;

/// Generated protobuf types for the `kiosk.v1` package.
pub mod proto {
    tonic::include_proto!("kiosk.v1");
}

/// gRPC implementation of `kiosk.v1.Display`, backed by the in-memory
/// [`DisplayService`] core. Contains no business logic of its own — every
/// handler decodes its request, calls into `state`, and encodes the
/// response (see `service.rs`).
pub struct DisplayGrpc {
    state: Arc<DisplayService>,
    started_at: Instant,
}

impl DisplayGrpc {
    pub fn new(state: Arc<DisplayService>) -> Self {
        Self { state, started_at: Instant::now() }
    }

    /// Build a [`tonic`] router for this service, wrapping it in the
    /// Bearer-token interceptor when an auth token is configured.
    pub fn into_router(self, auth_token: Option<String>) -> tonic::transport::server::Router {
        let mut server = tonic::transport::Server::builder();
        if let Some(token) = auth_token {
            let interceptor = AuthInterceptor { token };
            server.add_service(proto::display_server::DisplayServer::with_interceptor(self, interceptor))
        } else {
            server.add_service(proto::display_server::DisplayServer::new(self))
        }
    }
}

type GrpcStream<T> =
    std::pin::Pin<Box<dyn tokio_stream::Stream<Item = Result<T, tonic::Status>> + Send + 'static>>;
