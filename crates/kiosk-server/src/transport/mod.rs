// SPDX-License-Identifier: Apache-2.0

//! Transport layer: gRPC (the real surface) plus a health-only HTTP
//! listener and the shared Bearer-token auth interceptor.

pub mod auth;
pub mod grpc;
pub mod health;
