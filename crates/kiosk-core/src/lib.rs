// SPDX-License-Identifier: Apache-2.0

//! In-memory entity store and publish/subscribe core for the kiosk display
//! service. Transport-agnostic: no gRPC, HTTP, or proto dependency lives
//! here. See `kiosk-server` for the transport that wraps [`DisplayService`].

pub mod assignment;
pub mod entity;
pub mod error;
pub mod hub;
pub mod service;

pub use entity::{Kiosk, Sign};
pub use error::{CoreError, CoreResult};
pub use service::{DisplayService, Subscription, DEFAULT_SESSION_LIFETIME};
