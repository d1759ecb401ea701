// SPDX-License-Identifier: Apache-2.0

//! `k` — command-line client for the kiosk display orchestration service.

pub mod client;
pub mod commands;
pub mod config;
