// SPDX-License-Identifier: Apache-2.0

//! Server discovery: host/port/credentials sourced from the environment,
//! mirroring the original `k` tool's `KIOSK_SERVER`/`KIOSK_PORT`/
//! `KIOSK_APIKEY`/`KIOSK_TOKEN` variables.

use clap::Args;

#[derive(Debug, Args)]
pub struct ConnectionArgs {
    /// Kiosk server host.
    #[arg(long, env = "KIOSK_SERVER", default_value = "localhost", global = true)]
    pub server: String,

    /// Kiosk server port.
    #[arg(long, env = "KIOSK_PORT", default_value = "8080", global = true)]
    pub port: u16,

    /// API key, sent as the `x-api-key` header.
    #[arg(long, env = "KIOSK_APIKEY", global = true)]
    pub api_key: Option<String>,

    /// Bearer token, sent as `Authorization: Bearer <token>`.
    #[arg(long, env = "KIOSK_TOKEN", global = true)]
    pub token: Option<String>,
}

impl ConnectionArgs {
    pub fn endpoint(&self) -> String {
        format!("http://{}:{}", self.server, self.port)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
