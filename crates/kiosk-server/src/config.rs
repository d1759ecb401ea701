// SPDX-License-Identifier: Apache-2.0

//! Process configuration — flags and environment variables.

use std::time::Duration;

use clap::Parser;

/// Kiosk display orchestration service.
#[derive(Debug, Parser)]
#[command(name = "kioskd", version, about)]
pub struct Config {
    /// Host address to bind to.
    #[arg(long, env = "KIOSKD_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// gRPC port to listen on.
    #[arg(long, env = "KIOSKD_GRPC_PORT", default_value = "8080")]
    pub grpc_port: u16,

    /// Enable TLS on the gRPC listener.
    #[arg(long, env = "KIOSKD_TLS")]
    pub tls: bool,

    /// PEM certificate chain, required when `--tls` is set.
    #[arg(long, env = "KIOSKD_TLS_CERT")]
    pub tls_cert: Option<std::path::PathBuf>,

    /// PEM private key, required when `--tls` is set.
    #[arg(long, env = "KIOSKD_TLS_KEY")]
    pub tls_key: Option<std::path::PathBuf>,

    /// Health-check-only HTTP port. Disabled if unset.
    #[arg(long, env = "KIOSKD_HEALTH_PORT")]
    pub health_port: Option<u16>,

    /// Bearer token required on every gRPC call, if set.
    #[arg(long, env = "KIOSKD_AUTH_TOKEN")]
    pub auth_token: Option<String>,

    /// Streaming subscriber session lifetime, in seconds.
    #[arg(long, env = "KIOSKD_SESSION_LIFETIME_SECS", default_value = "86400")]
    pub session_lifetime_secs: u64,

    /// Log format (json or text).
    #[arg(long, env = "KIOSKD_LOG_FORMAT", default_value = "text")]
    pub log_format: String,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, env = "KIOSKD_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.tls && (self.tls_cert.is_none() || self.tls_key.is_none()) {
            anyhow::bail!("--tls requires both --tls-cert and --tls-key");
        }
        if self.log_format != "json" && self.log_format != "text" {
            anyhow::bail!("--log-format must be 'json' or 'text', got '{}'", self.log_format);
        }
        Ok(())
    }

    pub fn session_lifetime(&self) -> Duration {
        Duration::from_secs(self.session_lifetime_secs)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
