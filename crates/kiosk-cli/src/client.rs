// SPDX-License-Identifier: Apache-2.0

//! Connects to a `kioskd` instance and attaches the credential headers the
//! original `k` tool carries: `x-api-key` from `KIOSK_APIKEY` and a
//! `Bearer` `Authorization` header from `KIOSK_TOKEN`. Both are optional and
//! independent — either, both, or neither may be set.

use kiosk_server::transport::grpc::proto::display_client::DisplayClient;
use tonic::service::Interceptor;
use tonic::transport::Channel;
use tonic::Request;

use crate::config::ConnectionArgs;

#[derive(Clone)]
pub struct CredentialInterceptor {
    api_key: Option<String>,
    token: Option<String>,
}

impl Interceptor for CredentialInterceptor {
    fn call(&mut self, mut req: Request<()>) -> Result<Request<()>, tonic::Status> {
        if let Some(api_key) = &self.api_key {
            let value = api_key
                .parse()
                .map_err(|_| tonic::Status::invalid_argument("KIOSK_APIKEY is not a valid header value"))?;
            req.metadata_mut().insert("x-api-key", value);
        }
        if let Some(token) = &self.token {
            let value = format!("Bearer {token}")
                .parse()
                .map_err(|_| tonic::Status::invalid_argument("KIOSK_TOKEN is not a valid header value"))?;
            req.metadata_mut().insert("authorization", value);
        }
        Ok(req)
    }
}

pub type Client = DisplayClient<tonic::service::interceptor::InterceptedService<Channel, CredentialInterceptor>>;

/// Connect to the server named by `conn`, attaching credential headers to
/// every subsequent RPC.
pub async fn connect(conn: &ConnectionArgs) -> anyhow::Result<Client> {
    let endpoint = conn.endpoint();
    println!("from {endpoint}");
    let channel = Channel::from_shared(endpoint)?.connect().await?;
    let interceptor = CredentialInterceptor { api_key: conn.api_key.clone(), token: conn.token.clone() };
    Ok(DisplayClient::with_interceptor(channel, interceptor))
}
