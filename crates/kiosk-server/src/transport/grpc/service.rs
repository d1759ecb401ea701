// SPDX-License-Identifier: Apache-2.0

//! `Display` trait implementation — all gRPC RPC handlers. Each handler
//! decodes its request, calls into the core, and encodes the response; no
//! business logic lives here (see `convert.rs` and `kiosk_core::service`).

use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tonic::{Request, Response, Status};
use tracing::debug;

use super::convert::{
    core_error_to_status, kiosk_to_proto, proto_to_kiosk_fields, proto_to_sign_fields,
    require_positive_id, sign_to_proto,
};
use super::{proto, DisplayGrpc, GrpcStream};

#[tonic::async_trait]
impl proto::display_server::Display for DisplayGrpc {
    async fn create_kiosk(
        &self,
        request: Request<proto::Kiosk>,
    ) -> Result<Response<proto::Kiosk>, Status> {
        let (name, attributes) = proto_to_kiosk_fields(request.into_inner());
        let kiosk = self.state.create_kiosk(name, attributes).await;
        Ok(Response::new(kiosk_to_proto(&kiosk)))
    }

    async fn list_kiosks(
        &self,
        _request: Request<proto::Empty>,
    ) -> Result<Response<proto::ListKiosksResponse>, Status> {
        let kiosks = self.state.list_kiosks().await;
        Ok(Response::new(proto::ListKiosksResponse {
            kiosks: kiosks.iter().map(kiosk_to_proto).collect(),
        }))
    }

    async fn get_kiosk(
        &self,
        request: Request<proto::GetKioskRequest>,
    ) -> Result<Response<proto::Kiosk>, Status> {
        let id = require_positive_id(request.into_inner().id, "id").map_err(core_error_to_status)?;
        let kiosk = self.state.get_kiosk(id).await.map_err(core_error_to_status)?;
        Ok(Response::new(kiosk_to_proto(&kiosk)))
    }

    async fn delete_kiosk(
        &self,
        request: Request<proto::DeleteKioskRequest>,
    ) -> Result<Response<proto::Empty>, Status> {
        let id = require_positive_id(request.into_inner().id, "id").map_err(core_error_to_status)?;
        self.state.delete_kiosk(id).await.map_err(core_error_to_status)?;
        Ok(Response::new(proto::Empty {}))
    }

    async fn create_sign(
        &self,
        request: Request<proto::Sign>,
    ) -> Result<Response<proto::Sign>, Status> {
        let (name, text, image) = proto_to_sign_fields(request.into_inner());
        let sign = self.state.create_sign(name, text, image).await;
        Ok(Response::new(sign_to_proto(&sign)))
    }

    async fn list_signs(
        &self,
        _request: Request<proto::Empty>,
    ) -> Result<Response<proto::ListSignsResponse>, Status> {
        let signs = self.state.list_signs().await;
        Ok(Response::new(proto::ListSignsResponse { signs: signs.iter().map(sign_to_proto).collect() }))
    }

    async fn get_sign(
        &self,
        request: Request<proto::GetSignRequest>,
    ) -> Result<Response<proto::Sign>, Status> {
        let id = require_positive_id(request.into_inner().id, "id").map_err(core_error_to_status)?;
        let sign = self.state.get_sign(id).await.map_err(core_error_to_status)?;
        Ok(Response::new(sign_to_proto(&sign)))
    }

    async fn delete_sign(
        &self,
        request: Request<proto::DeleteSignRequest>,
    ) -> Result<Response<proto::Empty>, Status> {
        let id = require_positive_id(request.into_inner().id, "id").map_err(core_error_to_status)?;
        self.state.delete_sign(id).await.map_err(core_error_to_status)?;
        Ok(Response::new(proto::Empty {}))
    }

    async fn set_sign_for_kiosks(
        &self,
        request: Request<proto::SetSignForKiosksRequest>,
    ) -> Result<Response<proto::Empty>, Status> {
        let req = request.into_inner();
        let sign_id =
            require_positive_id(req.sign_id, "sign_id").map_err(core_error_to_status)?;
        let mut kiosk_ids = Vec::with_capacity(req.kiosk_ids.len());
        for id in req.kiosk_ids {
            kiosk_ids.push(require_positive_id(id, "kiosk_ids").map_err(core_error_to_status)?);
        }
        self.state.set_sign_for_kiosks(sign_id, kiosk_ids).await;
        Ok(Response::new(proto::Empty {}))
    }

    async fn get_sign_for_kiosk(
        &self,
        request: Request<proto::GetSignForKioskRequest>,
    ) -> Result<Response<proto::GetSignIdResponse>, Status> {
        let kiosk_id =
            require_positive_id(request.into_inner().kiosk_id, "kiosk_id").map_err(core_error_to_status)?;
        let sign_id = self.state.get_sign_for_kiosk(kiosk_id).await.map_err(core_error_to_status)?;
        Ok(Response::new(proto::GetSignIdResponse { sign_id: sign_id as i32 }))
    }

    type GetSignsForKioskStream = GrpcStream<proto::GetSignIdResponse>;

    async fn get_signs_for_kiosk(
        &self,
        request: Request<proto::GetSignForKioskRequest>,
    ) -> Result<Response<Self::GetSignsForKioskStream>, Status> {
        let kiosk_id =
            require_positive_id(request.into_inner().kiosk_id, "kiosk_id").map_err(core_error_to_status)?;
        let mut subscription = self.state.subscribe(kiosk_id).await.map_err(core_error_to_status)?;

        let (tx, rx) = mpsc::channel(1);
        tokio::spawn(async move {
            loop {
                match subscription.next().await {
                    Some(sign_id) => {
                        let message = proto::GetSignIdResponse { sign_id: sign_id as i32 };
                        if tx.send(Ok(message)).await.is_err() {
                            debug!(kiosk_id, "receiver dropped, subscriber exiting");
                            break;
                        }
                    }
                    None => {
                        debug!(kiosk_id, "session lifetime expired, closing stream");
                        break;
                    }
                }
            }
            subscription.finish().await;
        });

        Ok(Response::new(Box::pin(ReceiverStream::new(rx))))
    }

    async fn get_health(
        &self,
        _request: Request<proto::GetHealthRequest>,
    ) -> Result<Response<proto::GetHealthResponse>, Status> {
        let kiosk_count = self.state.list_kiosks().await.len();
        let sign_count = self.state.list_signs().await.len();
        let uptime_secs = self.started_at.elapsed().as_secs();
        Ok(Response::new(proto::GetHealthResponse {
            status: "serving".to_owned(),
            uptime_secs,
            kiosk_count: kiosk_count as u32,
            sign_count: sign_count as u32,
        }))
    }
}

