use std::sync::Arc;

use axum::http::StatusCode;
use kiosk_core::DisplayService;

use super::build_health_router;

#[tokio::test]
async fn healthz_reports_serving_and_entity_counts() -> anyhow::Result<()> {
    let service = Arc::new(DisplayService::new());
    service.create_kiosk("lobby".to_owned(), Default::default()).await;
    service.create_sign("A".to_owned(), None, None).await;

    let app = build_health_router(Arc::clone(&service));
    let server = axum_test::TestServer::new(app)?;

    let resp = server.get("/healthz").await;
    resp.assert_status(StatusCode::OK);
    let body = resp.text();
    assert!(body.contains("\"status\":\"serving\""));
    assert!(body.contains("\"kiosk_count\":1"));
    assert!(body.contains("\"sign_count\":1"));
    Ok(())
}

#[tokio::test]
async fn unknown_route_is_not_found() -> anyhow::Result<()> {
    let service = Arc::new(DisplayService::new());
    let app = build_health_router(service);
    let server = axum_test::TestServer::new(app)?;

    let resp = server.get("/nope").await;
    resp.assert_status(StatusCode::NOT_FOUND);
    Ok(())
}
