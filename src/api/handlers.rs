use std::io;
use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use axum::extract::multipart::{Multipart, MultipartError};
use log::{debug, error};

use crate::batch::run_batch;
use crate::config::SnapConfig;
use crate::error::Error;
use crate::snap::{SnapOutcome, Snapper};
use super::models::*;

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(e: Error) -> ApiError {
    let status = match e {
        Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    error!("Request failed: {}", e);
    (status, Json(ErrorResponse { error: e.to_string() }))
}

fn bad_request(message: &str) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}

fn invalid_multipart(e: MultipartError) -> ApiError {
    bad_request(&format!("Invalid multipart upload: {}", e))
}

/// `Proj` handles are not `Sync`, so each request builds its own snapper from the shared,
/// already validated config.
fn snapper(config: &SnapConfig) -> Result<Snapper, ApiError> {
    Snapper::from_config(config).map_err(api_error)
}

pub async fn perpendicular_azimuth(
    State(config): State<Arc<SnapConfig>>,
    Json(req): Json<PerpendicularRequest>,
) -> Result<Json<AzimuthResponse>, ApiError> {
    let azimuth = snapper(&config)?
        .perpendicular_azimuth(req.last, req.penultimate, req.cursor)
        .map_err(api_error)?;

    Ok(Json(AzimuthResponse { azimuth }))
}

pub async fn perpendicular_destination(
    State(config): State<Arc<SnapConfig>>,
    Json(req): Json<PerpendicularRequest>,
) -> Result<Json<DestinationResponse>, ApiError> {
    let destination = snapper(&config)?
        .perpendicular_destination(req.last, req.penultimate, req.cursor)
        .map_err(api_error)?;

    Ok(Json(DestinationResponse {
        point: destination.point,
        azimuth: destination.azimuth,
        distance: destination.distance,
    }))
}

pub async fn fallback_path(
    State(config): State<Arc<SnapConfig>>,
    Json(req): Json<FallbackRequest>,
) -> Result<Json<FallbackResponse>, ApiError> {
    let path = snapper(&config)?.fallback_path(req.last, req.cursor);
    Ok(Json(FallbackResponse { path }))
}

pub async fn snap(
    State(config): State<Arc<SnapConfig>>,
    Json(req): Json<SnapBody>,
) -> Result<Json<SnapOutcome>, ApiError> {
    let outcome = snapper(&config)?
        .snap(&req.anchors, req.cursor)
        .map_err(api_error)?;

    Ok(Json(outcome))
}

pub async fn upload_batch(
    State(config): State<Arc<SnapConfig>>,
    mut multipart: Multipart,
) -> Result<Response, ApiError> {
    let mut csv_data: Option<Vec<u8>> = None;

    while let Some(field) = multipart.next_field().await.map_err(invalid_multipart)? {
        if field.name() == Some("csv") {
            csv_data = Some(field.bytes().await.map_err(invalid_multipart)?.to_vec());
        }
    }

    let csv_data = csv_data.ok_or_else(|| bad_request("Missing CSV file"))?;
    debug!("Batch upload of {} bytes", csv_data.len());

    let output = tokio::task::spawn_blocking(move || -> crate::Result<Vec<u8>> {
        let report = run_batch(&config, csv_data.as_slice());
        let mut output = Vec::with_capacity(report.rows.len() * 48);
        report.write_csv(&mut output)?;
        Ok(output)
    })
    .await
    .map_err(|e| api_error(Error::Io(io::Error::new(io::ErrorKind::Other, e.to_string()))))?
    .map_err(api_error)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"snap_results.csv\""),
        ],
        output,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::super::create_router;
    use super::*;
    use crate::projection::WebMercator;
    use crate::projection::Reprojection;
    use crate::types::Point;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    async fn post_json(uri: &str, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
        let response = create_router(SnapConfig::default()).unwrap()
            .oneshot(
                Request::post(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn host(lat: f64, lon: f64) -> serde_json::Value {
        let p = WebMercator.from_geographic(Point::new(lon, lat)).unwrap();
        serde_json::json!({ "x": p.x, "y": p.y })
    }

    #[tokio::test]
    async fn test_azimuth_endpoint() {
        let (status, body) = post_json(
            "/api/perpendicular/azimuth",
            serde_json::json!({
                "last": host(10.0, 10.0),
                "penultimate": host(9.0, 9.0),
                "cursor": host(10.0, 11.0),
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let azimuth = body["azimuth"].as_f64().unwrap();
        assert!((azimuth.rem_euclid(360.0) - 135.0).abs() < 2.0);
    }

    #[tokio::test]
    async fn test_destination_endpoint() {
        let (status, body) = post_json(
            "/api/perpendicular/destination",
            serde_json::json!({
                "last": host(10.0, 10.0),
                "penultimate": host(9.0, 9.0),
                "cursor": host(10.0, 11.0),
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let response: DestinationResponse = serde_json::from_value(body).unwrap();
        assert!(response.distance > 100_000.0);
        assert!(response.point.x > 0.0 && response.point.y > 0.0);
    }

    #[tokio::test]
    async fn test_fallback_endpoint() {
        let (status, body) = post_json(
            "/api/fallback",
            serde_json::json!({ "last": {"x": 0.0, "y": 0.0}, "cursor": {"x": 1.0, "y": -1.0} }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let response: FallbackResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.path, [Point::new(0.0, 0.0), Point::new(0.0, -1.0)]);
    }

    #[tokio::test]
    async fn test_snap_without_anchors_is_bad_request() {
        let (status, body) = post_json(
            "/api/snap",
            serde_json::json!({ "anchors": [], "cursor": {"x": 1.0, "y": 1.0} }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("anchor"));
    }

    #[tokio::test]
    async fn test_snap_endpoint_modes() {
        let (_, body) = post_json(
            "/api/snap",
            serde_json::json!({ "anchors": [{"x": 0.0, "y": 0.0}], "cursor": {"x": 2.0, "y": 3.0} }),
        )
        .await;
        assert_eq!(body["mode"], "fallback");
        assert_eq!(body["path"][1]["x"], 2.0);
        assert_eq!(body["path"][1]["y"], 0.0);

        let (_, body) = post_json(
            "/api/snap",
            serde_json::json!({ "anchors": [host(9.0, 9.0), host(10.0, 10.0)], "cursor": host(10.0, 11.0) }),
        )
        .await;
        assert_eq!(body["mode"], "perpendicular");
        assert!(body["azimuth"].is_number());
    }

    #[tokio::test]
    async fn test_batch_upload() {
        let csv = "last_x,last_y,penultimate_x,penultimate_y,cursor_x,cursor_y,name\n0,0,,,1,-1,first\n";
        let body = format!(
            "--BOUNDARY\r\nContent-Disposition: form-data; name=\"csv\"; filename=\"in.csv\"\r\nContent-Type: text/csv\r\n\r\n{}\r\n--BOUNDARY--\r\n",
            csv
        );

        let response = create_router(SnapConfig::default()).unwrap()
            .oneshot(
                Request::post("/api/batch")
                    .header(header::CONTENT_TYPE, "multipart/form-data; boundary=BOUNDARY")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/csv");

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(text.contains("# Successful: 1"));
        assert!(text.contains("first,fallback,0.0,-1.0,"));
    }

    #[tokio::test]
    async fn test_batch_without_csv_field() {
        let body = "--BOUNDARY\r\nContent-Disposition: form-data; name=\"other\"\r\n\r\nx\r\n--BOUNDARY--\r\n";

        let response = create_router(SnapConfig::default()).unwrap()
            .oneshot(
                Request::post("/api/batch")
                    .header(header::CONTENT_TYPE, "multipart/form-data; boundary=BOUNDARY")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_batch_truncated_upload_is_bad_request() {
        let body = "--BOUNDARY\r\nContent-Disposition: form-data; name=\"csv\"; filename=\"in.csv\"\r\n\r\nlast_x,last_y";

        let response = create_router(SnapConfig::default()).unwrap()
            .oneshot(
                Request::post("/api/batch")
                    .header(header::CONTENT_TYPE, "multipart/form-data; boundary=BOUNDARY")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(body["error"].as_str().unwrap().contains("multipart"));
    }

    #[test]
    fn test_router_rejects_invalid_config() {
        let mut config = SnapConfig::default();
        config.server.bind = String::new();
        assert!(matches!(create_router(config), Err(Error::Config(_))));

        let config = SnapConfig {
            host_crs: "EPSG:2180".to_string(),
            ..SnapConfig::default()
        };
        assert!(matches!(create_router(config), Err(Error::Config(_))));
    }

    #[test]
    fn test_router_rejects_unknown_crs() {
        let config = SnapConfig {
            backend: crate::config::Backend::Proj,
            host_crs: "EPSG:999999".to_string(),
            ..SnapConfig::default()
        };
        assert!(create_router(config).is_err());
    }
}
