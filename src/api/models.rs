use serde::{Deserialize, Serialize};

use crate::types::Point;

/// Last two anchors and the cursor, host CRS
#[derive(Debug, Serialize, Deserialize)]
pub struct PerpendicularRequest {
    pub last: Point,
    pub penultimate: Point,
    pub cursor: Point,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AzimuthResponse {
    pub azimuth: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DestinationResponse {
    pub point: Point,
    pub azimuth: f64,
    pub distance: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FallbackRequest {
    pub last: Point,
    pub cursor: Point,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FallbackResponse {
    pub path: [Point; 2],
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SnapBody {
    pub anchors: Vec<Point>,
    pub cursor: Point,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
