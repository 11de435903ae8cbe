use axum::Json;
use serde::{Deserialize, Serialize};

pub async fn health() -> Json<PoetPediaHealthResp> {
    let resp = PoetPediaHealthResp {
        status: "OK".to_string(),
    };
    Json(resp)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoetPediaHealthResp {
    pub status: String,
}
