//! Pexels検索アダプタ
//!
//! GET /v1/search、キーは `Authorization` ヘッダでそのまま渡す。

use super::{ImageRecord, Provider};
use crate::error::{PhotoSearchError, Result};
use serde::Deserialize;

pub const BASE_URL: &str = "https://api.pexels.com";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    photos: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
struct Photo {
    url: String,
    photographer: Option<String>,
    src: PhotoSrc,
}

#[derive(Debug, Deserialize)]
struct PhotoSrc {
    original: String,
    medium: String,
}

pub async fn search(
    http: &reqwest::Client,
    base_url: &str,
    api_key: &str,
    keyword: &str,
    count: usize,
) -> Result<Vec<ImageRecord>> {
    let url = format!("{}/v1/search", base_url);
    let per_page = count.to_string();

    let response = http
        .get(&url)
        .header("Authorization", api_key)
        .query(&[("query", keyword), ("per_page", per_page.as_str())])
        .send()
        .await
        .map_err(|e| unavailable(e.to_string()))?;

    if !response.status().is_success() {
        return Err(unavailable(format!("HTTP {}", response.status().as_u16())));
    }

    let body: SearchResponse = response
        .json()
        .await
        .map_err(|e| unavailable(format!("レスポンス解析失敗: {}", e)))?;

    Ok(to_records(body))
}

fn to_records(body: SearchResponse) -> Vec<ImageRecord> {
    body.photos
        .into_iter()
        .map(|photo| ImageRecord {
            provider: Provider::Pexels,
            thumbnail_url: photo.src.medium,
            full_url: photo.src.original,
            attribution_url: photo.url,
            author: photo.photographer.filter(|name| !name.trim().is_empty()),
        })
        .collect()
}

fn unavailable(reason: String) -> PhotoSearchError {
    PhotoSearchError::ProviderUnavailable {
        provider: Provider::Pexels.label().to_string(),
        reason,
    }
}
