//! Pixabay検索アダプタ
//!
//! GET /api/、キーはクエリパラメータで渡す。

use super::{ImageRecord, Provider};
use crate::error::{PhotoSearchError, Result};
use serde::Deserialize;

pub const BASE_URL: &str = "https://pixabay.com";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
struct Hit {
    #[serde(rename = "webformatURL")]
    webformat_url: String,
    #[serde(rename = "largeImageURL")]
    large_image_url: Option<String>,
    #[serde(rename = "pageURL")]
    page_url: String,
    user: Option<String>,
}

pub async fn search(
    http: &reqwest::Client,
    base_url: &str,
    api_key: &str,
    keyword: &str,
    count: usize,
) -> Result<Vec<ImageRecord>> {
    let url = format!("{}/api/", base_url);
    let per_page = count.to_string();

    let response = http
        .get(&url)
        .query(&[
            ("key", api_key),
            ("q", keyword),
            ("per_page", per_page.as_str()),
            ("image_type", "photo"),
        ])
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
    body.hits
        .into_iter()
        .map(|hit| {
            // フル解像度URLはAPIプランによっては返らないのでwebformatへフォールバック
            let full_url = hit
                .large_image_url
                .unwrap_or_else(|| hit.webformat_url.clone());

            ImageRecord {
                provider: Provider::Pixabay,
                thumbnail_url: hit.webformat_url,
                full_url,
                attribution_url: hit.page_url,
                author: hit.user,
            }
        })
        .collect()
}

fn unavailable(reason: String) -> PhotoSearchError {
    PhotoSearchError::ProviderUnavailable {
        provider: Provider::Pixabay.label().to_string(),
        reason,
    }
}
