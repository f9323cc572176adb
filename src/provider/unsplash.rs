//! Unsplash検索アダプタ
//!
//! GET /search/photos、キーは `Authorization: Client-ID <key>` ヘッダで渡す。

use super::{ImageRecord, Provider};
use crate::error::{PhotoSearchError, Result};
use serde::Deserialize;

pub const BASE_URL: &str = "https://api.unsplash.com";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<Photo>,
}

#[derive(Debug, Deserialize)]
struct Photo {
    urls: Urls,
    links: Links,
    user: Option<User>,
}

#[derive(Debug, Deserialize)]
struct Urls {
    small: String,
    full: String,
}

#[derive(Debug, Deserialize)]
struct Links {
    html: String,
}

#[derive(Debug, Deserialize)]
struct User {
    name: Option<String>,
}

pub async fn search(
    http: &reqwest::Client,
    base_url: &str,
    api_key: &str,
    keyword: &str,
    count: usize,
) -> Result<Vec<ImageRecord>> {
    let url = format!("{}/search/photos", base_url);
    let per_page = count.to_string();

    let response = http
        .get(&url)
        .header("Authorization", format!("Client-ID {}", api_key))
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
    body.results
        .into_iter()
        .map(|photo| ImageRecord {
            provider: Provider::Unsplash,
            thumbnail_url: photo.urls.small,
            full_url: photo.urls.full,
            attribution_url: photo.links.html,
            author: photo.user.and_then(|u| u.name),
        })
        .collect()
}

fn unavailable(reason: String) -> PhotoSearchError {
    PhotoSearchError::ProviderUnavailable {
        provider: Provider::Unsplash.label().to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{
        "total": 2,
        "total_pages": 1,
        "results": [
            {
                "id": "abc123",
                "urls": {
                    "raw": "https://images.unsplash.com/raw-1",
                    "full": "https://images.unsplash.com/full-1",
                    "regular": "https://images.unsplash.com/regular-1",
                    "small": "https://images.unsplash.com/small-1",
                    "thumb": "https://images.unsplash.com/thumb-1"
                },
                "links": { "html": "https://unsplash.com/photos/abc123" },
                "user": { "name": "Jane Doe" }
            },
            {
                "id": "def456",
                "urls": {
                    "full": "https://images.unsplash.com/full-2",
                    "small": "https://images.unsplash.com/small-2"
                },
                "links": { "html": "https://unsplash.com/photos/def456" },
                "user": null
            }
        ]
    }"#;

    #[test]
    fn test_parse_search_response() {
        let body: SearchResponse = serde_json::from_str(FIXTURE).unwrap();
        let records = to_records(body);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].provider, Provider::Unsplash);
        assert_eq!(records[0].thumbnail_url, "https://images.unsplash.com/small-1");
        assert_eq!(records[0].full_url, "https://images.unsplash.com/full-1");
        assert_eq!(records[0].attribution_url, "https://unsplash.com/photos/abc123");
        assert_eq!(records[0].author.as_deref(), Some("Jane Doe"));

        // userがnullでも作者なしのレコードになる
        assert!(records[1].author.is_none());
        assert_eq!(records[1].author_label(), "unknown");
    }

    #[test]
    fn test_parse_empty_results() {
        let body: SearchResponse = serde_json::from_str(r#"{"total": 0, "results": []}"#).unwrap();
        assert!(to_records(body).is_empty());
    }
}
