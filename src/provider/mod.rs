//! 画像検索プロバイダ
//!
//! 3つの外部API（Unsplash / Pixabay / Pexels）を叩き、
//! スキーマの異なるレスポンスを統一の `ImageRecord` へマップする。
//! 失敗したプロバイダは警告に変換し、他のプロバイダの結果には影響させない。

pub mod pexels;
pub mod pixabay;
pub mod unsplash;

use crate::config::Config;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 1プロバイダあたりの取得件数の範囲
pub const MIN_COUNT: usize = 1;
pub const MAX_COUNT: usize = 20;

/// 取得件数を [MIN_COUNT, MAX_COUNT] に丸める
pub fn clamp_count(count: usize) -> usize {
    count.clamp(MIN_COUNT, MAX_COUNT)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Unsplash,
    Pixabay,
    Pexels,
}

impl Provider {
    /// 表示順（検索結果のマージ順もこの順）
    pub const ALL: [Provider; 3] = [Provider::Unsplash, Provider::Pixabay, Provider::Pexels];

    pub fn label(&self) -> &'static str {
        match self {
            Provider::Unsplash => "Unsplash",
            Provider::Pixabay => "Pixabay",
            Provider::Pexels => "Pexels",
        }
    }

    /// SelectionKey等で使う小文字ID
    pub fn id(&self) -> &'static str {
        match self {
            Provider::Unsplash => "unsplash",
            Provider::Pixabay => "pixabay",
            Provider::Pexels => "pexels",
        }
    }

    /// APIキーの環境変数名（設定ファイルより優先）
    pub fn key_env(&self) -> &'static str {
        match self {
            Provider::Unsplash => "UNSPLASH_ACCESS_KEY",
            Provider::Pixabay => "PIXABAY_API_KEY",
            Provider::Pexels => "PEXELS_API_KEY",
        }
    }
}

impl std::str::FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "unsplash" => Ok(Provider::Unsplash),
            "pixabay" => Ok(Provider::Pixabay),
            "pexels" => Ok(Provider::Pexels),
            _ => Err(format!("Unknown provider: {}. Use unsplash, pixabay, or pexels", s)),
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// プロバイダ横断の統一画像レコード
///
/// プロバイダレスポンスから構築された後は不変。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageRecord {
    pub provider: Provider,
    pub thumbnail_url: String,
    pub full_url: String,
    pub attribution_url: String,
    pub author: Option<String>,
}

impl ImageRecord {
    /// 表示・ファイル名用の作者名（未設定は "unknown"）
    pub fn author_label(&self) -> &str {
        self.author
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or("unknown")
    }
}

/// 検索に失敗したプロバイダの警告（致命的ではない）
#[derive(Debug, Clone)]
pub struct ProviderWarning {
    pub provider: Provider,
    pub message: String,
}

/// 1回の検索ラウンドの結果
#[derive(Debug, Default)]
pub struct SearchRound {
    /// 表示順（Provider::ALL順、プロバイダ内はAPIの返却順）にマージ済み
    pub records: Vec<ImageRecord>,
    pub warnings: Vec<ProviderWarning>,
}

impl SearchRound {
    /// 全プロバイダが0件
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn count_for(&self, provider: Provider) -> usize {
        self.records.iter().filter(|r| r.provider == provider).count()
    }
}

/// 3プロバイダ共有の検索クライアント
pub struct ProviderClient {
    http: reqwest::Client,
    config: Config,
    unsplash_base: String,
    pixabay_base: String,
    pexels_base: String,
}

impl ProviderClient {
    pub fn new(config: Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            http,
            config,
            unsplash_base: unsplash::BASE_URL.to_string(),
            pixabay_base: pixabay::BASE_URL.to_string(),
            pexels_base: pexels::BASE_URL.to_string(),
        })
    }

    /// ベースURLを差し替えて構築（モックサーバ向け）
    pub fn with_base_urls(
        config: Config,
        unsplash_base: &str,
        pixabay_base: &str,
        pexels_base: &str,
    ) -> Result<Self> {
        let mut client = Self::new(config)?;
        client.unsplash_base = unsplash_base.to_string();
        client.pixabay_base = pixabay_base.to_string();
        client.pexels_base = pexels_base.to_string();
        Ok(client)
    }

    /// 画像取得にも使う共有HTTPクライアント（タイムアウト設定済み）
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// 1プロバイダを検索。非2xx・通信エラー・キー未設定はErrで返す
    pub async fn search(
        &self,
        provider: Provider,
        keyword: &str,
        count: usize,
    ) -> Result<Vec<ImageRecord>> {
        let count = clamp_count(count);
        let api_key = self.config.api_key(provider)?;

        let mut records = match provider {
            Provider::Unsplash => {
                unsplash::search(&self.http, &self.unsplash_base, &api_key, keyword, count).await?
            }
            Provider::Pixabay => {
                pixabay::search(&self.http, &self.pixabay_base, &api_key, keyword, count).await?
            }
            Provider::Pexels => {
                pexels::search(&self.http, &self.pexels_base, &api_key, keyword, count).await?
            }
        };

        // APIが件数指定を無視しても上限は守る
        records.truncate(count);
        Ok(records)
    }

    /// 3プロバイダを並行検索し、失敗は警告として畳み込む
    pub async fn search_all(&self, keyword: &str, count: usize) -> SearchRound {
        let (unsplash, pixabay, pexels) = tokio::join!(
            self.search(Provider::Unsplash, keyword, count),
            self.search(Provider::Pixabay, keyword, count),
            self.search(Provider::Pexels, keyword, count),
        );

        let mut round = SearchRound::default();
        let outcomes = [
            (Provider::Unsplash, unsplash),
            (Provider::Pixabay, pixabay),
            (Provider::Pexels, pexels),
        ];

        for (provider, outcome) in outcomes {
            match outcome {
                Ok(mut records) => round.records.append(&mut records),
                Err(e) => round.warnings.push(ProviderWarning {
                    provider,
                    message: e.to_string(),
                }),
            }
        }

        round
    }
}
