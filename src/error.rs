use thiserror::Error;

#[derive(Error, Debug)]
pub enum PhotoSearchError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("{0}のAPIキーが設定されていません。`photo-search config` で設定してください")]
    MissingApiKey(String),

    #[error("{provider}に接続できません: {reason}")]
    ProviderUnavailable { provider: String, reason: String },

    #[error("画像の取得に失敗: {0}")]
    FetchFailed(String),

    #[error("画像が見つかりませんでした")]
    NoResults,

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("HTTPエラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("ZIP生成エラー: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("CLI実行エラー: {0}")]
    CliExecution(String),
}

pub type Result<T> = std::result::Result<T, PhotoSearchError>;
