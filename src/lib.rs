//! ストック画像検索・選択ダウンロードツール
//!
//! 3つのストックフォトAPI（Unsplash / Pixabay / Pexels）を横断検索し、
//! 選択した画像を帰属メタデータ付きZIPとしてエクスポートする。

pub mod archive;
pub mod cli;
pub mod config;
pub mod error;
pub mod picker;
pub mod provider;
pub mod selection;

pub use archive::{build_archive, fetch_entries, write_archive, ArchiveEntry};
pub use config::Config;
pub use error::{PhotoSearchError, Result};
pub use provider::{ImageRecord, Provider, ProviderClient, SearchRound};
pub use selection::{SelectionKey, SelectionStore};
