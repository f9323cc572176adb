//! 対話式選択モジュール
//!
//! 検索ラウンドの結果を一覧表示し、dialoguerのMultiSelectで
//! ダウンロード対象をマークする。ストアはラウンドごとに作り直す。

use crate::error::{PhotoSearchError, Result};
use crate::provider::{ImageRecord, SearchRound};
use crate::selection::{keyed, SelectionKey, SelectionStore};
use dialoguer::MultiSelect;

/// 結果1件の表示ラベル（例: "Unsplash #1 - Jane Doe"）
pub fn result_label(key: &SelectionKey, record: &ImageRecord) -> String {
    format!(
        "{} #{} - {}",
        record.provider.label(),
        key.index + 1,
        record.author_label()
    )
}

/// MultiSelectで選択させ、選択済みストアを返す
pub fn select_interactive(round: &SearchRound) -> Result<SelectionStore> {
    let keyed_results = keyed(&round.records);
    let labels: Vec<String> = keyed_results
        .iter()
        .map(|(key, record)| result_label(key, record))
        .collect();

    let chosen = MultiSelect::new()
        .with_prompt("ダウンロードする画像を選択（Space:切替 Enter:確定）")
        .items(&labels)
        .interact()
        .map_err(|e| PhotoSearchError::CliExecution(e.to_string()))?;

    let mut store = SelectionStore::new();
    for index in chosen {
        let (key, record) = &keyed_results[index];
        store.insert(*key, (*record).clone());
    }

    Ok(store)
}

/// 現在のラウンドを全件選択したストアを返す
pub fn select_all(round: &SearchRound) -> SelectionStore {
    let mut store = SelectionStore::new();
    store.select_all(&round.records);
    store
}

/// `--select 1,3,5` 形式（表示順の1起点番号）をパースしてストアを作る
pub fn select_by_ordinals(round: &SearchRound, list: &str) -> Result<SelectionStore> {
    let keyed_results = keyed(&round.records);
    let mut store = SelectionStore::new();

    for part in list.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }

        let ordinal: usize = part.parse().map_err(|_| {
            PhotoSearchError::CliExecution(format!("不正な番号です: {}", part))
        })?;

        if ordinal == 0 || ordinal > keyed_results.len() {
            return Err(PhotoSearchError::CliExecution(format!(
                "番号が範囲外です: {} (1〜{})",
                ordinal,
                keyed_results.len()
            )));
        }

        let (key, record) = &keyed_results[ordinal - 1];
        store.insert(*key, (*record).clone());
    }

    Ok(store)
}
