//! 選択ストア
//!
//! 1回の検索ラウンドでユーザーがマークしたレコードを保持する。
//! キーはプロバイダ＋ラウンド内の位置。ストアの寿命は1ラウンドで、
//! 新しい検索を始めるときは必ず作り直す（古い選択を持ち越さない）。

use crate::provider::{ImageRecord, Provider};
use std::collections::BTreeMap;

/// 検索ラウンド内で1件の結果を一意に指すキー
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SelectionKey {
    pub provider: Provider,
    pub index: usize,
}

impl SelectionKey {
    pub fn new(provider: Provider, index: usize) -> Self {
        Self { provider, index }
    }
}

impl std::fmt::Display for SelectionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}", self.provider.id(), self.index)
    }
}

/// 選択中レコードの集合（キー順 = エクスポート順）
#[derive(Debug, Default)]
pub struct SelectionStore {
    entries: BTreeMap<SelectionKey, ImageRecord>,
}

impl SelectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加（同じキーは最新のレコードで上書き）
    pub fn insert(&mut self, key: SelectionKey, record: ImageRecord) {
        self.entries.insert(key, record);
    }

    /// 選択状態を反転。反転後に選択されていればtrue
    pub fn toggle(&mut self, key: SelectionKey, record: ImageRecord) -> bool {
        if self.entries.remove(&key).is_some() {
            false
        } else {
            self.entries.insert(key, record);
            true
        }
    }

    pub fn contains(&self, key: &SelectionKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// 現在のラウンドの結果を全件選択する
    ///
    /// キーはプロバイダごとの出現順から導出するので、
    /// 渡すスライスは必ず現在表示中の結果にすること。
    pub fn select_all(&mut self, current_results: &[ImageRecord]) {
        for (key, record) in keyed(current_results) {
            self.entries.insert(key, record.clone());
        }
    }

    /// キー順（プロバイダ順→位置順）で選択中レコードを返す
    pub fn values(&self) -> Vec<&ImageRecord> {
        self.entries.values().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 検索結果にラウンド内キーを振る（プロバイダごとに0起点の連番）
pub fn keyed(results: &[ImageRecord]) -> Vec<(SelectionKey, &ImageRecord)> {
    let mut counters: BTreeMap<Provider, usize> = BTreeMap::new();

    results
        .iter()
        .map(|record| {
            let index = counters.entry(record.provider).or_insert(0);
            let key = SelectionKey::new(record.provider, *index);
            *index += 1;
            (key, record)
        })
        .collect()
}
