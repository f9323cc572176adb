//! アーカイブ生成モジュール
//!
//! 選択されたレコードのフル解像度画像を取得し、画像＋帰属テキストを
//! 1つのZIPにまとめる。レイアウトは画像1枚につきサイドカー1つ
//! （`image_3_author.jpg` と `image_3_author.txt` のペア）。
//! 取得に失敗した画像はスキップし、ZIPは全件の取得を試みた後に返す。

use crate::error::{PhotoSearchError, Result};
use crate::provider::ImageRecord;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// URLから拡張子を判別できないときに使う
pub const DEFAULT_EXTENSION: &str = "jpg";

/// エクスポート時にだけ生成される一時エントリ
#[derive(Debug, Clone)]
pub struct ArchiveEntry {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub attribution_text: String,
}

impl ArchiveEntry {
    /// 画像と同じステムの帰属テキストファイル名
    pub fn sidecar_name(&self) -> String {
        let stem = self
            .filename
            .rsplit_once('.')
            .map(|(stem, _)| stem)
            .unwrap_or(&self.filename);
        format!("{}.txt", stem)
    }
}

/// 選択レコードを取得してZIPのバイト列を返す
pub async fn build_archive(http: &reqwest::Client, records: &[ImageRecord]) -> Result<Vec<u8>> {
    let entries = fetch_entries(http, records).await;
    write_archive(&entries)
}

/// 各レコードのフル解像度画像を順に取得する
///
/// 失敗したレコードは警告を出してスキップ（エントリもサイドカーも作らない）。
pub async fn fetch_entries(http: &reqwest::Client, records: &[ImageRecord]) -> Vec<ArchiveEntry> {
    let bar = ProgressBar::new(records.len() as u64);
    bar.set_style(
        ProgressStyle::with_template("{bar:30} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let mut entries = Vec::new();

    for (position, record) in records.iter().enumerate() {
        let ordinal = position + 1;
        match fetch_image(http, &record.full_url).await {
            Ok(bytes) => entries.push(make_entry(ordinal, record, bytes)),
            Err(e) => {
                bar.println(format!("⚠ スキップ [{}]: {}", ordinal, e));
            }
        }
        bar.inc(1);
    }

    bar.finish_and_clear();
    entries
}

/// エントリ列からZIPを組み立てる（ネットワークなし）
pub fn write_archive(entries: &[ArchiveEntry]) -> Result<Vec<u8>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for entry in entries {
        writer.start_file(entry.filename.as_str(), options)?;
        writer.write_all(&entry.bytes)?;

        writer.start_file(entry.sidecar_name(), options)?;
        writer.write_all(entry.attribution_text.as_bytes())?;
    }

    Ok(writer.finish()?.into_inner())
}

async fn fetch_image(http: &reqwest::Client, url: &str) -> Result<Vec<u8>> {
    let response = http
        .get(url)
        .send()
        .await
        .map_err(|e| PhotoSearchError::FetchFailed(format!("{}: {}", url, e)))?;

    if !response.status().is_success() {
        return Err(PhotoSearchError::FetchFailed(format!(
            "{}: HTTP {}",
            url,
            response.status().as_u16()
        )));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| PhotoSearchError::FetchFailed(format!("{}: {}", url, e)))?;

    Ok(bytes.to_vec())
}

fn make_entry(ordinal: usize, record: &ImageRecord, bytes: Vec<u8>) -> ArchiveEntry {
    let extension = extension_from_url(&record.full_url);
    let author = sanitize_author(record.author_label());
    let filename = format!("image_{}_{}.{}", ordinal, author, extension);

    let attribution_text = format!(
        "Source: {}\nAuthor: {}\nProvider: {}\n",
        record.attribution_url,
        record.author_label(),
        record.provider.label(),
    );

    ArchiveEntry {
        filename,
        bytes,
        attribution_text,
    }
}

/// URLパス末尾の拡張子を取り出す（クエリ・フラグメントは無視）
///
/// 拡張子らしくない文字列（英数字1〜4文字以外）はデフォルトに倒す。
pub fn extension_from_url(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let name = path.rsplit('/').next().unwrap_or("");

    match name.rsplit_once('.') {
        Some((stem, ext))
            if !stem.is_empty()
                && (1..=4).contains(&ext.len())
                && ext.chars().all(|c| c.is_ascii_alphanumeric()) =>
        {
            ext.to_ascii_lowercase()
        }
        _ => DEFAULT_EXTENSION.to_string(),
    }
}

/// 作者名をファイル名に使える形へ整形する
///
/// 英数字以外の連続は1つの `_` に潰し、先頭・末尾の区切りは落とす。
/// 何も残らなければ "unknown"。
pub fn sanitize_author(name: &str) -> String {
    let mut out = String::new();
    let mut pending_sep = false;

    for c in name.chars() {
        if c.is_alphanumeric() {
            if pending_sep && !out.is_empty() {
                out.push('_');
            }
            out.push(c);
            pending_sep = false;
        } else {
            pending_sep = true;
        }
    }

    if out.is_empty() {
        "unknown".to_string()
    } else {
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::Provider;

    fn record(full_url: &str, author: Option<&str>) -> ImageRecord {
        ImageRecord {
            provider: Provider::Unsplash,
            thumbnail_url: "https://example.com/thumb.jpg".into(),
            full_url: full_url.into(),
            attribution_url: "https://example.com/page".into(),
            author: author.map(String::from),
        }
    }

    #[test]
    fn test_extension_from_url() {
        assert_eq!(extension_from_url("https://cdn.example.com/a/photo.png"), "png");
        assert_eq!(extension_from_url("https://cdn.example.com/photo.JPG?w=640"), "jpg");
        assert_eq!(extension_from_url("https://cdn.example.com/photo.jpeg#top"), "jpeg");
        // 拡張子なし・拡張子らしくないものはデフォルト
        assert_eq!(extension_from_url("https://cdn.example.com/photo"), "jpg");
        assert_eq!(extension_from_url("https://cdn.example.com/archive.backup"), "jpg");
        assert_eq!(extension_from_url("https://cdn.example.com/.hidden"), "jpg");
    }

    #[test]
    fn test_sanitize_author() {
        assert_eq!(sanitize_author("Jane Doe"), "Jane_Doe");
        assert_eq!(sanitize_author("  Alex -- Climber  "), "Alex_Climber");
        assert_eq!(sanitize_author("---"), "unknown");
        assert_eq!(sanitize_author(""), "unknown");
        // 非ラテン文字の作者名はそのまま残す
        assert_eq!(sanitize_author("山田 太郎"), "山田_太郎");
    }

    #[test]
    fn test_entry_filenames_are_unique() {
        // 同名作者・同一拡張子でも序数で衝突しない
        let a = make_entry(1, &record("https://cdn.example.com/x.jpg", Some("Jane Doe")), vec![1]);
        let b = make_entry(2, &record("https://cdn.example.com/y.jpg", Some("Jane Doe")), vec![2]);

        assert_eq!(a.filename, "image_1_Jane_Doe.jpg");
        assert_eq!(b.filename, "image_2_Jane_Doe.jpg");
        assert_ne!(a.filename, b.filename);
    }

    #[test]
    fn test_sidecar_name_shares_stem() {
        let entry = make_entry(3, &record("https://cdn.example.com/x.png", None), vec![0]);
        assert_eq!(entry.filename, "image_3_unknown.png");
        assert_eq!(entry.sidecar_name(), "image_3_unknown.txt");
    }

    #[test]
    fn test_attribution_text_contains_url_verbatim() {
        let entry = make_entry(1, &record("https://cdn.example.com/x.jpg", Some("Jane")), vec![0]);
        assert!(entry.attribution_text.contains("Source: https://example.com/page"));
        assert!(entry.attribution_text.contains("Author: Jane"));
    }
}
