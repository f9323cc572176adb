use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "photo-search")]
#[command(about = "ストック画像検索・選択ダウンロードツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// キーワードで3プロバイダを検索し、結果をJSONに保存
    Search {
        /// 検索キーワード
        #[arg(required = true)]
        keyword: String,

        /// プロバイダごとの取得件数 (1-20)
        #[arg(short = 'n', long, default_value = "10")]
        count: usize,

        /// 結果JSONの出力先
        #[arg(short, long, default_value = "results.json")]
        output: PathBuf,
    },

    /// 検索→対話選択→ZIP作成まで一括実行
    Run {
        /// 検索キーワード
        #[arg(required = true)]
        keyword: String,

        /// プロバイダごとの取得件数 (1-20)
        #[arg(short = 'n', long, default_value = "10")]
        count: usize,

        /// 出力ZIPファイル（省略時はタイムスタンプ付き名）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 対話選択を省略して全件選択
        #[arg(long)]
        all: bool,
    },

    /// 保存済み結果JSONからZIPを作成
    Export {
        /// searchで保存した結果JSON
        #[arg(required = true)]
        input: PathBuf,

        /// 表示順の番号で選択（例: 1,3,5）
        #[arg(short, long)]
        select: Option<String>,

        /// 全件選択
        #[arg(long)]
        all: bool,

        /// 出力ZIPファイル（省略時はタイムスタンプ付き名）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 設定を表示/編集
    Config {
        /// UnsplashのAPIキーを設定
        #[arg(long)]
        set_unsplash_key: Option<String>,

        /// PixabayのAPIキーを設定
        #[arg(long)]
        set_pixabay_key: Option<String>,

        /// PexelsのAPIキーを設定
        #[arg(long)]
        set_pexels_key: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
