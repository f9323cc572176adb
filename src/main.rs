use clap::Parser;
use photo_search_rust::{archive, cli, config, error, picker, provider, selection};
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use provider::{Provider, ProviderClient, SearchRound};
use selection::SelectionStore;
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Search { keyword, count, output } => {
            println!("🔍 photo-search - 画像検索\n");

            let client = ProviderClient::new(config)?;

            println!("[1/2] 「{}」を検索中...", keyword);
            let round = client.search_all(&keyword, count).await;
            print_round_summary(&round);

            if round.is_empty() {
                println!("ℹ 画像が見つかりませんでした");
                return Ok(());
            }

            println!("[2/2] 結果を保存中...");
            let json = serde_json::to_string_pretty(&round.records)?;
            std::fs::write(&output, json)?;
            println!("✔ 結果を保存: {}", output.display());

            println!("\n✅ 検索完了");
        }

        Commands::Run { keyword, count, output, all } => {
            println!("🚀 photo-search - 検索＆ダウンロード\n");

            let client = ProviderClient::new(config)?;

            println!("[1/3] 「{}」を検索中...", keyword);
            let round = client.search_all(&keyword, count).await;
            print_round_summary(&round);

            if round.is_empty() {
                println!("ℹ 画像が見つかりませんでした");
                return Ok(());
            }

            // 新しいラウンドごとにストアを作り直す（前回の選択は持ち越さない）
            let store = if all {
                picker::select_all(&round)
            } else {
                picker::select_interactive(&round)?
            };

            if store.is_empty() {
                println!("ℹ 画像が選択されていません");
                return Ok(());
            }

            println!("\n[2/3] {}枚をダウンロード中...", store.len());
            export_archive(&client, &store, output).await?;

            println!("\n✅ 完了");
        }

        Commands::Export { input, select, all, output } => {
            println!("📦 photo-search - エクスポート\n");

            if !input.exists() {
                return Err(error::PhotoSearchError::FileNotFound(
                    input.display().to_string(),
                ));
            }

            let content = std::fs::read_to_string(&input)?;
            let records: Vec<provider::ImageRecord> = serde_json::from_str(&content)?;
            let round = SearchRound { records, warnings: vec![] };

            if round.is_empty() {
                println!("ℹ 結果JSONが空です");
                return Ok(());
            }

            let store = if all {
                picker::select_all(&round)
            } else if let Some(list) = select {
                picker::select_by_ordinals(&round, &list)?
            } else {
                picker::select_interactive(&round)?
            };

            if store.is_empty() {
                println!("ℹ 画像が選択されていません");
                return Ok(());
            }

            let client = ProviderClient::new(config)?;
            println!("[1/2] {}枚をダウンロード中...", store.len());
            export_archive(&client, &store, output).await?;

            println!("\n✅ エクスポート完了");
        }

        Commands::Config { set_unsplash_key, set_pixabay_key, set_pexels_key, show } => {
            let mut config = config;

            if let Some(key) = set_unsplash_key {
                config.set_api_key(Provider::Unsplash, key)?;
                println!("✔ UnsplashのAPIキーを設定しました");
            }
            if let Some(key) = set_pixabay_key {
                config.set_api_key(Provider::Pixabay, key)?;
                println!("✔ PixabayのAPIキーを設定しました");
            }
            if let Some(key) = set_pexels_key {
                config.set_api_key(Provider::Pexels, key)?;
                println!("✔ PexelsのAPIキーを設定しました");
            }

            if show {
                println!("設定:");
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!("  デフォルト件数: {}", config.default_count);
                for provider in Provider::ALL {
                    println!(
                        "  {}キー: {}",
                        provider.label(),
                        if config.has_api_key(provider) { "設定済み" } else { "未設定" }
                    );
                }
            }
        }
    }

    Ok(())
}

/// プロバイダごとの件数と警告を表示
fn print_round_summary(round: &SearchRound) {
    for provider in Provider::ALL {
        println!("  📷 {}: {}件", provider.label(), round.count_for(provider));
    }
    for warning in &round.warnings {
        println!("  ⚠ {}", warning.message);
    }
    println!();
}

/// 選択済みストアをZIPにしてファイルへ書き出す
async fn export_archive(
    client: &ProviderClient,
    store: &SelectionStore,
    output: Option<PathBuf>,
) -> Result<()> {
    let records: Vec<provider::ImageRecord> =
        store.values().into_iter().cloned().collect();

    let bytes = archive::build_archive(client.http(), &records).await?;

    let output = output.unwrap_or_else(default_archive_name);
    std::fs::write(&output, &bytes)?;
    println!("✔ ZIPを保存: {} ({} bytes)", output.display(), bytes.len());

    Ok(())
}

fn default_archive_name() -> PathBuf {
    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    PathBuf::from(format!("selected_images_{}.zip", stamp))
}
