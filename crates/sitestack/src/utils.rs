use colored::Colorize;
use sitestack_core::{PolicyDefaultApplied, Stack};
use std::path::{Path, PathBuf};

/// 読み込んだ設定ファイルと合成結果
pub struct LoadedStack {
    pub path: PathBuf,
    pub stack: Stack,
}

/// 設定ファイルを探してスタックを合成する
pub fn load_stack(environment: &str, config: Option<&Path>) -> anyhow::Result<LoadedStack> {
    let path = match config {
        Some(path) => path.to_path_buf(),
        None => sitestack_config::find_config_file(environment)?,
    };
    tracing::debug!(path = %path.display(), "設定ファイルを読み込みます");

    let document = sitestack_config::load_document(&path)?;
    let stack = sitestack_core::synthesize_value(document)?;

    if stack.config.environment.as_str() != environment {
        eprintln!(
            "{} 指定した環境 '{}' と設定ファイルの environment '{}' が一致しません",
            "⚠".yellow(),
            environment,
            stack.config.environment
        );
    }

    Ok(LoadedStack { path, stack })
}

/// デフォルト値が適用されたフィールドを表示
pub fn print_notices(notices: &[PolicyDefaultApplied]) {
    if notices.is_empty() {
        return;
    }
    eprintln!();
    eprintln!("{}", "デフォルト値を適用しました:".yellow());
    for notice in notices {
        eprintln!("  ⚠ {}", notice);
    }
}
