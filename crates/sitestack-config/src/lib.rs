//! SiteStack 設定ファイルの探索・読み込み・更新
//!
//! 合成コアはファイルを読まない。環境名から設定ファイルを探し、
//! JSON 値として読み込むのはこのクレートの責務。

pub mod error;
pub mod update;

pub use error::*;
pub use update::{ConfigUpdate, update_config_file};

use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// 設定ディレクトリを直接指定する環境変数
pub const CONFIG_DIR_ENV: &str = "SITESTACK_CONFIG_DIR";

const EXTENSIONS: [&str; 3] = ["json", "yaml", "yml"];

/// 設定ファイルの形式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    /// 拡張子から形式を判定
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("yaml" | "yml") => Ok(Format::Yaml),
            _ => Err(LoaderError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

fn find_in_dir(dir: &Path, environment: &str) -> Option<PathBuf> {
    EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{environment}.{ext}")))
        .find(|path| path.is_file())
}

/// 環境名から設定ファイルを探す
///
/// 以下の優先順位で検索:
/// 1. 環境変数 SITESTACK_CONFIG_DIR
/// 2. ./config/
/// 3. ./infrastructure/config/
/// 4. ~/.config/sitestack/<env>.json (グローバル設定)
pub fn find_config_file(environment: &str) -> Result<PathBuf> {
    let current_dir = std::env::current_dir()?;
    find_config_file_in(&current_dir, environment)
}

/// 指定ディレクトリを起点に設定ファイルを探す
pub fn find_config_file_in(base: &Path, environment: &str) -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
        if let Some(path) = find_in_dir(Path::new(&dir), environment) {
            return Ok(path);
        }
        debug!(dir = %dir, "{} に設定ファイルがありません", CONFIG_DIR_ENV);
    }

    for dir in [base.join("config"), base.join("infrastructure").join("config")] {
        if let Some(path) = find_in_dir(&dir, environment) {
            return Ok(path);
        }
    }

    if let Some(config_dir) = dirs::config_dir() {
        let global = config_dir
            .join("sitestack")
            .join(format!("{environment}.json"));
        if global.is_file() {
            return Ok(global);
        }
    }

    Err(LoaderError::ConfigFileNotFound {
        environment: environment.to_string(),
    })
}

/// 設定ファイルを JSON 値として読み込む
///
/// YAML ファイルも同じ JSON 値に変換される。トップレベルはオブジェクトに限る。
#[instrument]
pub fn load_document(path: &Path) -> Result<serde_json::Value> {
    let format = Format::from_path(path)?;
    let content = std::fs::read_to_string(path)?;

    let document: serde_json::Value = match format {
        Format::Json => serde_json::from_str(&content)?,
        Format::Yaml => serde_yaml::from_str(&content)?,
    };

    if !document.is_object() {
        return Err(LoaderError::NotAnObject(path.to_path_buf()));
    }

    debug!(?format, "設定ファイルを読み込みました");
    Ok(document)
}
