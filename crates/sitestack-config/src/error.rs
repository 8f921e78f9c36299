use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error(
        "環境 '{environment}' の設定ファイルが見つかりません。以下の場所を確認してください:\n\
        - SITESTACK_CONFIG_DIR 環境変数で指定したディレクトリ\n\
        - ./config/{environment}.json\n\
        - ./infrastructure/config/{environment}.json\n\
        - ~/.config/sitestack/{environment}.json"
    )]
    ConfigFileNotFound { environment: String },

    #[error("サポートされていない設定ファイル形式です: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("設定ファイルのトップレベルはオブジェクトである必要があります: {}", .0.display())]
    NotAnObject(PathBuf),

    #[error("IO エラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON パースエラー: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML パースエラー: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, LoaderError>;
