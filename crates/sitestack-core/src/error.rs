use sitestack_cloud::CloudError;
use thiserror::Error;

/// 設定の検証エラー
///
/// リソースを一つも生成する前に返される。
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("設定ドキュメントが不正です: {0}")]
    InvalidDocument(#[from] serde_json::Error),

    #[error("必須フィールドが指定されていません: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error(
        "カスタムドメイン設定が不完全です\n指定済み: {}\n未指定: {}\nヒント: domain, hostedZoneId, hostedZoneName はすべて指定するか、すべて省略してください",
        .present.join(", "),
        .missing.join(", ")
    )]
    PartialCustomDomain {
        present: Vec<&'static str>,
        missing: Vec<&'static str>,
    },
}

#[derive(Error, Debug)]
pub enum StackError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("リソースグラフの構築に失敗しました: {0}")]
    Graph(#[from] CloudError),

    #[error("属性のシリアライズに失敗しました: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StackError>;
