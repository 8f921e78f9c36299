//! 環境設定
//!
//! `RawConfig` は設定ドキュメントをそのまま受け取る型で、全フィールドが
//! 任意。検証と正規化を通ったものが `SiteConfig` になる。

use super::environment::Environment;
use super::policy::PriceClass;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// 既定のプロジェクト名（Project タグ）
pub const DEFAULT_PROJECT: &str = "material-dashboard-react";

/// 既定のバケット名プレフィックス
pub const DEFAULT_BUCKET_PREFIX: &str = "material-dashboard";

/// 既定のアセットディレクトリ
pub const DEFAULT_ASSET_PATH: &str = "build";

/// 検証前の設定ドキュメント
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawConfig {
    pub environment: Option<String>,
    pub region: Option<String>,
    /// 文字列または数値
    #[serde(default, deserialize_with = "account_id")]
    pub account: Option<String>,
    pub domain: Option<String>,
    pub hosted_zone_id: Option<String>,
    pub hosted_zone_name: Option<String>,
    pub cloudfront: Option<RawCloudFront>,
    pub project: Option<String>,
    pub bucket_prefix: Option<String>,
    pub asset_path: Option<String>,
}

/// `cloudfront` ブロック
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCloudFront {
    pub price_class: Option<String>,
}

impl RawConfig {
    /// JSON 値から読み込む（未知のキーは無視）
    pub fn from_value(value: serde_json::Value) -> Result<Self, ConfigError> {
        Ok(serde_json::from_value(value)?)
    }
}

/// アカウント ID は数値で書かれていても文字列として扱う
fn account_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum AccountId {
        Text(String),
        Number(u64),
    }

    Ok(
        Option::<AccountId>::deserialize(deserializer)?.map(|id| match id {
            AccountId::Text(text) => text,
            AccountId::Number(number) => number.to_string(),
        }),
    )
}

/// カスタムドメイン設定
///
/// domain / ホストゾーン ID / ホストゾーン名は常に揃って存在する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomDomain {
    pub domain: String,
    pub hosted_zone_id: String,
    pub hosted_zone_name: String,
}

impl CustomDomain {
    /// ホストゾーン内でのレコード名
    pub fn record_name(&self) -> String {
        crate::policy::domain_record_name(&self.domain, &self.hosted_zone_name)
    }
}

/// 正規化済みの環境設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteConfig {
    pub environment: Environment,
    pub region: String,
    pub account: String,
    pub custom_domain: Option<CustomDomain>,
    pub price_class: PriceClass,
    pub project: String,
    pub bucket_prefix: String,
    pub asset_path: String,
}

impl SiteConfig {
    pub fn bucket_name(&self) -> String {
        format!("{}-{}-{}", self.bucket_prefix, self.environment, self.account)
    }
}
