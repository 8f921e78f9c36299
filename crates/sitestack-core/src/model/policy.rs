//! プロビジョニングポリシーの値型

use serde::{Deserialize, Serialize};
use std::fmt;

/// スタック削除時のリソースの扱い
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemovalPolicy {
    Destroy,
    Retain,
}

/// バケットの保持ポリシー
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetentionPolicy {
    pub removal_policy: RemovalPolicy,
    /// 削除時にオブジェクトも自動削除するか
    pub auto_delete_objects: bool,
    /// 非現行バージョンを削除するまでの日数
    pub noncurrent_version_expiration_days: u32,
}

/// CDN の料金クラス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceClass {
    #[serde(rename = "PriceClass_100")]
    PriceClass100,
    #[serde(rename = "PriceClass_200")]
    PriceClass200,
    #[serde(rename = "PriceClass_All")]
    PriceClassAll,
}

impl PriceClass {
    /// 未知の値に対するフォールバック
    pub const DEFAULT: PriceClass = PriceClass::PriceClass100;

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "PriceClass_100" => Some(PriceClass::PriceClass100),
            "PriceClass_200" => Some(PriceClass::PriceClass200),
            "PriceClass_All" => Some(PriceClass::PriceClassAll),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PriceClass::PriceClass100 => "PriceClass_100",
            PriceClass::PriceClass200 => "PriceClass_200",
            PriceClass::PriceClassAll => "PriceClass_All",
        }
    }

    /// 内部のティア識別子（100 / 200 / All）
    pub fn tier(&self) -> &'static str {
        match self {
            PriceClass::PriceClass100 => "100",
            PriceClass::PriceClass200 => "200",
            PriceClass::PriceClassAll => "All",
        }
    }
}

impl Default for PriceClass {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for PriceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// WAF のデフォルトアクション
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultAction {
    Allow,
    Block,
}

/// ルールがマッチしたときの動作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleAction {
    /// マネージドルールグループのアクションを上書きしない（スコアリングのみ）
    OverrideNone,
    Block,
}

/// レートベースルールの集計キー
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AggregateKey {
    Ip,
}

/// ルールの判定内容
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuleStatement {
    ManagedRuleGroup { vendor: String, name: String },
    RateBased { limit: u64, aggregate_key: AggregateKey },
}

/// メトリクス・サンプリング設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibilityConfig {
    pub metric_name: String,
    pub cloud_watch_metrics_enabled: bool,
    pub sampled_requests_enabled: bool,
}

impl VisibilityConfig {
    pub fn enabled(metric_name: impl Into<String>) -> Self {
        Self {
            metric_name: metric_name.into(),
            cloud_watch_metrics_enabled: true,
            sampled_requests_enabled: true,
        }
    }
}

/// WAF ルール
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirewallRule {
    pub name: String,
    /// 小さいほど先に評価される
    pub priority: u32,
    pub statement: RuleStatement,
    pub action: RuleAction,
    pub visibility: VisibilityConfig,
}

/// WAF ポリシー（prod 環境のみ）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirewallPolicy {
    pub scope: String,
    pub default_action: DefaultAction,
    pub visibility: VisibilityConfig,
    pub rules: Vec<FirewallRule>,
}

/// SPA ルーティングの書き換えルール
///
/// ビューワーリクエスト時にパスを書き換える。状態を持たない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaRouting {
    pub index_document: String,
}

impl SpaRouting {
    pub fn new(index_document: impl Into<String>) -> Self {
        Self {
            index_document: index_document.into(),
        }
    }

    /// リクエストパスを書き換える
    ///
    /// - `/` で終わる → `index.html` を付加
    /// - 最終セグメントに `.` がない → `/index.html` を付加
    /// - それ以外はそのまま
    pub fn rewrite(&self, path: &str) -> String {
        if path.ends_with('/') {
            return format!("{}{}", path, self.index_document);
        }

        let last_segment = path.rsplit('/').next().unwrap_or(path);
        if !last_segment.contains('.') {
            return format!("{}/{}", path, self.index_document);
        }

        path.to_string()
    }
}

/// 未知の値がデフォルトに置き換えられたことの通知
///
/// エラーではないが、呼び出し側から観測できる必要がある。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PolicyDefaultApplied {
    /// 対象フィールド（例: "cloudfront.priceClass"）
    pub field: &'static str,
    /// 指定された値（未指定なら None）
    pub given: Option<String>,
    /// 実際に適用された値
    pub applied: String,
}

impl fmt::Display for PolicyDefaultApplied {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.given {
            Some(given) => write!(
                f,
                "{}: 未知の値 '{}' のためデフォルト '{}' を適用しました",
                self.field, given, self.applied
            ),
            None => write!(
                f,
                "{}: 未指定のためデフォルト '{}' を適用しました",
                self.field, self.applied
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_class_names() {
        assert_eq!(
            PriceClass::from_name("PriceClass_All"),
            Some(PriceClass::PriceClassAll)
        );
        assert_eq!(PriceClass::from_name("priceclass_all"), None);
        assert_eq!(PriceClass::default().as_str(), "PriceClass_100");
    }

    #[test]
    fn test_price_class_serializes_as_config_string() {
        let json = serde_json::to_value(PriceClass::PriceClass200).unwrap();
        assert_eq!(json, serde_json::json!("PriceClass_200"));
    }

    #[test]
    fn test_rule_statement_tagged() {
        let statement = RuleStatement::RateBased {
            limit: 2000,
            aggregate_key: AggregateKey::Ip,
        };
        let json = serde_json::to_value(&statement).unwrap();
        assert_eq!(json["type"], "rate_based");
        assert_eq!(json["aggregate_key"], "IP");
    }
}
