//! ポリシー解決
//!
//! 環境名や設定値から具体的なプロビジョニングポリシーを決める純粋関数群。
//! どの関数もすべての入力に対して値を返す。

use crate::model::{
    AggregateKey, DefaultAction, Environment, FirewallPolicy, FirewallRule, PolicyDefaultApplied,
    PriceClass, RemovalPolicy, RetentionPolicy, RuleAction, RuleStatement, SpaRouting,
    VisibilityConfig,
};

/// レートベースルールの上限（集計ウィンドウあたりのリクエスト数）
pub const RATE_LIMIT_PER_WINDOW: u64 = 2000;

/// マネージドルールグループ名
pub const MANAGED_COMMON_RULE_SET: &str = "AWSManagedRulesCommonRuleSet";

pub const INDEX_DOCUMENT: &str = "index.html";

/// 保持ポリシー
///
/// dev は削除時に中身ごと破棄、それ以外は保持する。
pub fn retention_policy(environment: &Environment) -> RetentionPolicy {
    if environment.is_dev() {
        RetentionPolicy {
            removal_policy: RemovalPolicy::Destroy,
            auto_delete_objects: true,
            noncurrent_version_expiration_days: 30,
        }
    } else {
        RetentionPolicy {
            removal_policy: RemovalPolicy::Retain,
            auto_delete_objects: false,
            noncurrent_version_expiration_days: 90,
        }
    }
}

/// 料金クラス名をティアに解決する
///
/// 未知の名前は [`PriceClass::DEFAULT`] にフォールバックし、通知を返す。
pub fn price_tier(name: &str) -> (PriceClass, Option<PolicyDefaultApplied>) {
    match PriceClass::from_name(name) {
        Some(price_class) => (price_class, None),
        None => {
            let notice = PolicyDefaultApplied {
                field: "cloudfront.priceClass",
                given: Some(name.to_string()),
                applied: PriceClass::DEFAULT.as_str().to_string(),
            };
            (PriceClass::DEFAULT, Some(notice))
        }
    }
}

/// WAF ポリシー
///
/// prod 以外では None。prod では
/// 1. マネージド共通ルールセット（上書きなし）
/// 2. IP 単位のレート制限（超過でブロック）
///
/// の 2 ルールを優先度順に返す。
pub fn firewall_policy(environment: &Environment) -> Option<FirewallPolicy> {
    if !environment.is_prod() {
        return None;
    }

    Some(FirewallPolicy {
        scope: "CLOUDFRONT".to_string(),
        default_action: DefaultAction::Allow,
        visibility: VisibilityConfig::enabled("WebACLMetric"),
        rules: vec![
            FirewallRule {
                name: MANAGED_COMMON_RULE_SET.to_string(),
                priority: 1,
                statement: RuleStatement::ManagedRuleGroup {
                    vendor: "AWS".to_string(),
                    name: MANAGED_COMMON_RULE_SET.to_string(),
                },
                action: RuleAction::OverrideNone,
                visibility: VisibilityConfig::enabled("AWSManagedRulesCommonRuleSetMetric"),
            },
            FirewallRule {
                name: "RateLimit".to_string(),
                priority: 2,
                statement: RuleStatement::RateBased {
                    limit: RATE_LIMIT_PER_WINDOW,
                    aggregate_key: AggregateKey::Ip,
                },
                action: RuleAction::Block,
                visibility: VisibilityConfig::enabled("RateLimitMetric"),
            },
        ],
    })
}

/// ホストゾーン内でのレコード名
///
/// `domain` が `"." + zone_name` で終わる場合はそれを取り除く
/// （例: dev.example.com / example.com → dev）。
/// 終わらない場合や、取り除くと空になる場合は `domain` をそのまま返す。
pub fn domain_record_name(domain: &str, zone_name: &str) -> String {
    let suffix = format!(".{}", zone_name);
    match domain.strip_suffix(&suffix) {
        Some(label) if !label.is_empty() => label.to_string(),
        _ => domain.to_string(),
    }
}

/// SPA ルーティングルール
pub fn spa_routing() -> SpaRouting {
    SpaRouting::new(INDEX_DOCUMENT)
}
