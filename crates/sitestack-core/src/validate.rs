//! 設定の検証と正規化

use crate::error::ConfigError;
use crate::model::{
    CustomDomain, DEFAULT_ASSET_PATH, DEFAULT_BUCKET_PREFIX, DEFAULT_PROJECT, Environment,
    PolicyDefaultApplied, PriceClass, RawConfig, SiteConfig,
};
use crate::policy::price_tier;
use tracing::{debug, instrument, warn};

/// 正規化結果
#[derive(Debug, Clone)]
pub struct Normalized {
    pub config: SiteConfig,
    /// デフォルト値が適用されたフィールド
    pub notices: Vec<PolicyDefaultApplied>,
}

/// 空白のみの値は未指定として扱う
fn present(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// DNS 名の末尾の `.` を取り除く
fn dns_name(value: String) -> String {
    value.trim_end_matches('.').to_string()
}

/// 生の設定を検証して `SiteConfig` にする
///
/// - environment / region / account のいずれかが欠けていればエラー
/// - domain / hostedZoneId / hostedZoneName が一部だけ指定されていればエラー
/// - 未知の priceClass はデフォルトにフォールバック（通知を返す）
#[instrument(skip(raw))]
pub fn normalize(raw: &RawConfig) -> Result<Normalized, ConfigError> {
    let environment = present(&raw.environment);
    let region = present(&raw.region);
    let account = present(&raw.account);

    let missing: Vec<&'static str> = [
        ("environment", environment.is_none()),
        ("region", region.is_none()),
        ("account", account.is_none()),
    ]
    .into_iter()
    .filter_map(|(name, is_missing)| is_missing.then_some(name))
    .collect();

    let (Some(environment), Some(region), Some(account)) = (environment, region, account) else {
        return Err(ConfigError::MissingFields(missing));
    };

    let custom_domain = normalize_custom_domain(raw)?;
    let mut notices = Vec::new();

    let price_class = match raw
        .cloudfront
        .as_ref()
        .and_then(|cf| present(&cf.price_class))
    {
        Some(name) => {
            let (price_class, notice) = price_tier(&name);
            notices.extend(notice);
            price_class
        }
        None => {
            notices.push(PolicyDefaultApplied {
                field: "cloudfront.priceClass",
                given: None,
                applied: PriceClass::DEFAULT.as_str().to_string(),
            });
            PriceClass::DEFAULT
        }
    };

    for notice in &notices {
        warn!(field = notice.field, applied = %notice.applied, "{}", notice);
    }

    let config = SiteConfig {
        environment: Environment::parse(&environment),
        region,
        account,
        custom_domain,
        price_class,
        project: present(&raw.project).unwrap_or_else(|| DEFAULT_PROJECT.to_string()),
        bucket_prefix: present(&raw.bucket_prefix)
            .unwrap_or_else(|| DEFAULT_BUCKET_PREFIX.to_string()),
        asset_path: present(&raw.asset_path).unwrap_or_else(|| DEFAULT_ASSET_PATH.to_string()),
    };

    debug!(
        environment = %config.environment,
        custom_domain = config.custom_domain.is_some(),
        price_class = %config.price_class,
        "Configuration normalized"
    );

    Ok(Normalized { config, notices })
}

/// カスタムドメインは 3 フィールドが揃っているか、すべて欠けているかのどちらか
fn normalize_custom_domain(raw: &RawConfig) -> Result<Option<CustomDomain>, ConfigError> {
    let domain = present(&raw.domain).map(dns_name);
    let zone_id = present(&raw.hosted_zone_id);
    let zone_name = present(&raw.hosted_zone_name).map(dns_name);

    match (domain, zone_id, zone_name) {
        (Some(domain), Some(hosted_zone_id), Some(hosted_zone_name)) => Ok(Some(CustomDomain {
            domain,
            hosted_zone_id,
            hosted_zone_name,
        })),
        (None, None, None) => Ok(None),
        (domain, zone_id, zone_name) => {
            let fields = [
                ("domain", domain.is_some()),
                ("hostedZoneId", zone_id.is_some()),
                ("hostedZoneName", zone_name.is_some()),
            ];
            Err(ConfigError::PartialCustomDomain {
                present: fields
                    .iter()
                    .filter(|(_, set)| *set)
                    .map(|(name, _)| *name)
                    .collect(),
                missing: fields
                    .iter()
                    .filter(|(_, set)| !*set)
                    .map(|(name, _)| *name)
                    .collect(),
            })
        }
    }
}
