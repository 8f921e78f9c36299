//! モデル定義
//!
//! SiteStackで使用されるデータモデルを定義します。
//! 設定・環境・ポリシーの値型をモジュールごとに分離しています。

mod config;
mod environment;
mod policy;

// Re-exports
pub use config::*;
pub use environment::*;
pub use policy::*;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_raw_config_camel_case() {
        let raw = RawConfig::from_value(json!({
            "environment": "dev",
            "region": "us-west-2",
            "account": "123456789012",
            "hostedZoneId": "Z123",
            "hostedZoneName": "example.com",
            "cloudfront": { "priceClass": "PriceClass_200" },
            "certificateArn": "arn:aws:acm:us-east-1:123:certificate/abc"
        }))
        .unwrap();

        assert_eq!(raw.environment.as_deref(), Some("dev"));
        assert_eq!(raw.hosted_zone_id.as_deref(), Some("Z123"));
        assert_eq!(raw.hosted_zone_name.as_deref(), Some("example.com"));
        assert_eq!(
            raw.cloudfront.and_then(|c| c.price_class).as_deref(),
            Some("PriceClass_200")
        );
        assert!(raw.domain.is_none());
    }

    #[test]
    fn test_raw_config_rejects_wrong_types() {
        let result = RawConfig::from_value(json!({ "region": 42 }));
        assert!(matches!(result, Err(crate::ConfigError::InvalidDocument(_))));
    }

    #[test]
    fn test_numeric_account_is_read_as_string() {
        let raw = RawConfig::from_value(json!({ "account": 123456789012u64 })).unwrap();
        assert_eq!(raw.account.as_deref(), Some("123456789012"));

        let raw = RawConfig::from_value(json!({ "environment": "dev" })).unwrap();
        assert!(raw.account.is_none());

        let raw = RawConfig::from_value(json!({ "account": null })).unwrap();
        assert!(raw.account.is_none());
    }

    #[test]
    fn test_account_rejects_other_types() {
        for account in [json!(true), json!(-1), json!(1.5), json!(["123"])] {
            let result = RawConfig::from_value(json!({ "account": account }));
            assert!(
                matches!(result, Err(crate::ConfigError::InvalidDocument(_))),
                "{account} should be rejected"
            );
        }
    }

    #[test]
    fn test_bucket_name() {
        let config = SiteConfig {
            environment: Environment::Dev,
            region: "us-west-2".to_string(),
            account: "123456789012".to_string(),
            custom_domain: None,
            price_class: PriceClass::PriceClass100,
            project: DEFAULT_PROJECT.to_string(),
            bucket_prefix: DEFAULT_BUCKET_PREFIX.to_string(),
            asset_path: DEFAULT_ASSET_PATH.to_string(),
        };
        assert_eq!(config.bucket_name(), "material-dashboard-dev-123456789012");
    }
}
