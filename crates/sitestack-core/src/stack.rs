//! スタック合成
//!
//! 検証 → ポリシー解決 → グラフ構築 → タグ付与 → 出力収集 を一度に行う。
//! 検証エラーの場合は記述子を一つも生成しない。

use crate::builder::{BuiltGraph, ResolvedPolicies, build_graph};
use crate::error::Result;
use crate::model::{Environment, PolicyDefaultApplied, RawConfig, SiteConfig};
use crate::outputs::bind_outputs;
use crate::tags::{StackTags, apply_tags};
use crate::validate::normalize;
use sitestack_cloud::{Manifest, OutputBindings, ResourceGraph};
use tracing::{info, instrument};

/// スタック名のプレフィックス
pub const STACK_NAME_PREFIX: &str = "MaterialDashboard";

/// 合成済みスタック
#[derive(Debug, Clone)]
pub struct Stack {
    /// スタック名（例: MaterialDashboard-Dev）
    pub name: String,
    pub config: SiteConfig,
    pub policies: ResolvedPolicies,
    /// タグ付与済みのリソースグラフ
    pub graph: ResourceGraph,
    pub outputs: OutputBindings,
    /// デフォルト値が適用されたフィールド
    pub notices: Vec<PolicyDefaultApplied>,
}

impl Stack {
    /// バックエンドへ渡すマニフェスト
    pub fn manifest(&self) -> Manifest {
        Manifest::new(
            &self.name,
            self.config.environment.as_str(),
            &self.config.region,
            &self.config.account,
            &self.graph,
            &self.outputs,
        )
    }
}

pub fn stack_name(environment: &Environment) -> String {
    format!("{}-{}", STACK_NAME_PREFIX, environment.title())
}

/// 生の設定からスタックを合成する
#[instrument(skip_all)]
pub fn synthesize(raw: &RawConfig) -> Result<Stack> {
    let normalized = normalize(raw)?;
    let config = normalized.config;
    let policies = ResolvedPolicies::resolve(&config);

    let built = build_graph(&config, &policies)?;
    let outputs = bind_outputs(&built)?;
    let BuiltGraph { graph, .. } = built;
    let graph = apply_tags(graph, &StackTags::for_config(&config));

    let stack = Stack {
        name: stack_name(&config.environment),
        config,
        policies,
        graph,
        outputs,
        notices: normalized.notices,
    };

    info!(
        stack = %stack.name,
        resources = stack.graph.len(),
        outputs = stack.outputs.len(),
        "Stack synthesized"
    );
    Ok(stack)
}

/// JSON 値から直接合成する
pub fn synthesize_value(value: serde_json::Value) -> Result<Stack> {
    let raw = RawConfig::from_value(value)?;
    synthesize(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, StackError};
    use crate::outputs::{WEB_ACL_ID, WEBSITE_URL};
    use serde_json::json;
    use sitestack_cloud::ResourceKind;

    fn dev() -> serde_json::Value {
        json!({
            "environment": "dev",
            "region": "us-west-2",
            "account": "123456789012",
            "cloudfront": { "priceClass": "PriceClass_100" }
        })
    }

    fn prod() -> serde_json::Value {
        json!({
            "environment": "prod",
            "region": "us-west-2",
            "account": "123456789012",
            "domain": "www.example.com",
            "hostedZoneId": "Z0123456789",
            "hostedZoneName": "example.com",
            "cloudfront": { "priceClass": "PriceClass_200" }
        })
    }

    #[test]
    fn test_dev_end_to_end() {
        let stack = synthesize_value(dev()).unwrap();

        assert_eq!(stack.name, "MaterialDashboard-Dev");
        assert_eq!(stack.graph.len(), 5);
        assert_eq!(stack.graph.count(ResourceKind::Firewall), 0);
        assert_eq!(stack.graph.count(ResourceKind::DnsRecord), 0);
        assert_eq!(stack.graph.count(ResourceKind::Certificate), 0);
        assert_eq!(stack.outputs.len(), 4);
        assert!(!stack.outputs.contains(WEB_ACL_ID));
        assert!(stack.notices.is_empty());
    }

    #[test]
    fn test_prod_end_to_end() {
        let stack = synthesize_value(prod()).unwrap();

        assert_eq!(stack.name, "MaterialDashboard-Prod");
        for kind in ResourceKind::ALL {
            assert!(stack.graph.contains_kind(kind), "missing {kind}");
        }
        assert_eq!(stack.outputs.len(), 5);
        assert!(stack.outputs.contains(WEB_ACL_ID));
        assert!(stack.outputs.contains(WEBSITE_URL));
    }

    #[test]
    fn test_every_resource_tagged() {
        let stack = synthesize_value(prod()).unwrap();
        for resource in stack.graph.iter() {
            assert_eq!(resource.tags["Environment"], "prod");
            assert_eq!(resource.tags["Project"], "material-dashboard-react");
            assert_eq!(resource.tags["ManagedBy"], "sitestack");
        }
    }

    #[test]
    fn test_invalid_config_produces_no_stack() {
        let mut value = dev();
        value.as_object_mut().unwrap().remove("account");

        match synthesize_value(value) {
            Err(StackError::Config(ConfigError::MissingFields(fields))) => {
                assert_eq!(fields, vec!["account"])
            }
            other => panic!("expected MissingFields, got {other:?}"),
        }
    }

    #[test]
    fn test_partial_domain_produces_no_stack() {
        let mut value = dev();
        value["domain"] = json!("dev.example.com");

        assert!(matches!(
            synthesize_value(value),
            Err(StackError::Config(ConfigError::PartialCustomDomain { .. }))
        ));
    }

    #[test]
    fn test_unknown_price_class_is_observable() {
        let mut value = dev();
        value["cloudfront"]["priceClass"] = json!("bogus");

        let stack = synthesize_value(value).unwrap();
        assert_eq!(stack.notices.len(), 1);
        assert_eq!(stack.notices[0].applied, "PriceClass_100");
    }

    #[test]
    fn test_numeric_account_flows_into_bucket_name() {
        let mut value = dev();
        value["account"] = json!(123456789012u64);

        let stack = synthesize_value(value).unwrap();
        assert_eq!(stack.config.account, "123456789012");
        assert_eq!(
            stack.config.bucket_name(),
            "material-dashboard-dev-123456789012"
        );
    }

    #[test]
    fn test_stack_name_per_environment() {
        assert_eq!(stack_name(&Environment::Dev), "MaterialDashboard-Dev");
        assert_eq!(
            stack_name(&Environment::Other("staging".to_string())),
            "MaterialDashboard-Staging"
        );
    }

    #[test]
    fn test_synthesis_is_deterministic() {
        let first = serde_json::to_string(&synthesize_value(prod()).unwrap().graph).unwrap();
        let second = serde_json::to_string(&synthesize_value(prod()).unwrap().graph).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_manifest_carries_stack_identity() {
        let stack = synthesize_value(dev()).unwrap();
        let manifest = stack.manifest();

        assert_eq!(manifest.stack_name, "MaterialDashboard-Dev");
        assert_eq!(manifest.environment, "dev");
        assert_eq!(manifest.resources.len(), stack.graph.len());
        assert_eq!(manifest.outputs, stack.outputs);
    }
}
