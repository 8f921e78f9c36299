//! リソースグラフ構築
//!
//! 正規化済みの設定と解決済みポリシーから、依存順に並んだリソース記述子を
//! 一度だけ生成する。各記述子は既に生成された記述子だけを参照する。
//!
//! 生成順:
//! 1. WebsiteBucket
//! 2. OriginAccessIdentity
//! 3. SpaFunction
//! 4. SiteCertificate（カスタムドメインがある場合）
//! 5. WebACL（WAF ポリシーがある場合）
//! 6. Distribution
//! 7. AliasRecordA / AliasRecordAAAA（カスタムドメインがある場合）
//! 8. DeployWebsite
//!
//! WebACL はディストリビューションより先に解決し、ディストリビューションは
//! 任意の WAF 参照を受け取って一度だけ構築される。

use crate::error::Result;
use crate::model::{
    CustomDomain, FirewallPolicy, PriceClass, RetentionPolicy, SiteConfig, SpaRouting,
};
use crate::policy::{self, INDEX_DOCUMENT};
use serde_json::json;
use sitestack_cloud::{CloudError, LogicalId, ResourceDescriptor, ResourceGraph, ResourceKind};
use tracing::{debug, instrument};

/// 論理 ID
pub mod ids {
    pub const WEBSITE_BUCKET: &str = "WebsiteBucket";
    pub const ORIGIN_ACCESS_IDENTITY: &str = "OriginAccessIdentity";
    pub const SPA_FUNCTION: &str = "SpaFunction";
    pub const SITE_CERTIFICATE: &str = "SiteCertificate";
    pub const WEB_ACL: &str = "WebACL";
    pub const DISTRIBUTION: &str = "Distribution";
    pub const ALIAS_RECORD_A: &str = "AliasRecordA";
    pub const ALIAS_RECORD_AAAA: &str = "AliasRecordAAAA";
    pub const DEPLOY_WEBSITE: &str = "DeployWebsite";
}

/// CDN 用証明書は常にこのリージョンで発行する
pub const CERTIFICATE_REGION: &str = "us-east-1";

/// デプロイ後に無効化するパス
pub const INVALIDATION_PATHS: &[&str] = &["/*"];

/// SPA フォールバック対象のオリジンステータス
pub const SPA_FALLBACK_STATUSES: [u16; 2] = [403, 404];

/// 設定から解決したポリシー一式
#[derive(Debug, Clone)]
pub struct ResolvedPolicies {
    pub retention: RetentionPolicy,
    pub price_class: PriceClass,
    pub firewall: Option<FirewallPolicy>,
    pub spa: SpaRouting,
}

impl ResolvedPolicies {
    pub fn resolve(config: &SiteConfig) -> Self {
        Self {
            retention: policy::retention_policy(&config.environment),
            price_class: config.price_class,
            firewall: policy::firewall_policy(&config.environment),
            spa: policy::spa_routing(),
        }
    }
}

/// 構築済みグラフと、出力に必要な主要リソースの ID
#[derive(Debug, Clone)]
pub struct BuiltGraph {
    pub graph: ResourceGraph,
    pub bucket: LogicalId,
    pub distribution: LogicalId,
    pub firewall: Option<LogicalId>,
}

/// 記述子の参照先をまとめたもの
struct DistributionInputs<'a> {
    bucket: &'a LogicalId,
    identity: &'a LogicalId,
    function: &'a LogicalId,
    certificate: Option<&'a LogicalId>,
    web_acl: Option<&'a LogicalId>,
}

struct GraphBuilder<'a> {
    config: &'a SiteConfig,
    policies: &'a ResolvedPolicies,
    graph: ResourceGraph,
}

/// リソースグラフを構築する
#[instrument(skip_all, fields(environment = %config.environment))]
pub fn build_graph(config: &SiteConfig, policies: &ResolvedPolicies) -> Result<BuiltGraph> {
    let mut builder = GraphBuilder {
        config,
        policies,
        graph: ResourceGraph::new(),
    };

    let bucket = builder.add_bucket()?;
    let identity = builder.add_origin_identity(&bucket)?;
    let function = builder.add_spa_function()?;

    let certificate = match &config.custom_domain {
        Some(domain) => Some(builder.add_certificate(domain)?),
        None => None,
    };

    let firewall = match &policies.firewall {
        Some(firewall) => Some(builder.add_web_acl(firewall)?),
        None => None,
    };

    let distribution = builder.add_distribution(DistributionInputs {
        bucket: &bucket,
        identity: &identity,
        function: &function,
        certificate: certificate.as_ref(),
        web_acl: firewall.as_ref(),
    })?;

    if let Some(domain) = &config.custom_domain {
        builder.add_alias_records(domain, &distribution)?;
    }

    builder.add_deployment(&bucket, &distribution)?;

    debug!(resources = builder.graph.len(), "Resource graph built");

    Ok(BuiltGraph {
        graph: builder.graph,
        bucket,
        distribution,
        firewall,
    })
}

impl GraphBuilder<'_> {
    /// 参照先リソースの属性トークン（`from` は構築中のリソース）
    fn token(&self, from: &str, id: &LogicalId, attribute: &str) -> Result<String> {
        let resource = self
            .graph
            .get(id)
            .ok_or_else(|| CloudError::UnresolvedReference {
                resource: from.to_string(),
                target: id.to_string(),
            })?;
        Ok(resource.attr(attribute)?.token())
    }

    fn add_bucket(&mut self) -> Result<LogicalId> {
        let retention = &self.policies.retention;
        let expiration_days = retention.noncurrent_version_expiration_days;
        let resource = ResourceDescriptor::new(ids::WEBSITE_BUCKET, ResourceKind::Bucket)
            .with_attribute("bucket_name", json!(self.config.bucket_name()))
            .with_attribute("versioned", json!(true))
            .with_attribute("public_read_access", json!(false))
            .with_attribute("block_public_access", json!("block_all"))
            .with_attribute("encryption", json!("s3_managed"))
            .with_attribute("enforce_ssl", json!(true))
            .with_attribute("removal_policy", serde_json::to_value(retention.removal_policy)?)
            .with_attribute("auto_delete_objects", json!(retention.auto_delete_objects))
            .with_attribute(
                "cors",
                json!([{
                    "allowed_methods": ["GET", "HEAD"],
                    "allowed_origins": ["*"],
                    "allowed_headers": ["*"],
                    "max_age": 3000
                }]),
            )
            .with_attribute(
                "lifecycle_rules",
                json!([{
                    "id": "DeleteOldVersions",
                    "enabled": true,
                    "noncurrent_version_expiration_days": expiration_days
                }]),
            );
        Ok(self.graph.add(resource)?)
    }

    fn add_origin_identity(&mut self, bucket: &LogicalId) -> Result<LogicalId> {
        let resource =
            ResourceDescriptor::new(ids::ORIGIN_ACCESS_IDENTITY, ResourceKind::OriginIdentity)
                .with_attribute(
                    "comment",
                    json!(format!("OAI for {} environment", self.config.environment)),
                )
                .with_attribute("grant", json!("read"))
                .with_reference("read-access", bucket);
        Ok(self.graph.add(resource)?)
    }

    fn add_spa_function(&mut self) -> Result<LogicalId> {
        let spa = &self.policies.spa;
        let index_suffix = format!("/{}", spa.index_document);
        let resource = ResourceDescriptor::new(ids::SPA_FUNCTION, ResourceKind::EdgeFunction)
            .with_attribute("event_type", json!("viewer-request"))
            .with_attribute("routing", serde_json::to_value(spa)?)
            .with_attribute(
                "rules",
                json!([
                    { "when": "path_ends_with_slash", "append": spa.index_document },
                    { "when": "final_segment_without_extension", "append": index_suffix },
                    { "when": "otherwise", "append": null }
                ]),
            );
        Ok(self.graph.add(resource)?)
    }

    fn add_certificate(&mut self, domain: &CustomDomain) -> Result<LogicalId> {
        let resource = ResourceDescriptor::new(ids::SITE_CERTIFICATE, ResourceKind::Certificate)
            .with_attribute("domain_name", json!(domain.domain))
            .with_attribute("region", json!(CERTIFICATE_REGION))
            .with_attribute("validation", json!("dns"))
            .with_attribute(
                "hosted_zone",
                json!({
                    "id": domain.hosted_zone_id,
                    "name": domain.hosted_zone_name
                }),
            );
        Ok(self.graph.add(resource)?)
    }

    fn add_web_acl(&mut self, firewall: &FirewallPolicy) -> Result<LogicalId> {
        let resource = ResourceDescriptor::new(ids::WEB_ACL, ResourceKind::Firewall)
            .with_attribute("scope", json!(firewall.scope))
            .with_attribute("default_action", serde_json::to_value(firewall.default_action)?)
            .with_attribute("visibility", serde_json::to_value(&firewall.visibility)?)
            .with_attribute("rules", serde_json::to_value(&firewall.rules)?);
        Ok(self.graph.add(resource)?)
    }

    fn add_distribution(&mut self, inputs: DistributionInputs<'_>) -> Result<LogicalId> {
        let error_responses: Vec<_> = SPA_FALLBACK_STATUSES
            .iter()
            .map(|status| {
                json!({
                    "http_status": status,
                    "response_http_status": 200,
                    "response_page_path": format!("/{}", INDEX_DOCUMENT)
                })
            })
            .collect();

        let bucket_name = self.token(ids::DISTRIBUTION, inputs.bucket, "BucketName")?;
        let identity_id = self.token(ids::DISTRIBUTION, inputs.identity, "Id")?;
        let function_arn = self.token(ids::DISTRIBUTION, inputs.function, "Arn")?;

        let mut resource = ResourceDescriptor::new(ids::DISTRIBUTION, ResourceKind::Distribution)
            .with_attribute(
                "default_behavior",
                json!({
                    "origin": {
                        "type": "s3",
                        "bucket": bucket_name,
                        "origin_access_identity": identity_id
                    },
                    "viewer_protocol_policy": "redirect-to-https",
                    "cache_policy": "caching-optimized",
                    "origin_request_policy": "cors-s3-origin",
                    "response_headers_policy": "security-headers",
                    "function_associations": [{
                        "function": function_arn,
                        "event_type": "viewer-request"
                    }]
                }),
            )
            .with_attribute("default_root_object", json!(INDEX_DOCUMENT))
            .with_attribute("price_class", serde_json::to_value(self.policies.price_class)?)
            .with_attribute("error_responses", json!(error_responses))
            .with_attribute("enable_logging", json!(false))
            .with_reference("origin", inputs.bucket)
            .with_reference("origin-access-identity", inputs.identity)
            .with_reference("viewer-request-function", inputs.function);

        if let (Some(certificate), Some(domain)) = (inputs.certificate, &self.config.custom_domain)
        {
            let certificate_arn = self.token(ids::DISTRIBUTION, certificate, "Arn")?;
            resource = resource
                .with_attribute("domain_names", json!([domain.domain]))
                .with_attribute("certificate_arn", json!(certificate_arn))
                .with_reference("certificate", certificate);
        }

        if let Some(web_acl) = inputs.web_acl {
            let web_acl_arn = self.token(ids::DISTRIBUTION, web_acl, "Arn")?;
            resource = resource
                .with_attribute("web_acl_id", json!(web_acl_arn))
                .with_reference("web-acl", web_acl);
        }

        Ok(self.graph.add(resource)?)
    }

    fn add_alias_records(&mut self, domain: &CustomDomain, distribution: &LogicalId) -> Result<()> {
        let record_name = domain.record_name();
        for (id, record_type) in [(ids::ALIAS_RECORD_A, "A"), (ids::ALIAS_RECORD_AAAA, "AAAA")] {
            let alias_target = self.token(id, distribution, "DomainName")?;
            let resource = ResourceDescriptor::new(id, ResourceKind::DnsRecord)
                .with_attribute("record_type", json!(record_type))
                .with_attribute("record_name", json!(record_name))
                .with_attribute(
                    "hosted_zone",
                    json!({
                        "id": domain.hosted_zone_id,
                        "name": domain.hosted_zone_name
                    }),
                )
                .with_attribute("alias_target", json!(alias_target))
                .with_reference("alias-target", distribution);
            self.graph.add(resource)?;
        }
        Ok(())
    }

    fn add_deployment(
        &mut self,
        bucket: &LogicalId,
        distribution: &LogicalId,
    ) -> Result<LogicalId> {
        let resource = ResourceDescriptor::new(ids::DEPLOY_WEBSITE, ResourceKind::Deployment)
            .with_attribute("sources", json!([self.config.asset_path]))
            .with_attribute("distribution_paths", json!(INVALIDATION_PATHS))
            .with_attribute("prune", json!(false))
            .with_reference("destination-bucket", bucket)
            .with_reference("distribution", distribution);
        Ok(self.graph.add(resource)?)
    }
}
