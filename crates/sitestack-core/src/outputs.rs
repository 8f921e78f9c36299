//! スタック出力の収集

use crate::builder::BuiltGraph;
use crate::error::Result;
use sitestack_cloud::{CloudError, LogicalId, OutputBindings, OutputValue, ResourceDescriptor};

pub const WEBSITE_BUCKET_NAME: &str = "WebsiteBucketName";
pub const DISTRIBUTION_ID: &str = "CloudFrontDistributionId";
pub const DISTRIBUTION_DOMAIN_NAME: &str = "CloudFrontDomainName";
pub const WEBSITE_URL: &str = "WebsiteUrl";
pub const WEB_ACL_ID: &str = "WebACLId";

fn lookup<'a>(built: &'a BuiltGraph, id: &LogicalId) -> Result<&'a ResourceDescriptor> {
    Ok(built
        .graph
        .get(id)
        .ok_or_else(|| CloudError::UnresolvedReference {
            resource: "outputs".to_string(),
            target: id.to_string(),
        })?)
}

/// 構築済みグラフから出力を収集する
///
/// WebACLId は WAF が構築された場合のみ含まれる。
pub fn bind_outputs(built: &BuiltGraph) -> Result<OutputBindings> {
    let bucket = lookup(built, &built.bucket)?;
    let distribution = lookup(built, &built.distribution)?;

    let mut outputs = OutputBindings::new();
    outputs.insert(
        WEBSITE_BUCKET_NAME,
        OutputValue::attr(bucket.attr("BucketName")?),
        "S3 Bucket Name for Website Assets",
    );
    outputs.insert(
        DISTRIBUTION_ID,
        OutputValue::attr(distribution.attr("DistributionId")?),
        "CloudFront Distribution ID",
    );
    outputs.insert(
        DISTRIBUTION_DOMAIN_NAME,
        OutputValue::attr(distribution.attr("DomainName")?),
        "CloudFront Distribution Domain Name",
    );
    outputs.insert(
        WEBSITE_URL,
        OutputValue::prefixed("https://", distribution.attr("DomainName")?),
        "Website URL",
    );

    if let Some(firewall) = &built.firewall {
        let web_acl = lookup(built, firewall)?;
        outputs.insert(
            WEB_ACL_ID,
            OutputValue::attr(web_acl.attr("Id")?),
            "WAF Web ACL ID",
        );
    }

    tracing::debug!(outputs = outputs.len(), "Outputs bound");
    Ok(outputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitestack_cloud::{ResourceGraph, ResourceKind};

    fn built(with_firewall: bool) -> BuiltGraph {
        let mut graph = ResourceGraph::new();
        let bucket = graph
            .add(ResourceDescriptor::new("WebsiteBucket", ResourceKind::Bucket))
            .unwrap();
        let firewall = with_firewall.then(|| {
            graph
                .add(ResourceDescriptor::new("WebACL", ResourceKind::Firewall))
                .unwrap()
        });
        let distribution = graph
            .add(ResourceDescriptor::new("Distribution", ResourceKind::Distribution))
            .unwrap();
        BuiltGraph {
            graph,
            bucket,
            distribution,
            firewall,
        }
    }

    #[test]
    fn test_outputs_without_firewall() {
        let outputs = bind_outputs(&built(false)).unwrap();
        assert_eq!(outputs.len(), 4);
        assert!(!outputs.contains(WEB_ACL_ID));
        assert_eq!(
            outputs.get(WEBSITE_URL).unwrap().value.to_string(),
            "https://${Distribution.DomainName}"
        );
    }

    #[test]
    fn test_outputs_with_firewall_are_superset() {
        let without: Vec<String> = bind_outputs(&built(false))
            .unwrap()
            .names()
            .map(str::to_string)
            .collect();
        let with = bind_outputs(&built(true)).unwrap();

        assert_eq!(with.len(), 5);
        for name in &without {
            assert!(with.contains(name));
        }
        assert_eq!(with.get(WEB_ACL_ID).unwrap().value.to_string(), "${WebACL.Id}");
    }

    #[test]
    fn test_missing_resource_is_graph_error() {
        let mut built = built(false);
        built.distribution = LogicalId::new("Missing");
        assert!(matches!(
            bind_outputs(&built),
            Err(crate::StackError::Graph(CloudError::UnresolvedReference { .. }))
        ));
    }
}
