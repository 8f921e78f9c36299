//! Provisioning backend contract

use crate::action::{Action, ActionType, ApplyResult, Plan};
use crate::error::Result;
use crate::graph::{ResourceDescriptor, ResourceGraph, ResourceKind};
use async_trait::async_trait;

/// External provisioning engine
///
/// A backend receives the finished resource graph, materializes each
/// descriptor in emission order, performs asset sync and cache invalidation
/// for deployments, and reports per-action results together with the
/// attribute values of what it created.
#[async_trait]
pub trait ProvisioningBackend: Send + Sync {
    /// Returns the backend name (e.g., "dry-run")
    fn name(&self) -> &str;

    /// Returns the backend display name for UI
    fn display_name(&self) -> &str;

    /// Materialize every descriptor of the graph
    async fn apply(&self, graph: &ResourceGraph) -> Result<ApplyResult>;
}

/// Backend that provisions nothing and reports placeholder attributes
///
/// Used to preview outputs and to exercise the backend contract in tests.
#[derive(Debug, Clone, Default)]
pub struct DryRunBackend;

impl DryRunBackend {
    pub fn new() -> Self {
        Self
    }

    fn placeholder(resource: &ResourceDescriptor, attribute: &str) -> String {
        let id = resource.id.as_str().to_lowercase();
        match (resource.kind, attribute) {
            (ResourceKind::Bucket, "BucketName") => resource
                .get_attribute::<String>("bucket_name")
                .unwrap_or_else(|| format!("dryrun-{}", id)),
            (ResourceKind::Bucket, "Arn") => format!(
                "arn:aws:s3:::{}",
                resource
                    .get_attribute::<String>("bucket_name")
                    .unwrap_or_else(|| format!("dryrun-{}", id))
            ),
            (ResourceKind::Distribution, "DistributionId") => {
                format!("DRYRUN{}", resource.id.as_str().to_uppercase())
            }
            (ResourceKind::Distribution, "DomainName") => format!("{}.dryrun.cloudfront.net", id),
            (ResourceKind::DnsRecord, "Name") => resource
                .get_attribute::<String>("record_name")
                .unwrap_or(id),
            (_, "Arn") => format!("arn:aws:dryrun:::{}/{}", resource.kind, id),
            (_, attribute) => format!("dryrun-{}-{}", id, attribute.to_lowercase()),
        }
    }

    /// Detail keys a deployment step cannot run without
    fn missing_inputs(action: &Action) -> Vec<&'static str> {
        let required: &[&'static str] = match action.action_type {
            ActionType::Create => &[],
            ActionType::Sync => &["sources", "destination_bucket"],
            ActionType::Invalidate => &["paths"],
        };
        required
            .iter()
            .copied()
            .filter(|key| match action.details.get(*key) {
                None | Some(serde_json::Value::Null) => true,
                Some(serde_json::Value::Array(items)) => items.is_empty(),
                Some(_) => false,
            })
            .collect()
    }
}

#[async_trait]
impl ProvisioningBackend for DryRunBackend {
    fn name(&self) -> &str {
        "dry-run"
    }

    fn display_name(&self) -> &str {
        "Dry run"
    }

    async fn apply(&self, graph: &ResourceGraph) -> Result<ApplyResult> {
        let start = std::time::Instant::now();
        let plan = Plan::from_graph(graph);
        let mut result = ApplyResult::new();

        for action in &plan.actions {
            let missing = Self::missing_inputs(action);
            if !missing.is_empty() {
                let error = format!("missing {}", missing.join(", "));
                tracing::warn!(action = %action.id, "Dry run failed: {}", error);
                result.add_failure(action.id.clone(), error);
                continue;
            }

            if action.action_type == ActionType::Create {
                if let Some(resource) = graph.get(&action.resource_id) {
                    for attribute in resource.kind.attributes() {
                        result.resolved.insert(
                            &resource.id,
                            *attribute,
                            Self::placeholder(resource, attribute),
                        );
                    }
                }
            }
            tracing::info!(action = %action.id, "Dry run: {}", action.description);
            result.add_success(action.id.clone(), format!("{} (dry run)", action.description));
        }

        result.duration_ms = start.elapsed().as_millis() as u64;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputValue;
    use serde_json::json;

    fn graph() -> ResourceGraph {
        let mut graph = ResourceGraph::new();
        let bucket = graph
            .add(
                ResourceDescriptor::new("WebsiteBucket", ResourceKind::Bucket)
                    .with_attribute("bucket_name", json!("site-dev-123")),
            )
            .unwrap();
        graph
            .add(
                ResourceDescriptor::new("Distribution", ResourceKind::Distribution)
                    .with_reference("origin", &bucket),
            )
            .unwrap();
        graph
    }

    #[tokio::test]
    async fn test_dry_run_succeeds_every_action() {
        let backend = DryRunBackend::new();
        let graph = graph();
        let result = backend.apply(&graph).await.unwrap();

        assert!(result.is_success());
        assert_eq!(result.succeeded.len(), 2);
        assert_eq!(backend.name(), "dry-run");
    }

    #[tokio::test]
    async fn test_dry_run_resolves_attributes() {
        let graph = graph();
        let result = DryRunBackend::new().apply(&graph).await.unwrap();

        let bucket = graph.get(&"WebsiteBucket".into()).unwrap();
        let name = OutputValue::attr(bucket.attr("BucketName").unwrap());
        assert_eq!(name.resolve(&result.resolved).unwrap(), "site-dev-123");

        let distribution = graph.get(&"Distribution".into()).unwrap();
        let url = OutputValue::prefixed("https://", distribution.attr("DomainName").unwrap());
        assert_eq!(
            url.resolve(&result.resolved).unwrap(),
            "https://distribution.dryrun.cloudfront.net"
        );
    }

    #[tokio::test]
    async fn test_dry_run_reports_deployment_without_sources() {
        let mut graph = graph();
        graph
            .add(
                ResourceDescriptor::new("DeployWebsite", ResourceKind::Deployment)
                    .with_attribute("sources", json!([]))
                    .with_attribute("distribution_paths", json!(["/*"]))
                    .with_reference("destination-bucket", &"WebsiteBucket".into())
                    .with_reference("distribution", &"Distribution".into()),
            )
            .unwrap();

        let result = DryRunBackend::new().apply(&graph).await.unwrap();

        assert!(!result.is_success());
        assert_eq!(result.failed.len(), 1);
        assert_eq!(result.failed[0].action_id, "sync-DeployWebsite");
        assert_eq!(result.failed[0].error.as_deref(), Some("missing sources"));
        // create + invalidate still run
        assert_eq!(result.succeeded.len(), 4);
    }
}
