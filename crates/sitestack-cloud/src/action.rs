//! Ordered provisioning actions derived from a resource graph

use crate::graph::{LogicalId, ResourceGraph, ResourceKind};
use crate::output::ResolvedAttributes;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A planned step for the provisioning backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Action {
    /// Unique identifier for the action
    pub id: String,

    /// Type of action to perform
    pub action_type: ActionType,

    /// Kind of the resource the action applies to
    pub resource_type: ResourceKind,

    /// Resource identifier
    pub resource_id: LogicalId,

    /// Description of the action
    pub description: String,

    /// Additional details about the action
    pub details: BTreeMap<String, serde_json::Value>,
}

/// Type of action to perform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    /// Create the resource
    Create,
    /// Upload local assets into a bucket
    Sync,
    /// Invalidate CDN cache paths
    Invalidate,
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionType::Create => write!(f, "create"),
            ActionType::Sync => write!(f, "sync"),
            ActionType::Invalidate => write!(f, "invalidate"),
        }
    }
}

/// Result of applying actions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyResult {
    /// Successfully applied actions
    pub succeeded: Vec<ActionResult>,

    /// Failed actions
    pub failed: Vec<ActionResult>,

    /// Attribute values reported for created resources
    pub resolved: ResolvedAttributes,

    /// Total execution time in milliseconds
    pub duration_ms: u64,
}

impl ApplyResult {
    pub fn new() -> Self {
        Self {
            succeeded: Vec::new(),
            failed: Vec::new(),
            resolved: ResolvedAttributes::new(),
            duration_ms: 0,
        }
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn add_success(&mut self, action_id: String, message: String) {
        self.succeeded.push(ActionResult {
            action_id,
            success: true,
            message,
            error: None,
        });
    }

    pub fn add_failure(&mut self, action_id: String, error: String) {
        self.failed.push(ActionResult {
            action_id,
            success: false,
            message: String::new(),
            error: Some(error),
        });
    }
}

impl Default for ApplyResult {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of a single action
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionResult {
    /// ID of the action
    pub action_id: String,

    /// Whether the action succeeded
    pub success: bool,

    /// Success message
    pub message: String,

    /// Error message if failed
    pub error: Option<String>,
}

/// Plan containing all actions in provisioning order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    /// List of actions to perform
    pub actions: Vec<Action>,
}

impl Plan {
    /// One create per descriptor; deployments additionally sync and invalidate
    pub fn from_graph(graph: &ResourceGraph) -> Self {
        let mut actions = Vec::new();

        for resource in graph.iter() {
            actions.push(Action {
                id: format!("create-{}", resource.id),
                action_type: ActionType::Create,
                resource_type: resource.kind,
                resource_id: resource.id.clone(),
                description: format!("Create {} {}", resource.kind, resource.id),
                details: resource
                    .references
                    .iter()
                    .map(|r| (r.role.clone(), serde_json::json!(r.target)))
                    .collect(),
            });

            if resource.kind != ResourceKind::Deployment {
                continue;
            }

            let mut sync_details = BTreeMap::new();
            for key in ["sources", "prune"] {
                if let Some(value) = resource.attribute(key) {
                    sync_details.insert(key.to_string(), value.clone());
                }
            }
            if let Some(bucket) = resource.reference("destination-bucket") {
                sync_details.insert("destination_bucket".to_string(), serde_json::json!(bucket));
            }
            actions.push(Action {
                id: format!("sync-{}", resource.id),
                action_type: ActionType::Sync,
                resource_type: resource.kind,
                resource_id: resource.id.clone(),
                description: format!("Sync assets for {}", resource.id),
                details: sync_details,
            });

            if let Some(distribution) = resource.reference("distribution") {
                let mut details = BTreeMap::new();
                details.insert("distribution".to_string(), serde_json::json!(distribution));
                if let Some(paths) = resource.attribute("distribution_paths") {
                    details.insert("paths".to_string(), paths.clone());
                }
                actions.push(Action {
                    id: format!("invalidate-{}", resource.id),
                    action_type: ActionType::Invalidate,
                    resource_type: resource.kind,
                    resource_id: resource.id.clone(),
                    description: format!("Invalidate cache of {}", distribution),
                    details,
                });
            }
        }

        Self { actions }
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Get actions by type
    pub fn actions_by_type(&self, action_type: ActionType) -> Vec<&Action> {
        self.actions
            .iter()
            .filter(|a| a.action_type == action_type)
            .collect()
    }

    /// Summary of the plan
    pub fn summary(&self) -> PlanSummary {
        PlanSummary {
            create: self.actions_by_type(ActionType::Create).len(),
            sync: self.actions_by_type(ActionType::Sync).len(),
            invalidate: self.actions_by_type(ActionType::Invalidate).len(),
        }
    }
}

/// Summary of planned actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanSummary {
    pub create: usize,
    pub sync: usize,
    pub invalidate: usize,
}

impl std::fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} to create, {} to sync, {} to invalidate",
            self.create, self.sync, self.invalidate
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::ResourceDescriptor;
    use serde_json::json;

    fn graph_with_deployment() -> ResourceGraph {
        let mut graph = ResourceGraph::new();
        let bucket = graph
            .add(ResourceDescriptor::new("WebsiteBucket", ResourceKind::Bucket))
            .unwrap();
        let distribution = graph
            .add(
                ResourceDescriptor::new("Distribution", ResourceKind::Distribution)
                    .with_reference("origin", &bucket),
            )
            .unwrap();
        graph
            .add(
                ResourceDescriptor::new("DeployWebsite", ResourceKind::Deployment)
                    .with_attribute("sources", json!(["build"]))
                    .with_attribute("prune", json!(false))
                    .with_attribute("distribution_paths", json!(["/*"]))
                    .with_reference("destination-bucket", &bucket)
                    .with_reference("distribution", &distribution),
            )
            .unwrap();
        graph
    }

    #[test]
    fn test_plan_from_graph_orders_actions() {
        let plan = Plan::from_graph(&graph_with_deployment());
        let ids: Vec<_> = plan.actions.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "create-WebsiteBucket",
                "create-Distribution",
                "create-DeployWebsite",
                "sync-DeployWebsite",
                "invalidate-DeployWebsite",
            ]
        );
    }

    #[test]
    fn test_plan_details() {
        let plan = Plan::from_graph(&graph_with_deployment());

        let sync = &plan.actions_by_type(ActionType::Sync)[0];
        assert_eq!(sync.details["prune"], json!(false));
        assert_eq!(sync.details["destination_bucket"], json!("WebsiteBucket"));

        let invalidate = &plan.actions_by_type(ActionType::Invalidate)[0];
        assert_eq!(invalidate.details["paths"], json!(["/*"]));
    }

    #[test]
    fn test_summary_display() {
        let plan = Plan::from_graph(&graph_with_deployment());
        assert_eq!(
            plan.summary().to_string(),
            "3 to create, 1 to sync, 1 to invalidate"
        );
        assert!(Plan::from_graph(&ResourceGraph::new()).is_empty());
    }
}
