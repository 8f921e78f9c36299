//! Serializable hand-off document for the provisioning backend

use crate::graph::{ResourceDescriptor, ResourceGraph};
use crate::output::OutputBindings;
use chrono::{DateTime, Utc};
use serde::Serialize;

pub const MANIFEST_VERSION: u32 = 1;

/// Everything a backend needs to provision one stack
#[derive(Debug, Clone, Serialize)]
pub struct Manifest {
    /// Manifest format version
    pub version: u32,

    /// Stack name (e.g. "MaterialDashboard-Dev")
    pub stack_name: String,

    pub environment: String,
    pub region: String,
    pub account: String,

    /// When the manifest was generated
    pub generated_at: DateTime<Utc>,

    /// Resources in provisioning order
    pub resources: Vec<ResourceDescriptor>,

    /// Named outputs
    pub outputs: OutputBindings,
}

impl Manifest {
    pub fn new(
        stack_name: impl Into<String>,
        environment: impl Into<String>,
        region: impl Into<String>,
        account: impl Into<String>,
        graph: &ResourceGraph,
        outputs: &OutputBindings,
    ) -> Self {
        Self {
            version: MANIFEST_VERSION,
            stack_name: stack_name.into(),
            environment: environment.into(),
            region: region.into(),
            account: account.into(),
            generated_at: Utc::now(),
            resources: graph.iter().cloned().collect(),
            outputs: outputs.clone(),
        }
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
