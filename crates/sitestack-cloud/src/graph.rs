//! Resource descriptors and the ordered resource graph
//!
//! A [`ResourceGraph`] is an append-only list of descriptors. Every
//! reference must point at a descriptor that was added earlier, so the
//! emission order is always a valid provisioning order.

use crate::error::{CloudError, Result};
use crate::output::AttrRef;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Stable logical identifier of a resource inside one stack
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogicalId(String);

impl LogicalId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LogicalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LogicalId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Kind of cloud resource a descriptor stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    /// Object storage bucket holding the site assets
    Bucket,
    /// Identity the CDN uses to read from the bucket
    OriginIdentity,
    /// Function running at the CDN edge
    EdgeFunction,
    /// TLS certificate for a custom domain
    Certificate,
    /// CDN distribution
    Distribution,
    /// Web application firewall
    Firewall,
    /// DNS record in a hosted zone
    DnsRecord,
    /// Asset sync into the bucket plus cache invalidation
    Deployment,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 8] = [
        ResourceKind::Bucket,
        ResourceKind::OriginIdentity,
        ResourceKind::EdgeFunction,
        ResourceKind::Certificate,
        ResourceKind::Distribution,
        ResourceKind::Firewall,
        ResourceKind::DnsRecord,
        ResourceKind::Deployment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Bucket => "bucket",
            ResourceKind::OriginIdentity => "origin-identity",
            ResourceKind::EdgeFunction => "edge-function",
            ResourceKind::Certificate => "certificate",
            ResourceKind::Distribution => "distribution",
            ResourceKind::Firewall => "firewall",
            ResourceKind::DnsRecord => "dns-record",
            ResourceKind::Deployment => "deployment",
        }
    }

    /// Attributes a backend reports once the resource exists
    pub fn attributes(&self) -> &'static [&'static str] {
        match self {
            ResourceKind::Bucket => &["BucketName", "Arn"],
            ResourceKind::OriginIdentity => &["Id"],
            ResourceKind::EdgeFunction => &["Arn"],
            ResourceKind::Certificate => &["Arn"],
            ResourceKind::Distribution => &["DistributionId", "DomainName"],
            ResourceKind::Firewall => &["Id", "Arn"],
            ResourceKind::DnsRecord => &["Name"],
            ResourceKind::Deployment => &[],
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dependency edge from one descriptor to another
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    /// What the target is used for (e.g. "origin", "certificate")
    pub role: String,

    /// Referenced resource
    pub target: LogicalId,
}

/// A single node of the resource graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceDescriptor {
    /// Logical identifier, unique within the graph
    pub id: LogicalId,

    /// Resource kind
    pub kind: ResourceKind,

    /// Resource-specific settings
    pub attributes: BTreeMap<String, serde_json::Value>,

    /// Descriptors this one depends on
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references: Vec<Reference>,

    /// Key/value tags
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
}

impl ResourceDescriptor {
    pub fn new(id: impl Into<LogicalId>, kind: ResourceKind) -> Self {
        Self {
            id: id.into(),
            kind,
            attributes: BTreeMap::new(),
            references: Vec::new(),
            tags: BTreeMap::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    pub fn with_reference(mut self, role: impl Into<String>, target: &LogicalId) -> Self {
        self.references.push(Reference {
            role: role.into(),
            target: target.clone(),
        });
        self
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&serde_json::Value> {
        self.attributes.get(key)
    }

    /// Get an attribute as a specific type
    pub fn get_attribute<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.attributes
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// Target of the first reference with the given role
    pub fn reference(&self, role: &str) -> Option<&LogicalId> {
        self.references
            .iter()
            .find(|r| r.role == role)
            .map(|r| &r.target)
    }

    pub fn depends_on(&self, target: &LogicalId) -> bool {
        self.references.iter().any(|r| &r.target == target)
    }

    /// Token for one of this resource's backend-reported attributes
    pub fn attr(&self, attribute: &str) -> Result<AttrRef> {
        if !self.kind.attributes().contains(&attribute) {
            return Err(CloudError::UnknownAttribute {
                resource: self.id.to_string(),
                kind: self.kind.to_string(),
                attribute: attribute.to_string(),
            });
        }
        Ok(AttrRef::new(self.id.clone(), attribute))
    }
}

/// Resources in dependency order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResourceGraph {
    resources: Vec<ResourceDescriptor>,
}

impl ResourceGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a descriptor. All of its references must already be in the graph.
    pub fn add(&mut self, resource: ResourceDescriptor) -> Result<LogicalId> {
        if self.get(&resource.id).is_some() {
            return Err(CloudError::DuplicateResource(resource.id.to_string()));
        }

        if let Some(missing) = resource
            .references
            .iter()
            .find(|r| self.get(&r.target).is_none())
        {
            return Err(CloudError::UnresolvedReference {
                resource: resource.id.to_string(),
                target: missing.target.to_string(),
            });
        }

        tracing::debug!(id = %resource.id, kind = %resource.kind, "Added resource to graph");
        let id = resource.id.clone();
        self.resources.push(resource);
        Ok(id)
    }

    pub fn get(&self, id: &LogicalId) -> Option<&ResourceDescriptor> {
        self.resources.iter().find(|r| &r.id == id)
    }

    /// Index of a resource in emission order
    pub fn position(&self, id: &LogicalId) -> Option<usize> {
        self.resources.iter().position(|r| &r.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResourceDescriptor> {
        self.resources.iter()
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn count(&self, kind: ResourceKind) -> usize {
        self.resources.iter().filter(|r| r.kind == kind).count()
    }

    pub fn contains_kind(&self, kind: ResourceKind) -> bool {
        self.resources.iter().any(|r| r.kind == kind)
    }

    /// Rewrite every descriptor, keeping ids, kinds and order intact
    pub fn map_descriptors<F>(self, mut f: F) -> Self
    where
        F: FnMut(ResourceDescriptor) -> ResourceDescriptor,
    {
        let resources = self
            .resources
            .into_iter()
            .map(|r| {
                let (id, kind, references) = (r.id.clone(), r.kind, r.references.clone());
                let mut mapped = f(r);
                mapped.id = id;
                mapped.kind = kind;
                mapped.references = references;
                mapped
            })
            .collect();
        Self { resources }
    }
}
