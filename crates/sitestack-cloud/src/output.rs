//! Attribute tokens and named stack outputs
//!
//! Outputs are declared before anything is provisioned, so their values are
//! templates over attribute tokens such as `${Distribution.DomainName}`.
//! A backend resolves the tokens once the resources exist.

use crate::error::{CloudError, Result};
use crate::graph::LogicalId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Reference to a backend-reported attribute of a resource
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AttrRef {
    pub resource: LogicalId,
    pub attribute: String,
}

impl AttrRef {
    pub fn new(resource: LogicalId, attribute: impl Into<String>) -> Self {
        Self {
            resource,
            attribute: attribute.into(),
        }
    }

    /// Placeholder string used inside attributes and output templates
    pub fn token(&self) -> String {
        format!("${{{}.{}}}", self.resource, self.attribute)
    }
}

impl fmt::Display for AttrRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token())
    }
}

/// Attribute values reported by a backend, per resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResolvedAttributes(BTreeMap<LogicalId, BTreeMap<String, String>>);

impl ResolvedAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        resource: &LogicalId,
        attribute: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.0
            .entry(resource.clone())
            .or_default()
            .insert(attribute.into(), value.into());
    }

    pub fn get(&self, attr: &AttrRef) -> Option<&str> {
        self.0
            .get(&attr.resource)
            .and_then(|attrs| attrs.get(&attr.attribute))
            .map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Piece of an output template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fragment {
    Literal(String),
    Attr(AttrRef),
}

/// Output value: literal text interleaved with attribute tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OutputValue {
    fragments: Vec<Fragment>,
}

impl OutputValue {
    /// Value that is exactly one attribute
    pub fn attr(attr: AttrRef) -> Self {
        Self {
            fragments: vec![Fragment::Attr(attr)],
        }
    }

    /// Attribute with a literal prefix, e.g. `https://${Distribution.DomainName}`
    pub fn prefixed(prefix: impl Into<String>, attr: AttrRef) -> Self {
        Self {
            fragments: vec![Fragment::Literal(prefix.into()), Fragment::Attr(attr)],
        }
    }

    pub fn references(&self) -> impl Iterator<Item = &AttrRef> {
        self.fragments.iter().filter_map(|f| match f {
            Fragment::Attr(attr) => Some(attr),
            Fragment::Literal(_) => None,
        })
    }

    /// Substitute every token; fails on the first token without a value
    pub fn resolve(&self, resolved: &ResolvedAttributes) -> Result<String> {
        let mut out = String::new();
        for fragment in &self.fragments {
            match fragment {
                Fragment::Literal(text) => out.push_str(text),
                Fragment::Attr(attr) => {
                    let value = resolved
                        .get(attr)
                        .ok_or_else(|| CloudError::UnresolvedAttribute(attr.token()))?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }
}

impl fmt::Display for OutputValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for fragment in &self.fragments {
            match fragment {
                Fragment::Literal(text) => f.write_str(text)?,
                Fragment::Attr(attr) => write!(f, "{}", attr)?,
            }
        }
        Ok(())
    }
}

/// A named stack output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Output {
    pub value: OutputValue,
    pub description: String,
}

/// Stable output name to value map
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OutputBindings(BTreeMap<String, Output>);

impl OutputBindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: OutputValue,
        description: impl Into<String>,
    ) {
        self.0.insert(
            name.into(),
            Output {
                value,
                description: description.into(),
            },
        );
    }

    pub fn get(&self, name: &str) -> Option<&Output> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Output)> {
        self.0.iter()
    }

    /// Resolve every output against backend-reported attributes
    pub fn resolve_all(&self, resolved: &ResolvedAttributes) -> Result<BTreeMap<String, String>> {
        self.0
            .iter()
            .map(|(name, output)| Ok((name.clone(), output.value.resolve(resolved)?)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn domain_attr() -> AttrRef {
        AttrRef::new(LogicalId::new("Distribution"), "DomainName")
    }

    #[test]
    fn test_prefixed_display() {
        let value = OutputValue::prefixed("https://", domain_attr());
        assert_eq!(value.to_string(), "https://${Distribution.DomainName}");
        assert_eq!(value.references().count(), 1);
    }

    #[test]
    fn test_resolve_substitutes_tokens() {
        let mut resolved = ResolvedAttributes::new();
        resolved.insert(&LogicalId::new("Distribution"), "DomainName", "d111.cloudfront.net");

        let value = OutputValue::prefixed("https://", domain_attr());
        assert_eq!(value.resolve(&resolved).unwrap(), "https://d111.cloudfront.net");
    }

    #[test]
    fn test_resolve_missing_attribute() {
        let value = OutputValue::attr(domain_attr());
        let err = value.resolve(&ResolvedAttributes::new()).unwrap_err();
        assert!(matches!(
            err,
            CloudError::UnresolvedAttribute(t) if t == "${Distribution.DomainName}"
        ));
    }

    #[test]
    fn test_bindings_are_sorted_by_name() {
        let mut outputs = OutputBindings::new();
        outputs.insert("WebsiteUrl", OutputValue::attr(domain_attr()), "url");
        outputs.insert("CloudFrontDomainName", OutputValue::attr(domain_attr()), "domain");

        let names: Vec<_> = outputs.names().collect();
        assert_eq!(names, vec!["CloudFrontDomainName", "WebsiteUrl"]);
    }
}
