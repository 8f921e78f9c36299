//! スタック共通タグ
//!
//! グラフ構築後に全リソースへ同じタグを付与する純粋な変換。

use crate::model::SiteConfig;
use sitestack_cloud::ResourceGraph;
use std::collections::BTreeMap;

/// ManagedBy タグの値
pub const MANAGED_BY: &str = "sitestack";

/// 全リソースに付与するタグ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackTags(BTreeMap<String, String>);

impl StackTags {
    /// Environment / Project / ManagedBy
    pub fn for_config(config: &SiteConfig) -> Self {
        let mut tags = BTreeMap::new();
        tags.insert("Environment".to_string(), config.environment.to_string());
        tags.insert("Project".to_string(), config.project.clone());
        tags.insert("ManagedBy".to_string(), MANAGED_BY.to_string());
        Self(tags)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.0.iter()
    }
}

/// 全記述子にタグを付与した新しいグラフを返す
pub fn apply_tags(graph: ResourceGraph, tags: &StackTags) -> ResourceGraph {
    graph.map_descriptors(|mut resource| {
        for (key, value) in tags.iter() {
            resource.tags.insert(key.clone(), value.clone());
        }
        resource
    })
}
