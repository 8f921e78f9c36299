//! SiteStack Core
//!
//! 環境設定から静的サイト配信用のリソースグラフを決定的に合成する。
//! 実際のプロビジョニング・ファイル読み込みは行わない。

pub mod builder;
pub mod error;
pub mod model;
pub mod outputs;
pub mod policy;
pub mod stack;
pub mod tags;
pub mod validate;

pub use builder::{BuiltGraph, ResolvedPolicies, build_graph, ids};
pub use error::{ConfigError, Result, StackError};
pub use model::*;
pub use outputs::bind_outputs;
pub use policy::{domain_record_name, firewall_policy, price_tier, retention_policy, spa_routing};
pub use stack::{Stack, stack_name, synthesize, synthesize_value};
pub use tags::{StackTags, apply_tags};
pub use validate::{Normalized, normalize};
