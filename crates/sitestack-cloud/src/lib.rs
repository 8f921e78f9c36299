//! SiteStack Cloud Resources
//!
//! This crate provides the declarative vocabulary shared by the SiteStack
//! core and the external provisioning backend: resource descriptors, the
//! ordered resource graph, attribute tokens, stack outputs and the backend
//! contract.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                  sitestack CLI                   │
//! │           (validate / synth / plan ...)          │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │                sitestack-core                    │
//! │   validator → policies → builder → outputs      │
//! └─────────────────┬───────────────────────────────┘
//!                   │ ResourceGraph + OutputBindings
//! ┌─────────────────▼───────────────────────────────┐
//! │               sitestack-cloud                    │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │       trait ProvisioningBackend          │   │
//! │  └──────────────────────────────────────────┘   │
//! │  ┌──────────────┐  ┌──────────────┐            │
//! │  │  Plan        │  │  Manifest    │            │
//! │  └──────────────┘  └──────────────┘            │
//! └───────┬─────────────────────────────────────────┘
//!         │
//! ┌───────▼────────┐
//! │ external engine│
//! └────────────────┘
//! ```

pub mod action;
pub mod error;
pub mod graph;
pub mod manifest;
pub mod output;
pub mod provider;

// Re-exports
pub use action::{Action, ActionResult, ActionType, ApplyResult, Plan, PlanSummary};
pub use error::{CloudError, Result};
pub use graph::{LogicalId, Reference, ResourceDescriptor, ResourceGraph, ResourceKind};
pub use manifest::{MANIFEST_VERSION, Manifest};
pub use output::{AttrRef, Fragment, Output, OutputBindings, OutputValue, ResolvedAttributes};
pub use provider::{DryRunBackend, ProvisioningBackend};
