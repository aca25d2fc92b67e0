//! Code Map Builders
//!
//! The four derived graphs over one immutable ProjectIndex: class
//! relationships, module dependencies with layering, the function call
//! graph, and the HTTP route map. Builders are read-only over the index and
//! independent of each other; they may run in any order.

pub mod api;
pub mod calls;
pub mod classes;
pub mod modules;
pub mod types;

pub use types::{
    ApiEndpoint, ApiMap, CallGraph, CallNode, ClassMap, ClassNode, ClassRelationship,
    CodeMapBundle, InterfaceNode, Layer, ModuleConnection, ModuleMap, ModuleNode, RelationKind,
};

use crate::index::ProjectIndex;
use chrono::Utc;

/// Build the full code map bundle from an index. Given the same index the
/// result is set-equal across runs, modulo `generatedAt`.
pub fn build_bundle(index: &ProjectIndex) -> CodeMapBundle {
    CodeMapBundle {
        class_map: classes::build(index),
        module_map: modules::build(index),
        call_graph: calls::build(index),
        api_map: api::build(index),
        generated_at: Utc::now(),
    }
}
