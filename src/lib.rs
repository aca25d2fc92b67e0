// Atlas Core - Rust-powered codebase intelligence engine
//
// Builds a per-file symbol index from raw source text and derives four
// cross-file code maps from it: class relationships, module dependencies,
// the function call graph, and the HTTP route map. Consumers (store, UI,
// orchestration) sit outside this crate and talk to it through the
// ProjectIndex / CodeMapBundle documents and the query views.

pub mod engine;
pub mod error;
pub mod extractors;
pub mod index;
pub mod language;
pub mod maps;
pub mod query;
pub mod store;
pub mod walker;

pub use engine::Engine;
pub use error::{EngineError, Result};
pub use extractors::base::FileSymbolRecord;
pub use index::ProjectIndex;
pub use maps::CodeMapBundle;
