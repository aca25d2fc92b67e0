//! Atlas Language Extractors Module
//!
//! Per-file symbol extraction for every recognized language. Each file
//! yields one language-neutral `FileSymbolRecord`; the strategy behind it
//! differs per language family:
//!
//! - `typescript` - grammar-aware extraction via tree-sitter (TS/TSX/JS/JSX)
//! - `python` - line-oriented heuristic extraction (indentation-scoped)
//! - `go` - line-oriented heuristic extraction (brace/receiver-scoped)
//! - `base` - the shared record types all strategies produce
//! - `factory` - strategy dispatch; never fails, empty record on parse failure

pub mod base;
pub mod factory;

pub mod go;
pub mod python;
pub mod typescript;

pub use base::FileSymbolRecord;
pub use factory::extract;
