// Base Extractor Types for Atlas
//
// Language-neutral symbol records shared by every extraction strategy. The
// per-language extractors fill these in; the index assembler and the map
// builders only ever read them.

pub mod types;

pub use types::{
    ClassSymbol, FileSymbolRecord, FunctionSymbol, ImportRecord, MethodSymbol, Param,
    PropertySymbol, TypeField, TypeKind, TypeSymbol, VariableSymbol,
};
