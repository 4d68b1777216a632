//! Compatibility bridge between legacy C/Fortran callers and the Rust ports.
//!
//! This crate provides:
//! - symbol normalization helpers for legacy C/Fortran routines
//! - parsing of `#define` name bindings in legacy headers
//! - a runtime registry routing legacy-style calls to Rust kernels
//! - `extern "C"` entry points with the legacy linker symbols

mod bridge;
pub mod ffi;
mod symbols;

pub use bridge::{
    ArgKind, CallingConvention, CompatError, CompatRegistry, PatchRoutine,
    RoutineSpec, default_registry,
};
pub use symbols::{
    LegacyLanguage, MacroBinding, canonical_symbol, fortran_symbol, macro_symbol,
    parse_macro_bindings,
};
