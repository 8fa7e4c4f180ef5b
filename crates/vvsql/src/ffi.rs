//! The C ABI surface of the grammar.
//!
//! Exactly one symbol is exported: `tree_sitter_vvsql`, the conventional
//! `tree_sitter_<language>` accessor that C and C++ consumers link against.
//! The matching declaration ships in `include/tree_sitter/vvsql.h`, which
//! treats [`Language`] as an opaque struct.

use crate::language::{language, Language};

/// Returns a pointer to the process-wide vvSQL [`Language`] singleton.
///
/// The pointer is never null, refers to the same object on every call, and
/// stays valid for the lifetime of the process. It is non-owning: callers
/// must not free it.
#[allow(unsafe_code)]
#[no_mangle]
pub extern "C" fn tree_sitter_vvsql() -> *const Language {
    std::ptr::from_ref(language())
}
