//! Python bindings for the vvsql grammar crate.
//!
//! The extension module mirrors the conventional tree-sitter language
//! binding: a no-argument `language()` callable returning the grammar
//! handle's pointer as an integer, plus read-only access to the grammar
//! assets. The pointer convention lets Python-side tree-sitter runtimes
//! adopt the handle without copying it.

use pyo3::prelude::*;

/// Get the vvSQL language handle as a pointer-sized integer.
///
/// The value is non-zero and identical on every call within a process.
#[pyfunction]
fn language() -> usize {
    vvsql::tree_sitter_vvsql() as usize
}

/// The grammar's short name.
#[pyfunction]
fn language_name() -> &'static str {
    vvsql::language().name()
}

/// The handle's table-layout version.
#[pyfunction]
fn abi_version() -> u32 {
    vvsql::ABI_VERSION
}

#[pymodule]
fn _vvsql(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(language, m)?)?;
    m.add_function(wrap_pyfunction!(language_name, m)?)?;
    m.add_function(wrap_pyfunction!(abi_version, m)?)?;
    m.add("NODE_TYPES", vvsql::NODE_TYPES)?;
    m.add("HIGHLIGHTS_QUERY", vvsql::HIGHLIGHTS_QUERY)?;
    Ok(())
}
