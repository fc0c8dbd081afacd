//! Python bindings exposing the clade expansion to a host interpreter.
//!
//! The host hands over the edge matrix as a flat column-major integer
//! buffer, exactly as it stores it, and receives the flat identifier
//! sequence back. Validation and traversal failures surface as `ValueError`.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::{ChildIndex, EdgeTable, NodeId, Topology};

/// Expand `node` into the pre-order identifier sequence of its clade.
///
/// `edges` is the column-major edge matrix of length `2 * num_edges` and
/// `ntip` the number of tip nodes.
#[pyfunction]
fn descendants(node: u32, edges: Vec<i64>, ntip: u32) -> PyResult<Vec<u32>> {
    if node == 0 {
        return Err(PyValueError::new_err("node identifiers are 1-based"));
    }

    let table = EdgeTable::from_columns(&edges, ntip)
        .map_err(|error| PyValueError::new_err(error.to_string()))?;

    let nodes = ChildIndex::new(&table)
        .descendants(NodeId::new(node))
        .map_err(|error| PyValueError::new_err(error.to_string()))?;

    Ok(nodes.into_iter().map(NodeId::get).collect())
}

#[pymodule]
fn clade(_py: Python<'_>, module: &PyModule) -> PyResult<()> {
    module.add_function(wrap_pyfunction!(descendants, module)?)?;
    Ok(())
}
