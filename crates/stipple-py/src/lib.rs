#![allow(
    clippy::type_complexity,
    reason = "pyo3 functions often return tuples of arrays and sizes"
)]
#![allow(
    clippy::needless_pass_by_value,
    reason = "PyReadonlyArray types are thin wrappers passed by value in pyo3 idioms"
)]
#![allow(
    clippy::unnecessary_wraps,
    reason = "PyO3 methods conventionally return PyResult for Python-facing APIs"
)]
#![allow(
    clippy::missing_const_for_fn,
    reason = "pyo3 #[pymethods] are not const-compatible"
)]
#![allow(
    clippy::elidable_lifetime_names,
    reason = "Explicit 'py lifetimes are idiomatic and clear in PyO3 method signatures"
)]
use numpy::{IntoPyArray, PyArray1, PyReadonlyArray1};
use pyo3::prelude::*;
use pyo3::types::PyModule;

use stipple_core::{SparseArray, SparseSeq};
use stipple_kernels::{
    add as add_arrays, dedup, dedup_inplace, prune, prune_inplace, toarray,
};

fn value_error(e: stipple_core::Error) -> PyErr {
    PyErr::new::<pyo3::exceptions::PyValueError, _>(e.to_string())
}

macro_rules! sparse_class {
    ($name:ident, $t:ty) => {
        #[pyclass]
        pub struct $name {
            inner: SparseSeq<$t>,
        }

        #[pymethods]
        impl $name {
            #[new]
            #[pyo3(signature = (shape, indices, values, check = true))]
            fn new(
                shape: Vec<usize>,
                indices: PyReadonlyArray1<'_, i64>,
                values: PyReadonlyArray1<'_, $t>,
                check: bool,
            ) -> PyResult<Self> {
                let seq = SparseSeq::from_parts(
                    shape,
                    indices.as_slice()?.to_vec(),
                    values.as_slice()?.to_vec(),
                    check,
                )
                .map_err(value_error)?;
                Ok(Self { inner: seq })
            }

            fn ndim(&self) -> usize {
                self.inner.ndim()
            }

            fn shape(&self) -> Vec<usize> {
                self.inner.shape.clone()
            }

            fn nnz(&self) -> usize {
                self.inner.nnz()
            }

            fn indices<'py>(
                &self,
                py: Python<'py>,
            ) -> PyResult<Vec<Bound<'py, PyArray1<i64>>>> {
                let per_axis = py.detach(|| stipple_kernels::indices(&self.inner));
                Ok(per_axis
                    .into_iter()
                    .map(|axis| PyArray1::from_vec(py, axis))
                    .collect())
            }

            fn values<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyArray1<$t>>> {
                Ok(PyArray1::from_vec(py, self.inner.values.clone()))
            }

            fn extract<'py>(
                &self,
                py: Python<'py>,
            ) -> PyResult<(
                Vec<Bound<'py, PyArray1<i64>>>,
                Bound<'py, PyArray1<$t>>,
                Vec<usize>,
            )> {
                let (per_axis, values, shape) =
                    py.detach(|| stipple_kernels::extract(&self.inner));
                Ok((
                    per_axis
                        .into_iter()
                        .map(|axis| PyArray1::from_vec(py, axis))
                        .collect(),
                    PyArray1::from_vec(py, values),
                    shape,
                ))
            }

            fn dedup<'py>(&self, py: Python<'py>) -> PyResult<Self> {
                let out = py.detach(|| dedup(&self.inner)).map_err(value_error)?;
                Ok(Self { inner: out })
            }

            fn dedup_inplace<'py>(&mut self, py: Python<'py>) -> PyResult<()> {
                let inner = &mut self.inner;
                py.detach(|| dedup_inplace(inner)).map_err(value_error)
            }

            fn prune<'py>(&self, py: Python<'py>) -> PyResult<Self> {
                let out = py.detach(|| prune(&self.inner)).map_err(value_error)?;
                Ok(Self { inner: out })
            }

            fn prune_inplace<'py>(&mut self, py: Python<'py>) -> PyResult<()> {
                let inner = &mut self.inner;
                py.detach(|| prune_inplace(inner)).map_err(value_error)
            }

            /// Flat row-major dense array; reshape to `shape()` on the
            /// Python side.
            fn toarray<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyArray1<$t>>> {
                let dense = py.detach(|| toarray(&self.inner));
                Ok(dense.into_pyarray(py))
            }
        }
    };
}

sparse_class!(SparseF64, f64);
sparse_class!(SparseI64, i64);

/// Concatenate sequences of identical shape, promoting to float when any
/// input is `SparseF64`.
#[pyfunction]
fn add(py: Python<'_>, seqs: Vec<Py<PyAny>>) -> PyResult<Py<PyAny>> {
    let mut arrays: Vec<SparseArray> = Vec::with_capacity(seqs.len());
    for obj in &seqs {
        let bound = obj.bind(py);
        if let Ok(s) = bound.extract::<PyRef<'_, SparseI64>>() {
            arrays.push(SparseArray::Int(s.inner.clone()));
        } else if let Ok(s) = bound.extract::<PyRef<'_, SparseF64>>() {
            arrays.push(SparseArray::Float(s.inner.clone()));
        } else {
            return Err(PyErr::new::<pyo3::exceptions::PyTypeError, _>(
                "add expects SparseI64 or SparseF64 sequences",
            ));
        }
    }
    let out = py.detach(|| add_arrays(&arrays)).map_err(value_error)?;
    match out {
        SparseArray::Int(s) => Ok(Py::new(py, SparseI64 { inner: s })?.into_any()),
        SparseArray::Float(s) => Ok(Py::new(py, SparseF64 { inner: s })?.into_any()),
    }
}

#[pyfunction]
fn set_chunksize(bytes: usize) {
    stipple_kernels::set_chunksize(bytes);
}

#[pyfunction]
fn get_chunksize() -> usize {
    stipple_kernels::chunksize()
}

#[pymodule]
fn _core(m: &Bound<PyModule>) -> PyResult<()> {
    stipple_kernels::init_parallel();
    m.add("version", env!("CARGO_PKG_VERSION"))?;
    m.add_class::<SparseF64>()?;
    m.add_class::<SparseI64>()?;
    m.add_function(wrap_pyfunction!(add, m)?)?;
    m.add_function(wrap_pyfunction!(set_chunksize, m)?)?;
    m.add_function(wrap_pyfunction!(get_chunksize, m)?)?;
    Ok(())
}
