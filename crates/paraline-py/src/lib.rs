//! PyO3 bindings for the Paraline generator.
//!
//! Notes
//! - Meant for CAD host macros: the host keeps its own property objects and
//!   calls these functions from its recompute hook, then hands the points to its
//!   own polygon/face/extrude API.
//! - Inputs and outputs are plain floats, tuples and dicts.

use paraline::kernel::PolyKernel;
use paraline::{ParalineError, ParalineFeature, ParalineParams, Shape};
use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;

fn map_err(err: ParalineError) -> PyErr {
    match err {
        ParalineError::InvalidParameter { .. } => PyValueError::new_err(err.to_string()),
        _ => PyRuntimeError::new_err(err.to_string()),
    }
}

/// Sample count `floor(2 / resolution) + 1`.
#[pyfunction]
fn num_steps(resolution: f64) -> PyResult<usize> {
    paraline::profile::num_steps(resolution).map_err(map_err)
}

/// Closed boundary as `(x, y, z)` tuples; first and last points coincide.
#[pyfunction]
fn closed_boundary(h: f64, resolution: f64) -> PyResult<Vec<(f64, f64, f64)>> {
    let params = ParalineParams {
        h,
        resolution,
        ..ParalineParams::default()
    };
    let points = paraline::profile::closed_boundary(&params).map_err(map_err)?;
    Ok(points.iter().map(|p| (p.x, p.y, p.z)).collect())
}

/// Run the reference kernel; returns `{"kind", "points", ...measures}`.
#[pyfunction]
#[pyo3(signature = (h = 30.0, extrude_height = 10.0, resolution = 0.05))]
fn execute(py: Python<'_>, h: f64, extrude_height: f64, resolution: f64) -> PyResult<PyObject> {
    let params = ParalineParams {
        h,
        extrude_height,
        resolution,
    };
    let feature = ParalineFeature::new(params).map_err(map_err)?;
    let shape = feature.execute(&PolyKernel::default()).map_err(map_err)?;
    let dict = PyDict::new(py);
    match shape {
        Shape::Solid(prism) => {
            let pts: Vec<(f64, f64, f64)> =
                prism.base().vertices().iter().map(|p| (p.x, p.y, p.z)).collect();
            dict.set_item("kind", "solid")?;
            dict.set_item("points", pts)?;
            dict.set_item("area", prism.base().area())?;
            dict.set_item("volume", prism.volume())?;
            dict.set_item("perimeter", prism.base().perimeter())?;
            dict.set_item("surface_area", prism.surface_area())?;
            let c = prism.base().centroid();
            dict.set_item("centroid", (c.x, c.y, c.z))?;
        }
        Shape::Wire(wire) => {
            let pts: Vec<(f64, f64, f64)> = wire.points().iter().map(|p| (p.x, p.y, p.z)).collect();
            dict.set_item("kind", "wire")?;
            dict.set_item("points", pts)?;
            dict.set_item("closed", wire.is_closed())?;
        }
    }
    Ok(dict.into())
}

#[pymodule]
fn paraline_native(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(num_steps, m)?)?;
    m.add_function(wrap_pyfunction!(closed_boundary, m)?)?;
    m.add_function(wrap_pyfunction!(execute, m)?)?;
    m.add("__version__", paraline::VERSION)?;
    Ok(())
}
