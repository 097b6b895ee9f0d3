//! Data reading and representation.
//!
//! The dump tool only needs a file's schema plus the values of one variable
//! at a time. [`DataSource`] is that seam; [`NetcdfSource`] implements it
//! on top of the `netcdf` crate.

mod dataset;
#[cfg(test)]
pub(crate) mod memory;
mod reader;
mod schema;
mod variable_data;

pub use dataset::DatasetInfo;
pub use reader::NetcdfSource;
pub use schema::{AttrValue, Attribute, DataType, Dimension, Variable};
pub use variable_data::{Scalar, ValueArray, Values};

use crate::error::Result;

/// An open data file.
pub trait DataSource {
    /// Schema of the whole file.
    fn info(&self) -> &DatasetInfo;

    /// Read every value of `variable`.
    fn read_values(&self, variable: &Variable) -> Result<Values>;
}
