//! In-memory data source used by unit tests.

use super::{Attribute, DataSource, DatasetInfo, Dimension, ValueArray, Values, Variable};
use crate::error::{Result, SdsError};
use ndarray::{ArrayD, IxDyn};
use std::collections::HashMap;
use std::path::PathBuf;

/// A dataset held entirely in memory.
#[derive(Debug)]
pub(crate) struct MemorySource {
    info: DatasetInfo,
    values: HashMap<String, Values>,
}

impl MemorySource {
    pub(crate) fn new(path: &str) -> Self {
        Self {
            info: DatasetInfo {
                file_path: PathBuf::from(path),
                format: "memory".to_string(),
                attributes: Vec::new(),
                dimensions: Vec::new(),
                variables: Vec::new(),
            },
            values: HashMap::new(),
        }
    }

    pub(crate) fn global(mut self, attr: Attribute) -> Self {
        self.info.attributes.push(attr);
        self
    }

    pub(crate) fn dimension(mut self, dim: Dimension) -> Self {
        self.info.dimensions.push(dim);
        self
    }

    /// Add a variable whose values are `0, 1, 2, ...` in row-major order.
    pub(crate) fn variable(mut self, var: Variable) -> Self {
        let shape = var.shape();
        let count: usize = shape.iter().product();
        let data = ArrayD::from_shape_vec(IxDyn(&shape), (0..count as i64).collect())
            .expect("shape matches element count");
        self.values
            .insert(var.name.clone(), Values::new(var.dtype, ValueArray::Int(data)));
        self.info.variables.push(var);
        self
    }
}

impl DataSource for MemorySource {
    fn info(&self) -> &DatasetInfo {
        &self.info
    }

    fn read_values(&self, variable: &Variable) -> Result<Values> {
        self.values
            .get(&variable.name)
            .cloned()
            .ok_or_else(|| SdsError::NoSuchVariable {
                file: self.info.file_path.clone(),
                name: variable.name.clone(),
            })
    }
}
