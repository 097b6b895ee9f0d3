//! Dataset information.

use super::{Attribute, Dimension, Variable};
use crate::error::{Result, SdsError};
use std::path::PathBuf;

/// Schema of an opened file.
#[derive(Debug, Clone)]
pub struct DatasetInfo {
    /// Path to the source file.
    pub file_path: PathBuf,
    /// Human readable format name.
    pub format: String,
    /// Global attributes, in file order.
    pub attributes: Vec<Attribute>,
    /// Dimensions, in file order.
    pub dimensions: Vec<Dimension>,
    /// Variables, in file order.
    pub variables: Vec<Variable>,
}

impl DatasetInfo {
    /// Look up a variable by name.
    pub fn variable(&self, name: &str) -> Result<&Variable> {
        self.variables
            .iter()
            .find(|v| v.name == name)
            .ok_or_else(|| SdsError::NoSuchVariable {
                file: self.file_path.clone(),
                name: name.to_string(),
            })
    }

    /// Attributes of a variable, or the global attributes when `variable` is `None`.
    pub fn attributes_of(&self, variable: Option<&str>) -> Result<&[Attribute]> {
        match variable {
            Some(name) => Ok(&self.variable(name)?.attributes),
            None => Ok(&self.attributes),
        }
    }

    /// Look up one attribute, global or on a variable.
    pub fn attribute(&self, variable: Option<&str>, name: &str) -> Result<&Attribute> {
        self.attributes_of(variable)?
            .iter()
            .find(|a| a.name == name)
            .ok_or_else(|| SdsError::NoSuchAttribute {
                file: self.file_path.clone(),
                attribute: name.to_string(),
                variable: variable.map(str::to_string),
            })
    }
}
