//! NetCDF file reader.

use super::{
    AttrValue, Attribute, DataSource, DataType, DatasetInfo, Dimension, ValueArray, Values,
    Variable,
};
use crate::error::{Result, SdsError};
use ndarray::{ArrayD, IxDyn};
use netcdf::types::{FloatType, IntType, NcVariableType};
use netcdf::AttributeValue;
use std::path::Path;
use tracing::debug;

/// Read every value of `$var` as `$src` and widen into `ValueArray::$kind`.
macro_rules! read_widened {
    ($var:expr, $shape:expr, $src:ty, $kind:ident, $dst:ty) => {{
        let values: Vec<$src> = $var
            .get_values(..)
            .map_err(|e| SdsError::NetCDF(format!("Failed to read {}: {}", $var.name(), e)))?;
        ValueArray::$kind(to_array($shape, values.into_iter().map(|x| x as $dst).collect())?)
    }};
}

fn to_array<T>(shape: &[usize], values: Vec<T>) -> Result<ArrayD<T>> {
    ArrayD::from_shape_vec(IxDyn(shape), values)
        .map_err(|e| SdsError::NetCDF(format!("Invalid shape/data size: {}", e)))
}

/// A netCDF file opened for dumping.
pub struct NetcdfSource {
    file: netcdf::File,
    info: DatasetInfo,
}

impl std::fmt::Debug for NetcdfSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetcdfSource")
            .field("path", &self.info.file_path)
            .finish()
    }
}

impl NetcdfSource {
    /// Open `path` and read its schema.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(SdsError::FileOpen {
                path: path.to_path_buf(),
                reason: "not a file".to_string(),
            });
        }

        let file = netcdf::open(path).map_err(|e| SdsError::FileOpen {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let info = DatasetInfo {
            file_path: path.to_path_buf(),
            format: "netCDF".to_string(),
            attributes: file.attributes().map(|a| Self::read_attribute(&a)).collect(),
            dimensions: file.dimensions().map(|d| Self::read_dimension(&d)).collect(),
            variables: file.variables().map(|v| Self::read_variable(&v)).collect(),
        };
        debug!(
            path = %path.display(),
            variables = info.variables.len(),
            "opened dataset"
        );

        Ok(Self { file, info })
    }

    fn read_dimension(dim: &netcdf::Dimension<'_>) -> Dimension {
        Dimension {
            name: dim.name().to_string(),
            len: dim.len(),
            unlimited: dim.is_unlimited(),
        }
    }

    fn read_variable(var: &netcdf::Variable<'_>) -> Variable {
        Variable {
            name: var.name().to_string(),
            dtype: Self::data_type(&var.vartype()),
            dims: var.dimensions().iter().map(Self::read_dimension).collect(),
            attributes: var.attributes().map(|a| Self::read_attribute(&a)).collect(),
        }
    }

    fn data_type(vartype: &NcVariableType) -> DataType {
        match vartype {
            NcVariableType::Int(IntType::I8) => DataType::I8,
            NcVariableType::Int(IntType::U8) => DataType::U8,
            NcVariableType::Int(IntType::I16) => DataType::I16,
            NcVariableType::Int(IntType::U16) => DataType::U16,
            NcVariableType::Int(IntType::I32) => DataType::I32,
            NcVariableType::Int(IntType::U32) => DataType::U32,
            NcVariableType::Int(IntType::I64) => DataType::I64,
            NcVariableType::Int(IntType::U64) => DataType::U64,
            NcVariableType::Float(FloatType::F32) => DataType::Float,
            NcVariableType::Float(FloatType::F64) => DataType::Double,
            NcVariableType::Char => DataType::Char,
            // compound, opaque, enum and vlen types have no printable values
            _ => DataType::String,
        }
    }

    fn read_attribute(attr: &netcdf::Attribute<'_>) -> Attribute {
        let name = attr.name();

        let (dtype, value) = match attr.value() {
            Ok(AttributeValue::Uchar(v)) => (DataType::U8, AttrValue::UInts(vec![v as u64])),
            Ok(AttributeValue::Schar(v)) => (DataType::I8, AttrValue::Ints(vec![v as i64])),
            Ok(AttributeValue::Ushort(v)) => (DataType::U16, AttrValue::UInts(vec![v as u64])),
            Ok(AttributeValue::Short(v)) => (DataType::I16, AttrValue::Ints(vec![v as i64])),
            Ok(AttributeValue::Uint(v)) => (DataType::U32, AttrValue::UInts(vec![v as u64])),
            Ok(AttributeValue::Int(v)) => (DataType::I32, AttrValue::Ints(vec![v as i64])),
            Ok(AttributeValue::Ulonglong(v)) => (DataType::U64, AttrValue::UInts(vec![v])),
            Ok(AttributeValue::Longlong(v)) => (DataType::I64, AttrValue::Ints(vec![v])),
            Ok(AttributeValue::Float(v)) => (DataType::Float, AttrValue::Floats(vec![v as f64])),
            Ok(AttributeValue::Double(v)) => (DataType::Double, AttrValue::Floats(vec![v])),
            Ok(AttributeValue::Str(v)) => (DataType::String, AttrValue::Text(v)),
            Ok(AttributeValue::Uchars(v)) => (
                DataType::U8,
                AttrValue::UInts(v.into_iter().map(u64::from).collect()),
            ),
            Ok(AttributeValue::Schars(v)) => (
                DataType::I8,
                AttrValue::Ints(v.into_iter().map(i64::from).collect()),
            ),
            Ok(AttributeValue::Ushorts(v)) => (
                DataType::U16,
                AttrValue::UInts(v.into_iter().map(u64::from).collect()),
            ),
            Ok(AttributeValue::Shorts(v)) => (
                DataType::I16,
                AttrValue::Ints(v.into_iter().map(i64::from).collect()),
            ),
            Ok(AttributeValue::Uints(v)) => (
                DataType::U32,
                AttrValue::UInts(v.into_iter().map(u64::from).collect()),
            ),
            Ok(AttributeValue::Ints(v)) => (
                DataType::I32,
                AttrValue::Ints(v.into_iter().map(i64::from).collect()),
            ),
            Ok(AttributeValue::Ulonglongs(v)) => (DataType::U64, AttrValue::UInts(v)),
            Ok(AttributeValue::Longlongs(v)) => (DataType::I64, AttrValue::Ints(v)),
            Ok(AttributeValue::Floats(v)) => (
                DataType::Float,
                AttrValue::Floats(v.into_iter().map(f64::from).collect()),
            ),
            Ok(AttributeValue::Doubles(v)) => (DataType::Double, AttrValue::Floats(v)),
            Ok(AttributeValue::Strs(v)) => (DataType::String, AttrValue::Text(v.join(", "))),
            Err(e) => (DataType::String, AttrValue::Text(format!("<unreadable: {}>", e))),
        };

        Attribute::new(name, dtype, value)
    }
}

impl DataSource for NetcdfSource {
    fn info(&self) -> &DatasetInfo {
        &self.info
    }

    fn read_values(&self, variable: &Variable) -> Result<Values> {
        let var = self
            .file
            .variable(&variable.name)
            .ok_or_else(|| SdsError::NoSuchVariable {
                file: self.info.file_path.clone(),
                name: variable.name.clone(),
            })?;
        let shape = variable.shape();

        let data = match variable.dtype {
            DataType::I8 => read_widened!(var, &shape, i8, Int, i64),
            DataType::I16 => read_widened!(var, &shape, i16, Int, i64),
            DataType::I32 => read_widened!(var, &shape, i32, Int, i64),
            DataType::I64 => read_widened!(var, &shape, i64, Int, i64),
            DataType::U8 => read_widened!(var, &shape, u8, UInt, u64),
            DataType::U16 => read_widened!(var, &shape, u16, UInt, u64),
            DataType::U32 => read_widened!(var, &shape, u32, UInt, u64),
            DataType::U64 => read_widened!(var, &shape, u64, UInt, u64),
            DataType::Float => read_widened!(var, &shape, f32, Float, f64),
            DataType::Double => read_widened!(var, &shape, f64, Float, f64),
            DataType::Char | DataType::String => {
                return Err(SdsError::UnsupportedType {
                    variable: variable.name.clone(),
                    dtype: variable.dtype.to_string(),
                })
            }
        };

        Ok(Values::new(variable.dtype, data))
    }
}
