//! Dimensions, attributes and variables of a data file.

use std::fmt;

/// Element type of a variable or attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    /// `int8`
    I8,
    /// `uint8`
    U8,
    /// `int16`
    I16,
    /// `uint16`
    U16,
    /// `int32`
    I32,
    /// `uint32`
    U32,
    /// `int64`
    I64,
    /// `uint64`
    U64,
    /// 32-bit float.
    Float,
    /// 64-bit float.
    Double,
    /// Single characters.
    Char,
    /// Strings, and any type with no printable values.
    String,
}

impl DataType {
    /// Name printed in summaries.
    pub fn name(self) -> &'static str {
        match self {
            DataType::I8 => "int8",
            DataType::U8 => "uint8",
            DataType::I16 => "int16",
            DataType::U16 => "uint16",
            DataType::I32 => "int32",
            DataType::U32 => "uint32",
            DataType::I64 => "int64",
            DataType::U64 => "uint64",
            DataType::Float => "float",
            DataType::Double => "double",
            DataType::Char => "char",
            DataType::String => "string",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Attribute payload, widened by type family.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    /// Signed integers of any width.
    Ints(Vec<i64>),
    /// Unsigned integers of any width.
    UInts(Vec<u64>),
    /// `float` and `double` values.
    Floats(Vec<f64>),
    /// Text, with string lists joined by `", "`.
    Text(String),
}

/// A named attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    /// Attribute name.
    pub name: String,
    /// Type as stored in the file.
    pub dtype: DataType,
    /// Widened value.
    pub value: AttrValue,
}

impl Attribute {
    /// Create an attribute.
    pub fn new(name: impl Into<String>, dtype: DataType, value: AttrValue) -> Self {
        Self {
            name: name.into(),
            dtype,
            value,
        }
    }

    /// Create a text attribute.
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, DataType::String, AttrValue::Text(value.into()))
    }
}

/// A named dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dimension {
    /// Dimension name.
    pub name: String,
    /// Current length.
    pub len: usize,
    /// Record dimension that can grow.
    pub unlimited: bool,
}

impl Dimension {
    /// Create a fixed-size dimension.
    pub fn new(name: impl Into<String>, len: usize) -> Self {
        Self {
            name: name.into(),
            len,
            unlimited: false,
        }
    }
}

/// A variable's schema, without its values.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    /// Variable name.
    pub name: String,
    /// Element type.
    pub dtype: DataType,
    /// Outermost (slowest varying) first.
    pub dims: Vec<Dimension>,
    /// Attributes, in file order.
    pub attributes: Vec<Attribute>,
}

impl Variable {
    /// Length of every dimension, outermost first.
    pub fn shape(&self) -> Vec<usize> {
        self.dims.iter().map(|d| d.len).collect()
    }

    /// Number of dimensions.
    pub fn ndim(&self) -> usize {
        self.dims.len()
    }

    /// A 1-D variable named after its own dimension.
    pub fn is_coordinate(&self) -> bool {
        matches!(self.dims.as_slice(), [dim] if dim.name == self.name)
    }
}
