//! Variable value buffers and slicing.

use super::DataType;
use crate::format::format_g;
use crate::range::RangeSpec;
use ndarray::{ArrayD, Slice};
use std::fmt;

/// Multi-dimensional values, widened by type family.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueArray {
    /// Signed integers of any width.
    Int(ArrayD<i64>),
    /// Unsigned integers of any width.
    UInt(ArrayD<u64>),
    /// `float` and `double`.
    Float(ArrayD<f64>),
}

/// One element of a [`ValueArray`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    /// A signed integer.
    Int(i64),
    /// An unsigned integer.
    UInt(u64),
    /// A float, printed like `%g`.
    Float(f64),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int(v) => write!(f, "{}", v),
            Scalar::UInt(v) => write!(f, "{}", v),
            Scalar::Float(v) => f.write_str(&format_g(*v)),
        }
    }
}

/// Values read from one variable.
#[derive(Debug, Clone, PartialEq)]
pub struct Values {
    /// Element type as stored in the file.
    pub dtype: DataType,
    /// The values themselves.
    pub data: ValueArray,
}

impl Values {
    /// Create a value buffer.
    pub fn new(dtype: DataType, data: ValueArray) -> Self {
        Self { dtype, data }
    }

    /// Shape of the buffer, outermost first.
    pub fn shape(&self) -> &[usize] {
        match &self.data {
            ValueArray::Int(a) => a.shape(),
            ValueArray::UInt(a) => a.shape(),
            ValueArray::Float(a) => a.shape(),
        }
    }

    /// Total number of elements.
    pub fn len(&self) -> usize {
        self.shape().iter().product()
    }

    /// Whether the buffer holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The sub-buffer described by `range`.
    ///
    /// `range` must already have been validated against this buffer's shape;
    /// out-of-range bounds are clamped.
    pub fn select(&self, range: &RangeSpec) -> Values {
        let ranges = range.index_ranges(self.shape());
        let slice = |axis: ndarray::AxisDescription| Slice::from(ranges[axis.axis.index()].clone());

        let data = match &self.data {
            ValueArray::Int(a) => ValueArray::Int(a.slice_each_axis(slice).to_owned()),
            ValueArray::UInt(a) => ValueArray::UInt(a.slice_each_axis(slice).to_owned()),
            ValueArray::Float(a) => ValueArray::Float(a.slice_each_axis(slice).to_owned()),
        };
        Values::new(self.dtype, data)
    }

    /// Every element in logical (row-major) order.
    pub fn scalars(&self) -> Vec<Scalar> {
        match &self.data {
            ValueArray::Int(a) => a.iter().map(|&v| Scalar::Int(v)).collect(),
            ValueArray::UInt(a) => a.iter().map(|&v| Scalar::UInt(v)).collect(),
            ValueArray::Float(a) => a.iter().map(|&v| Scalar::Float(v)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::VariableSelection;
    use ndarray::IxDyn;

    fn grid() -> Values {
        // time=4, lat=3, values 0..12
        let data = ArrayD::from_shape_vec(IxDyn(&[4, 3]), (0..12).collect()).unwrap();
        Values::new(DataType::I32, ValueArray::Int(data))
    }

    fn select(values: &Values, text: &str) -> Vec<Scalar> {
        let sel = VariableSelection::parse(text).unwrap();
        values.select(&sel.range).scalars()
    }

    #[test]
    fn full_extent_returns_everything() {
        let values = grid();
        let full = RangeSpec::full_extent(values.shape());
        assert_eq!(values.select(&full), values);
        assert_eq!(values.select(&RangeSpec::entire()), values);
    }

    #[test]
    fn bracket_slice() {
        let values = grid();
        let picked = select(&values, "v[1:2][2]");
        assert_eq!(picked, vec![Scalar::Int(5), Scalar::Int(8)]);
    }

    #[test]
    fn paren_slice_matches_bracket_slice() {
        let values = grid();
        assert_eq!(select(&values, "v(3,2:3)"), select(&values, "v[1:2][2]"));
    }

    #[test]
    fn open_ended_slice_keeps_shape() {
        let values = grid();
        let sel = VariableSelection::parse("v[2:][:1]").unwrap();
        let sliced = values.select(&sel.range);
        assert_eq!(sliced.shape(), &[2, 2]);
        assert_eq!(sliced.len(), 4);
    }

    #[test]
    fn scalar_display() {
        assert_eq!(Scalar::Int(-3).to_string(), "-3");
        assert_eq!(Scalar::UInt(7).to_string(), "7");
        assert_eq!(Scalar::Float(0.5).to_string(), "0.5");
    }
}
