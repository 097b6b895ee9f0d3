//! sds - inspection tools for scientific data sets.
//!
//! Two pieces carry the weight:
//!
//! - [`range`] parses slice expressions such as `temp[0:2][:]` or
//!   `temp(:,1:3)` and checks them against a variable's shape.
//! - [`pipeline`] runs a sub-tool, looks at the first block of its output
//!   and decides whether to page it.
//!
//! The rest reads netCDF files ([`data`]), prints them ([`dump`]) and
//! turns command lines into immutable configuration ([`config`]).
//!
//! # Example
//!
//! ```
//! use sds::range::VariableSelection;
//!
//! let selection = VariableSelection::parse("temp(1:3,2)").unwrap();
//! assert_eq!(selection.name, "temp");
//! selection.range.validate("temp", &[4, 5]).unwrap();
//! ```

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]
#![deny(unsafe_code)]

pub mod config;
pub mod data;
pub mod dump;
pub mod error;
pub mod format;
pub mod logging;
pub mod pipeline;
pub mod range;

pub use error::{Result, SdsError};
