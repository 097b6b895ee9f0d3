//! Printing the parts of a data file selected by a [`DumpConfig`].

mod color;

pub use color::{Palette, Role};

use crate::config::{DimStyle, DumpConfig, Output};
use crate::data::{AttrValue, Attribute, DataSource, Dimension, Scalar, Variable};
use crate::error::Result;
use crate::range::VariableSelection;
use std::fmt;
use std::io::Write;
use tracing::debug;

/// Writes one dump of `source` to `out`.
pub struct Dumper<'a, S: DataSource + ?Sized, W: Write> {
    config: &'a DumpConfig,
    source: &'a S,
    palette: Palette,
    separator: &'static str,
    out: W,
}

impl<S: DataSource + ?Sized, W: Write> fmt::Debug for Dumper<'_, S, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dumper")
            .field("config", self.config)
            .field("palette", &self.palette)
            .field("separator", &self.separator)
            .finish_non_exhaustive()
    }
}

impl<'a, S: DataSource + ?Sized, W: Write> Dumper<'a, S, W> {
    /// Create a dumper.
    pub fn new(config: &'a DumpConfig, source: &'a S, out: W) -> Self {
        let separator = match config.output {
            Output::Summary => ", ",
            _ => config.separator(),
        };
        Self {
            config,
            source,
            palette: Palette::new(config.color),
            separator,
            out,
        }
    }

    /// Print the configured output.
    pub fn run(mut self) -> Result<()> {
        let config = self.config;
        let source = self.source;
        let info = source.info();
        debug!(output = ?config.output, "dumping");

        match &config.output {
            Output::Summary => self.summary()?,
            Output::ListAttributes { variable } => {
                let atts = info.attributes_of(variable.as_deref())?;
                self.list(atts.iter().map(|a| (Role::AttName, a.name.clone())))?;
            }
            Output::ListDimensions { variable } => {
                let dims = match variable {
                    Some(name) => &info.variable(name)?.dims,
                    None => &info.dimensions,
                };
                self.list(dims.iter().map(|d| (Role::DimName, d.name.clone())))?;
            }
            Output::ListVariables => {
                self.list(info.variables.iter().map(|v| (Role::VarName, v.name.clone())))?;
            }
            Output::DimensionSizes { variable } => {
                let dims = match variable {
                    Some(name) => &info.variable(name)?.dims,
                    None => &info.dimensions,
                };
                self.list(dims.iter().map(|d| (Role::Value, d.len.to_string())))?;
            }
            Output::AttributeValues {
                variable,
                attribute,
            } => self.attribute_values(variable.as_deref(), attribute.as_deref())?,
            Output::VariableValues(selection) => self.variable_values(selection)?,
        }

        self.out.flush()?;
        Ok(())
    }

    fn summary(&mut self) -> Result<()> {
        let source = self.source;
        let info = source.info();
        let p = self.palette;

        writeln!(
            self.out,
            "{}: {} format",
            p.paint(Role::Heading, info.file_path.display()),
            info.format
        )?;
        writeln!(
            self.out,
            "  {}, {}, {}",
            p.paint(
                Role::AttName,
                format!("{} global attributes", info.attributes.len())
            ),
            p.paint(
                Role::DimName,
                format!("{} dimensions", info.dimensions.len())
            ),
            p.paint(
                Role::VarName,
                format!("{} variables", info.variables.len())
            ),
        )?;

        if info.attributes.is_empty() {
            writeln!(self.out, "\n - no global attributes -\n")?;
        } else {
            writeln!(self.out, "\nGlobal attributes:")?;
            self.attribute_lines(&info.attributes)?;
            writeln!(self.out)?;
        }

        writeln!(self.out, "Dimensions:")?;
        for dim in &info.dimensions {
            writeln!(
                self.out,
                "  {} = {}{}",
                p.paint(Role::DimName, &dim.name),
                p.paint(Role::Value, dim.len),
                if dim.unlimited { " (unlimited)" } else { "" }
            )?;
        }

        writeln!(self.out, "\nVariables:")?;
        for var in &info.variables {
            let dims = self.dimension_list(&var.dims);
            writeln!(
                self.out,
                "\n{} {}{}{}",
                p.paint(Role::Type, var.dtype),
                p.paint(Role::VarName, &var.name),
                dims,
                if var.is_coordinate() { " (coordinate)" } else { "" }
            )?;
            self.attribute_lines(&var.attributes)?;
        }
        writeln!(self.out)?;

        Ok(())
    }

    fn dimension_list(&self, dims: &[Dimension]) -> String {
        let p = self.palette;
        let one = |d: &Dimension| format!("{}={}", p.paint(Role::DimName, &d.name), d.len);

        match self.config.dim_style {
            DimStyle::C => dims.iter().map(|d| format!("[{}]", one(d))).collect(),
            DimStyle::Fortran => format!(
                "({})",
                dims.iter().rev().map(one).collect::<Vec<_>>().join(",")
            ),
        }
    }

    fn attribute_lines(&mut self, atts: &[Attribute]) -> Result<()> {
        for att in atts {
            let p = self.palette;
            let length = match (&att.value, self.config.dim_style) {
                (AttrValue::Text(s), DimStyle::C) => format!("[{}]", s.len()),
                (AttrValue::Text(s), DimStyle::Fortran) => format!("({})", s.len()),
                _ => String::new(),
            };
            let value = self.attribute_value(att);
            writeln!(
                self.out,
                "  {}{}{} = {}",
                p.paint(Role::Type, format!("{:<7}", att.dtype.name())),
                p.paint(Role::AttName, &att.name),
                length,
                value
            )?;
        }
        Ok(())
    }

    fn attribute_value(&self, att: &Attribute) -> String {
        match &att.value {
            AttrValue::Text(s) => self.quoted(s),
            AttrValue::Ints(v) => self.joined(v.iter().map(|&x| Scalar::Int(x))),
            AttrValue::UInts(v) => self.joined(v.iter().map(|&x| Scalar::UInt(x))),
            AttrValue::Floats(v) => self.joined(v.iter().map(|&x| Scalar::Float(x))),
        }
    }

    fn quoted(&self, s: &str) -> String {
        let p = self.palette;
        let escaped = s.replace('"', "\\\"");
        format!(
            "{}{}{}",
            p.paint(Role::Quote, '"'),
            p.paint_lines(Role::Value, &escaped),
            p.paint(Role::Quote, '"')
        )
    }

    fn joined(&self, values: impl Iterator<Item = Scalar>) -> String {
        values
            .map(|v| self.palette.paint(Role::Value, v))
            .collect::<Vec<_>>()
            .join(self.separator)
    }

    /// Names or sizes, each followed by the separator.
    fn list(&mut self, items: impl Iterator<Item = (Role, String)>) -> Result<()> {
        for (role, text) in items {
            let item = self.palette.paint(role, text);
            write!(self.out, "{}{}", item, self.separator)?;
        }
        if !self.config.single_column {
            writeln!(self.out)?;
        }
        Ok(())
    }

    fn attribute_values(&mut self, variable: Option<&str>, attribute: Option<&str>) -> Result<()> {
        let source = self.source;
        let info = source.info();

        match attribute {
            Some(name) => {
                let att = info.attribute(variable, name)?;
                let text = self.attribute_value(att);
                write!(self.out, "{}", text)?;
            }
            None => {
                for att in info.attributes_of(variable)? {
                    let text = self.attribute_value(att);
                    write!(self.out, "{}{}", text, self.separator)?;
                }
            }
        }
        writeln!(self.out)?;
        Ok(())
    }

    fn variable_values(&mut self, selection: &VariableSelection) -> Result<()> {
        let source = self.source;
        let var: &Variable = source.info().variable(&selection.name)?;
        selection.range.validate(&var.name, &var.shape())?;

        let values = source.read_values(var)?.select(&selection.range);
        debug!(variable = %var.name, shape = ?values.shape(), "printing values");
        let scalars = values.scalars();

        if var.ndim() > 1 {
            // one outer-dimension record at a time
            let per_record: usize = values.shape()[1..].iter().product();
            for record in scalars.chunks(per_record.max(1)) {
                let text = self.joined(record.iter().copied());
                write!(self.out, "{}{}", text, self.separator)?;
            }
        } else {
            let text = self.joined(scalars.into_iter());
            write!(self.out, "{}", text)?;
        }

        if !self.config.single_column {
            writeln!(self.out)?;
        }
        Ok(())
    }
}
