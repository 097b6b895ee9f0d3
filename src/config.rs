//! Command line and environment configuration.
//!
//! Arguments are parsed once into immutable config values that are passed
//! down explicitly; nothing reads the command line after this point.

use crate::error::{Result, SdsError};
use crate::range::VariableSelection;
use clap::{ArgGroup, Parser};
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Command line of `sds-dump`.
#[derive(Parser, Debug)]
#[command(name = "sds-dump")]
#[command(
    about = "Dumps part or all of INFILE, producing a colorful summary of its contents by default"
)]
#[command(after_help = "Where RANGE is an expression in one of two forms. A Fortran-style range \
uses parentheses and looks like '(1:3,:6,:)'; an equivalent C-style range uses square brackets \
and looks like '[0:2][:5][:]'.")]
#[command(group(ArgGroup::new("mode").multiple(false)))]
pub struct DumpArgs {
    /// Data file to dump
    pub infile: Option<PathBuf>,

    /// Output values in a single column
    #[arg(short = '1', long = "single-column")]
    pub single_column: bool,

    /// Print attribute values, of VAR instead of the globals and only ATT if given
    #[arg(short = 'a', long = "attributes", value_name = "[VAR][@ATT]", group = "mode",
          num_args = 0..=1, default_missing_value = "")]
    pub attributes: Option<String>,

    /// Print variable dimensions in C order and format
    #[arg(short = 'c', long = "c-style", overrides_with = "fortran_style")]
    pub c_style: bool,

    /// Print dimension sizes for the whole file or for VAR
    #[arg(short = 'd', long = "dim-sizes", value_name = "VAR", group = "mode",
          num_args = 0..=1, default_missing_value = "")]
    pub dim_sizes: Option<String>,

    /// Print variable dimensions in Fortran order and format (default)
    #[arg(short = 'f', long = "fortran-style", overrides_with = "c_style")]
    pub fortran_style: bool,

    /// Never color the output
    #[arg(short = 'g', long = "no-color", overrides_with = "color")]
    pub no_color: bool,

    /// Always color the output
    #[arg(short = 'G', long = "color", overrides_with = "no_color")]
    pub color: bool,

    /// List the attributes in the file or of VAR (also -la)
    #[arg(long = "list-atts", value_name = "VAR", group = "mode",
          num_args = 0..=1, default_missing_value = "")]
    pub list_atts: Option<String>,

    /// List the dimensions in the file or of VAR (also -ld)
    #[arg(long = "list-dims", value_name = "VAR", group = "mode",
          num_args = 0..=1, default_missing_value = "")]
    pub list_dims: Option<String>,

    /// List the variables in the file (also -lv)
    #[arg(long = "list-vars", group = "mode")]
    pub list_vars: bool,

    /// Print the values of VAR, optionally sliced by RANGE
    #[arg(short = 'v', long = "var", value_name = "VAR[RANGE]", group = "mode")]
    pub var: Option<String>,

    /// Enable logging to specified file
    #[arg(long)]
    pub log: Option<PathBuf>,
}

impl DumpArgs {
    /// Parse the process arguments, accepting the two-letter `-la`, `-ld`
    /// and `-lv` spellings.
    pub fn parse_normalized() -> Self {
        Self::parse_from(normalize_legacy_flags(std::env::args_os()))
    }
}

/// Rewrite `-la`, `-ld` and `-lv` to their long forms.
pub fn normalize_legacy_flags<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator,
    I::Item: Into<OsString>,
{
    args.into_iter()
        .map(Into::into)
        .map(|arg| match arg.to_str() {
            Some("-la") => OsString::from("--list-atts"),
            Some("-ld") => OsString::from("--list-dims"),
            Some("-lv") => OsString::from("--list-vars"),
            _ => arg,
        })
        .collect()
}

/// How variable dimensions are shown in summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimStyle {
    /// `name[dim=size][dim=size]`, outermost first.
    C,
    /// `name(dim=size,dim=size)`, fastest varying first.
    Fortran,
}

/// What `sds-dump` prints.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    /// Everything, with colors and headings.
    Summary,
    /// Attribute names, global or of a variable.
    ListAttributes {
        /// Variable to list, or the file.
        variable: Option<String>,
    },
    /// Dimension names, global or of a variable.
    ListDimensions {
        /// Variable to list, or the file.
        variable: Option<String>,
    },
    /// Variable names.
    ListVariables,
    /// Dimension sizes, global or of a variable.
    DimensionSizes {
        /// Variable to size, or the file.
        variable: Option<String>,
    },
    /// Attribute values, all or one, global or of a variable.
    AttributeValues {
        /// Variable to read from, or the file.
        variable: Option<String>,
        /// Single attribute, or all of them.
        attribute: Option<String>,
    },
    /// Values of one variable.
    VariableValues(VariableSelection),
}

/// Immutable configuration of one `sds-dump` run.
#[derive(Debug, Clone, PartialEq)]
pub struct DumpConfig {
    /// File to read.
    pub infile: PathBuf,
    /// Emit color escapes.
    pub color: bool,
    /// One value per line.
    pub single_column: bool,
    /// Dimension display convention.
    pub dim_style: DimStyle,
    /// Selected output.
    pub output: Output,
}

impl DumpConfig {
    /// Build the configuration from parsed arguments.
    ///
    /// `stdout_is_tty` picks the color default. Range expressions are parsed
    /// here, so syntax errors surface before any file is opened.
    pub fn from_args(args: DumpArgs, stdout_is_tty: bool) -> Result<Self> {
        Self::resolve(args, stdout_is_tty, Path::is_file)
    }

    fn resolve(
        mut args: DumpArgs,
        stdout_is_tty: bool,
        is_file: impl Fn(&Path) -> bool,
    ) -> Result<Self> {
        // An optional flag value that names an existing file was really the
        // input file.
        if args.infile.is_none() {
            for slot in [
                &mut args.attributes,
                &mut args.dim_sizes,
                &mut args.list_atts,
                &mut args.list_dims,
            ] {
                let names_file = slot
                    .as_deref()
                    .is_some_and(|v| !v.is_empty() && is_file(Path::new(v)));
                if names_file {
                    args.infile = slot.replace(String::new()).map(PathBuf::from);
                    break;
                }
            }
        }

        if args.infile.is_none() && args.var.as_deref().is_some_and(|v| is_file(Path::new(v))) {
            return Err(SdsError::Usage(
                "missing variable name argument to -v".to_string(),
            ));
        }

        let infile = args.infile.ok_or_else(|| {
            SdsError::Usage("you need to specify an input file".to_string())
        })?;

        let color = if args.color {
            true
        } else if args.no_color {
            false
        } else {
            stdout_is_tty
        };

        let dim_style = if args.c_style {
            DimStyle::C
        } else {
            DimStyle::Fortran
        };

        let output = if let Some(text) = args.var {
            Output::VariableValues(VariableSelection::parse(&text)?)
        } else if let Some(spec) = args.attributes {
            let (variable, attribute) = match spec.split_once('@') {
                Some((var, att)) => (non_empty(var), non_empty(att)),
                None => (non_empty(&spec), None),
            };
            Output::AttributeValues {
                variable,
                attribute,
            }
        } else if let Some(var) = args.dim_sizes {
            Output::DimensionSizes {
                variable: non_empty(&var),
            }
        } else if let Some(var) = args.list_atts {
            Output::ListAttributes {
                variable: non_empty(&var),
            }
        } else if let Some(var) = args.list_dims {
            Output::ListDimensions {
                variable: non_empty(&var),
            }
        } else if args.list_vars {
            Output::ListVariables
        } else {
            Output::Summary
        };

        Ok(Self {
            infile,
            color,
            single_column: args.single_column,
            dim_style,
            output,
        })
    }

    /// Text printed between values.
    pub fn separator(&self) -> &'static str {
        if self.single_column {
            "\n"
        } else {
            " "
        }
    }
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

/// Sub-tools the dispatcher knows how to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subcommand {
    /// `sds-diff`
    Diff,
    /// `sds-dump`
    Dump,
}

impl Subcommand {
    /// Every known subcommand.
    pub const ALL: [Subcommand; 2] = [Subcommand::Diff, Subcommand::Dump];

    /// Name as typed on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Subcommand::Diff => "diff",
            Subcommand::Dump => "dump",
        }
    }

    /// Executable implementing the subcommand.
    pub fn binary(self) -> String {
        format!("sds-{}", self.name())
    }

    /// The argv[0] the sub-tool sees.
    pub fn program_name(self) -> String {
        format!("sds {}", self.name())
    }
}

impl fmt::Display for Subcommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Subcommand {
    type Err = SdsError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|cmd| cmd.name() == s)
            .ok_or_else(|| SdsError::UnknownCommand(s.to_string()))
    }
}

/// Command line of `sds`.
///
/// Only options before COMMAND belong to the dispatcher; COMMAND and every
/// argument after it are collected verbatim for the sub-tool.
#[derive(Parser, Debug)]
#[command(name = "sds")]
#[command(override_usage = "sds [--log PATH] COMMAND ARG...")]
#[command(about = "Runs an sds-* sub-tool, paging its output when it would not fit the terminal")]
pub struct DispatchArgs {
    /// Enable logging to specified file
    #[arg(long)]
    pub log: Option<PathBuf>,

    /// Sub-tool to run (diff or dump) followed by its arguments
    #[arg(value_name = "COMMAND ARG", trailing_var_arg = true)]
    pub command: Vec<String>,
}

/// Immutable configuration of one dispatcher run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchConfig {
    /// Sub-tool to launch.
    pub subcommand: Subcommand,
    /// Arguments after the subcommand, passed through unchanged.
    pub args: Vec<String>,
    /// Standard output is a terminal.
    pub interactive: bool,
}

impl DispatchConfig {
    /// Build the configuration from parsed arguments.
    pub fn from_args(args: DispatchArgs, interactive: bool) -> Result<Self> {
        let mut words = args.command.into_iter();
        let command = words
            .next()
            .ok_or_else(|| SdsError::Usage("missing command".to_string()))?;
        Ok(Self {
            subcommand: command.parse()?,
            args: words.collect(),
            interactive,
        })
    }
}

/// Pager settings captured from the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PagerConfig {
    /// Value of `PAGER`, if set and not blank.
    pub pager: Option<String>,
}

impl PagerConfig {
    /// Read `PAGER`.
    pub fn from_env() -> Self {
        Self::from_value(std::env::var("PAGER").ok())
    }

    /// Build from an explicit `PAGER` value.
    pub fn from_value(pager: Option<String>) -> Self {
        Self {
            pager: pager.filter(|p| !p.trim().is_empty()),
        }
    }
}
