//! Output formatting for the CLI
//!
//! Records are wrapped in a [`Provider`] and rendered as a table, a key/value
//! list, bare values, JSON or YAML. Warnings and success notices go through
//! [`Output`] as well so commands never write to the terminal directly.

mod provider;
mod render;

pub use provider::Provider;
pub use render::{render, render_value, select_columns};

use ans_core::{AnsError, Fields};
use colored::*;
use serde::Serialize;
use std::fmt;
use std::io::Write;
use std::str::FromStr;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    List,
    Json,
    Yaml,
    Value,
}

impl OutputFormat {
    pub const NAMES: &'static [&'static str] = &["table", "list", "json", "yaml", "value"];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Table => "table",
            OutputFormat::List => "list",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
            OutputFormat::Value => "value",
        }
    }

    /// Whether this format is meant for people rather than programs
    pub fn is_human(&self) -> bool {
        matches!(self, OutputFormat::Table | OutputFormat::List)
    }
}

impl FromStr for OutputFormat {
    type Err = AnsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "table" => Ok(OutputFormat::Table),
            "list" => Ok(OutputFormat::List),
            "json" => Ok(OutputFormat::Json),
            "yaml" => Ok(OutputFormat::Yaml),
            "value" => Ok(OutputFormat::Value),
            other => Err(AnsError::invalid_flag(
                "output",
                format!(
                    "unknown format '{}', expected one of: {}",
                    other,
                    Self::NAMES.join(", ")
                ),
            )),
        }
    }
}

/// Currency used for monetary fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Currency {
    #[default]
    Gbp,
    Usd,
    Eur,
    Jpy,
}

impl Currency {
    pub const CODES: &'static [&'static str] = &["GBP", "USD", "EUR", "JPY"];

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Gbp => "GBP",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Jpy => "JPY",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Gbp => "£",
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Jpy => "¥",
        }
    }

    /// Decimal places of the currency's minor unit
    pub fn minor_units(&self) -> u32 {
        match self {
            Currency::Jpy => 0,
            _ => 2,
        }
    }

    /// Round an amount half away from zero to the minor unit.
    pub fn round(&self, amount: f64) -> f64 {
        let scale = 10_f64.powi(self.minor_units() as i32);
        let rounded = (amount * scale).round() / scale;
        // avoid -0.0
        if rounded == 0.0 {
            0.0
        } else {
            rounded
        }
    }

    /// Format an amount, rounding half away from zero to the minor unit.
    pub fn format(&self, amount: f64) -> String {
        let scale = 10_i64.pow(self.minor_units());
        let minor = (amount * scale as f64).round() as i64;
        let sign = if minor < 0 { "-" } else { "" };
        let minor = minor.unsigned_abs();
        let whole = minor / scale as u64;
        if self.minor_units() == 0 {
            return format!("{}{}{}", sign, self.symbol(), whole);
        }
        let fraction = minor % scale as u64;
        format!(
            "{}{}{}.{:0width$}",
            sign,
            self.symbol(),
            whole,
            fraction,
            width = self.minor_units() as usize
        )
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = AnsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GBP" => Ok(Currency::Gbp),
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            "JPY" => Ok(Currency::Jpy),
            other => Err(AnsError::Config(format!(
                "unknown currency '{}', expected one of: {}",
                other,
                Self::CODES.join(", ")
            ))),
        }
    }
}

/// Which columns to show
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Columns {
    /// The provider's default-visible columns
    #[default]
    Default,
    /// Every column
    All,
    /// Only the named columns
    Named(Vec<String>),
}

/// Rendering settings for one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputOptions {
    pub format: OutputFormat,
    pub columns: Columns,
    /// Fail on unknown column names instead of skipping them
    pub strict: bool,
    pub currency: Currency,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Table,
            columns: Columns::Default,
            strict: false,
            currency: Currency::default(),
        }
    }
}

/// Destination of everything a command prints
pub struct Output<'a> {
    options: OutputOptions,
    out: &'a mut dyn Write,
    err: &'a mut dyn Write,
}

impl<'a> Output<'a> {
    pub fn new(options: OutputOptions, out: &'a mut dyn Write, err: &'a mut dyn Write) -> Self {
        Self { options, out, err }
    }

    pub fn options(&self) -> &OutputOptions {
        &self.options
    }

    /// Render records to the output stream.
    pub fn render<T: Fields + Serialize>(&mut self, provider: &Provider<T>) -> ans_core::Result<()> {
        render(provider, &self.options, &mut *self.out)
    }

    /// Report a non-fatal failure on the error stream.
    pub fn warn(&mut self, message: impl fmt::Display) {
        let line = format!("{} {}", "Warning:".yellow().bold(), message);
        if let Err(e) = writeln!(self.err, "{}", line) {
            tracing::debug!(error = %e, "failed to write warning");
        }
    }

    /// Confirm an operation that has no record to show.
    ///
    /// Only printed for human formats so machine-readable output stays parseable.
    pub fn success(&mut self, message: &str) -> ans_core::Result<()> {
        if self.options.format.is_human() {
            writeln!(self.out, "{}", format_success(message))?;
        }
        Ok(())
    }
}

/// Format success message
pub fn format_success(message: &str) -> String {
    format!("{} {}", "✓".green().bold(), message)
}
