//! Rendering of providers into tables, lists and serialized forms

use ans_core::{AnsError, FieldSet, FieldValue, Fields, Result};
use serde::Serialize;
use serde_json::Value;
use std::io::Write;
use tabled::{builder::Builder, settings::Style};
use tracing::debug;

use super::{Columns, Currency, OutputFormat, OutputOptions, Provider};

/// Render `provider` to `out` according to `options`.
///
/// Column selection is resolved before anything is written, so an invalid
/// column in strict mode leaves `out` untouched.
pub fn render<T, W>(provider: &Provider<T>, options: &OutputOptions, out: &mut W) -> Result<()>
where
    T: Fields + Serialize,
    W: Write + ?Sized,
{
    match options.format {
        OutputFormat::Json => {
            let records = serialized_records(provider, options.currency)?;
            let mut text = serde_json::to_string_pretty(&records)?;
            text.push('\n');
            out.write_all(text.as_bytes())?;
        }
        OutputFormat::Yaml => {
            let records = serialized_records(provider, options.currency)?;
            let text = serde_yaml::to_string(&records)
                .map_err(|e| AnsError::Serialization(e.to_string()))?;
            out.write_all(text.as_bytes())?;
        }
        OutputFormat::Table | OutputFormat::List | OutputFormat::Value => {
            let sets = provider.field_sets();
            let columns = select_columns(
                &sets,
                provider.default_columns(),
                &options.columns,
                options.strict,
            )?;
            let rows = build_rows(&sets, &columns, options.currency);
            match options.format {
                OutputFormat::Table => write_table(&columns, &rows, out)?,
                OutputFormat::List => write_list(&columns, &rows, out)?,
                _ => write_values(&rows, out)?,
            }
        }
    }
    Ok(())
}

/// Resolve which columns are shown, in field-set insertion order.
pub fn select_columns(
    sets: &[FieldSet],
    default_columns: &[&str],
    selection: &Columns,
    strict: bool,
) -> Result<Vec<String>> {
    // Records with flattened sub-records may carry different columns; take
    // the union, first-seen order.
    let mut universe: Vec<&str> = Vec::new();
    for set in sets {
        for name in set.names() {
            if !universe.contains(&name) {
                universe.push(name);
            }
        }
    }

    if sets.is_empty() {
        return Ok(match selection {
            Columns::Named(names) => names.clone(),
            Columns::Default | Columns::All => {
                default_columns.iter().map(|c| c.to_string()).collect()
            }
        });
    }

    let selected = match selection {
        Columns::All => universe.iter().map(|c| c.to_string()).collect(),
        Columns::Default => universe
            .iter()
            .filter(|name| {
                sets.iter()
                    .any(|set| set.get(name).map(|f| f.default).unwrap_or(false))
            })
            .map(|c| c.to_string())
            .collect(),
        Columns::Named(requested) => {
            for name in requested {
                if !universe.iter().any(|c| c.eq_ignore_ascii_case(name)) {
                    if strict {
                        return Err(AnsError::InvalidColumn(name.clone()));
                    }
                    debug!(column = %name, "ignoring unknown column");
                }
            }
            universe
                .iter()
                .filter(|c| requested.iter().any(|r| r.eq_ignore_ascii_case(c)))
                .map(|c| c.to_string())
                .collect()
        }
    };
    Ok(selected)
}

/// Render one value as display text.
pub fn render_value(value: &FieldValue, currency: Currency) -> String {
    match value {
        FieldValue::Money(amount) => currency.format(*amount),
        other => other.to_string(),
    }
}

/// Full records as JSON values, monetary fields rounded to the currency's
/// minor unit.
fn serialized_records<T>(provider: &Provider<T>, currency: Currency) -> Result<Vec<Value>>
where
    T: Fields + Serialize,
{
    provider
        .records()
        .iter()
        .map(|record| {
            let mut value = serde_json::to_value(record)?;
            if let Value::Object(map) = &mut value {
                for field in record.fields().iter() {
                    if let (Some(amount), Some(slot)) =
                        (field.value.money(), map.get_mut(&field.name))
                    {
                        *slot = Value::from(currency.round(amount));
                    }
                }
            }
            Ok(value)
        })
        .collect()
}

fn build_rows(sets: &[FieldSet], columns: &[String], currency: Currency) -> Vec<Vec<String>> {
    sets.iter()
        .map(|set| {
            columns
                .iter()
                .map(|column| {
                    set.get(column)
                        .map(|f| render_value(&f.value, currency))
                        .unwrap_or_default()
                })
                .collect()
        })
        .collect()
}

fn write_table<W: Write + ?Sized>(
    columns: &[String],
    rows: &[Vec<String>],
    out: &mut W,
) -> Result<()> {
    if columns.is_empty() {
        return Ok(());
    }
    let mut builder = Builder::default();
    builder.push_record(columns.iter().map(|c| c.to_uppercase()));
    for row in rows {
        builder.push_record(row.iter().cloned());
    }
    let table = builder.build().with(Style::rounded()).to_string();
    writeln!(out, "{}", table)?;
    Ok(())
}

fn write_list<W: Write + ?Sized>(
    columns: &[String],
    rows: &[Vec<String>],
    out: &mut W,
) -> Result<()> {
    let width = columns.iter().map(|c| c.len()).max().unwrap_or(0);
    for (index, row) in rows.iter().enumerate() {
        if index > 0 {
            writeln!(out)?;
        }
        for (column, value) in columns.iter().zip(row) {
            writeln!(out, "{:<width$} : {}", column, value, width = width)?;
        }
    }
    Ok(())
}

fn write_values<W: Write + ?Sized>(rows: &[Vec<String>], out: &mut W) -> Result<()> {
    for row in rows {
        writeln!(out, "{}", row.join("\t"))?;
    }
    Ok(())
}
