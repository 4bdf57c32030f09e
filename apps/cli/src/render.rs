//! # Output Rendering
//!
//! Turns command results into text for stdout.
//!
//! ```text
//! Product added with ID: 2
//!
//!   ID  Name          Price  Quantity
//!   --  --------  ---------  --------
//!    1  Mouse      R$ 49.90        10
//!    2  Keyboard  R$ 120.00         5
//! ```
//!
//! With `--json` the same data is printed as a single JSON document.

use serde::Serialize;
use std::io::{self, Write};

use crate::commands::{CommandOutcome, ProductDto};
use crate::config::AppConfig;
use estoque_core::Money;

const HEADERS: [&str; 4] = ["ID", "Name", "Price", "Quantity"];

/// Writes an outcome as a status line followed by a product table.
pub fn write_outcome(
    out: &mut impl Write,
    outcome: &CommandOutcome,
    config: &AppConfig,
) -> io::Result<()> {
    if let Some(message) = &outcome.message {
        writeln!(out, "{}", message)?;
        if !outcome.products.is_empty() {
            writeln!(out)?;
        }
    }

    if outcome.products.is_empty() {
        if outcome.message.is_none() {
            writeln!(out, "No products.")?;
        }
        return Ok(());
    }

    write_table(out, &outcome.products, config)
}

/// Writes products as an aligned table. Prices carry the currency symbol.
pub fn write_table(
    out: &mut impl Write,
    products: &[ProductDto],
    config: &AppConfig,
) -> io::Result<()> {
    let rows: Vec<[String; 4]> = products
        .iter()
        .map(|p| {
            [
                p.id.to_string(),
                p.name.clone(),
                config.format_price(Money::from_cents(p.price_cents)),
                p.quantity.to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let dashes = widths.map(|w| "-".repeat(w));
    write_row(out, &HEADERS.map(String::from), &widths)?;
    write_row(out, &dashes, &widths)?;
    for row in &rows {
        write_row(out, row, &widths)?;
    }
    Ok(())
}

// Name is left-aligned, the numeric columns right-aligned.
fn write_row(out: &mut impl Write, cells: &[String; 4], widths: &[usize; 4]) -> io::Result<()> {
    writeln!(
        out,
        "  {:>w0$}  {:<w1$}  {:>w2$}  {:>w3$}",
        cells[0],
        cells[1],
        cells[2],
        cells[3],
        w0 = widths[0],
        w1 = widths[1],
        w2 = widths[2],
        w3 = widths[3],
    )
}

/// Writes any serializable value as pretty JSON.
pub fn write_json(out: &mut impl Write, value: &impl Serialize) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}
