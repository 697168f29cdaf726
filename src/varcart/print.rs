use chrono::{DateTime, Utc};
use colored::{ColoredString, Colorize};
use console::Term;
use serde::Serialize;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};
use varcart::api::{CmdMessage, MessageLevel};
use varcart::error::{Result, VarcartError};
use varcart::model::{status_label, AttributeValue, Catalog, Product};
use varcart::table::Row;
use varcart::variations::from_variations;

const DEFAULT_WIDTH: usize = 100;
const MIN_CELL_WIDTH: usize = 4;
const COLUMN_GAP: &str = "  ";

pub fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).map_err(VarcartError::Serialization)?;
    println!("{}", out);
    Ok(())
}

fn line_width() -> usize {
    Term::stdout()
        .size_checked()
        .map(|(_, cols)| cols as usize)
        .unwrap_or(DEFAULT_WIDTH)
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    Formatter::new().convert(duration.to_std().unwrap_or_default())
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }
    result
}

fn pad_to_width(s: &str, width: usize) -> String {
    format!("{}{}", s, " ".repeat(width.saturating_sub(s.width())))
}

fn status_cell(active: bool) -> ColoredString {
    let label = pad_to_width(status_label(active), 8);
    if active {
        label.green()
    } else {
        label.red()
    }
}

fn print_value_line(value: &AttributeValue) {
    let swatch = value.color_code.as_deref().unwrap_or("");
    println!(
        "    {} {} {} {}",
        pad_to_width(&value.name, 20),
        status_cell(value.active),
        pad_to_width(swatch, 9),
        format_time_ago(value.updated_at).dimmed()
    );
}

/// Types in catalog order with their values indented below. Values whose type
/// was filtered out still print under a dimmed type header.
pub fn print_catalog(catalog: &Catalog) {
    if catalog.types.is_empty() && catalog.values.is_empty() {
        println!("No attributes found.");
        return;
    }

    let mut parents: Vec<&str> = catalog.types.iter().map(|t| t.name.as_str()).collect();
    for value in &catalog.values {
        if !parents.contains(&value.parent.as_str()) {
            parents.push(&value.parent);
        }
    }

    for parent in parents {
        match catalog.find_type(parent) {
            Some(t) => println!(
                "{} {} {}",
                pad_to_width(&t.name, 24).bold(),
                status_cell(t.active),
                format_time_ago(t.updated_at).dimmed()
            ),
            None => println!("{}", parent.dimmed()),
        }
        for value in catalog.values_of(parent) {
            print_value_line(value);
        }
    }
}

pub fn print_products(products: &[Product]) {
    if products.is_empty() {
        println!("No products found.");
        return;
    }
    let width = line_width();
    for product in products {
        let variants = product
            .variations
            .first()
            .map(|g| g.variants.len())
            .unwrap_or(0);
        let left = format!("{}  ", product.id);
        let right = format!("  {:>3} variants  {}", variants, format_time_ago(product.updated_at));
        let available = width.saturating_sub(left.width() + right.width());
        let title = truncate_to_width(&product.title, available);
        println!(
            "{}{}{}{}",
            left.yellow(),
            title,
            " ".repeat(available.saturating_sub(title.width())),
            right.dimmed()
        );
    }
}

pub fn print_product(product: &Product) {
    println!("{} {}", product.title.bold(), product.id.to_string().dimmed());
    println!("--------------------------------");
    let loaded = from_variations(&product.variations);
    print_table(loaded.selection.types(), &loaded.rows);
}

/// Prints the variant table: row key, one column per attribute type, price, stock.
pub fn print_table(types: &[String], rows: &[Row]) {
    if rows.is_empty() {
        println!("No rows yet.");
        return;
    }

    let mut header: Vec<String> = vec!["#".to_string()];
    header.extend(types.iter().cloned());
    header.push("price".to_string());
    header.push("stock".to_string());

    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            let mut line = vec![row.key.to_string()];
            line.extend(types.iter().map(|t| row.get(t).unwrap_or("").to_string()));
            line.push(format!("{:.2}", row.price));
            line.push(row.stock.to_string());
            line
        })
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.width()).collect();
    for line in &cells {
        for (i, cell) in line.iter().enumerate() {
            widths[i] = widths[i].max(cell.width());
        }
    }

    // Shrink attribute columns evenly when the table is wider than the terminal.
    let total: usize = widths.iter().sum::<usize>() + COLUMN_GAP.len() * (widths.len() - 1);
    let overflow = total.saturating_sub(line_width());
    if overflow > 0 && !types.is_empty() {
        let cut = overflow.div_ceil(types.len());
        for w in widths.iter_mut().skip(1).take(types.len()) {
            *w = w.saturating_sub(cut).max(MIN_CELL_WIDTH);
        }
    }

    let render = |line: &[String]| -> String {
        line.iter()
            .zip(&widths)
            .enumerate()
            .map(|(i, (cell, w))| {
                let cell = truncate_to_width(cell, *w);
                let numeric = i == 0 || i > types.len();
                if numeric {
                    format!("{}{}", " ".repeat(w.saturating_sub(cell.width())), cell)
                } else {
                    pad_to_width(&cell, *w)
                }
            })
            .collect::<Vec<_>>()
            .join(COLUMN_GAP)
    };

    println!("{}", render(&header).bold());
    for line in &cells {
        println!("{}", render(line));
    }
}
