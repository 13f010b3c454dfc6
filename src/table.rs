//! Plain-text tables for result sets.
//!
//! Any `Serialize` struct works as a row: its field names become the column headers, in
//! declaration order.

use serde::Serialize;
use serde_json::{Map, Value};

pub fn render<T: Serialize>(rows: &[T]) -> serde_json::Result<String> {
    let objects = rows
        .iter()
        .map(|row| -> serde_json::Result<Map<String, Value>> {
            match serde_json::to_value(row)? {
                Value::Object(map) => Ok(map),
                other => {
                    let mut map = Map::new();
                    map.insert(String::from("value"), other);
                    Ok(map)
                }
            }
        })
        .collect::<serde_json::Result<Vec<Map<String, Value>>>>()?;

    let headers: Vec<String> = match objects.first() {
        Some(first) => first.keys().cloned().collect(),
        None => return Ok(String::from("No rows.\n")),
    };

    let cells: Vec<Vec<String>> = objects
        .iter()
        .map(|object| {
            headers
                .iter()
                .map(|key| object.get(key).map(cell).unwrap_or_default())
                .collect()
        })
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &cells {
        for (width, value) in widths.iter_mut().zip(row) {
            *width = (*width).max(value.chars().count());
        }
    }

    let mut out = String::new();
    border(&mut out, &widths);
    line(&mut out, &widths, &headers);
    border(&mut out, &widths);
    for row in &cells {
        line(&mut out, &widths, row);
    }
    border(&mut out, &widths);

    Ok(out)
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            // 60000.0 prints as 60000
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => format!("{:.0}", f),
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}

fn border(out: &mut String, widths: &[usize]) {
    out.push('+');
    for width in widths {
        out.push_str(&"-".repeat(width + 2));
        out.push('+');
    }
    out.push('\n');
}

fn line(out: &mut String, widths: &[usize], values: &[String]) {
    out.push('|');
    for (width, value) in widths.iter().zip(values) {
        let pad = width - value.chars().count();
        out.push(' ');
        out.push_str(value);
        out.push_str(&" ".repeat(pad + 1));
        out.push('|');
    }
    out.push('\n');
}
