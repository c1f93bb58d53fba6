//! Rendering of server responses
//!
//! Row-shaped responses become tables; messages and scalar results are
//! printed as plain text. Anything unrecognized is pretty-printed JSON.

use comfy_table::{Cell, Table};
use serde_json::{Map, Value};

/// Render a response document for the terminal.
pub fn format_response(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Object(map) => format_object(map).unwrap_or_else(|| pretty(value)),
        _ => pretty(value),
    }
}

fn format_object(map: &Map<String, Value>) -> Option<String> {
    for key in ["success_msg", "error_msg"] {
        if let Some(Value::String(msg)) = map.get(key) {
            return Some(msg.clone());
        }
    }

    columns_table(map)
        .or_else(|| data_table(map))
        .or_else(|| series_tables(map))
        .or_else(|| scalar_lines(map))
}

/// `{"columns": [...], "<name>": [[...], ...]}` as returned by `list` queries
fn columns_table(map: &Map<String, Value>) -> Option<String> {
    let columns = map.get("columns")?.as_array()?;
    let headers: Vec<&str> = columns.iter().map(Value::as_str).collect::<Option<_>>()?;

    let mut rows = map.iter().filter(|(key, _)| key.as_str() != "columns");
    let (_, rows_value) = rows.next()?;
    if rows.next().is_some() {
        return None;
    }
    let rows = rows_value.as_array()?;

    let mut table = Table::new();
    table.set_header(headers.iter().map(Cell::new));
    for row in rows {
        table.add_row(row.as_array()?.iter().map(|v| Cell::new(cell_text(v))));
    }
    Some(table.to_string())
}

/// `{"data": [{...}, ...]}` as returned by `show` queries
fn data_table(map: &Map<String, Value>) -> Option<String> {
    if map.len() != 1 {
        return None;
    }
    let rows = map.get("data")?.as_array()?;
    let objects: Vec<&Map<String, Value>> =
        rows.iter().map(Value::as_object).collect::<Option<_>>()?;

    let mut headers: Vec<&str> = Vec::new();
    for object in &objects {
        for key in object.keys() {
            if !headers.contains(&key.as_str()) {
                headers.push(key);
            }
        }
    }

    let mut table = Table::new();
    table.set_header(headers.iter().map(Cell::new));
    for object in objects {
        table.add_row(
            headers
                .iter()
                .map(|h| Cell::new(object.get(*h).map(cell_text).unwrap_or_default())),
        );
    }
    Some(table.to_string())
}

/// `{"series": [[ts, value], ...], ...}` as returned by `select` queries
fn series_tables(map: &Map<String, Value>) -> Option<String> {
    if map.is_empty() {
        return None;
    }

    let mut sections = Vec::with_capacity(map.len());
    for (name, points) in map {
        let points = points.as_array()?;
        let mut table = Table::new();
        table.set_header(vec!["timestamp", "value"]);
        for point in points {
            match point.as_array().map(Vec::as_slice) {
                Some([ts, value]) => {
                    table.add_row(vec![cell_text(ts), cell_text(value)]);
                }
                _ => return None,
            }
        }
        sections.push(format!("{}\n{}", name, table));
    }
    Some(sections.join("\n"))
}

/// `{"series": 42}` as returned by `count` queries
fn scalar_lines(map: &Map<String, Value>) -> Option<String> {
    if map.is_empty() || map.values().any(|v| v.is_array() || v.is_object()) {
        return None;
    }
    let lines: Vec<String> = map
        .iter()
        .map(|(key, value)| format!("{}: {}", key, cell_text(value)))
        .collect();
    Some(lines.join("\n"))
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
