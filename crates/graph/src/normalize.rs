//! Row normalization.
//!
//! Template queries return clean aliases (`title`, `citations`, `authors`),
//! while generated queries return whatever the model wrote: `p.title`,
//! `p.citation_count`, `a.name`, or whole nodes. Both end up as
//! [`PaperRecord`]s; anything unrecognized is kept in `extra`.

use paperlens_core::graph::Record;
use paperlens_core::observation::{GraphStatistics, PaperRecord};
use serde_json::Value;

/// Which list a `name`-like column feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NameKind {
    Author,
    Topic,
    Institution,
}

pub fn normalize_records(rows: Vec<Record>) -> Vec<PaperRecord> {
    rows.into_iter().map(normalize_record).collect()
}

pub fn normalize_record(row: Record) -> PaperRecord {
    let mut record = PaperRecord::default();
    for (column, value) in row {
        apply_column(&mut record, &column, value);
    }
    record
}

fn apply_column(record: &mut PaperRecord, column: &str, value: Value) {
    let (variable, property) = match column.rsplit_once('.') {
        Some((var, prop)) => (Some(var), prop),
        None => (None, column),
    };
    let property = property.to_ascii_lowercase();

    // A whole node returned as a column, e.g. `RETURN p` or `RETURN a`.
    if let Value::Object(node) = value {
        if node.contains_key("title") {
            for (key, inner) in node {
                apply_column(record, &key, inner);
            }
        } else if let Some(kind) = name_kind(&property) {
            if let Some(name) = node.get("name").and_then(Value::as_str) {
                push_name(record, kind, name);
            }
        } else {
            record.extra.insert(column.to_string(), Value::Object(node));
        }
        return;
    }

    match property.as_str() {
        "title" => record.title = as_text(&value),
        "year" => record.year = as_int(&value),
        "citations" | "citation_count" => record.citations = as_int(&value),
        "abstract" => record.abstract_text = as_text(&value),
        "authors" | "author" | "author_name" => extend_names(record, NameKind::Author, &value),
        "topics" | "topic" | "topic_name" => extend_names(record, NameKind::Topic, &value),
        "institutions" | "institution" | "institution_name" => {
            extend_names(record, NameKind::Institution, &value)
        }
        "name" => match variable.and_then(name_kind) {
            Some(kind) => extend_names(record, kind, &value),
            None => {
                record.extra.insert(column.to_string(), value);
            }
        },
        _ => {
            record.extra.insert(column.to_string(), value);
        }
    }
}

/// Route a variable like `a`, `author`, `i`, `inst`, `t` to its list.
fn name_kind(variable: &str) -> Option<NameKind> {
    match variable.to_ascii_lowercase().chars().next()? {
        'a' => Some(NameKind::Author),
        't' => Some(NameKind::Topic),
        'i' => Some(NameKind::Institution),
        _ => None,
    }
}

fn extend_names(record: &mut PaperRecord, kind: NameKind, value: &Value) {
    match value {
        Value::Array(items) => {
            for item in items {
                if let Some(name) = item.as_str() {
                    push_name(record, kind, name);
                }
            }
        }
        Value::String(name) => push_name(record, kind, name),
        _ => {}
    }
}

fn push_name(record: &mut PaperRecord, kind: NameKind, name: &str) {
    let list = match kind {
        NameKind::Author => &mut record.authors,
        NameKind::Topic => &mut record.topics,
        NameKind::Institution => &mut record.institutions,
    };
    let name = name.trim();
    if !name.is_empty() && !list.iter().any(|n| n == name) {
        list.push(name.to_string());
    }
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

fn as_int(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f.round() as i64))
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
}

fn as_count(record: &Record, key: &str) -> u64 {
    record
        .get(key)
        .and_then(|v| v.as_u64().or_else(|| v.as_f64().map(|f| f.max(0.0).round() as u64)))
        .unwrap_or(0)
}

/// Decode the single row of the statistics template. `None` if the row
/// does not look like statistics at all.
pub fn statistics_from_record(record: &Record) -> Option<GraphStatistics> {
    if !record.contains_key("total_papers") {
        return None;
    }
    Some(GraphStatistics {
        total_papers: as_count(record, "total_papers"),
        total_authors: as_count(record, "total_authors"),
        total_topics: as_count(record, "total_topics"),
        total_institutions: as_count(record, "total_institutions"),
        total_citations: as_count(record, "total_citations"),
        avg_citations: record.get("avg_citations").and_then(Value::as_f64),
    })
}
