// src/services/extract.rs
use serde_json::{Map, Value};
use tracing::info;

use super::coze::{WorkflowRun, preview};

type Fields = Map<String, Value>;
type Rule = fn(&Fields) -> Option<String>;

/// Tried in order; the first rule that yields text wins.
const RULES: &[(&str, Rule)] = &[
    ("data.response", from_data_response),
    ("output", from_output),
    ("first meaningful field", from_first_meaningful_field),
];

const MEANINGFUL_LEN: usize = 10;

pub fn extract_response(run: &WorkflowRun) -> String {
    for (name, rule) in RULES {
        if let Some(text) = rule(&run.fields) {
            info!(rule = *name, response = %preview(&text), "extracted workflow response");
            return text;
        }
    }

    let text = run.to_string();
    info!(rule = "whole run", response = %preview(&text), "extracted workflow response");
    text
}

fn from_data_response(fields: &Fields) -> Option<String> {
    match fields.get("data") {
        Some(Value::Object(data)) => data.get("response").filter(|v| is_truthy(v)).map(as_text),
        _ => None,
    }
}

fn from_output(fields: &Fields) -> Option<String> {
    fields.get("output").filter(|v| is_truthy(v)).map(as_text)
}

fn from_first_meaningful_field(fields: &Fields) -> Option<String> {
    fields
        .values()
        .filter(|v| is_truthy(v) && matches!(v, Value::String(_) | Value::Object(_)))
        .map(as_text)
        .find(|text| text.chars().count() > MEANINGFUL_LEN)
}

pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
