use coze_gateway::services::coze::WorkflowRun;
use coze_gateway::services::extract::{extract_response, is_truthy};
use serde_json::{Value, json};

fn run(fields: Value) -> WorkflowRun {
    match fields {
        Value::Object(map) => WorkflowRun::new(map),
        other => panic!("expected an object, got {}", other),
    }
}

#[test]
fn test_data_response_wins() {
    let run = run(json!({
        "output": "from output",
        "data": {"response": "from data"},
    }));
    assert_eq!(extract_response(&run), "from data");
}

#[test]
fn test_output_when_data_has_no_response() {
    let run = run(json!({
        "data": {"other": "value"},
        "output": "from output",
    }));
    assert_eq!(extract_response(&run), "from output");
}

#[test]
fn test_empty_data_response_falls_through() {
    let run = run(json!({
        "data": {"response": ""},
        "output": "from output",
    }));
    assert_eq!(extract_response(&run), "from output");
}

#[test]
fn test_non_string_output_is_serialized() {
    let run = run(json!({"output": {"text": "hi"}}));
    assert_eq!(extract_response(&run), r#"{"text":"hi"}"#);
}

#[test]
fn test_first_meaningful_field_in_order() {
    let run = run(json!({
        "short": "tiny",
        "usage": 1234567890123_i64,
        "debug_url": "https://www.coze.cn/work_flow?execute_id=7",
        "message": "this one is also long enough",
    }));
    assert_eq!(
        extract_response(&run),
        "https://www.coze.cn/work_flow?execute_id=7"
    );
}

#[test]
fn test_meaningful_length_counts_characters() {
    // Ten CJK characters are not enough; eleven are.
    let run_ten = run(json!({"a": "一二三四五六七八九十", "n": 0}));
    assert_eq!(extract_response(&run_ten), run_ten.to_string());

    let run_eleven = run(json!({"a": "一二三四五六七八九十一"}));
    assert_eq!(extract_response(&run_eleven), "一二三四五六七八九十一");
}

#[test]
fn test_mapping_field_counts_as_meaningful() {
    let run = run(json!({"data": {"answer": "排班"}}));
    assert_eq!(extract_response(&run), r#"{"answer":"排班"}"#);
}

#[test]
fn test_whole_run_fallback() {
    let run = run(json!({"ok": true, "id": "abc"}));
    assert_eq!(extract_response(&run), r#"{"ok":true,"id":"abc"}"#);
}

#[test]
fn test_truthiness() {
    assert!(!is_truthy(&json!(null)));
    assert!(!is_truthy(&json!("")));
    assert!(!is_truthy(&json!(0)));
    assert!(!is_truthy(&json!([])));
    assert!(!is_truthy(&json!({})));
    assert!(is_truthy(&json!("x")));
    assert!(is_truthy(&json!(1.5)));
    assert!(is_truthy(&json!({"k": 1})));
}
