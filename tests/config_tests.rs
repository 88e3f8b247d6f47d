use coze_gateway::config::{Config, DEFAULT_BASE_URL, DEFAULT_PORT, DEFAULT_TIMEOUT};
use std::collections::HashMap;
use std::time::Duration;

fn config_from(vars: &[(&str, &str)]) -> Result<Config, coze_gateway::error::AppError> {
    let env: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_lookup(|key| env.get(key).cloned())
}

#[test]
fn test_defaults() {
    let config = config_from(&[]).unwrap();
    assert_eq!(config.api_token, None);
    assert_eq!(config.workflow_id, None);
    assert!(config.enabled);
    assert_eq!(config.port, DEFAULT_PORT);
    assert_eq!(config.bind_addr(), "127.0.0.1:8000");
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
    assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    assert!(config.credentials().is_none());
    assert!(!config.coze_enabled());
}

#[test]
fn test_full_credentials() {
    let config = config_from(&[
        ("COZE_API_KEY", "pat_abc"),
        ("COZE_WORKFLOW_ID", "wf-1"),
        ("COZE_API_PORT", "9100"),
        ("COZE_TIMEOUT_SECS", "3"),
    ])
    .unwrap();
    assert_eq!(config.credentials(), Some(("pat_abc", "wf-1")));
    assert!(config.coze_enabled());
    assert_eq!(config.port, 9100);
    assert_eq!(config.timeout, Duration::from_secs(3));
}

#[test]
fn test_workflow_id_alias() {
    let config = config_from(&[("workflow_id", "wf-alias")]).unwrap();
    assert_eq!(config.workflow_id.as_deref(), Some("wf-alias"));

    let config = config_from(&[("COZE_WORKFLOW_ID", "wf-main"), ("workflow_id", "wf-alias")]).unwrap();
    assert_eq!(config.workflow_id.as_deref(), Some("wf-main"));

    // An empty primary value does not shadow the alias.
    let config = config_from(&[("COZE_WORKFLOW_ID", ""), ("workflow_id", "wf-alias")]).unwrap();
    assert_eq!(config.workflow_id.as_deref(), Some("wf-alias"));
}

#[test]
fn test_enabled_flag() {
    let creds = [("COZE_API_KEY", "pat_abc"), ("COZE_WORKFLOW_ID", "wf-1")];

    for (raw, expected) in [("true", true), ("TRUE", true), ("false", false), ("yes", false), ("1", false)] {
        let mut vars = creds.to_vec();
        vars.push(("COZE_ENABLED", raw));
        let config = config_from(&vars).unwrap();
        assert_eq!(config.enabled, expected, "COZE_ENABLED={}", raw);
        assert_eq!(config.coze_enabled(), expected);
    }
}

#[test]
fn test_missing_credential_disables_coze() {
    let config = config_from(&[("COZE_API_KEY", "pat_abc"), ("COZE_ENABLED", "true")]).unwrap();
    assert!(config.enabled);
    assert!(!config.coze_enabled());
}

#[test]
fn test_invalid_numbers_rejected() {
    assert!(config_from(&[("COZE_API_PORT", "eighty")]).is_err());
    assert!(config_from(&[("COZE_API_PORT", "70000")]).is_err());
    assert!(config_from(&[("COZE_TIMEOUT_SECS", "0")]).is_err());
}

#[test]
fn test_debug_masks_token() {
    let config = config_from(&[("COZE_API_KEY", "pat_very_secret"), ("COZE_WORKFLOW_ID", "wf-1")]).unwrap();
    let printed = format!("{:?}", config);
    assert!(!printed.contains("pat_very_secret"));
    assert!(printed.contains("***"));
    assert!(printed.contains("wf-1"));
}
