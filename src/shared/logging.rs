use serde_json::{Map, Value};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub fn router_log_path(state_root: &Path) -> PathBuf {
    state_root.join("logs/router.log")
}

/// Appends one JSON line to the router log. Logging is best-effort: any
/// failure to encode or write is dropped.
pub fn append_router_log(state_root: &Path, level: &str, event: &str, fields: Map<String, Value>) {
    let mut payload = Map::new();
    payload.insert(
        "timestamp".to_string(),
        Value::String(chrono::Utc::now().to_rfc3339()),
    );
    payload.insert("level".to_string(), Value::String(level.to_string()));
    payload.insert("event".to_string(), Value::String(event.to_string()));
    for (key, value) in fields {
        payload.entry(key).or_insert(value);
    }

    let Ok(line) = serde_json::to_string(&Value::Object(payload)) else {
        return;
    };

    let path = router_log_path(state_root);
    if let Some(parent) = path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return;
        }
    }
    let Ok(mut file) = fs::OpenOptions::new().create(true).append(true).open(path) else {
        return;
    };
    let _ = writeln!(file, "{line}");
}
