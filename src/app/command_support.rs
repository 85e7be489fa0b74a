use crate::config::{default_state_root, load_router_settings, ConfigError};
use crate::routing::RouteTable;
use crate::shared::logging::append_router_log;
use serde_json::{Map, Value};

pub fn map_config_err(err: ConfigError) -> String {
    err.to_string()
}

pub fn load_route_table() -> Result<RouteTable, String> {
    let settings = load_router_settings().map_err(map_config_err)?;
    Ok(RouteTable::from_settings(&settings))
}

/// Best-effort: without a resolvable home directory nothing is logged.
pub fn log_event(level: &str, event: &str, fields: Map<String, Value>) {
    if let Ok(state_root) = default_state_root() {
        append_router_log(&state_root, level, event, fields);
    }
}

pub fn required_arg<'a>(args: &'a [String], name: &str, usage: &str) -> Result<&'a str, String> {
    args.first()
        .map(String::as_str)
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| format!("missing `{name}`\nusage: {usage}"))
}
