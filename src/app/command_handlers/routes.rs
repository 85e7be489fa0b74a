use crate::app::command_support::{load_route_table, log_event, required_arg};
use crate::routing::RouteTarget;
use serde_json::{json, Map, Value};

pub fn cmd_resolve(args: &[String]) -> Result<String, String> {
    let raw = required_arg(args, "action-json", "resolve <action-json>")?;
    let action: Value =
        serde_json::from_str(raw).map_err(|e| format!("action is not valid json: {e}"))?;
    let table = load_route_table()?;
    let resolution = table.resolve_detailed(&action);
    let target = RouteTarget::parse(&resolution.route);

    let mut fields = Map::new();
    fields.insert("route".to_string(), json!(resolution.route));
    fields.insert("source".to_string(), json!(resolution.source.as_str()));
    fields.insert("target".to_string(), json!(target.kind()));
    log_event("info", "route.resolved", fields);

    Ok(format!(
        "route={}\nsource={}\ntarget={}",
        resolution.route,
        resolution.source,
        target.kind()
    ))
}

pub fn cmd_validate(args: &[String]) -> Result<String, String> {
    let route = required_arg(args, "route", "validate <route>")?;
    let table = load_route_table()?;
    let normalized = table.normalize(route);
    Ok(format!(
        "route={normalized}\nvalid={}",
        table.is_valid(route)
    ))
}

pub fn cmd_normalize(args: &[String]) -> Result<String, String> {
    let route = required_arg(args, "route", "normalize <route>")?;
    let table = load_route_table()?;
    Ok(table.normalize(route))
}

pub fn cmd_routes() -> Result<String, String> {
    let table = load_route_table()?;
    let mut lines = vec!["allowed:".to_string()];
    lines.extend(table.allowed().paths().map(|path| format!("  {path}")));
    lines.push("parametric:".to_string());
    for collection in table.allowed().parametric_collections() {
        lines.push(format!("  /{collection}/<id>"));
        lines.push(format!("  /{collection}/<id>/editar"));
    }
    lines.push(format!("default={}", table.default_route()));
    Ok(lines.join("\n"))
}
