use crate::app::command_support::{load_route_table, log_event};
use crate::assistant::{AssistantClient, AssistantError, AssistantReply};
use crate::routing::{RouteTable, RouteTarget};
use serde_json::{json, Map};

pub fn cmd_context() -> Result<String, String> {
    let client = AssistantClient::from_env();
    let context = client
        .fetch_context()
        .map_err(|err| request_failed(&client, "context", err))?;
    serde_json::to_string_pretty(&context).map_err(|e| format!("failed to encode context: {e}"))
}

pub fn cmd_ask(args: &[String]) -> Result<String, String> {
    let message = args.join(" ");
    if message.trim().is_empty() {
        return Err("missing `message`\nusage: ask <message>".to_string());
    }
    let table = load_route_table()?;
    let client = AssistantClient::from_env();
    let reply = client
        .send_message(&message)
        .map_err(|err| request_failed(&client, "chat", err))?;
    Ok(render_reply(&reply, &table))
}

fn request_failed(client: &AssistantClient, call: &str, err: AssistantError) -> String {
    let mut fields = Map::new();
    fields.insert("call".to_string(), json!(call));
    fields.insert("api_base".to_string(), json!(client.api_base()));
    fields.insert("error".to_string(), json!(err.to_string()));
    log_event("warn", "assistant.request_failed", fields);
    err.to_string()
}

pub fn render_reply(reply: &AssistantReply, table: &RouteTable) -> String {
    let structured = match reply {
        AssistantReply::Plain { text } => return format!("assistant> {text}"),
        AssistantReply::Structured(structured) => structured,
    };

    let mut lines = Vec::new();
    let sections = [
        ("answer", &structured.direct_answer),
        ("explanation", &structured.explanation),
        ("plan", &structured.plan_connection),
    ];
    for (name, value) in sections {
        if let Some(value) = value {
            lines.push(format!("{name}> {value}"));
        }
    }

    if !structured.recommended_actions.is_empty() {
        lines.push("actions:".to_string());
        for (index, action) in structured.recommended_actions.iter().enumerate() {
            let resolution = action.resolve(table);
            let marker = if RouteTarget::parse(&resolution.route).is_external() {
                " [new tab]"
            } else {
                ""
            };
            lines.push(format!(
                "  {}. {} -> {} ({}){marker}",
                index + 1,
                action.label,
                resolution.route,
                resolution.source
            ));
        }
    }

    let sections = [
        ("motivation", &structured.motivation),
        ("next", &structured.follow_up_question),
    ];
    for (name, value) in sections {
        if let Some(value) = value {
            lines.push(format!("{name}> {value}"));
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assistant::parse_reply;
    use serde_json::json;

    #[test]
    fn render_reply_lists_resolved_actions_in_order() {
        let reply = parse_reply(json!({
            "directAnswer": "Seu plano está 40% concluído.",
            "recommendedActions": [
                {"label": "Continuar plano", "payload": {"planId": "p-7", "step": 3}},
                {"label": "Site externo", "url": "https://example.com/guia"}
            ],
            "followUpQuestion": "Posso ajudar em algo mais?"
        }));
        let rendered = render_reply(&reply, &RouteTable::builtin());
        assert_eq!(
            rendered,
            [
                "answer> Seu plano está 40% concluído.",
                "actions:",
                "  1. Continuar plano -> /planos-acao?step=3 (label)",
                "  2. Site externo -> https://example.com/guia (explicit) [new tab]",
                "next> Posso ajudar em algo mais?",
            ]
            .join("\n")
        );
    }

    #[test]
    fn plain_reply_renders_single_line() {
        let reply = parse_reply(json!("Olá"));
        assert_eq!(render_reply(&reply, &RouteTable::builtin()), "assistant> Olá");
    }
}
