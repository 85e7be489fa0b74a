use super::{parse_reply, AssistantContext, AssistantError, AssistantReply};
use serde_json::{json, Value};
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "http://localhost:3000/api";
pub const API_BASE_ENV: &str = "AGENTNAV_API_BASE";
pub const API_TOKEN_ENV: &str = "AGENTNAV_API_TOKEN";

const CONTEXT_PATH: &str = "assistant/context";
const CHAT_PATH: &str = "assistant/chat";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Blocking client for the assistant backend: one call to read the user's
/// context and one to send a chat message.
#[derive(Debug, Clone)]
pub struct AssistantClient {
    api_base: String,
    token: Option<String>,
    agent: ureq::Agent,
}

impl AssistantClient {
    pub fn new(api_base: &str, token: Option<String>) -> Self {
        Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.trim().is_empty()),
            agent: ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build(),
        }
    }

    pub fn from_env() -> Self {
        let api_base = std::env::var(API_BASE_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        Self::new(&api_base, std::env::var(API_TOKEN_ENV).ok())
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path)
    }

    pub fn fetch_context(&self) -> Result<AssistantContext, AssistantError> {
        let request = self.authorize(self.agent.get(&self.endpoint(CONTEXT_PATH)));
        let body = read_body(request.call())?;
        Ok(AssistantContext::from_value(body))
    }

    pub fn send_message(&self, message: &str) -> Result<AssistantReply, AssistantError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(AssistantError::EmptyMessage);
        }
        let request = self.authorize(self.agent.post(&self.endpoint(CHAT_PATH)));
        let body = read_body(request.send_json(json!({ "message": message })))?;
        Ok(parse_reply(body))
    }

    fn authorize(&self, request: ureq::Request) -> ureq::Request {
        match &self.token {
            Some(token) => request.set("Authorization", &format!("Bearer {token}")),
            None => request,
        }
    }
}

/// Bodies that are not JSON are kept as a JSON string so a plain-text reply
/// still reaches the caller.
fn read_body(result: Result<ureq::Response, ureq::Error>) -> Result<Value, AssistantError> {
    let response = match result {
        Ok(response) => response,
        Err(ureq::Error::Status(status, response)) => {
            let body = response.into_string().unwrap_or_default();
            return Err(AssistantError::ApiResponse { status, body });
        }
        Err(err) => return Err(AssistantError::ApiRequest(err.to_string())),
    };
    let raw = response
        .into_string()
        .map_err(|e| AssistantError::Decode(e.to_string()))?;
    if raw.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(&raw).unwrap_or(Value::String(raw)))
}
