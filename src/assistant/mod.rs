pub mod client;
pub mod context;
pub mod reply;

pub use client::{AssistantClient, API_BASE_ENV, API_TOKEN_ENV, DEFAULT_API_BASE};
pub use context::AssistantContext;
pub use reply::{parse_reply, AssistantReply, RecommendedAction, StructuredReply};

#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    #[error("assistant api request failed: {0}")]
    ApiRequest(String),
    #[error("assistant api responded with status {status}: {body}")]
    ApiResponse { status: u16, body: String },
    #[error("assistant api returned an unreadable body: {0}")]
    Decode(String),
    #[error("assistant message must be non-empty")]
    EmptyMessage,
}
