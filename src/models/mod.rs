// API data models
//
// - `api`: the gateway's own request/response schemas.
// - `chat`: Gemini's OpenAI-compatible chat-completions wire types.

pub mod api;
pub mod chat;
