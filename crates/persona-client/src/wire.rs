// crates/persona-client/src/wire.rs
//! JSON bodies of the persona service HTTP API

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub(crate) const LLM_PROVIDER: &str = "openai";
pub(crate) const LLM_MODEL: &str = "gpt-4o";
pub(crate) const MEMORY_MODE: &str = "rag-search";

#[derive(Serialize)]
pub(crate) struct NewUser<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub email: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NewReplica<'a> {
    pub name: &'a str,
    pub slug: &'a str,
    pub short_description: String,
    pub greeting: &'a str,
    #[serde(rename = "ownerID")]
    pub owner_id: &'a str,
    pub private: bool,
    pub tags: &'a [String],
    pub profile_image: &'a str,
    pub llm: Llm<'a>,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Llm<'a> {
    pub provider: &'static str,
    pub model: &'static str,
    pub system_message: &'a str,
    pub memory_mode: &'static str,
}

#[derive(Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub content: &'a str,
    pub skip_chat_history: bool,
    pub source: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawText<'a> {
    pub raw_text: &'a str,
}

/// `{ "success": bool }` style acknowledgement; an empty body counts as success
#[derive(Debug, Default, Deserialize)]
pub(crate) struct Ack {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub error: Option<String>,
}

impl Ack {
    pub fn failed(&self) -> bool {
        self.success == Some(false)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreatedReplica {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub uuid: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct KnowledgeBase {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(rename = "knowledgeBaseID", default)]
    pub knowledge_base_id: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UploadSlot {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(rename = "signedURL", default)]
    pub signed_url: Option<String>,
    #[serde(rename = "knowledgeBaseID", default)]
    pub knowledge_base_id: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatReply {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Items<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

/// Knowledge base ids arrive as numbers or strings
pub(crate) fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

/// Error text from an error body, if it has one
pub(crate) fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["error", "message"]
        .iter()
        .find_map(|key| value.get(key).and_then(Value::as_str))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_string() {
        assert_eq!(id_string(&serde_json::json!(42)), Some("42".to_string()));
        assert_eq!(id_string(&serde_json::json!("kb-1")), Some("kb-1".to_string()));
        assert_eq!(id_string(&serde_json::json!("")), None);
        assert_eq!(id_string(&Value::Null), None);
    }

    #[test]
    fn test_error_message() {
        assert_eq!(
            error_message(r#"{"error":"slug taken"}"#),
            Some("slug taken".to_string())
        );
        assert_eq!(
            error_message(r#"{"message":"nope"}"#),
            Some("nope".to_string())
        );
        assert_eq!(error_message("<html>"), None);
    }

    #[test]
    fn test_ack_defaults() {
        let ack: Ack = serde_json::from_str("{}").unwrap();
        assert!(!ack.failed());
        let ack: Ack = serde_json::from_str(r#"{"success":false}"#).unwrap();
        assert!(ack.failed());
    }

    #[test]
    fn test_new_replica_field_names() {
        let tags = vec!["physics".to_string()];
        let body = NewReplica {
            name: "Dr. Quantum",
            slug: "dr-quantum",
            short_description: "s".into(),
            greeting: "hi",
            owner_id: "u1",
            private: false,
            tags: &tags,
            profile_image: "img",
            llm: Llm {
                provider: LLM_PROVIDER,
                model: LLM_MODEL,
                system_message: "sys",
                memory_mode: MEMORY_MODE,
            },
            kind: "character",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["ownerID"], "u1");
        assert_eq!(json["shortDescription"], "s");
        assert_eq!(json["profileImage"], "img");
        assert_eq!(json["llm"]["systemMessage"], "sys");
        assert_eq!(json["llm"]["memoryMode"], "rag-search");
        assert_eq!(json["type"], "character");
    }
}
