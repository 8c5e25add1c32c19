// crates/persona-client/src/client.rs
//! HTTP implementation of [`PersonaService`]

use crate::config::{ClientConfig, API_KEY_ENV};
use crate::error::{PersonaError, PersonaResult};
use crate::service::PersonaService;
use crate::types::{
    ChatMessage, PersonaDescriptor, PersonaId, PersonaSummary, TrainingInput, UserId,
    DEFAULT_PROFILE_IMAGE,
};
use crate::wire::{
    error_message, id_string, Ack, ChatReply, ChatRequest, CreatedReplica, Items, KnowledgeBase,
    Llm, NewReplica, NewUser, RawText, UploadSlot, LLM_MODEL, LLM_PROVIDER, MEMORY_MODE,
};
use async_trait::async_trait;
use mentorscroll_resilience::{retry_if, with_timeout, CircuitBreaker, RetryPolicy};
use reqwest::{Client as HttpClient, RequestBuilder, Response, StatusCode};
use serde::de::{DeserializeOwned, IgnoredAny};

const ORG_SECRET_HEADER: &str = "X-ORGANIZATION-SECRET";
const API_VERSION_HEADER: &str = "X-API-Version";
const USER_ID_HEADER: &str = "X-USER-ID";

/// Display name given to users this client creates
const USER_DISPLAY_NAME: &str = "MentorScroll Creator";

/// Persona service client over HTTPS
///
/// Requests carry the organization secret and API version; the user id is set
/// per call. Failed idempotent requests are retried under the configured
/// policy. Chat messages are only retried on 429, since a timed out message
/// may already have been answered.
#[derive(Debug, Clone)]
pub struct PersonaClient {
    http: HttpClient,
    config: ClientConfig,
    breaker: Option<CircuitBreaker>,
}

impl PersonaClient {
    pub fn new(config: ClientConfig) -> PersonaResult<Self> {
        if config.api_key.trim().is_empty() {
            return Err(PersonaError::MissingCredential(API_KEY_ENV));
        }

        let http = HttpClient::builder()
            .user_agent(&config.user_agent)
            .build()
            .map_err(PersonaError::Connection)?;

        let breaker = config.circuit_breaker.clone().map(CircuitBreaker::new);

        log::debug!("Persona client ready for {}", config.base_url);
        Ok(Self {
            http,
            config,
            breaker,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    fn authorized(&self, request: RequestBuilder, user: Option<&UserId>) -> RequestBuilder {
        let request = request
            .header(ORG_SECRET_HEADER, &self.config.api_key)
            .header(API_VERSION_HEADER, &self.config.api_version);
        match user {
            Some(user) => request.header(USER_ID_HEADER, user.as_str()),
            None => request,
        }
    }

    /// Sends a request built by `build`, with timeout, breaker and retry
    async fn send<T, F>(
        &self,
        operation: &'static str,
        user: Option<&UserId>,
        idempotent: bool,
        build: F,
    ) -> PersonaResult<T>
    where
        T: DeserializeOwned,
        F: Fn(&HttpClient) -> RequestBuilder,
    {
        let policy = self
            .config
            .retry_policy
            .clone()
            .unwrap_or_else(RetryPolicy::none);

        retry_if(
            &policy,
            || self.send_once(operation, user, &build),
            |e: &PersonaError| {
                e.is_retryable() && (idempotent || matches!(e, PersonaError::RateLimited))
            },
        )
        .await
    }

    async fn send_once<T, F>(
        &self,
        operation: &'static str,
        user: Option<&UserId>,
        build: &F,
    ) -> PersonaResult<T>
    where
        T: DeserializeOwned,
        F: Fn(&HttpClient) -> RequestBuilder,
    {
        if let Some(breaker) = &self.breaker {
            breaker.can_proceed().map_err(PersonaError::CircuitOpen)?;
        }

        let request = self.authorized(build(&self.http), user);
        let exchange = async {
            let response = request.send().await.map_err(PersonaError::Connection)?;
            read_json(response).await
        };

        let result = match with_timeout(self.config.timeout, exchange).await {
            Ok(result) => result,
            Err(_) => Err(PersonaError::Timeout {
                operation,
                timeout: self.config.timeout,
            }),
        };

        if let Some(breaker) = &self.breaker {
            match &result {
                Err(e) if e.counts_against_service() => breaker.record_failure(),
                _ => breaker.record_success(),
            }
        }

        if let Err(e) = &result {
            log::warn!("Persona service {} failed: {}", operation, e);
        }
        result
    }

    async fn send_chat(
        &self,
        user: &UserId,
        persona: &PersonaId,
        content: &str,
        skip_history: bool,
    ) -> PersonaResult<String> {
        let url = self.url(&format!("/replicas/{}/chat/completions", persona));
        let body = ChatRequest {
            content,
            skip_chat_history: skip_history,
            source: if skip_history {
                "content_generation"
            } else {
                "web"
            },
        };

        let reply: ChatReply = self
            .send("chat", Some(user), false, |http| http.post(&url).json(&body))
            .await?;

        if reply.success == Some(false) {
            return Err(PersonaError::InvalidResponse(
                "persona reported a failed completion".to_string(),
            ));
        }
        reply
            .content
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| PersonaError::InvalidResponse("completion had no content".to_string()))
    }

    async fn add_raw_text(
        &self,
        user: &UserId,
        persona: &PersonaId,
        text: &str,
    ) -> PersonaResult<()> {
        let url = self.url(&format!("/replicas/{}/training", persona));
        let kb: KnowledgeBase = self
            .send("start training", Some(user), false, |http| http.post(&url))
            .await?;

        if kb.success == Some(false) {
            return Err(PersonaError::InvalidResponse(
                "training entry was not created".to_string(),
            ));
        }
        let kb_id = kb
            .knowledge_base_id
            .as_ref()
            .and_then(id_string)
            .ok_or_else(|| PersonaError::InvalidResponse("missing knowledgeBaseID".to_string()))?;

        let url = self.url(&format!("/replicas/{}/training/{}", persona, kb_id));
        let body = RawText { raw_text: text };
        let ack: Ack = self
            .send("add training text", Some(user), true, |http| {
                http.put(&url).json(&body)
            })
            .await?;
        check_ack(ack, "training text was rejected")
    }

    async fn upload_document(
        &self,
        user: &UserId,
        persona: &PersonaId,
        filename: &str,
        content: Vec<u8>,
    ) -> PersonaResult<()> {
        let url = self.url(&format!("/replicas/{}/training/files/upload", persona));
        let slot: UploadSlot = self
            .send("request upload", Some(user), true, |http| {
                http.get(&url).query(&[("filename", filename)])
            })
            .await?;

        if slot.success == Some(false) {
            return Err(PersonaError::InvalidResponse(
                "upload slot was refused".to_string(),
            ));
        }
        let signed_url = slot
            .signed_url
            .ok_or_else(|| PersonaError::InvalidResponse("missing signedURL".to_string()))?;

        // The signed URL is a storage endpoint; it gets the bytes but no credentials
        let upload = self
            .http
            .put(&signed_url)
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(content)
            .send();
        let response = with_timeout(self.config.timeout, upload)
            .await
            .map_err(|_| PersonaError::Timeout {
                operation: "upload document",
                timeout: self.config.timeout,
            })?
            .map_err(PersonaError::Connection)?;

        if !response.status().is_success() {
            return Err(PersonaError::Status {
                status: response.status().as_u16(),
                message: "document upload failed".to_string(),
            });
        }

        log::info!(
            "Uploaded {} to persona {} (knowledge base {})",
            filename,
            persona,
            slot.knowledge_base_id
                .as_ref()
                .and_then(id_string)
                .unwrap_or_else(|| "?".to_string())
        );
        Ok(())
    }
}

#[async_trait]
impl PersonaService for PersonaClient {
    async fn ensure_user(&self, user: &UserId) -> PersonaResult<()> {
        let url = self.url(&format!("/users/{}", user));
        match self
            .send::<IgnoredAny, _>("look up user", None, true, |http| http.get(&url))
            .await
        {
            Ok(_) => {
                log::debug!("Found existing user {}", user);
                Ok(())
            }
            Err(PersonaError::NotFound(_)) => {
                log::info!("Creating user {}", user);
                let url = self.url("/users");
                let body = NewUser {
                    id: user.as_str(),
                    name: USER_DISPLAY_NAME,
                    email: format!("{}@mentorscroll.app", user),
                };
                self.send::<IgnoredAny, _>("create user", None, false, |http| {
                    http.post(&url).json(&body)
                })
                .await?;
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    async fn create_persona(
        &self,
        user: &UserId,
        descriptor: &PersonaDescriptor,
    ) -> PersonaResult<PersonaId> {
        let url = self.url("/replicas");
        let body = NewReplica {
            name: &descriptor.name,
            slug: &descriptor.slug,
            short_description: descriptor.short_description_for_service(),
            greeting: &descriptor.greeting,
            owner_id: user.as_str(),
            private: false,
            tags: &descriptor.tags,
            profile_image: descriptor
                .profile_image
                .as_deref()
                .unwrap_or(DEFAULT_PROFILE_IMAGE),
            llm: Llm {
                provider: LLM_PROVIDER,
                model: LLM_MODEL,
                system_message: &descriptor.system_message,
                memory_mode: MEMORY_MODE,
            },
            kind: "character",
        };

        let created: CreatedReplica = self
            .send("create persona", Some(user), false, |http| {
                http.post(&url).json(&body)
            })
            .await?;

        match created.uuid {
            Some(uuid) if created.success != Some(false) => {
                log::info!("Created persona {} ({})", descriptor.name, uuid);
                Ok(PersonaId::new(uuid))
            }
            _ => Err(PersonaError::InvalidResponse(format!(
                "persona {} was not created",
                descriptor.slug
            ))),
        }
    }

    async fn train_persona(
        &self,
        user: &UserId,
        persona: &PersonaId,
        input: TrainingInput,
    ) -> PersonaResult<()> {
        match input {
            TrainingInput::Text(text) => {
                if text.trim().is_empty() {
                    return Err(PersonaError::InvalidRequest(
                        "training text is empty".to_string(),
                    ));
                }
                self.add_raw_text(user, persona, &text).await
            }
            TrainingInput::Document { filename, content } => {
                self.upload_document(user, persona, &filename, content).await
            }
        }
    }

    async fn chat(
        &self,
        user: &UserId,
        persona: &PersonaId,
        message: &str,
    ) -> PersonaResult<String> {
        self.send_chat(user, persona, message, false).await
    }

    async fn generate(
        &self,
        user: &UserId,
        persona: &PersonaId,
        prompt: &str,
    ) -> PersonaResult<String> {
        self.send_chat(user, persona, prompt, true).await
    }

    async fn list_personas(&self, user: &UserId) -> PersonaResult<Vec<PersonaSummary>> {
        let url = self.url("/replicas");
        let page: Items<PersonaSummary> = self
            .send("list personas", Some(user), true, |http| http.get(&url))
            .await?;
        Ok(page.items)
    }

    async fn chat_history(
        &self,
        user: &UserId,
        persona: &PersonaId,
    ) -> PersonaResult<Vec<ChatMessage>> {
        let url = self.url(&format!("/replicas/{}/chat/history", persona));
        let page: Items<ChatMessage> = self
            .send("chat history", Some(user), true, |http| http.get(&url))
            .await?;
        Ok(page.items)
    }

    async fn delete_persona(&self, user: &UserId, persona: &PersonaId) -> PersonaResult<()> {
        let url = self.url(&format!("/replicas/{}", persona));
        let ack: Ack = self
            .send("delete persona", Some(user), true, |http| http.delete(&url))
            .await?;
        check_ack(ack, "persona was not deleted")
    }
}

fn check_ack(ack: Ack, fallback: &str) -> PersonaResult<()> {
    if ack.failed() {
        Err(PersonaError::InvalidResponse(
            ack.error.unwrap_or_else(|| fallback.to_string()),
        ))
    } else {
        Ok(())
    }
}

/// Maps a response to a value or a classified error
async fn read_json<T: DeserializeOwned>(response: Response) -> PersonaResult<T> {
    let status = response.status();
    let body = response.bytes().await.map_err(PersonaError::Connection)?;

    if status.is_success() {
        let body: &[u8] = if body.iter().all(u8::is_ascii_whitespace) {
            b"{}"
        } else {
            &body
        };
        return serde_json::from_slice(body)
            .map_err(|e| PersonaError::InvalidResponse(e.to_string()));
    }

    let text = String::from_utf8_lossy(&body);
    let message = error_message(&text)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown").to_string());

    Err(match status {
        StatusCode::TOO_MANY_REQUESTS => PersonaError::RateLimited,
        StatusCode::NOT_FOUND => PersonaError::NotFound(message),
        _ => PersonaError::Status {
            status: status.as_u16(),
            message,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_rejected() {
        let err = PersonaClient::new(ClientConfig::new("  ")).unwrap_err();
        assert!(matches!(err, PersonaError::MissingCredential(API_KEY_ENV)));
    }

    #[test]
    fn test_client_creation() {
        let client = PersonaClient::new(ClientConfig::new("key")).unwrap();
        assert_eq!(client.url("/replicas"), "https://api.sensay.io/v1/replicas");
    }
}
