//! AI extraction adapters
//!
//! Two stateless operations over an OpenAI-compatible chat-completions
//! endpoint: event extraction from free text and book summary/tag
//! generation. A failure at any stage (transport, malformed JSON, schema
//! mismatch) aborts the whole operation; no partial result ever escapes.

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::{
    config::AiConfig,
    error::{AppError, AppResult},
};

/// Minimal chat-completion client. The concrete implementation talks HTTP;
/// tests substitute a mock.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Run one system+user exchange and return the raw assistant text
    async fn complete(&self, system: &str, user: &str, temperature: f32) -> AppResult<String>;
}

/// reqwest-backed client for an OpenAI-compatible `/chat/completions` API
pub struct OpenAiChatClient {
    http: reqwest::Client,
    config: AiConfig,
}

impl OpenAiChatClient {
    pub fn new(config: AiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Deserialize)]
struct CompletionMessage {
    content: Option<String>,
}

#[async_trait]
impl ChatClient for OpenAiChatClient {
    async fn complete(&self, system: &str, user: &str, temperature: f32) -> AppResult<String> {
        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );

        let body = serde_json::json!({
            "model": self.config.model,
            "temperature": temperature,
            "response_format": { "type": "json_object" },
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user },
            ],
        });

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Completion request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Upstream(format!(
                "Completion request failed with status {}",
                response.status()
            )));
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Invalid completion response: {}", e)))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| AppError::Upstream("Completion response had no content".to_string()))
    }
}

/// Structured event draft extracted from free text
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EventDraft {
    pub title: String,
    pub location: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub description: Option<String>,
}

/// Generated book summary and tags
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookMetadata {
    pub summary: String,
    pub tags: Vec<String>,
}

#[derive(Deserialize)]
struct RawEventDraft {
    title: String,
    #[serde(default)]
    location: Option<String>,
    start_time: String,
    #[serde(default)]
    end_time: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Deserialize)]
struct RawBookMetadata {
    summary: String,
    tags: Vec<String>,
}

#[derive(Clone)]
pub struct AiService {
    client: Arc<dyn ChatClient>,
}

impl AiService {
    pub fn new(client: Arc<dyn ChatClient>) -> Self {
        Self { client }
    }

    /// Extract a structured event draft from free text, anchored at `now`.
    /// When the model omits the end, it defaults to one hour after the start.
    pub async fn extract_event(&self, text: &str, now: DateTime<Utc>) -> AppResult<EventDraft> {
        let text = text.trim();
        if text.len() < 5 {
            return Err(AppError::Validation(
                "text must be at least 5 characters".to_string(),
            ));
        }

        let prompt = format!(
            r#"Extract event information from this text:

"{text}"

Return ONLY JSON with:
title: string
location: string or null
start_time: ISO datetime string
end_time: ISO datetime string (assume 1 hour if not specified)
description: string or null

Current date: {now}
"#,
            text = text,
            now = now.to_rfc3339(),
        );

        let raw = self
            .client
            .complete("Extract structured event data in JSON format.", &prompt, 0.1)
            .await?;

        let draft: RawEventDraft = serde_json::from_str(&raw)
            .map_err(|e| AppError::Upstream(format!("Model returned invalid JSON: {}", e)))?;

        if draft.title.trim().is_empty() {
            return Err(AppError::Upstream("Model returned an empty title".to_string()));
        }

        let start_time = parse_datetime(&draft.start_time)
            .ok_or_else(|| AppError::Upstream("Model returned an invalid start_time".to_string()))?;
        let end_time = match draft.end_time.as_deref().filter(|s| !s.trim().is_empty()) {
            Some(s) => parse_datetime(s)
                .ok_or_else(|| AppError::Upstream("Model returned an invalid end_time".to_string()))?,
            None => start_time + Duration::hours(1),
        };

        Ok(EventDraft {
            title: draft.title,
            location: draft.location,
            start_time,
            end_time,
            description: draft.description,
        })
    }

    /// Generate a short summary and tag set for a book
    pub async fn book_metadata(&self, title: &str, author: &str) -> AppResult<BookMetadata> {
        let title = title.trim();
        let author = author.trim();
        if title.is_empty() || author.is_empty() {
            return Err(AppError::Validation(
                "title and author are required".to_string(),
            ));
        }

        let prompt = format!(
            r#"Generate a short book summary and relevant tags.

Title: {title}
Author: {author}

Return ONLY valid JSON with keys:
summary: string (3-5 sentences)
tags: array of 5-8 short tags
"#,
            title = title,
            author = author,
        );

        let raw = self
            .client
            .complete("You generate concise book metadata in JSON.", &prompt, 0.3)
            .await?;

        let metadata: RawBookMetadata = serde_json::from_str(&raw)
            .map_err(|e| AppError::Upstream(format!("Model returned invalid JSON: {}", e)))?;

        if metadata.summary.trim().is_empty() {
            return Err(AppError::Upstream(
                "Model returned an empty summary".to_string(),
            ));
        }
        if metadata.tags.is_empty() || metadata.tags.iter().any(|t| t.trim().is_empty()) {
            return Err(AppError::Upstream("Model returned invalid tags".to_string()));
        }

        Ok(BookMetadata {
            summary: metadata.summary,
            tags: metadata.tags,
        })
    }
}

/// Accept RFC 3339 timestamps, or naive ones interpreted as UTC
fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn service_with(response: &'static str) -> AiService {
        let mut client = MockChatClient::new();
        client
            .expect_complete()
            .returning(move |_, _, _| Ok(response.to_string()));
        AiService::new(Arc::new(client))
    }

    #[tokio::test]
    async fn extracts_event_with_explicit_end() {
        let service = service_with(
            r#"{"title":"Team meeting","location":"Room 4",
                "start_time":"2026-08-10T10:00:00Z",
                "end_time":"2026-08-10T11:30:00Z",
                "description":"Weekly sync"}"#,
        );

        let draft = service
            .extract_event("Team meeting next Monday at 10am", Utc::now())
            .await
            .unwrap();

        assert_eq!(draft.title, "Team meeting");
        assert_eq!(draft.location.as_deref(), Some("Room 4"));
        assert_eq!(
            draft.start_time,
            Utc.with_ymd_and_hms(2026, 8, 10, 10, 0, 0).unwrap()
        );
        assert_eq!(
            draft.end_time,
            Utc.with_ymd_and_hms(2026, 8, 10, 11, 30, 0).unwrap()
        );
    }

    #[tokio::test]
    async fn missing_end_defaults_to_one_hour() {
        let service = service_with(
            r#"{"title":"Team meeting","location":null,
                "start_time":"2026-08-10T10:00:00Z",
                "description":null}"#,
        );

        let draft = service
            .extract_event("Team meeting next Monday at 10am", Utc::now())
            .await
            .unwrap();

        assert_eq!(draft.end_time - draft.start_time, Duration::hours(1));
    }

    #[tokio::test]
    async fn naive_timestamps_are_utc() {
        let service = service_with(
            r#"{"title":"Walk","location":null,
                "start_time":"2026-08-10T18:00:00",
                "description":null}"#,
        );

        let draft = service.extract_event("Evening walk", Utc::now()).await.unwrap();
        assert_eq!(
            draft.start_time,
            Utc.with_ymd_and_hms(2026, 8, 10, 18, 0, 0).unwrap()
        );
    }

    #[tokio::test]
    async fn malformed_json_fails_whole_operation() {
        let service = service_with("not json at all");
        let result = service.extract_event("Dinner on Friday", Utc::now()).await;
        assert!(matches!(result, Err(AppError::Upstream(_))));
    }

    #[tokio::test]
    async fn invalid_start_time_is_rejected() {
        let service = service_with(
            r#"{"title":"Dinner","location":null,"start_time":"whenever","description":null}"#,
        );
        let result = service.extract_event("Dinner on Friday", Utc::now()).await;
        assert!(matches!(result, Err(AppError::Upstream(_))));
    }

    #[tokio::test]
    async fn short_text_never_reaches_the_model() {
        let mut client = MockChatClient::new();
        client.expect_complete().never();
        let service = AiService::new(Arc::new(client));

        let result = service.extract_event("hi", Utc::now()).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn generates_book_metadata() {
        let service = service_with(
            r#"{"summary":"A sweeping tale. It spans decades. It ends well.",
                "tags":["fiction","historical","family","saga","classic"]}"#,
        );

        let metadata = service
            .book_metadata("Middlemarch", "George Eliot")
            .await
            .unwrap();
        assert_eq!(metadata.tags.len(), 5);
        assert!(metadata.summary.contains("tale"));
    }

    #[tokio::test]
    async fn empty_tags_are_rejected() {
        let service = service_with(r#"{"summary":"Fine book.","tags":[]}"#);
        let result = service.book_metadata("Middlemarch", "George Eliot").await;
        assert!(matches!(result, Err(AppError::Upstream(_))));
    }

    #[tokio::test]
    async fn blank_inputs_never_reach_the_model() {
        let mut client = MockChatClient::new();
        client.expect_complete().never();
        let service = AiService::new(Arc::new(client));

        let result = service.book_metadata("  ", "George Eliot").await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
