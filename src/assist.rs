//! Optional generative-text helpers: synopsis drafting for the admin form and catalog
//! recommendations for the client. Nothing in the catalog or session paths depends on this.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::AssistSettings;
use crate::error::{ApiError, ApiResult};
use crate::types::{ContentItem, Genre};

pub const DRAFT_FAILED: &str = "Failed to generate description with AI.";
pub const RECOMMEND_FAILED: &str = "I'm having a bit of trouble connecting to the movie database right now. Try again in a moment!";
pub const RECOMMEND_EMPTY: &str = "I couldn't find a perfect match, but take a look around the popular section!";

#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

pub fn synopsis_prompt(title: &str, genre: Genre) -> String {
    format!(
        "Write a compelling and dramatic 2-sentence synopsis for a {genre} movie titled \"{title}\". \
         The description should sound like a Netflix movie summary."
    )
}

pub fn recommendation_prompt(catalog: &[ContentItem], recent: &[ContentItem], query: &str) -> String {
    let catalog_context = catalog
        .iter()
        .map(|m| format!("- {} ({}, {}, {}): {}", m.title, m.year, m.genre, m.country, m.description))
        .collect::<Vec<_>>()
        .join("\n");
    let history_context = if recent.is_empty() {
        "The user has not watched anything in this session yet.".to_string()
    } else {
        let watched = recent.iter().map(|m| format!("{} ({})", m.title, m.genre)).collect::<Vec<_>>().join(", ");
        format!("The user has recently watched/clicked on: {watched}. Use this to personalize recommendations (e.g. \"Since you liked X...\").")
    };
    format!(
        "You are an enthusiastic and knowledgeable movie recommendation assistant for Netflex.\n\n\
         CATALOG OF AVAILABLE MOVIES:\n{catalog_context}\n\n\
         USER SESSION CONTEXT:\n{history_context}\n\n\
         USER QUERY: \"{query}\"\n\n\
         INSTRUCTIONS:\n\
         1. Recommend 1-3 movies strictly from the CATALOG above.\n\
         2. If the user's history is relevant, reference it to explain your choice.\n\
         3. If the query is vague (e.g., \"something good\"), use the popular or high-quality items from the catalog.\n\
         4. Keep the tone friendly, brief (max 3 sentences), and engaging.\n\
         5. Do not make up movies. Only use the ones listed.\n"
    )
}

/// Draft a synopsis. Needs a title; generator failures become a user-facing message.
pub async fn draft_description(generator: &dyn TextGenerator, title: &str, genre: Option<Genre>) -> ApiResult<String> {
    let title = title.trim();
    let Some(genre) = genre.filter(|_| !title.is_empty()) else {
        return Err(ApiError::Assistant("Please enter a Title and Genre to generate a description.".into()));
    };
    match generator.generate(&synopsis_prompt(title, genre)).await {
        Ok(text) if !text.trim().is_empty() => Ok(text.trim().to_string()),
        Ok(_) => Err(ApiError::Assistant(DRAFT_FAILED.into())),
        Err(e) => {
            tracing::warn!(error = %e, "synopsis generation failed");
            Err(ApiError::Assistant(DRAFT_FAILED.into()))
        }
    }
}

/// Answer a recommendation question. Empty input is rejected; an empty answer falls back to a stock reply.
pub async fn recommend(generator: &dyn TextGenerator, catalog: &[ContentItem], recent: &[ContentItem], query: &str) -> ApiResult<String> {
    if query.trim().is_empty() {
        return Err(ApiError::Assistant("Ask for something to watch.".into()));
    }
    match generator.generate(&recommendation_prompt(catalog, recent, query.trim())).await {
        Ok(text) if !text.trim().is_empty() => Ok(text.trim().to_string()),
        Ok(_) => Ok(RECOMMEND_EMPTY.to_string()),
        Err(e) => {
            tracing::warn!(error = %e, "recommendation failed");
            Err(ApiError::Assistant(RECOMMEND_FAILED.into()))
        }
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

fn response_text(resp: GenerateResponse) -> String {
    resp.candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect::<Vec<_>>().join(""))
        .unwrap_or_default()
}

/// Gemini `generateContent` over HTTPS.
pub struct GeminiClient {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn from_settings(settings: &AssistSettings) -> Result<Self> {
        let api_key = settings.api_key.clone().filter(|k| !k.trim().is_empty())
            .ok_or_else(|| anyhow!("no assistant API key configured (set NETFLEX_ASSIST_API_KEY)"))?;
        let client = reqwest::Client::builder()
            .user_agent("netflex/0.1")
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;
        Ok(Self { client, endpoint: settings.endpoint.trim_end_matches('/').to_string(), model: settings.model.clone(), api_key })
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!("{}/models/{}:generateContent", self.endpoint, self.model);
        let body = GenerateRequest { contents: vec![RequestContent { parts: vec![RequestPart { text: prompt }] }] };
        let resp = self.client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .with_context(|| format!("calling {url}"))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(anyhow!("assistant returned HTTP {status}"));
        }
        let parsed: GenerateResponse = resp.json().await.context("decoding assistant response")?;
        Ok(response_text(parsed))
    }
}
