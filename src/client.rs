//! # Provider Client
//!
//! One outbound call: a prompt plus the maps-grounding tool, optionally
//! biased toward device coordinates, answered with a free-text report
//! and a list of grounding citations. A single blocking attempt with a
//! bounded timeout — failures surface as one user-facing error, retry
//! is the user pressing the button again.
//!
//! [`PlacesClient`] is the seam: the orchestrator and the CLI talk to
//! the trait, tests substitute a canned implementation, and
//! [`GeminiClient`] is the production implementation speaking the
//! `generateContent` REST surface.

use crate::config::CompassConfig;
use crate::error::{CompassError, Result};
use crate::model::{Coordinates, Place};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

#[derive(Debug, Clone)]
pub struct GroundedRequest {
    pub prompt: String,
    /// Retrieval bias. `None` in manual-address mode, where the maps
    /// tool infers the center from the prompt text instead.
    pub bias: Option<Coordinates>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroundedResponse {
    pub text: String,
    /// Cited places, collapsed by uri — first occurrence wins.
    pub citations: Vec<Place>,
}

pub trait PlacesClient {
    fn generate(&self, request: &GroundedRequest) -> Result<GroundedResponse>;
}

pub struct GeminiClient {
    http: reqwest::blocking::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    /// Build a client from config. Fails fast when no credential is
    /// resolvable — before any I/O happens.
    pub fn new(config: &CompassConfig) -> Result<Self> {
        let api_key = config.resolved_api_key().ok_or(CompassError::AiMisconfigured)?;

        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("gourmet-compass/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| CompassError::AiRequestFailed(e.to_string()))?;

        Ok(Self {
            http,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: config.model.clone(),
            api_key,
        })
    }

    /// Point at a different host. For tests.
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.trim_end_matches('/').to_string();
        self
    }
}

impl PlacesClient for GeminiClient {
    fn generate(&self, request: &GroundedRequest) -> Result<GroundedResponse> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint, self.model
        );
        let body = build_body(request);
        debug!(
            "generateContent: model={} prompt_chars={} biased={}",
            self.model,
            request.prompt.chars().count(),
            request.bias.is_some()
        );

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .map_err(|e| CompassError::AiRequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!("generateContent failed: {status}");
            return Err(CompassError::AiRequestFailed(format!(
                "provider returned {status}"
            )));
        }

        let payload: GenerateResponse = response
            .json()
            .map_err(|e| CompassError::AiRequestFailed(e.to_string()))?;
        Ok(extract(payload))
    }
}

// --- Wire types ---

#[derive(Debug, Serialize)]
struct GenerateBody {
    contents: Vec<ContentIn>,
    tools: Vec<Tool>,
    #[serde(rename = "toolConfig", skip_serializing_if = "Option::is_none")]
    tool_config: Option<ToolConfig>,
}

#[derive(Debug, Serialize)]
struct ContentIn {
    parts: Vec<PartIn>,
}

#[derive(Debug, Serialize)]
struct PartIn {
    text: String,
}

#[derive(Debug, Serialize)]
struct Tool {
    #[serde(rename = "googleMaps")]
    google_maps: EmptyObject,
}

#[derive(Debug, Serialize)]
struct EmptyObject {}

#[derive(Debug, Serialize)]
struct ToolConfig {
    #[serde(rename = "retrievalConfig")]
    retrieval_config: RetrievalConfig,
}

#[derive(Debug, Serialize)]
struct RetrievalConfig {
    #[serde(rename = "latLng")]
    lat_lng: LatLng,
}

#[derive(Debug, Serialize)]
struct LatLng {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ContentOut>,
    #[serde(rename = "groundingMetadata")]
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
struct ContentOut {
    #[serde(default)]
    parts: Vec<PartOut>,
}

#[derive(Debug, Deserialize)]
struct PartOut {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GroundingMetadata {
    #[serde(rename = "groundingChunks", default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
struct GroundingChunk {
    web: Option<ChunkRef>,
    maps: Option<ChunkRef>,
}

#[derive(Debug, Deserialize)]
struct ChunkRef {
    uri: Option<String>,
    title: Option<String>,
}

fn build_body(request: &GroundedRequest) -> GenerateBody {
    GenerateBody {
        contents: vec![ContentIn {
            parts: vec![PartIn {
                text: request.prompt.clone(),
            }],
        }],
        tools: vec![Tool {
            google_maps: EmptyObject {},
        }],
        tool_config: request.bias.map(|coords| ToolConfig {
            retrieval_config: RetrievalConfig {
                lat_lng: LatLng {
                    latitude: coords.latitude,
                    longitude: coords.longitude,
                },
            },
        }),
    }
}

/// Pull the report text and citations out of the first candidate.
/// A citation needs both uri and title; duplicates by uri collapse to
/// the first occurrence.
fn extract(payload: GenerateResponse) -> GroundedResponse {
    let Some(candidate) = payload.candidates.into_iter().next() else {
        return GroundedResponse {
            text: String::new(),
            citations: Vec::new(),
        };
    };

    let text = candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    let mut citations: Vec<Place> = Vec::new();
    if let Some(metadata) = candidate.grounding_metadata {
        for chunk in metadata.grounding_chunks {
            let place = chunk.web.or(chunk.maps).and_then(|r| match (r.uri, r.title) {
                (Some(uri), Some(title)) => Some(Place::new(uri, title)),
                _ => None,
            });
            if let Some(place) = place {
                if !citations.iter().any(|c| c.uri == place.uri) {
                    citations.push(place);
                }
            }
        }
    }

    GroundedResponse { text, citations }
}
