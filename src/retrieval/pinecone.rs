//! Pinecone API client: index description, inference embeddings, vector query

use std::collections::HashMap;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::errors::Result;
use crate::errors::ViviRagError;
use crate::retrieval::Match;

/// Pinecone REST API version header value.
const API_VERSION: &str = "2025-01";

/// Client for the Pinecone control plane, inference API and index data plane.
pub struct PineconeClient {
    client: Client,
    api_key: String,
    controller_endpoint: String,
    index_name: String,
    index_host: String,
    embedding_model: String,
    input_type: String,
    namespace: String,
}

impl PineconeClient {
    /// Connect to the index, resolving its data-plane host.
    ///
    /// This is the network step behind agent initialization; the service
    /// shell retries it to absorb cold starts.
    ///
    /// # Errors
    /// - HTTP client build errors
    /// - Describe-index failures (bad API key, unknown index, network)
    pub async fn connect(
        api_key: String,
        index_name: String,
        controller_endpoint: String,
        embedding_model: String,
        input_type: String,
        namespace: String,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| ViviRagError::Http(e.to_string()))?;

        let index_host =
            describe_index_host(&client, &controller_endpoint, &api_key, &index_name).await?;
        debug!("Resolved index {index_name} to host {index_host}");

        Ok(Self {
            client,
            api_key,
            controller_endpoint,
            index_name,
            index_host,
            embedding_model,
            input_type,
            namespace,
        })
    }

    /// Generate an embedding for `text` with the index's integrated model.
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let url = format!("{}/embed", self.controller_endpoint);
        debug!("Calling Pinecone inference API: {url}");

        let request = EmbedRequest {
            model: &self.embedding_model,
            parameters: EmbedParameters {
                input_type: &self.input_type,
            },
            inputs: vec![EmbedInput { text }],
        };

        let response = self
            .client
            .post(&url)
            .header("Api-Key", &self.api_key)
            .header("X-Pinecone-API-Version", API_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|e| ViviRagError::Http(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ViviRagError::Embedding(format!(
                "Pinecone inference error ({status}): {error_text}"
            )));
        }

        let result: EmbedResponse = response
            .json()
            .await
            .map_err(|e| ViviRagError::Embedding(format!("Failed to parse response: {e}")))?;

        result
            .data
            .into_iter()
            .next()
            .map(|d| d.values)
            .ok_or_else(|| ViviRagError::Embedding("No embedding in response".to_string()))
    }

    /// Nearest-neighbor query against the index, metadata included.
    pub async fn query(&self, vector: &[f32], top_k: usize) -> Result<Vec<Match>> {
        let url = format!("https://{}/query", self.index_host);
        debug!("Querying Pinecone index {}: top_k={top_k}", self.index_name);

        let request = QueryRequest {
            namespace: &self.namespace,
            vector,
            top_k,
            include_metadata: true,
        };

        let response = self
            .client
            .post(&url)
            .header("Api-Key", &self.api_key)
            .header("X-Pinecone-API-Version", API_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|e| ViviRagError::Http(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ViviRagError::VectorSearch(format!(
                "Pinecone query error ({status}): {error_text}"
            )));
        }

        let result: QueryResponse = response
            .json()
            .await
            .map_err(|e| ViviRagError::VectorSearch(format!("Failed to parse response: {e}")))?;

        Ok(result
            .matches
            .into_iter()
            .map(ScoredVector::into_match)
            .collect())
    }
}

async fn describe_index_host(
    client: &Client,
    controller_endpoint: &str,
    api_key: &str,
    index_name: &str,
) -> Result<String> {
    let url = format!("{controller_endpoint}/indexes/{index_name}");
    debug!("Describing Pinecone index: {url}");

    let response = client
        .get(&url)
        .header("Api-Key", api_key)
        .header("X-Pinecone-API-Version", API_VERSION)
        .send()
        .await
        .map_err(|e| ViviRagError::Http(e.to_string()))?;

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(ViviRagError::VectorSearch(format!(
            "Pinecone describe-index error ({status}): {error_text}"
        )));
    }

    let result: IndexDescription = response
        .json()
        .await
        .map_err(|e| ViviRagError::VectorSearch(format!("Failed to parse response: {e}")))?;

    Ok(result.host)
}

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    parameters: EmbedParameters<'a>,
    inputs: Vec<EmbedInput<'a>>,
}

#[derive(Serialize)]
struct EmbedParameters<'a> {
    input_type: &'a str,
}

#[derive(Serialize)]
struct EmbedInput<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct EmbedResponse {
    data: Vec<EmbedValues>,
}

#[derive(Deserialize)]
struct EmbedValues {
    values: Vec<f32>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest<'a> {
    namespace: &'a str,
    vector: &'a [f32],
    top_k: usize,
    include_metadata: bool,
}

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<ScoredVector>,
}

#[derive(Deserialize)]
struct ScoredVector {
    id: Option<String>,
    score: Option<f32>,
    #[serde(default)]
    metadata: HashMap<String, Value>,
}

impl ScoredVector {
    /// Flatten metadata to strings; scalars are rendered, nested values
    /// dropped.
    fn into_match(self) -> Match {
        let metadata = self
            .metadata
            .into_iter()
            .filter_map(|(key, value)| match value {
                Value::String(s) => Some((key, s)),
                Value::Number(n) => Some((key, n.to_string())),
                Value::Bool(b) => Some((key, b.to_string())),
                _ => None,
            })
            .collect();

        Match {
            id: self.id,
            score: self.score,
            metadata,
        }
    }
}

#[derive(Deserialize)]
struct IndexDescription {
    host: String,
}
