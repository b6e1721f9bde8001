use crate::config::{Config, QuestionSource};
use crate::error::{Error, Result};
use crate::models::question::{Question, QuestionType, OPTION_COUNT};
use crate::utils::fence::strip_code_fence;
use reqwest::Client;
use serde::{Deserialize, Serialize};

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<RequestContent>,
}

#[derive(Debug, Serialize)]
pub struct RequestContent {
    pub parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
pub struct RequestPart {
    pub text: String,
}

impl GenerateContentRequest {
    pub fn from_prompt(prompt: String) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        }
    }
}

/// Response envelope of `generateContent`. Every level is optional so a
/// malformed envelope is reported instead of failing deserialization.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
pub struct ContentPart {
    pub text: Option<String>,
}

/// The question JSON the model is asked to produce.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeneratedQuestion {
    text: String,
    options: Vec<String>,
    correct_answer_index: i64,
    #[serde(default)]
    explanation: String,
}

#[derive(Clone)]
pub struct AIService {
    client: Client,
    source: QuestionSource,
    api_key: String,
    endpoint: String,
}

impl AIService {
    pub fn new(config: &Config, client: Client) -> Self {
        Self {
            client,
            source: config.question_source,
            api_key: config.gemini_api_key.clone().unwrap_or_default(),
            endpoint: config.generate_content_url(),
        }
    }

    /// Produces one fresh question on `topic`. One upstream call, no retry.
    pub async fn generate_question(&self, topic: &str, id: i64) -> Result<Question> {
        if self.source == QuestionSource::Sample {
            tracing::debug!(topic, "Serving sample question");
            return Ok(Question::sample(id, topic));
        }

        let payload = GenerateContentRequest::from_prompt(build_prompt(topic));
        let envelope = self.generate_content(&payload).await?;
        let question = normalize(&envelope, topic, id)?;

        tracing::info!(id = question.id, topic, "Generated quiz question");
        Ok(question)
    }

    async fn generate_content(
        &self,
        payload: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let res = self
            .client
            .post(&self.endpoint)
            .header(API_KEY_HEADER, &self.api_key)
            .json(payload)
            .send()
            .await?;

        let status = res.status();
        let body = res.bytes().await?;
        if !status.is_success() {
            tracing::error!(
                status = status.as_u16(),
                body = %String::from_utf8_lossy(&body),
                "Gemini API error"
            );
            return Err(Error::UpstreamCallFailed(format!(
                "Gemini API returned status {}",
                status.as_u16()
            )));
        }

        parse_envelope(&body)
    }
}

pub fn build_prompt(topic: &str) -> String {
    format!(
        r#"Create a multiple-choice quiz question about "{topic}". Return only a JSON object with this exact format:

{{
  "text": "What is the capital of France?",
  "options": ["Paris", "Berlin", "Rome", "Madrid"],
  "correctAnswerIndex": 0,
  "explanation": "Paris is the capital city of France."
}}

- Exactly four options.
- Only one correct answer.
- Ensure the JSON is valid.
- Do not include extra commentary.
- Use common knowledge level unless otherwise stated."#
    )
}

pub fn parse_envelope(body: &[u8]) -> Result<GenerateContentResponse> {
    serde_json::from_slice(body)
        .map_err(|e| Error::InvalidResponseShape(format!("response body is not a valid envelope: {}", e)))
}

/// Returns the text of the first part of the first candidate.
pub fn extract_payload(envelope: &GenerateContentResponse) -> Result<&str> {
    let candidate = envelope
        .candidates
        .first()
        .ok_or_else(|| Error::InvalidResponseShape("response has no candidates".into()))?;
    let content = candidate
        .content
        .as_ref()
        .ok_or_else(|| Error::InvalidResponseShape("candidate has no content".into()))?;
    content
        .parts
        .first()
        .and_then(|p| p.text.as_deref())
        .ok_or_else(|| Error::InvalidResponseShape("content has no text part".into()))
}

pub fn normalize(envelope: &GenerateContentResponse, topic: &str, id: i64) -> Result<Question> {
    let raw = extract_payload(envelope)?;
    let generated: GeneratedQuestion = serde_json::from_str(strip_code_fence(raw))
        .map_err(|e| Error::MalformedContent(e.to_string()))?;

    let option_count = generated.options.len();
    let options: [String; OPTION_COUNT] = generated.options.try_into().map_err(|_| {
        Error::MalformedContent(format!(
            "expected {} options, got {}",
            OPTION_COUNT, option_count
        ))
    })?;

    let correct_answer_index = generated.correct_answer_index;
    if !(0..OPTION_COUNT as i64).contains(&correct_answer_index) {
        return Err(Error::MalformedContent(format!(
            "correctAnswerIndex {} is out of range",
            correct_answer_index
        )));
    }

    Ok(Question {
        id,
        question_type: QuestionType::Solo,
        topic: topic.to_string(),
        text: generated.text,
        options,
        correct_answer_index: correct_answer_index as i32,
        explanation: generated.explanation,
    })
}
