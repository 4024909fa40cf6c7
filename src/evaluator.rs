#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! External AI essay evaluator contract and the OpenAI-backed
//! implementation.

use async_openai::{
    Client as OpenAIClient,
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequest,
    },
};
use async_trait::async_trait;
use bon::Builder;

use crate::{
    config,
    types::{AiEssayEvaluation, EssayDetailLevel},
};

/// Errors surfaced by essay evaluators.
#[derive(thiserror::Error, Debug)]
pub enum EvaluatorError {
    /// Required evaluator configuration is missing.
    #[error("essay evaluator is not configured: {0}")]
    NotConfigured(String),
    /// The evaluation request failed in transit.
    #[error("essay evaluation request failed: {0}")]
    Request(String),
    /// The evaluator responded with something that is not a rubric
    /// evaluation.
    #[error("essay evaluator returned a malformed response: {0}")]
    MalformedResponse(String),
    /// The evaluator did not answer within the configured deadline.
    #[error("essay evaluation timed out after {0:?}")]
    Timeout(std::time::Duration),
}

/// Everything the evaluator needs to score one essay answer.
#[derive(Debug, Clone, Builder)]
#[builder(on(String, into))]
pub struct EssayEvaluationRequest {
    /// The question as shown to the student.
    pub question:       String,
    /// The canonical model answer.
    pub correct_answer: String,
    /// The student's answer under evaluation.
    pub student_answer: String,
    /// Optional worked solution to anchor the rubric.
    pub solution:       Option<String>,
    /// Requested verbosity of the evaluation.
    #[builder(default)]
    pub detail_level:   EssayDetailLevel,
}

/// Scores free-text essay answers against a rubric.
///
/// Implementations usually call out to a hosted model API; a deterministic
/// fake suffices for tests.
#[async_trait]
pub trait EssayEvaluator: Send + Sync {
    /// Evaluates one essay answer.
    async fn evaluate(
        &self,
        request: &EssayEvaluationRequest,
    ) -> Result<AiEssayEvaluation, EvaluatorError>;
}

/// Evaluator backed by an OpenAI-compatible chat-completions endpoint.
///
/// Credentials, model, and sampling parameters come from the environment
/// via [`config`]; each call is wrapped in the configured essay timeout so
/// a hung endpoint degrades into [`EvaluatorError::Timeout`] instead of a
/// hung grading task.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenAiEvaluator;

impl OpenAiEvaluator {
    /// Creates the evaluator. Configuration is read per call, so this never
    /// fails; an unconfigured environment surfaces on `evaluate`.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EssayEvaluator for OpenAiEvaluator {
    async fn evaluate(
        &self,
        request: &EssayEvaluationRequest,
    ) -> Result<AiEssayEvaluation, EvaluatorError> {
        let openai = config::openai_config().ok_or_else(|| {
            EvaluatorError::NotConfigured(
                "OPENAI_ENDPOINT, OPENAI_API_KEY, and OPENAI_MODEL must be set".to_string(),
            )
        })?;

        let messages = build_messages(request)?;

        let client = OpenAIClient::with_config(
            OpenAIConfig::new()
                .with_api_base(openai.api_base())
                .with_api_key(openai.api_key()),
        );

        let chat_request = CreateChatCompletionRequest {
            model: openai.model().to_string(),
            messages,
            temperature: openai.temperature(),
            top_p: openai.top_p(),
            n: Some(1),
            stream: Some(false),
            reasoning_effort: Some(openai.reasoning_effort()),
            ..Default::default()
        };

        let deadline = config::essay_timeout();
        let response = tokio::time::timeout(deadline, client.chat().create(chat_request))
            .await
            .map_err(|_| EvaluatorError::Timeout(deadline))?
            .map_err(|e| EvaluatorError::Request(e.to_string()))?;

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| EvaluatorError::MalformedResponse("empty completion".to_string()))?;

        let mut evaluation = parse_evaluation(&content)?;
        evaluation.model_used = openai.model().to_string();
        evaluation.overall_score = evaluation.overall_score.min(100);
        evaluation.confidence = evaluation.confidence.clamp(0.0, 1.0);
        Ok(evaluation)
    }
}

/// Builds the system and user messages for one evaluation call.
fn build_messages(
    request: &EssayEvaluationRequest,
) -> Result<Vec<ChatCompletionRequestMessage>, EvaluatorError> {
    let detail_instruction = match request.detail_level {
        EssayDetailLevel::Basic => {
            "Keep the evaluation brief: one or two sentences per criterion."
        }
        EssayDetailLevel::Detailed => {
            "Provide a detailed evaluation with specific references to the student's answer."
        }
    };

    let mut user_content = format!(
        "## Question\n\n{}\n\n## Model answer\n\n{}\n",
        request.question, request.correct_answer
    );
    if let Some(solution) = &request.solution {
        user_content.push_str(&format!("\n## Worked solution\n\n{}\n", solution));
    }
    user_content.push_str(&format!(
        "\n## Student answer\n\n{}\n\n{}",
        request.student_answer, detail_instruction
    ));

    Ok(vec![
        ChatCompletionRequestSystemMessageArgs::default()
            .content(include_str!("prompts/essay_evaluation.md").to_string())
            .build()
            .map_err(|e| EvaluatorError::Request(e.to_string()))?
            .into(),
        ChatCompletionRequestUserMessageArgs::default()
            .content(user_content)
            .build()
            .map_err(|e| EvaluatorError::Request(e.to_string()))?
            .into(),
    ])
}

/// Extracts the JSON evaluation from the completion text, tolerating
/// markdown code fences and surrounding prose.
fn parse_evaluation(content: &str) -> Result<AiEssayEvaluation, EvaluatorError> {
    let start = content
        .find('{')
        .ok_or_else(|| EvaluatorError::MalformedResponse("no JSON object in reply".to_string()))?;
    let end = content
        .rfind('}')
        .ok_or_else(|| EvaluatorError::MalformedResponse("no JSON object in reply".to_string()))?;

    serde_json::from_str(&content[start..=end])
        .map_err(|e| EvaluatorError::MalformedResponse(e.to_string()))
}
