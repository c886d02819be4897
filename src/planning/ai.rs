//! AI-assisted decomposition through the [`LlmClient`] port.
//!
//! The analyzer asks the model for a JSON document with the same task shape
//! the rule-based generator produces, then normalizes it: missing lists become
//! empty, every task starts `pending`, missing `order` falls back to position.
//! One completion call per invocation; retries are the caller's business.

use serde::Deserialize;
use tracing::{debug, info};

use crate::config::AI_ENV_VARS;
use crate::error::{PlanError, Result};
use crate::ports::llm::{CompletionRequest, LlmClient};

use super::model::{
    Analysis, Complexity, FileChange, Priority, StoryPoints, TaskDependency, TaskDraft, TaskStatus,
};

const ANALYSIS_SYSTEM_PROMPT: &str = "You are an expert software architect and project planner. \
Analyze requirements and break them down into actionable development tasks with clear \
dependencies, file changes, and acceptance criteria. Respond in JSON format.";

const CODE_SYSTEM_PROMPT: &str =
    "You are an expert programmer. Generate clean, well-documented code based on task descriptions.";

/// Decomposes requirements by delegating to a language model.
pub struct AiAnalyzer<'a> {
    llm: Option<&'a dyn LlmClient>,
}

impl<'a> AiAnalyzer<'a> {
    /// Creates an analyzer. `None` means no backend is configured.
    #[must_use]
    pub fn new(llm: Option<&'a dyn LlmClient>) -> Self {
        Self { llm }
    }

    fn client(&self) -> Result<&'a dyn LlmClient> {
        self.llm.ok_or_else(|| {
            PlanError::NotConfigured(format!("set {} in the environment", AI_ENV_VARS.join(", ")))
        })
    }

    /// Asks the model to decompose `requirements`, with optional extra context.
    ///
    /// # Errors
    ///
    /// Returns [`PlanError::NotConfigured`] without calling out when no backend is
    /// set, and [`PlanError::Analysis`] when the call fails or the response does
    /// not have the expected shape.
    pub async fn analyze(&self, requirements: &str, context: Option<&str>) -> Result<Analysis> {
        let llm = self.client()?;
        let request = CompletionRequest {
            system: ANALYSIS_SYSTEM_PROMPT.to_string(),
            prompt: build_analysis_prompt(requirements, context),
            structured: true,
        };
        debug!(prompt_len = request.prompt.len(), "requesting AI decomposition");

        let response = llm
            .complete(&request)
            .await
            .map_err(|e| PlanError::Analysis(format!("completion request failed: {e}")))?;

        let analysis = parse_analysis_response(&response.text)?;
        info!(
            tasks = analysis.tasks.len(),
            complexity = %analysis.complexity,
            prompt_tokens = response.prompt_tokens,
            completion_tokens = response.completion_tokens,
            "AI decomposition parsed"
        );
        Ok(analysis)
    }

    /// Drafts code for a single task touching `file_path`.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`AiAnalyzer::analyze`], minus parsing: the reply is
    /// returned as free text.
    pub async fn generate_code_suggestion(
        &self,
        task_description: &str,
        file_path: &str,
    ) -> Result<String> {
        let llm = self.client()?;
        let request = CompletionRequest {
            system: CODE_SYSTEM_PROMPT.to_string(),
            prompt: format!(
                "Generate code for the following task:\n\nTask: {task_description}\nFile: {file_path}\n\n\
                 Provide clean, production-ready code with comments."
            ),
            structured: false,
        };

        let response = llm
            .complete(&request)
            .await
            .map_err(|e| PlanError::Analysis(format!("code suggestion request failed: {e}")))?;
        Ok(response.text)
    }
}

fn build_analysis_prompt(requirements: &str, context: Option<&str>) -> String {
    let context_block = context
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(|c| format!("Additional Context:\n{c}\n"))
        .unwrap_or_default();

    format!(
        r#"Analyze the following software requirements and break them down into actionable development tasks.

Requirements:
{requirements}

{context_block}
Please provide a JSON response with the following structure:
{{
  "complexity": "simple" | "moderate" | "complex",
  "tasks": [
    {{
      "title": "Task title",
      "description": "Detailed description",
      "priority": "low" | "medium" | "high" | "critical",
      "estimatedComplexity": 1 | 2 | 3 | 5 | 8,
      "dependencies": [
        {{
          "taskId": "reference to another task by title",
          "type": "blocks" | "relates_to" | "requires"
        }}
      ],
      "fileChanges": [
        {{
          "filePath": "relative/path/to/file",
          "action": "create" | "modify" | "delete",
          "description": "What changes to make",
          "codeSnippet": "optional code example"
        }}
      ],
      "acceptanceCriteria": ["criterion 1", "criterion 2"],
      "tags": ["tag1", "tag2"],
      "order": 1
    }}
  ],
  "suggestions": ["suggestion 1", "suggestion 2"]
}}

Focus on:
- Clear, actionable tasks
- Proper task ordering and dependencies
- Specific file changes needed
- Realistic complexity estimates
- Comprehensive acceptance criteria"#
    )
}

/// Response document as the model sends it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAnalysis {
    #[serde(default)]
    complexity: Option<Complexity>,
    tasks: Vec<RawTask>,
    #[serde(default)]
    suggestions: Option<Vec<String>>,
}

/// One task as the model sends it. Lists may be absent or `null`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTask {
    title: String,
    description: String,
    priority: Priority,
    estimated_complexity: StoryPoints,
    #[serde(default)]
    dependencies: Option<Vec<TaskDependency>>,
    #[serde(default)]
    file_changes: Option<Vec<FileChange>>,
    #[serde(default)]
    acceptance_criteria: Option<Vec<String>>,
    #[serde(default)]
    tags: Option<Vec<String>>,
    #[serde(default)]
    order: Option<u32>,
}

fn parse_analysis_response(text: &str) -> Result<Analysis> {
    let raw: RawAnalysis = serde_json::from_str(strip_code_fence(text))
        .map_err(|e| PlanError::Analysis(format!("unexpected response shape: {e}")))?;

    let tasks = raw
        .tasks
        .into_iter()
        .zip(1..)
        .map(|(task, position)| TaskDraft {
            title: task.title,
            description: task.description,
            status: TaskStatus::Pending,
            priority: task.priority,
            estimated_complexity: task.estimated_complexity,
            dependencies: task.dependencies.unwrap_or_default(),
            file_changes: task.file_changes.unwrap_or_default(),
            acceptance_criteria: task.acceptance_criteria.unwrap_or_default(),
            tags: task.tags.unwrap_or_default(),
            order: task.order.unwrap_or(position),
        })
        .collect();

    Ok(Analysis {
        tasks,
        suggestions: raw.suggestions.unwrap_or_default(),
        complexity: raw.complexity.unwrap_or(Complexity::Moderate),
    })
}

/// Drops a surrounding Markdown code fence, if the model added one.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(body) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = body.strip_suffix("```").unwrap_or(body);
    // Skip the info string ("json") on the opening line.
    body.split_once('\n').map_or(body, |(_, rest)| rest).trim()
}
