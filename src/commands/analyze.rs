//! `planwright analyze` command.

use std::fmt::Write as _;

use super::render_table;
use crate::context::ServiceContext;
use crate::planning::Decomposition;
use crate::service::PlanService;

/// Execute the `analyze` command.
///
/// Prints the decomposition without storing a plan.
///
/// # Errors
///
/// Returns an error string for blank requirements or a failed serialization.
pub async fn run(
    ctx: &ServiceContext,
    requirements: &str,
    context: Option<&str>,
    use_ai: bool,
    json: bool,
) -> Result<(), String> {
    let decomposition = PlanService::new(ctx)
        .analyze(requirements, context, use_ai)
        .await
        .map_err(|e| e.to_string())?;

    if json {
        let out = serde_json::to_string_pretty(&decomposition)
            .map_err(|e| format!("Failed to serialize analysis: {e}"))?;
        println!("{out}");
    } else {
        print!("{}", render(&decomposition));
    }
    Ok(())
}

fn render(decomposition: &Decomposition) -> String {
    let analysis = &decomposition.analysis;
    let mut out = String::new();
    let _ = writeln!(out, "Method: {}", decomposition.method);
    let _ = writeln!(out, "Complexity: {}", analysis.complexity);
    let _ = writeln!(out, "Estimated effort: {} points\n", analysis.estimated_effort());

    let rows: Vec<[String; 5]> = analysis
        .tasks
        .iter()
        .map(|t| {
            [
                t.order.to_string(),
                t.title.clone(),
                t.priority.to_string(),
                t.estimated_complexity.to_string(),
                t.tags.join(","),
            ]
        })
        .collect();
    out.push_str(&render_table(["ORDER", "TITLE", "PRIORITY", "POINTS", "TAGS"], &rows));

    if !analysis.suggestions.is_empty() {
        out.push_str("\nSuggestions:\n");
        for suggestion in &analysis.suggestions {
            let _ = writeln!(out, "  - {suggestion}");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planning::{rules, Method};

    #[test]
    fn summary_lists_tasks_and_suggestions() {
        let decomposition = Decomposition {
            analysis: rules::analyze("Add an API endpoint for orders."),
            method: Method::RuleBased,
        };
        let out = render(&decomposition);

        assert!(out.starts_with("Method: rule-based\nComplexity: simple\n"));
        assert!(out.contains("Implement RESTful API endpoints"));
        assert!(out.contains("Suggestions:\n  - "));
    }

    #[tokio::test]
    async fn blank_requirements_fail() {
        let ctx = ServiceContext::in_memory(None);
        let err = run(&ctx, "   ", None, false, false).await.unwrap_err();
        assert!(err.contains("requirements"));
    }
}
