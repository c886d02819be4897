//! Command dispatch and handlers.

pub mod analyze;
pub mod plan;
pub mod task;
pub mod templates;

use std::io::Read;
use std::path::Path;

use crate::cli::{Command, RequirementsInput};
use crate::config::AppConfig;
use crate::context::ServiceContext;

/// Dispatch a parsed command to its handler.
///
/// Commands that never touch plans or the model run without building a
/// context, so `templates` works even with a broken configuration.
///
/// # Errors
///
/// Returns an error string if the context cannot be built or the handler fails.
pub async fn dispatch(command: &Command) -> Result<(), String> {
    if let Command::Templates { category, show, categories } = command {
        return templates::run(category.as_deref(), show.as_deref(), *categories);
    }

    let config = AppConfig::from_env();
    let ctx = ServiceContext::live(&config)?;
    dispatch_with_context(command, &ctx).await
}

/// Dispatch a command with the given service context.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub async fn dispatch_with_context(command: &Command, ctx: &ServiceContext) -> Result<(), String> {
    match command {
        Command::Analyze { input, context, ai, json } => {
            let requirements = read_requirements(input)?;
            analyze::run(ctx, &requirements, context.as_deref(), *ai, *json).await
        }
        Command::Create { title, input, ai } => {
            let requirements = read_requirements(input)?;
            plan::create(ctx, title, &requirements, *ai).await
        }
        Command::List => plan::list(ctx),
        Command::Show { id, json } => plan::show(ctx, id, *json),
        Command::UpdatePlan { id, title, description, status } => {
            plan::update(ctx, id, title.clone(), description.clone(), *status)
        }
        Command::UpdateTask { plan_id, task_id, status, priority, points, description, criteria } => {
            let patch = task::patch_from_args(*status, *priority, *points, description.clone(), criteria);
            task::update(ctx, plan_id, task_id, patch)
        }
        Command::Delete { id } => plan::delete(ctx, id),
        Command::Suggest { plan_id, task_id, path } => task::suggest(ctx, plan_id, task_id, path).await,
        Command::Templates { category, show, categories } => {
            templates::run(category.as_deref(), show.as_deref(), *categories)
        }
    }
}

/// Resolves inline text, a file, or stdin (`--file -`) to requirements text.
///
/// # Errors
///
/// Returns an error string when neither source is given or the file cannot be read.
pub fn read_requirements(input: &RequirementsInput) -> Result<String, String> {
    match (&input.text, &input.file) {
        (Some(text), _) => Ok(text.clone()),
        (None, Some(path)) if path == Path::new("-") => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| format!("Failed to read requirements from stdin: {e}"))?;
            Ok(buf)
        }
        (None, Some(path)) => std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read requirements file {}: {e}", path.display())),
        (None, None) => Err("Provide requirements as text or with --file".to_string()),
    }
}

/// Lays out rows under headers with two-space gutters and a dashed rule.
pub(crate) fn render_table<const N: usize>(headers: [&str; N], rows: &[[String; N]]) -> String {
    let mut widths = headers.map(|h| h.chars().count());
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: Vec<&str>| -> String {
        let padded: Vec<String> =
            cells.iter().zip(&widths).map(|(cell, w)| format!("{cell:<width$}", width = *w)).collect();
        padded.join("  ").trim_end().to_string()
    };

    let mut out = String::new();
    out.push_str(&line(headers.to_vec()));
    out.push('\n');
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&rule.join("  "));
    out.push('\n');
    for row in rows {
        out.push_str(&line(row.iter().map(String::as_str).collect()));
        out.push('\n');
    }
    out
}
