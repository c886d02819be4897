//! Plan-level commands: `create`, `list`, `show`, `update-plan`, `delete`.

use std::fmt::Write as _;

use super::render_table;
use crate::context::ServiceContext;
use crate::planning::{Plan, PlanPatch, PlanStatus};
use crate::service::PlanService;

/// Execute the `create` command.
///
/// # Errors
///
/// Returns an error string for blank input or a store failure.
pub async fn create(
    ctx: &ServiceContext,
    title: &str,
    requirements: &str,
    use_ai: bool,
) -> Result<(), String> {
    let plan = PlanService::new(ctx)
        .create_plan(title, requirements, use_ai)
        .await
        .map_err(|e| e.to_string())?;
    println!("Created plan {} with {} task(s).", plan.id, plan.metadata.total_tasks);
    Ok(())
}

/// Execute the `list` command.
///
/// # Errors
///
/// Returns an error string if the store cannot be read.
pub fn list(ctx: &ServiceContext) -> Result<(), String> {
    let plans = PlanService::new(ctx).list_plans().map_err(|e| e.to_string())?;
    if plans.is_empty() {
        println!("No plans found in store.");
        return Ok(());
    }
    print!("{}", render_list(&plans));
    println!("\n{} plan(s) total.", plans.len());
    Ok(())
}

fn render_list(plans: &[Plan]) -> String {
    let rows: Vec<[String; 5]> = plans
        .iter()
        .map(|p| {
            [
                p.id.clone(),
                p.title.clone(),
                p.status.to_string(),
                format!(
                    "{}/{} ({}%)",
                    p.metadata.completed_tasks,
                    p.metadata.total_tasks,
                    p.metadata.progress_percent()
                ),
                p.metadata.complexity.to_string(),
            ]
        })
        .collect();
    render_table(["ID", "TITLE", "STATUS", "PROGRESS", "COMPLEXITY"], &rows)
}

/// Execute the `show` command.
///
/// # Errors
///
/// Returns an error string for an unknown id.
pub fn show(ctx: &ServiceContext, id: &str, json: bool) -> Result<(), String> {
    let plan = PlanService::new(ctx).get_plan(id).map_err(|e| e.to_string())?;
    if json {
        let out = serde_json::to_string_pretty(&plan)
            .map_err(|e| format!("Failed to serialize plan {id}: {e}"))?;
        println!("{out}");
    } else {
        print!("{}", render_plan(&plan));
    }
    Ok(())
}

fn render_plan(plan: &Plan) -> String {
    let meta = &plan.metadata;
    let mut out = String::new();
    let _ = writeln!(out, "Plan: {}", plan.id);
    let _ = writeln!(out, "Title: {}", plan.title);
    let _ = writeln!(out, "Status: {}", plan.status);
    let _ = writeln!(out, "Complexity: {}", meta.complexity);
    let _ = writeln!(
        out,
        "Progress: {}/{} tasks ({}%), {} points estimated",
        meta.completed_tasks,
        meta.total_tasks,
        meta.progress_percent(),
        meta.estimated_effort
    );
    let _ = writeln!(out, "Created: {}", plan.created_at.to_rfc3339());
    let _ = writeln!(out, "Updated: {}", plan.updated_at.to_rfc3339());

    for task in &plan.tasks {
        let _ = writeln!(out, "\n[{}] {} ({})", task.status, task.title, task.id);
        let _ = writeln!(
            out,
            "  priority: {}, points: {}, order: {}",
            task.priority, task.estimated_complexity, task.order
        );
        let _ = writeln!(out, "  {}", task.description);
        if !task.dependencies.is_empty() {
            let deps: Vec<String> =
                task.dependencies.iter().map(|d| format!("{} {}", d.kind, d.target)).collect();
            let _ = writeln!(out, "  depends: {}", deps.join(", "));
        }
        for change in &task.file_changes {
            let _ = writeln!(out, "  {} {}: {}", change.action, change.path, change.description);
        }
        for (i, criterion) in task.acceptance_criteria.iter().enumerate() {
            let _ = writeln!(out, "  {}. {criterion}", i + 1);
        }
    }
    out
}

/// Execute the `update-plan` command.
///
/// # Errors
///
/// Returns an error string when nothing would change or the id is unknown.
pub fn update(
    ctx: &ServiceContext,
    id: &str,
    title: Option<String>,
    description: Option<String>,
    status: Option<PlanStatus>,
) -> Result<(), String> {
    let patch = PlanPatch { title, description, status, ..PlanPatch::default() };
    if patch.is_empty() {
        return Err("Nothing to update: pass --title, --description, or --status".to_string());
    }
    let plan = PlanService::new(ctx).update_plan(id, patch).map_err(|e| e.to_string())?;
    println!("Updated plan {} ({}).", plan.id, plan.status);
    Ok(())
}

/// Execute the `delete` command.
///
/// # Errors
///
/// Returns an error string for an unknown id.
pub fn delete(ctx: &ServiceContext, id: &str) -> Result<(), String> {
    PlanService::new(ctx).delete_plan(id).map_err(|e| e.to_string())?;
    println!("Deleted plan {id}.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUIREMENTS: &str = "Build a login page backed by a user database.";

    #[tokio::test]
    async fn show_renders_tasks_with_dependencies() {
        let ctx = ServiceContext::in_memory(None);
        let plan = PlanService::new(&ctx).create_plan("Login", REQUIREMENTS, false).await.unwrap();

        let out = render_plan(&plan);
        assert!(out.starts_with(&format!("Plan: {}\nTitle: Login\nStatus: draft\n", plan.id)));
        assert!(out.contains("[pending] Set up authentication system"));
        assert!(out.contains("depends: requires AUTH_BACKEND"));
        assert!(out.contains("create frontend/src/components/LoginForm.vue: Create login form component"));
    }

    #[tokio::test]
    async fn list_shows_progress() {
        let ctx = ServiceContext::in_memory(None);
        let plan = PlanService::new(&ctx).create_plan("Login", REQUIREMENTS, false).await.unwrap();

        let out = render_list(&[plan.clone()]);
        let expected = format!("0/{} (0%)", plan.tasks.len());
        assert!(out.lines().nth(2).unwrap().contains(&expected));
    }

    #[test]
    fn empty_update_is_rejected() {
        let ctx = ServiceContext::in_memory(None);
        assert!(update(&ctx, "plan_x", None, None, None).unwrap_err().contains("Nothing to update"));
        assert!(update(&ctx, "plan_x", Some("T".into()), None, None).unwrap_err().contains("not found"));
    }
}
