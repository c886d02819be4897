//! End-to-end planning through the library API with recorded LLM exchanges.
//!
//! 1. Record a session against a scripted backend.
//! 2. Replay the cassette into a fresh context and create a plan from it.
//! 3. Replay again and check the plan content is identical.

use chrono::{TimeZone, Utc};

use planwright::adapters::fixed::{FixedClock, SequentialIdGenerator};
use planwright::adapters::replaying::ReplayingLlmClient;
use planwright::adapters::YamlPlanStore;
use planwright::cassette::{Cassette, CassetteRecorder, Outcome};
use planwright::context::ServiceContext;
use planwright::planning::{Method, Plan, Priority, StoryPoints, TaskPatch, TaskStatus};
use planwright::{PlanError, PlanService};

const REQUIREMENTS: &str = "Let customers reset their password by email.";

const REPLY: &str = r#"```json
{
  "complexity": "simple",
  "tasks": [
    {"title": "Reset token endpoint", "description": "Issue single-use reset tokens",
     "priority": "high", "estimatedComplexity": 3, "order": 1,
     "fileChanges": [{"filePath": "src/reset.rs", "action": "create", "description": "Token issue"}]},
    {"title": "Reset email", "description": "Send the reset link",
     "priority": "medium", "estimatedComplexity": 2,
     "dependencies": [{"taskId": "Reset token endpoint", "type": "requires"}]}
  ],
  "suggestions": ["Expire tokens after 30 minutes"]
}
```"#;

fn context(store: &std::path::Path, llm: ReplayingLlmClient) -> ServiceContext {
    ServiceContext::new(
        Box::new(FixedClock::new(Utc.with_ymd_and_hms(2025, 3, 15, 14, 30, 0).unwrap())),
        Box::new(SequentialIdGenerator::new()),
        Some(Box::new(llm)),
        Box::new(YamlPlanStore::new(store)),
    )
}

async fn record(path: &std::path::Path) {
    let scripted = ReplayingLlmClient::from_replies(vec![Ok(REPLY.to_string())]);
    let store = tempfile::tempdir().unwrap();
    let ctx = context(store.path(), scripted).recording(CassetteRecorder::new(path, "reset"));

    let result = PlanService::new(&ctx).analyze(REQUIREMENTS, None, true).await.unwrap();
    assert_eq!(result.method, Method::Ai);
}

async fn create_from_cassette(cassette: &Cassette) -> Plan {
    let store = tempfile::tempdir().unwrap();
    let ctx = context(store.path(), ReplayingLlmClient::from_cassette(cassette));
    let service = PlanService::new(&ctx);

    let plan = service.create_plan("Password reset", REQUIREMENTS, true).await.unwrap();
    assert_eq!(service.get_plan(&plan.id).unwrap(), plan);
    plan
}

#[tokio::test]
async fn record_then_replay_creates_the_same_plan() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reset.cassette.yaml");
    record(&path).await;

    let cassette = Cassette::load(&path).unwrap();
    assert_eq!(cassette.exchanges.len(), 1);
    assert!(cassette.exchanges[0].request.structured);
    assert!(cassette.exchanges[0].request.prompt.contains(REQUIREMENTS));
    assert!(matches!(cassette.exchanges[0].outcome, Outcome::Reply(_)));

    let first = create_from_cassette(&cassette).await;
    let second = create_from_cassette(&cassette).await;
    assert_eq!(first, second);

    assert_eq!(first.id, "plan_3");
    assert_eq!(first.metadata.total_tasks, 2);
    assert_eq!(first.metadata.estimated_effort, 5);
    assert_eq!(first.tasks[0].priority, Priority::High);
    assert_eq!(first.tasks[1].order, 2);
    assert_eq!(first.tasks[1].dependencies[0].target, "Reset token endpoint");
    assert!(first.tasks.iter().all(|t| t.status == TaskStatus::Pending));
}

#[tokio::test]
async fn exhausted_cassette_falls_back_then_edits_persist() {
    let store = tempfile::tempdir().unwrap();
    let ctx = context(store.path(), ReplayingLlmClient::from_replies(vec![]));
    let service = PlanService::new(&ctx);

    let plan = service.create_plan("Password reset", REQUIREMENTS, true).await.unwrap();
    assert_eq!(plan.tasks[0].title, "Set up authentication system");

    let patch = TaskPatch {
        status: Some(TaskStatus::Completed),
        estimated_complexity: Some(StoryPoints::Eight),
        ..TaskPatch::default()
    };
    service.update_task(&plan.id, &plan.tasks[0].id, patch).unwrap();

    let reloaded = service.get_plan(&plan.id).unwrap();
    assert_eq!(reloaded.metadata.completed_tasks, 1);
    assert_eq!(reloaded.metadata.estimated_effort, plan.metadata.estimated_effort);
    assert_eq!(service.list_plans().unwrap(), vec![reloaded]);

    service.delete_plan(&plan.id).unwrap();
    assert_eq!(service.get_plan(&plan.id), Err(PlanError::plan_not_found(&plan.id)));
}
