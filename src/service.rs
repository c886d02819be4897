//! Plan service: decomposition, storage, and edits behind one façade.
//!
//! Every operation goes through the ports on [`ServiceContext`], so the same
//! code runs against the YAML store and Azure in the CLI and against memory
//! and cassettes in tests.

use tracing::info;

use crate::context::ServiceContext;
use crate::error::{PlanError, Result};
use crate::planning::{
    apply_plan_update, apply_task_update, decompose, materialize, rules, AiAnalyzer, Analysis,
    DecomposeOptions, Decomposition, Plan, PlanPatch, TaskPatch,
};
use crate::ports::PortError;

fn store_error(e: PortError) -> PlanError {
    PlanError::Store(e.to_string())
}

fn require(value: &str, field: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(PlanError::Validation(format!("{field} is required")))
    } else {
        Ok(())
    }
}

/// Planning operations over a [`ServiceContext`].
pub struct PlanService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PlanService<'a> {
    /// Creates a service using the adapters in `ctx`.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    fn analyzer(&self) -> AiAnalyzer<'a> {
        AiAnalyzer::new(self.ctx.llm.as_deref())
    }

    /// Decomposes requirements without storing anything.
    ///
    /// # Errors
    ///
    /// [`PlanError::Validation`] for blank requirements.
    pub async fn analyze(
        &self,
        requirements: &str,
        context: Option<&str>,
        use_ai: bool,
    ) -> Result<Decomposition> {
        require(requirements, "requirements")?;
        let options = DecomposeOptions { use_ai, context: context.map(str::to_string) };
        decompose(&self.analyzer(), requirements, &options).await
    }

    /// Rule-based analysis only.
    ///
    /// # Errors
    ///
    /// [`PlanError::Validation`] for blank requirements.
    pub fn quick_analyze(&self, requirements: &str) -> Result<Analysis> {
        require(requirements, "requirements")?;
        Ok(rules::analyze(requirements))
    }

    /// Decomposes, materializes, and stores a new plan.
    ///
    /// # Errors
    ///
    /// [`PlanError::Validation`] for a blank title or requirements,
    /// [`PlanError::Store`] if the plan cannot be saved.
    pub async fn create_plan(&self, title: &str, requirements: &str, use_ai: bool) -> Result<Plan> {
        require(title, "title")?;
        require(requirements, "requirements")?;

        let options = DecomposeOptions { use_ai, context: None };
        let decomposition = decompose(&self.analyzer(), requirements, &options).await?;
        let plan = materialize(
            self.ctx.id_gen.as_ref(),
            self.ctx.clock.as_ref(),
            title.trim(),
            requirements,
            decomposition.analysis,
        );
        self.ctx.store.set(&plan.id, &plan).map_err(store_error)?;
        info!(plan_id = %plan.id, method = %decomposition.method, "created plan");
        Ok(plan)
    }

    /// Every stored plan, newest first.
    ///
    /// # Errors
    ///
    /// [`PlanError::Store`] if the store cannot be read.
    pub fn list_plans(&self) -> Result<Vec<Plan>> {
        let mut plans = self.ctx.store.list().map_err(store_error)?;
        plans.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(plans)
    }

    /// Fetches one plan.
    ///
    /// # Errors
    ///
    /// [`PlanError::NotFound`] for an unknown id.
    pub fn get_plan(&self, id: &str) -> Result<Plan> {
        self.ctx.store.get(id).map_err(store_error)?.ok_or_else(|| PlanError::plan_not_found(id))
    }

    /// Applies a shallow patch to a plan.
    ///
    /// # Errors
    ///
    /// [`PlanError::NotFound`] for an unknown id.
    pub fn update_plan(&self, id: &str, patch: PlanPatch) -> Result<Plan> {
        let mut plan = self.get_plan(id)?;
        apply_plan_update(&mut plan, patch, self.ctx.clock.as_ref());
        self.ctx.store.set(id, &plan).map_err(store_error)?;
        info!(plan_id = id, "updated plan");
        Ok(plan)
    }

    /// Patches one task and refreshes the plan's counters.
    ///
    /// # Errors
    ///
    /// [`PlanError::NotFound`] for an unknown plan or task; nothing is stored then.
    pub fn update_task(&self, plan_id: &str, task_id: &str, patch: TaskPatch) -> Result<Plan> {
        let mut plan = self.get_plan(plan_id)?;
        apply_task_update(&mut plan, task_id, patch, self.ctx.clock.as_ref())?;
        self.ctx.store.set(plan_id, &plan).map_err(store_error)?;
        info!(plan_id, task_id, completed = plan.metadata.completed_tasks, "updated task");
        Ok(plan)
    }

    /// Removes a plan.
    ///
    /// # Errors
    ///
    /// [`PlanError::NotFound`] for an unknown id.
    pub fn delete_plan(&self, id: &str) -> Result<()> {
        if self.ctx.store.delete(id).map_err(store_error)? {
            info!(plan_id = id, "deleted plan");
            Ok(())
        } else {
            Err(PlanError::plan_not_found(id))
        }
    }

    /// Asks the model for code implementing a task in `file_path`.
    ///
    /// # Errors
    ///
    /// [`PlanError::NotFound`] for an unknown plan or task,
    /// [`PlanError::Validation`] for a blank path, and the analyzer's
    /// [`PlanError::NotConfigured`] / [`PlanError::Analysis`] unchanged. There is
    /// no fallback here.
    pub async fn suggest_code(&self, plan_id: &str, task_id: &str, file_path: &str) -> Result<String> {
        let plan = self.get_plan(plan_id)?;
        let task = plan.task(task_id).ok_or_else(|| PlanError::task_not_found(task_id))?;
        require(file_path, "file path")?;
        self.analyzer().generate_code_suggestion(&task.description, file_path.trim()).await
    }
}
