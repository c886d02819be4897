//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::planning::{PlanStatus, Priority, StoryPoints, TaskStatus};

/// Top-level CLI parser for `planwright`.
#[derive(Debug, Parser)]
#[command(name = "planwright", version, about = "Turn requirements into development plans")]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Requirements given inline or read from a file.
#[derive(Debug, Clone, Args)]
pub struct RequirementsInput {
    /// Requirements text.
    #[arg(conflicts_with = "file")]
    pub text: Option<String>,
    /// Read requirements from this file (`-` for stdin).
    #[arg(long, short = 'f')]
    pub file: Option<PathBuf>,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Preview how requirements would be decomposed.
    Analyze {
        #[command(flatten)]
        input: RequirementsInput,
        /// Extra context for the AI analyzer.
        #[arg(long)]
        context: Option<String>,
        /// Try the AI analyzer first, falling back to rules on failure.
        #[arg(long)]
        ai: bool,
        /// Print JSON instead of a summary.
        #[arg(long)]
        json: bool,
    },
    /// Decompose requirements and store the resulting plan.
    Create {
        /// Plan title.
        #[arg(long, short = 't')]
        title: String,
        #[command(flatten)]
        input: RequirementsInput,
        /// Try the AI analyzer first, falling back to rules on failure.
        #[arg(long)]
        ai: bool,
    },
    /// List stored plans, newest first.
    List,
    /// Show one plan with its tasks.
    Show {
        /// Plan id.
        id: String,
        /// Print the stored JSON form.
        #[arg(long)]
        json: bool,
    },
    /// Edit plan-level fields.
    UpdatePlan {
        /// Plan id.
        id: String,
        /// New title.
        #[arg(long)]
        title: Option<String>,
        /// New description.
        #[arg(long)]
        description: Option<String>,
        /// New status (draft, active, completed, archived).
        #[arg(long)]
        status: Option<PlanStatus>,
    },
    /// Edit one task; completed counts are kept in sync.
    UpdateTask {
        /// Plan id.
        plan_id: String,
        /// Task id.
        task_id: String,
        /// New status (pending, in-progress, completed, blocked).
        #[arg(long)]
        status: Option<TaskStatus>,
        /// New priority (low, medium, high, critical).
        #[arg(long)]
        priority: Option<Priority>,
        /// New story-point estimate (1, 2, 3, 5, 8).
        #[arg(long)]
        points: Option<StoryPoints>,
        /// New description.
        #[arg(long)]
        description: Option<String>,
        /// Replace acceptance criteria; repeat for several.
        #[arg(long = "criterion")]
        criteria: Vec<String>,
    },
    /// Delete a plan.
    Delete {
        /// Plan id.
        id: String,
    },
    /// Ask the AI backend for code implementing a task.
    Suggest {
        /// Plan id.
        plan_id: String,
        /// Task id.
        task_id: String,
        /// File the code is meant for.
        #[arg(long)]
        path: String,
    },
    /// Browse built-in requirement templates.
    Templates {
        /// Only templates in this category.
        #[arg(long, conflicts_with_all = ["show", "categories"])]
        category: Option<String>,
        /// Print one template's requirements.
        #[arg(long, conflicts_with = "categories")]
        show: Option<String>,
        /// List categories only.
        #[arg(long)]
        categories: bool,
    },
}
