use clap::{Parser, Subcommand};
use subtrack_models::{PlanId, UserPlanId};

/// One line typed at the prompt.
#[derive(Debug, Parser)]
#[command(name = "subtrack", no_binary_name = true)]
struct Prompt {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Sign in and open the home view
    Login { username: String, password: String },

    /// Create an account and sign in
    Register { username: String, password: String },

    /// Sign out and return to the login view
    Logout,

    /// Open a view, e.g. `/my-list` or `/edit-plan/3`
    Goto { path: String },

    /// Load categories, subscriptions and your plans
    Init,

    /// List subscriptions with their plans
    #[command(name = "subs")]
    Subscriptions,

    /// List categories
    #[command(name = "cats")]
    Categories,

    /// List the plans on your list
    #[command(name = "plans")]
    UserPlans,

    /// Add a plan to your list
    Add {
        plan_id: PlanId,
        /// First payment date, YYYY-MM-DD
        payment_date: String,
        /// Track usage of this plan
        #[arg(long = "track")]
        track_usage: bool,
    },

    /// Flip usage tracking on one of your plans
    Toggle { user_plan_id: UserPlanId },

    /// Remove a plan from your list
    #[command(name = "rm")]
    Remove { user_plan_id: UserPlanId },

    /// Leave the prompt
    #[command(alias = "exit")]
    Quit,
}

impl Command {
    /// Parses one input line. Blank lines yield `Ok(None)`; `help` and
    /// malformed input come back as a [`clap::Error`] ready to print.
    pub fn parse_line(line: &str) -> Result<Option<Command>, clap::Error> {
        if line.trim().is_empty() {
            return Ok(None);
        }
        Prompt::try_parse_from(line.split_whitespace()).map(|prompt| Some(prompt.command))
    }
}
