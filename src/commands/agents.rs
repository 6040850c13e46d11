//! Agent status command

use super::base::{Command, CommandContext, build_generator};
use crate::agents::Orchestrator;
use anyhow::Result;
use colored::*;

pub struct AgentsCommand;

#[async_trait::async_trait]
impl Command for AgentsCommand {
    async fn execute(&self, context: &CommandContext) -> Result<()> {
        let orchestrator = Orchestrator::new(build_generator(context));
        let statuses = orchestrator.status();

        if context.json {
            println!("{}", serde_json::to_string_pretty(&statuses)?);
            return Ok(());
        }

        println!("{}", "Available agents".bold());
        for status in statuses {
            println!("  {} ({})", status.kind, status.status.green());
        }

        Ok(())
    }
}
