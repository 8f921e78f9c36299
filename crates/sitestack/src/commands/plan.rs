use crate::utils;
use colored::Colorize;
use sitestack_cloud::{ActionType, Plan};
use std::path::Path;

pub fn handle(environment: &str, config: Option<&Path>) -> anyhow::Result<()> {
    let loaded = utils::load_stack(environment, config)?;
    let stack = &loaded.stack;
    let plan = Plan::from_graph(&stack.graph);

    println!("{} {}", "プラン:".bold(), stack.name.cyan());
    println!();
    for action in &plan.actions {
        let marker = match action.action_type {
            ActionType::Create => "+".green(),
            ActionType::Sync => "↑".blue(),
            ActionType::Invalidate => "↻".yellow(),
        };
        println!(
            "  {} {:<10} {:<16} {}",
            marker,
            action.action_type.to_string(),
            action.resource_type.to_string(),
            action.resource_id.as_str().cyan()
        );
    }
    println!();
    println!("{}", plan.summary().to_string().bold());

    utils::print_notices(&stack.notices);
    Ok(())
}
