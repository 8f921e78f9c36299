use crate::utils;
use colored::Colorize;
use std::path::Path;

pub fn handle(environment: &str, config: Option<&Path>) -> anyhow::Result<()> {
    let loaded = utils::load_stack(environment, config)?;
    let stack = &loaded.stack;

    println!("{} {}", "出力:".bold(), stack.name.cyan());
    for (name, output) in stack.outputs.iter() {
        println!("  {} = {}", name.cyan(), output.value);
        println!("    {}", output.description.dimmed());
    }
    Ok(())
}
