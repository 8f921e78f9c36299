use crate::utils;
use colored::Colorize;
use sitestack_cloud::{DryRunBackend, ProvisioningBackend};
use std::path::Path;

pub async fn handle(environment: &str, config: Option<&Path>) -> anyhow::Result<()> {
    let loaded = utils::load_stack(environment, config)?;
    let stack = &loaded.stack;
    let backend = DryRunBackend::new();

    println!(
        "{} {} ({})",
        "プレビュー:".bold(),
        stack.name.cyan(),
        backend.display_name()
    );

    let result = backend.apply(&stack.graph).await?;
    if !result.is_success() {
        for failure in &result.failed {
            eprintln!(
                "  {} {}: {}",
                "✗".red(),
                failure.action_id,
                failure.error.as_deref().unwrap_or_default()
            );
        }
        anyhow::bail!("{}個のアクションが失敗しました", result.failed.len());
    }

    let values = stack.outputs.resolve_all(&result.resolved)?;
    println!(
        "  {} ({}個のアクション)",
        "✓ 完了".green(),
        result.succeeded.len()
    );
    println!();
    for (name, value) in &values {
        println!("  {} = {}", name.cyan(), value);
    }
    Ok(())
}
