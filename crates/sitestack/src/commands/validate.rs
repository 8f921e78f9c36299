use crate::utils;
use colored::Colorize;
use std::path::Path;

pub fn handle(environment: &str, config: Option<&Path>) -> anyhow::Result<()> {
    println!("{}", "設定を検証中...".blue());

    let loaded = match utils::load_stack(environment, config) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!();
            eprintln!("{}", "✗ 設定エラー".red().bold());
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    };
    let stack = &loaded.stack;
    let site = &stack.config;

    println!(
        "設定ファイル: {}",
        loaded.path.display().to_string().cyan()
    );
    println!("{}", "✓ 設定は正常です！".green().bold());
    println!();
    println!("サマリー:");
    println!("  スタック: {}", stack.name.cyan());
    println!("  環境: {}", site.environment);
    println!("  リージョン: {}", site.region);
    println!("  アカウント: {}", site.account);
    println!("  バケット: {}", site.bucket_name());
    println!("  価格クラス: {}", site.price_class);
    match &site.custom_domain {
        Some(domain) => println!(
            "  カスタムドメイン: {} (zone: {})",
            domain.domain.cyan(),
            domain.hosted_zone_name
        ),
        None => println!("  カスタムドメイン: (なし)"),
    }
    let firewall = if stack.policies.firewall.is_some() {
        "有効".green()
    } else {
        "無効".dimmed()
    };
    println!("  WAF: {}", firewall);
    println!("  リソース: {}個", stack.graph.len());
    for resource in stack.graph.iter() {
        println!("    - {} ({})", resource.id.as_str().cyan(), resource.kind);
    }

    utils::print_notices(&stack.notices);
    Ok(())
}
