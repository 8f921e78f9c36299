use colored::Colorize;
use sitestack_config::{ConfigUpdate, load_document, update_config_file};
use std::path::Path;

/// 環境ごとに書き込むドメイン関連の値
#[derive(Debug, Default)]
pub struct DomainSettings {
    pub domain: Option<String>,
    pub hosted_zone_id: Option<String>,
    pub hosted_zone_name: Option<String>,
    pub certificate_arn: Option<String>,
}

/// ドメインを書き込むとき、ホストゾーンがフラグにもファイルにも無ければエラー
fn check_hosted_zone(
    environment: &str,
    path: &Path,
    settings: &DomainSettings,
) -> anyhow::Result<()> {
    if settings.domain.is_none() {
        return Ok(());
    }
    let document = load_document(path)?;
    let present = |flag: &Option<String>, key: &str| {
        flag.is_some() || document.get(key).and_then(|v| v.as_str()).is_some()
    };

    let mut missing = Vec::new();
    if !present(&settings.hosted_zone_id, "hostedZoneId") {
        missing.push(format!("--{environment}-hosted-zone-id"));
    }
    if !present(&settings.hosted_zone_name, "hostedZoneName") {
        missing.push(format!("--{environment}-hosted-zone-name"));
    }
    if !missing.is_empty() {
        anyhow::bail!(
            "{} にドメインを設定するには {} も指定してください",
            path.display(),
            missing.join(" と ")
        );
    }
    Ok(())
}

/// config/dev.json と config/prod.json を更新する
///
/// 存在しないファイルはスキップする。
pub fn handle_update(
    dir: &Path,
    account_id: String,
    dev: DomainSettings,
    prod: DomainSettings,
) -> anyhow::Result<()> {
    println!("AWS アカウント ID: {}", account_id.cyan());

    let mut targets = Vec::new();
    for (environment, settings) in [("dev", dev), ("prod", prod)] {
        let path = dir.join(format!("{environment}.json"));
        if !path.is_file() {
            println!(
                "  {} {} が見つかりません（スキップ）",
                "-".dimmed(),
                path.display()
            );
            continue;
        }
        check_hosted_zone(environment, &path, &settings)?;
        targets.push((path, settings));
    }

    if targets.is_empty() {
        anyhow::bail!(
            "{} に dev.json / prod.json がありません",
            dir.display()
        );
    }

    for (path, settings) in targets {
        let update = ConfigUpdate {
            account: Some(account_id.clone()),
            domain: settings.domain,
            hosted_zone_id: settings.hosted_zone_id,
            hosted_zone_name: settings.hosted_zone_name,
            certificate_arn: settings.certificate_arn,
        };
        if update_config_file(&path, &update)? {
            println!("  {} {}", "✓ 更新しました:".green(), path.display());
        } else {
            println!("  {} {}", "変更なし:".dimmed(), path.display());
        }
    }

    println!();
    println!("{}", "次のステップ:".bold());
    println!("  1. config/ ディレクトリの設定ファイルを確認");
    println!("  2. 必要に応じてドメイン名・ホストゾーン・証明書 ARN を更新");
    println!("  3. {} で検証", "sitestack validate dev".cyan());
    Ok(())
}
