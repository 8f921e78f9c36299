use crate::{ManifestFormat, utils};
use colored::Colorize;
use std::path::Path;

pub fn handle(
    environment: &str,
    config: Option<&Path>,
    format: ManifestFormat,
    out: Option<&Path>,
) -> anyhow::Result<()> {
    let loaded = utils::load_stack(environment, config)?;
    let manifest = loaded.stack.manifest();

    let content = match format {
        ManifestFormat::Json => manifest.to_json()?,
        ManifestFormat::Yaml => serde_yaml::to_string(&manifest)?,
    };

    match out {
        Some(path) => {
            std::fs::write(path, &content)?;
            eprintln!(
                "{} {} ({}個のリソース)",
                "✓ マニフェストを書き出しました:".green(),
                path.display().to_string().cyan(),
                manifest.resources.len()
            );
        }
        None => println!("{}", content),
    }

    utils::print_notices(&loaded.stack.notices);
    Ok(())
}
