mod commands;
mod utils;

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sitestack")]
#[command(about = "静的サイトの配信基盤を、設定ファイルひとつで。", long_about = None)]
struct Cli {
    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// 対象環境の指定（全サブコマンド共通）
#[derive(Args, Debug, Clone)]
struct Target {
    /// 環境名 (dev, prod)
    environment: Option<String>,
    /// 環境名 (-e/--env フラグ、SITESTACK_ENV 環境変数)
    #[arg(short = 'e', long = "env", env = "SITESTACK_ENV", hide = true)]
    environment_flag: Option<String>,
    /// 設定ファイルを直接指定
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ManifestFormat {
    Json,
    Yaml,
}

#[derive(Subcommand)]
enum Commands {
    /// 設定を検証
    Validate {
        #[command(flatten)]
        target: Target,
    },
    /// スタックを合成してマニフェストを出力
    Synth {
        #[command(flatten)]
        target: Target,
        /// 出力形式
        #[arg(short, long, value_enum, default_value_t = ManifestFormat::Json)]
        format: ManifestFormat,
        /// 出力先ファイル（省略時は標準出力）
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// プロビジョニング手順を表示
    Plan {
        #[command(flatten)]
        target: Target,
    },
    /// スタック出力を表示
    Outputs {
        #[command(flatten)]
        target: Target,
    },
    /// ドライランで出力値をプレビュー
    Preview {
        #[command(flatten)]
        target: Target,
    },
    /// 設定ファイルを管理
    #[command(subcommand)]
    Config(ConfigCommands),
    /// バージョン情報を表示
    Version,
}

/// 設定ファイル管理のサブコマンド
#[derive(Subcommand)]
enum ConfigCommands {
    /// アカウント ID やドメイン設定を config/dev.json と config/prod.json に書き込む
    Update {
        /// AWS アカウント ID
        #[arg(long, env = "AWS_ACCOUNT_ID")]
        account_id: String,
        /// 開発環境のドメイン名
        #[arg(long)]
        dev_domain: Option<String>,
        /// 本番環境のドメイン名
        #[arg(long)]
        prod_domain: Option<String>,
        /// 開発環境のホストゾーン ID
        #[arg(long)]
        dev_hosted_zone_id: Option<String>,
        /// 開発環境のホストゾーン名
        #[arg(long)]
        dev_hosted_zone_name: Option<String>,
        /// 本番環境のホストゾーン ID
        #[arg(long)]
        prod_hosted_zone_id: Option<String>,
        /// 本番環境のホストゾーン名
        #[arg(long)]
        prod_hosted_zone_name: Option<String>,
        /// 開発環境の証明書 ARN
        #[arg(long)]
        dev_certificate: Option<String>,
        /// 本番環境の証明書 ARN
        #[arg(long)]
        prod_certificate: Option<String>,
        /// 設定ディレクトリ
        #[arg(long, default_value = "config")]
        dir: PathBuf,
    },
}

impl Target {
    /// 位置引数 → --env / SITESTACK_ENV の順で環境名を決定
    fn environment(&self) -> anyhow::Result<&str> {
        self.environment
            .as_deref()
            .or(self.environment_flag.as_deref())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "環境名を指定してください: sitestack <command> <env> または SITESTACK_ENV=<env>"
                )
            })
    }
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::filter::LevelFilter;

    let mut filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();
    if verbose {
        filter = filter.add_directive(tracing::Level::DEBUG.into());
    }

    // stdout はマニフェスト出力に使うので、ログは stderr へ
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Validate { target } => {
            commands::validate::handle(target.environment()?, target.config.as_deref())?;
        }
        Commands::Synth {
            target,
            format,
            out,
        } => {
            commands::synth::handle(
                target.environment()?,
                target.config.as_deref(),
                format,
                out.as_deref(),
            )?;
        }
        Commands::Plan { target } => {
            commands::plan::handle(target.environment()?, target.config.as_deref())?;
        }
        Commands::Outputs { target } => {
            commands::outputs::handle(target.environment()?, target.config.as_deref())?;
        }
        Commands::Preview { target } => {
            commands::preview::handle(target.environment()?, target.config.as_deref()).await?;
        }
        Commands::Config(ConfigCommands::Update {
            account_id,
            dev_domain,
            prod_domain,
            dev_hosted_zone_id,
            dev_hosted_zone_name,
            prod_hosted_zone_id,
            prod_hosted_zone_name,
            dev_certificate,
            prod_certificate,
            dir,
        }) => {
            let dev = commands::config::DomainSettings {
                domain: dev_domain,
                hosted_zone_id: dev_hosted_zone_id,
                hosted_zone_name: dev_hosted_zone_name,
                certificate_arn: dev_certificate,
            };
            let prod = commands::config::DomainSettings {
                domain: prod_domain,
                hosted_zone_id: prod_hosted_zone_id,
                hosted_zone_name: prod_hosted_zone_name,
                certificate_arn: prod_certificate,
            };
            commands::config::handle_update(&dir, account_id, dev, prod)?;
        }
        Commands::Version => {
            println!("sitestack {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
