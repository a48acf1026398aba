use anyhow::Result;
use clap::{Args, Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "rbar")]
#[command(about = "Drink kiosk order composer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute layered config hash + print canonical JSON
    ConfigHash {
        /// Paths in merge order (base -> site -> local...)
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Logo gallery utilities
    Catalog {
        #[command(subcommand)]
        cmd: CatalogCmd,
    },

    /// Interactive kiosk session on stdin/stdout
    Kiosk {
        /// Layered config paths in merge order
        #[arg(long = "config", required = true)]
        config_paths: Vec<String>,
    },

    /// Compose and submit a single order, then exit
    Order(OrderArgs),
}

#[derive(Subcommand)]
enum CatalogCmd {
    /// Print every gallery reference, one per line
    List {
        #[arg(long = "config", required = true)]
        config_paths: Vec<String>,
    },
}

#[derive(Args)]
#[command(group(clap::ArgGroup::new("logo").args(["gallery", "pick", "drop"])))]
pub struct OrderArgs {
    #[arg(long = "config", required = true)]
    pub config_paths: Vec<String>,

    /// Drink number (1-5) or label ("Drink 3")
    #[arg(long)]
    pub drink: Option<String>,

    /// Gallery reference, e.g. /gallery/owl.svg
    #[arg(long)]
    pub gallery: Option<String>,

    /// Local file, taken as-is (file picker)
    #[arg(long)]
    pub pick: Option<String>,

    /// Local file, accepted only if it is an SVG (drop zone)
    #[arg(long)]
    pub drop: Option<String>,

    /// Name printed on the cup
    #[arg(long, default_value = "")]
    pub text: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env.local if present (dev convenience). Silent if missing.
    let _ = dotenvy::from_filename(".env.local");

    init_tracing();

    let cli = Cli::parse();

    match cli.cmd {
        Commands::ConfigHash { paths } => {
            let path_refs: Vec<&str> = paths.iter().map(|s| s.as_str()).collect();
            let loaded = rbar_config::load_layered_yaml(&path_refs)?;
            println!("config_hash={}", loaded.config_hash);
            println!("{}", loaded.canonical_json);
        }

        Commands::Catalog { cmd } => match cmd {
            CatalogCmd::List { config_paths } => {
                let settings = commands::load_settings(&config_paths)?;
                commands::catalog_list(&settings).await?;
            }
        },

        Commands::Kiosk { config_paths } => {
            let settings = commands::load_settings(&config_paths)?;
            commands::kiosk::run(&settings).await?;
        }

        Commands::Order(args) => {
            let settings = commands::load_settings(&args.config_paths)?;
            commands::order::run(&settings, args).await?;
        }
    }

    Ok(())
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}
