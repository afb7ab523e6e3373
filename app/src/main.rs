use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use common::collect::Layout;
use eyre::Result;
use tracing::error;
use tracing_subscriber::{
    EnvFilter,
    fmt::{layer, time::ChronoLocal},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

mod pipeline;

#[derive(Parser)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long)]
    log: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render 3DMark FPS box plots, one chart per test category
    Fps {
        /// Directory of per-persona result dirs
        #[arg(short, long, default_value = "results/3dmark_results")]
        results: PathBuf,
        #[arg(short, long, default_value = "images")]
        images: PathBuf,
    },
    /// Render power consumption box plots, one chart per test category
    Power {
        /// Directory of power reading files
        #[arg(short, long, default_value = "results/power_consumption")]
        results: PathBuf,
        #[arg(short, long, default_value = "images")]
        images: PathBuf,
    },
    /// List collected series grouped by test category, without rendering
    Ls {
        #[arg(value_enum, long)]
        layout: LayoutArg,
        #[arg(short, long)]
        results: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LayoutArg {
    Nested,
    Flat,
}

impl From<LayoutArg> for Layout {
    fn from(value: LayoutArg) -> Self {
        match value {
            LayoutArg::Nested => Layout::Nested,
            LayoutArg::Flat => Layout::Flat,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let log_level = std::env::var("RUST_LOG").unwrap_or("info".to_owned());
    let args = Cli::parse();
    let file_appender = tracing_appender::rolling::never(".", "log.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    let mut env_filter = EnvFilter::new(format!(
        "effectiveness_report={log_level},common={log_level}"
    ));
    for log in &args.log {
        env_filter = env_filter.add_directive(log.parse()?);
    }

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            layer()
                .with_timer(ChronoLocal::new("%v %k:%M:%S %z".to_owned()))
                .compact(),
        )
        .with(layer().with_writer(non_blocking))
        .init();

    match args.command {
        Commands::Fps { results, images } => {
            if let Err(err) =
                pipeline::run(Layout::Nested, &pipeline::FPS_PLOT, &results, &images).await
            {
                error!("{err:#?}");
                return Err(err);
            }
        }
        Commands::Power { results, images } => {
            if let Err(err) =
                pipeline::run(Layout::Flat, &pipeline::WATTS_PLOT, &results, &images).await
            {
                error!("{err:#?}");
                return Err(err);
            }
        }
        Commands::Ls { layout, results } => pipeline::list(layout.into(), &results).await?,
    };

    Ok(())
}
