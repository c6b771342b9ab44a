use clap::Parser;
use gcodelens::cli::{run, Cli};
use gcodelens::{init_logging, AnalyzerConfig, BUILD_DATE, VERSION};
use tracing::debug;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AnalyzerConfig::load_or_default(cli.config.as_deref())?;

    let level = cli.log_level.as_deref().unwrap_or(&config.logging.level);
    init_logging(level, config.logging.json)?;
    debug!("gcodelens {} (built {})", VERSION, BUILD_DATE);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(&cli, &config, &mut out)
}
