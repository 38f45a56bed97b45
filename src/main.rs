use clap::Parser;
use floorkit::cli::{load_config, run, Cli};
use floorkit::init_logging;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_json)?;

    let config = load_config(&cli)?;
    let stdout = std::io::stdout();
    run(&cli, &config, &mut stdout.lock())
}
