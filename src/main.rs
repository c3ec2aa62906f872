use clap::Parser;
use qrgen::handler;
use qrgen::QrError;
use tracing_subscriber::EnvFilter;

mod args;
use args::Cli;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<(), QrError> {
    let request = cli.to_request();
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    handler::run(&request, stdin.lock(), stdout.lock())?;
    Ok(())
}
