use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn print_usage(program: &str) {
    eprintln!("trackswap - Keep tags when swapping in a replacement audio file\n");
    eprintln!("USAGE:");
    eprintln!(
        "    {}                      Launch the three-step update wizard",
        program
    );
    eprintln!(
        "    {} --help               Show this help message",
        program
    );
    eprintln!("\nThe wizard walks through selecting the original file, selecting");
    eprintln!("or downloading the update file, and applying the metadata transfer.");
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "--help" | "-h" => {
                print_usage(&args[0]);
                return Ok(());
            }
            other => {
                eprintln!("Unknown argument: {}\n", other);
                print_usage(&args[0]);
                std::process::exit(1);
            }
        }
    }

    // Initialize file-based logging so nothing interferes with the TUI
    let log_dir = trackswap::paths::get_log_dir()?;
    let file_appender = tracing_appender::rolling::never(&log_dir, "trackswap.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trackswap=debug,reqwest=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false),
        )
        .init();

    tracing::info!("Starting trackswap wizard");

    let mut app = trackswap::wizard::App::new();
    app.run().await
}
