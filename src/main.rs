use anyhow::Result;
use std::io;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // ─── init logging ────────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .with_writer(io::stderr)
        .init();

    // ─── dispatch ────────────────────────────────────────────────────
    let args: Vec<String> = std::env::args().skip(1).collect();
    let stdout = io::stdout();
    tempscan::cli::run(&args, &mut stdout.lock())?;
    Ok(())
}
