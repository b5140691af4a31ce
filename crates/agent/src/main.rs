//! Service agent harness
//!
//! Prints the agent definition as one JSON line, then reads tool calls
//! (`{"function": ..., "argument": {...}}`) from stdin, one per line, and
//! writes one response envelope per line. All calls share one session.
//! Logs go to stderr.

use std::io::{self, Write};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use service_agent_agent::{run, ServiceAgent};
use service_agent_config::{constants::sources, load_settings, Settings};

fn main() -> anyhow::Result<()> {
    // Priority: env vars > config/{env} > config/default > defaults
    let env = std::env::var(sources::ENV_SELECTOR).ok();
    let settings = match load_settings(env.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            // Tracing not yet initialized
            eprintln!("Warning: Failed to load config: {}. Using defaults.", e);
            Settings::default()
        }
    };

    init_tracing(&settings);

    tracing::info!("Starting service agent v{}", env!("CARGO_PKG_VERSION"));

    let agent = ServiceAgent::new(&settings)?;
    let mut session = agent.start_session();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", agent.definition())?;
    out.flush()?;

    let answered = run(&mut session, io::stdin().lock(), &mut out)?;

    tracing::info!(
        requests = answered,
        calls = session.history().len(),
        "Session ended"
    );
    Ok(())
}

fn init_tracing(config: &Settings) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = &config.observability.log_level;
        format!("service_agent={}", level).into()
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);
    let fmt_layer = if config.observability.log_json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .boxed()
    };
    subscriber.with(fmt_layer).init();
}
