use anyhow::Result;
use dotenv::dotenv;
use subtrack_settings::AppSettings;
use tracing::warn;
use tracing_subscriber::{
    EnvFilter,
    filter::{LevelFilter, Targets},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

mod app;
mod command;
mod push;
mod render;

fn main() -> Result<()> {
    dotenv().ok();
    init_tracing()?;

    let settings = AppSettings::load_from_default_path_creating().unwrap_or_else(|err| {
        warn!("Falling back to default settings: {}", err);
        AppSettings::default()
    });

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(async move { app::App::new(&settings)?.run().await })
}

/// Logs go to stderr so they never interleave with the prompt. `RUST_LOG`
/// replaces the built-in targets when set.
fn init_tracing() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().ok();
    let targets = env_filter.is_none().then(|| {
        Targets::new()
            .with_default(LevelFilter::WARN)
            .with_target("subtrack_", LevelFilter::DEBUG)
    });

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .with(targets)
        .try_init()?;
    Ok(())
}
