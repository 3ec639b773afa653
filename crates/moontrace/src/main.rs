use std::io;
use std::sync::Arc;

use clap::Parser;
use moontrace::app::App;
use moontrace::config::{AppConfig, Cli};
use moontrace::infra::ascii::{BANNER_HEIGHT, BANNER_WIDTH, image_file_to_ascii};
use moontrace::infra::assistant::{AssistantRunner, ScriptBackend};
use moontrace::logging;

#[tokio::main]
async fn main() -> io::Result<()> {
    let cli = Cli::parse();
    let config =
        AppConfig::load(cli).map_err(|error| io::Error::other(format!("Error: {error}")))?;
    logging::init_file_logging(&config.log_path).map_err(|error| {
        io::Error::other(format!(
            "Error: failed to open log file `{}`: {error}",
            config.log_path.display()
        ))
    })?;

    run(config).await.inspect_err(|error| {
        tracing::error!(%error, "terminal session failed");
    })
}

async fn run(config: AppConfig) -> io::Result<()> {
    tracing::info!(
        start_dir = %config.start_dir.display(),
        script = %config.script_path.display(),
        interpreter = %config.interpreter,
        "starting moontrace"
    );

    let banner = config.banner_image.as_deref().and_then(|path| {
        image_file_to_ascii(path, BANNER_WIDTH, BANNER_HEIGHT)
            .inspect_err(|error| {
                tracing::warn!(path = %path.display(), %error, "banner unavailable");
            })
            .ok()
    });
    let backend = ScriptBackend::new(config.interpreter, config.script_path);
    let runner = AssistantRunner::new(Arc::new(backend));
    let mut app = App::new(&config.start_dir, runner, banner);

    moontrace::runtime::run(&mut app).await
}
