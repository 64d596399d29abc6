use clap::Parser;
use log::{info, warn};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

use promptforge::core::config::{self, CliOverrides, PromptForgeConfig};
use promptforge::telemetry::{self, LAUNCH_EVENT};
use promptforge::tui;

#[derive(Parser)]
#[command(
    name = "promptforge",
    about = "Turn a one-line persona into a precise system prompt"
)]
struct Args {
    /// Gemini model to use (overrides config file and PROMPTFORGE_MODEL)
    #[arg(short, long)]
    model: Option<String>,

    /// Do not send the launch event
    #[arg(long)]
    no_telemetry: bool,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to promptforge.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("promptforge.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            warn!("Falling back to default config: {}", e);
            PromptForgeConfig::default()
        }
    };
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            model: args.model,
            no_telemetry: args.no_telemetry,
        },
    );

    info!(
        "PromptForge starting up with model: {} (api key {})",
        resolved.model_name,
        if resolved.api_key.is_some() { "set" } else { "missing" }
    );

    telemetry::from_config(&resolved).track(LAUNCH_EVENT);

    tui::run(resolved)
}
