use chapter_console::configuration::Settings;
use chapter_console::models::Cli;
use chapter_console::run::run;
use env_logger::{Builder, Env, Target};
use log::error;
use resolve_path::PathResolveExt;
use std::process;

#[tokio::main]
async fn main() {
    // Init logging
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
    builder.target(Target::Stdout);
    builder.init();

    // Parse Args
    let cli = Cli::new();

    // Parse Settings
    let config_path = cli.config_file.resolve().into_owned();
    let settings = match Settings::new(&config_path.to_string_lossy()) {
        Ok(s) => s,
        Err(e) => {
            error!("Configuration error: {}", e);
            process::exit(1);
        }
    };

    // Run
    if let Err(e) = run(cli, settings).await {
        error!("Application error: {:#}", e);
        process::exit(1);
    }
}
