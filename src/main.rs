use clap::Parser;
use log::{error, info};
use sessiongate::configuration::config::{CliArgs, Config};
use sessiongate::controller::controller_handler::Controller;
use sessiongate::error_handling::types::ControllerError;

#[tokio::main]
async fn main() {
    // RUST_LOG, when set, overrides the default level
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .parse_default_env()
        .init();

    info!(
        "sessiongate v{} starting (LOGIN / ACTION / LOGOUT on POST /endpoint)",
        env!("CARGO_PKG_VERSION")
    );

    let args = CliArgs::parse();

    if let Err(e) = run(&args).await {
        error!("{}, exiting...", e);
        std::process::exit(1);
    }
}

async fn run(args: &CliArgs) -> Result<(), ControllerError> {
    info!("Importing configuration");
    let config = Config::from_args(args)?;
    info!("Configuration imported successfully");

    let controller = Controller::new(config);
    info!("Spawning the controller");
    controller.run().await
}
