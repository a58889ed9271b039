use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info};

use teletrans::cli::Args;
use teletrans::config::ConfigManager;
use teletrans::console::{ConsoleClient, ConsoleSession};
use teletrans::logging;
use teletrans::paths::Workspace;
use teletrans::policy::PolicyStore;
use teletrans::router::{EventRouter, RouterSettings};
use teletrans::translation::{ProviderGateway, Translator};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let workspace = match Workspace::resolve(args.workspace.as_deref()) {
        Ok(workspace) => workspace,
        Err(err) => {
            eprintln!("Error: {err:#}");
            return exit(exitcode::OSERR);
        }
    };
    let _guard = logging::init(&workspace);

    let manager = ConfigManager::new(&workspace);
    let config = match manager.load() {
        Ok(config) => config,
        Err(err) => {
            error!("{err:#}");
            return exit(exitcode::CONFIG);
        }
    };
    info!(
        workspace = %workspace.root().display(),
        policies = config.target_config.len(),
        augmented = config.openai.enable,
        "Starting"
    );

    let gateway = ProviderGateway::new(&config.deeplx, &config.openai);
    let translator = Translator::new(gateway, config.openai.enable);
    let settings = RouterSettings::from(&config);
    let store = PolicyStore::persistent(manager, config);
    let router = EventRouter::new(store, translator, ConsoleClient::new(), settings);

    match ConsoleSession::new(router).run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            exit(exitcode::SOFTWARE)
        }
    }
}

fn exit(code: exitcode::ExitCode) -> ExitCode {
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}
