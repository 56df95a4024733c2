use eyre::{Context, Result};
use portfolio::cli::{Action, Command, SubmitArgs};
use portfolio::client::{SubmissionCapture, SubmissionClient};
use portfolio::config::{Configuration, StorageConfig, init_logger, resolve_path, verbose};
use portfolio::content::new_content;
use portfolio::server::{self, AppState};
use portfolio::storage::new_storage;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> Result<()> {
    let cmd = Command::new();
    if cmd.version() {
        cmd.print_version();
        return Ok(());
    }

    std::panic::set_hook(Box::new(|panic_info| {
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));

    let config = cmd.get_config()?;
    init_logger(&config.log)?;
    Configuration::init(config.clone())?;
    verbose!("Logger initialized");

    match cmd.action() {
        Action::Serve { listen } => serve(config, listen).await,
        Action::Submit(args) => submit(config, args).await,
    }
}

async fn serve(mut config: Configuration, listen: Option<String>) -> Result<()> {
    if let Some(listen) = listen {
        config.server.listen = listen;
    }

    match &mut config.storage {
        StorageConfig::Sqlite(sqlite) => {
            sqlite.path = resolve_path(&sqlite.path)
                .wrap_err(format!("resolving database path {}", sqlite.path))?;
        }
    }

    verbose!("Initializing storage...");
    let storage = new_storage(&config.storage)
        .await
        .wrap_err("initializing storage")?;
    verbose!("Storage initialized");

    let content_path = match config.content.path.as_deref() {
        Some(path) => Some(resolve_path(path).wrap_err(format!("resolving {}", path))?),
        None => None,
    };
    let content = new_content(content_path.as_deref()).wrap_err("loading content")?;
    verbose!("Loaded {} articles", content.list().len());

    let token = CancellationToken::new();
    let shutdown = token.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                log::info!("Shutdown signal received");
                shutdown.cancel();
            }
            Err(err) => log::error!("Failed to listen for shutdown signal: {}", err),
        }
    });

    let state = AppState::new(storage, content, config.messages.clone());
    verbose!("Serving on {}", config.server.listen);
    server::serve(&config.server, state, token).await
}

async fn submit(config: Configuration, args: SubmitArgs) -> Result<()> {
    let mut client_config = config.client.clone();
    if let Some(endpoint) = args.endpoint.as_deref() {
        client_config.endpoint = endpoint.to_string();
    }

    let capture = SubmissionCapture::new(SubmissionClient::from(&client_config), &config.messages);
    let mut form = args.form();
    let notice = capture.submit(&mut form).await;
    println!("[{}] {}", notice.kind().css_class(), notice.message());

    if notice.is_error() {
        eyre::bail!("contact form was not saved");
    }
    Ok(())
}
