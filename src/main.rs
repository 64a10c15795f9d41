use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use dtc_onboard::{
    cli::config_path_from_args,
    config::Config,
    dialog::{DialogEngine, Services},
    logging::init_tracing,
    protocol::{ClientMessage, parse_client_message},
};

#[tokio::main]
async fn main() -> Result<()> {
    let config_path = config_path_from_args()?;
    let config = Config::load(&config_path)
        .with_context(|| format!("failed to load config from {}", config_path.display()))?;
    let logging_guard = init_tracing(&config.logging)?;

    let engine = DialogEngine::new(config.dialog.clone(), Services::default());
    tracing::info!(
        target: "dialog",
        run_id = logging_guard.run_id(),
        terms_version = %config.dialog.terms_version,
        "driver_started"
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line.context("failed to read stdin")?,
            _ = tokio::signal::ctrl_c() => {
                eprintln!("received SIGINT; stopping");
                break;
            }
        };
        let Some(line) = line else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let output = match parse_client_message(&line) {
            Ok(ClientMessage::Exit) => break,
            Ok(ClientMessage::Message(input)) => {
                let response = engine.process_message(*input).await;
                serde_json::to_string(&response).context("failed to encode response")?
            }
            Err(err) => {
                tracing::warn!(target: "dialog", error = %err, "client_message_rejected");
                serde_json::json!({ "type": "error", "message": err.to_string() }).to_string()
            }
        };

        stdout.write_all(output.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
    }

    tracing::info!(target: "dialog", run_id = logging_guard.run_id(), "driver_stopped");
    Ok(())
}
