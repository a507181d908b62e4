use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::{bail, Context, Result};
use board::{
    backend_bridge::{commands::BoardCommand, runtime::launch},
    config::{load_settings, normalize_server_url},
    controller::{orchestration::dispatch_board_command, BoardContext, UiEvent},
    dialogs::TerminalDialogs,
};
use clap::{Parser, Subcommand};
use client_core::HttpActivitiesClient;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

const EVENT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Parser, Debug)]
#[command(name = "board", about = "Extracurricular activity signup board")]
struct Cli {
    /// Base URL of the activities service; overrides board.toml and env.
    #[arg(long)]
    server_url: Option<String>,
    /// Settings file to load instead of ./board.toml.
    #[arg(long)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the activity list.
    Show {
        /// Print a plain-text view instead of the page markup.
        #[arg(long)]
        text: bool,
    },
    /// Submit the signup form.
    Signup {
        #[arg(long)]
        email: String,
        #[arg(long)]
        activity: String,
    },
    /// Activate a participant's unregister control.
    Unregister {
        #[arg(long)]
        email: String,
        #[arg(long)]
        activity: String,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut settings = load_settings(cli.config.as_deref())?;
    if let Some(server_url) = cli.server_url.as_deref() {
        settings.server_url = normalize_server_url(server_url);
    }
    tracing::info!(server_url = %settings.server_url, "starting board");

    let auto_confirm = matches!(cli.command, Command::Unregister { yes: true, .. });
    let client = HttpActivitiesClient::new(&settings.server_url)
        .with_context(|| format!("invalid server url '{}'", settings.server_url))?;
    let ctx = BoardContext::new(Arc::new(client), Arc::new(TerminalDialogs::new(auto_confirm)))
        .with_status_hide_after(settings.status_hide_after);

    let (cmd_tx, cmd_rx) = mpsc::channel::<BoardCommand>(32);
    let (ui_tx, mut ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let runtime = launch(ctx.clone(), cmd_rx, ui_tx);

    dispatch_board_command(&cmd_tx, BoardCommand::Load)?;
    let loaded = next_event(&mut ui_rx).await?;
    if loaded.is_failure() && !matches!(cli.command, Command::Show { .. }) {
        bail!(loaded.summary());
    }

    let outcome = match cli.command {
        Command::Show { text } => {
            let page = ctx.snapshot().await;
            if text {
                println!("{}", page.to_text());
            } else {
                println!("{}", page.to_html()?);
            }
            loaded
        }
        Command::Signup { email, activity } => {
            {
                let mut page = ctx.page().lock().await;
                page.signup_form.email = email;
                if !page.signup_form.activity.select(&activity) {
                    bail!("no activity named '{activity}' is offered");
                }
            }
            dispatch_board_command(&cmd_tx, BoardCommand::SubmitForm)?;
            let outcome = next_event(&mut ui_rx).await?;
            println!("{}", ctx.snapshot().await.to_text());
            outcome
        }
        Command::Unregister {
            email, activity, ..
        } => {
            dispatch_board_command(
                &cmd_tx,
                BoardCommand::Unregister {
                    activity: activity.into(),
                    email: email.into(),
                },
            )?;
            let outcome = next_event(&mut ui_rx).await?;
            println!("{}", ctx.snapshot().await.to_text());
            outcome
        }
    };

    drop(cmd_tx);
    runtime.await.context("board runtime panicked")?;

    if outcome.is_failure() {
        bail!(outcome.summary());
    }
    Ok(())
}

async fn next_event(ui_rx: &mut mpsc::UnboundedReceiver<UiEvent>) -> Result<UiEvent> {
    let event = tokio::time::timeout(EVENT_TIMEOUT, ui_rx.recv())
        .await
        .context("timed out waiting for the board")?
        .context("board runtime stopped")?;
    tracing::debug!(event = %event.summary(), "board event");
    Ok(event)
}
