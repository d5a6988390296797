use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use posnet::application::engine::PosnetEngine;
use posnet::domain::ports::CardStoreBox;
use posnet::infrastructure::in_memory::InMemoryCardStore;
use posnet::interfaces::csv::operation_reader::{Command as ReplayCommand, OperationReader};
use posnet::interfaces::csv::ticket_writer::TicketWriter;
use posnet::interfaces::http;
use std::fs::File;
use std::io::{self, IsTerminal};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::future::Future;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the terminal over HTTP
    Serve {
        /// Address to listen on
        #[arg(long, env = "POSNET_ADDR", default_value = "127.0.0.1:8080")]
        addr: SocketAddr,
    },
    /// Replay register/payment operations from a CSV file and print the tickets
    Replay {
        /// Input operations CSV file
        input: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();

    let cli = Cli::parse();

    let store: CardStoreBox = Box::new(InMemoryCardStore::new());
    let engine = PosnetEngine::new(store);

    match cli.command {
        Command::Serve { addr } => serve(engine, addr).await,
        Command::Replay { input } => replay(engine, input).await,
    }
}

async fn serve(engine: PosnetEngine, addr: SocketAddr) -> Result<()> {
    let app = http::router(Arc::new(engine));

    let listener = tokio::net::TcpListener::bind(addr).await.into_diagnostic()?;
    info!(%addr, "posnet listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown(tokio::signal::ctrl_c()))
        .await
        .into_diagnostic()
}

/// Resolves once `signal` fires. If the signal handler could not be
/// installed, the server keeps running instead of stopping right away.
async fn wait_for_shutdown(signal: impl Future<Output = io::Result<()>>) {
    match signal.await {
        Ok(()) => info!("shutting down"),
        Err(e) => {
            error!("failed to listen for shutdown signal: {e}");
            std::future::pending::<()>().await;
        }
    }
}

async fn replay(engine: PosnetEngine, input: PathBuf) -> Result<()> {
    let file = File::open(input).into_diagnostic()?;
    let reader = OperationReader::new(file);

    let stdout = io::stdout();
    let mut writer = TicketWriter::new(stdout.lock());

    for (row, op_result) in reader.operations().enumerate() {
        let row = row + 1;
        let command = match op_result.and_then(|op| op.into_command()) {
            Ok(command) => command,
            Err(e) => {
                warn!(row, "Error reading operation: {e}");
                continue;
            }
        };

        match command {
            ReplayCommand::Register(card) => {
                if let Err(e) = engine.register_card(card).await {
                    warn!(row, "Error processing operation: {e}");
                }
            }
            ReplayCommand::Payment {
                number,
                amount,
                installments,
            } => match engine.do_payment(&number, amount, installments).await {
                Ok(ticket) => writer.write_ticket(&number, &ticket).into_diagnostic()?,
                Err(e) => warn!(row, "Error processing operation: {e}"),
            },
        }
    }

    writer.flush().into_diagnostic()?;
    Ok(())
}
