//! # Depot Console Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          depot-console                                  │
//! │                                                                         │
//! │  main.rs ────► parse args, init tracing, run, print the screen         │
//! │                                                                         │
//! │  lib.rs ─────► load config, build AppContext, dispatch                 │
//! │                                                                         │
//! │  commands/ ──► list, add, edit, delete, login, reset-password, ...     │
//! │                                                                         │
//! │  stdout ◄──── rendered screen       stderr ◄──── tracing output        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::Write;

use anyhow::Context;
use clap::Parser;

use depot_console_lib::cli::Cli;
use depot_console_lib::{init_tracing, render, run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let screen = match run(cli).await {
        Ok(screen) => screen,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            anyhow::bail!(e.user_message());
        }
    };

    let mut stdout = std::io::stdout().lock();
    write!(stdout, "{}", render::screen(&screen)).context("Failed to write screen")?;
    stdout.flush().context("Failed to flush stdout")?;

    if screen.has_error() {
        std::process::exit(1);
    }
    Ok(())
}
