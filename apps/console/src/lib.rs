//! # Depot Console Library
//!
//! Command flows of the Depot admin console. `main.rs` parses the command
//! line and hands it to [`run`]; everything else lives here so it can be
//! tested against a mock API.
//!
//! ## Module Organization
//! ```text
//! depot_console_lib/
//! ├── lib.rs          ◄─── You are here (startup & dispatch)
//! ├── cli.rs          ◄─── clap command line
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── context.rs  ◄─── AppContext (config, clients, stores)
//! │   └── store.rs    ◄─── ResourceStore<R>
//! ├── commands/
//! │   ├── mod.rs      ◄─── Screen + auth gate
//! │   ├── list.rs     ◄─── Table pages and delete
//! │   ├── form.rs     ◄─── Shared submit path
//! │   ├── state.rs    ◄─── State add/edit
//! │   ├── city.rs     ◄─── City add/edit
//! │   ├── warehouse.rs◄─── Warehouse add/edit, dependent select
//! │   └── auth.rs     ◄─── Login, register, reset, logout, home
//! ├── render.rs       ◄─── Layout, tables, forms as text
//! └── error.rs        ◄─── Console error type
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod render;
pub mod state;

use depot_client::DepotConfig;
use depot_core::{City, State, Warehouse};
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{CityCommand, Cli, Command, StateCommand, WarehouseCommand};
use commands::{auth, city, list, state as state_page, warehouse, Screen};
use error::ConsoleResult;
use state::{AppContext, CatalogResource};

/// Runs one command.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Load DepotConfig ── defaults ─► depot.toml ─► DEPOT_* env vars      │
/// │  2. Apply --api-url, then validate once                                 │
/// │  3. Build AppContext (token accessor, ApiClient, three stores)         │
/// │  4. Dispatch to a command flow                                          │
/// │  5. Return the Screen; main renders it                                  │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(cli: Cli) -> ConsoleResult<Screen> {
    let config = DepotConfig::load(cli.config.clone(), cli.api_url.as_deref())?;
    let ctx = AppContext::new(config)?;
    info!(base_url = %ctx.config().base_url(), "Running command");
    dispatch(&ctx, cli.command, cli.json).await
}

/// Routes a parsed command to its flow.
pub async fn dispatch(ctx: &AppContext, command: Command, json: bool) -> ConsoleResult<Screen> {
    match command {
        Command::Login { email, password } => auth::login(ctx, &email, &password).await,
        Command::Register { name, email, password } => auth::register(ctx, &name, &email, &password).await,
        Command::ForgotPassword { email } => auth::forgot_password(ctx, &email).await,
        Command::ResetPassword { token, password, confirm } => {
            auth::reset_password(ctx, &token, &password, &confirm).await
        }
        Command::Logout => auth::logout(ctx),
        Command::Home => auth::home(ctx),

        Command::State(StateCommand::List(args)) => list_page::<State>(ctx, &args.options(json)).await,
        Command::State(StateCommand::Show(target)) => list::record::<State>(ctx, &target.id()).await,
        Command::State(StateCommand::Add(fields)) => state_page::add(ctx, &fields.input(None)).await,
        Command::State(StateCommand::Edit { target, fields, status }) => {
            state_page::edit(ctx, &target.id(), &fields.input(status)).await
        }
        Command::State(StateCommand::Delete(target)) => {
            list::delete::<State>(ctx, &target.id(), &Default::default()).await
        }

        Command::City(CityCommand::List(args)) => list_page::<City>(ctx, &args.options(json)).await,
        Command::City(CityCommand::Show(target)) => list::record::<City>(ctx, &target.id()).await,
        Command::City(CityCommand::Add(fields)) => city::add(ctx, &fields.input(None)).await,
        Command::City(CityCommand::Edit { target, fields, status }) => {
            city::edit(ctx, &target.id(), &fields.input(status)).await
        }
        Command::City(CityCommand::Delete(target)) => {
            list::delete::<City>(ctx, &target.id(), &Default::default()).await
        }

        Command::Warehouse(WarehouseCommand::List(args)) => {
            list_page::<Warehouse>(ctx, &args.options(json)).await
        }
        Command::Warehouse(WarehouseCommand::Show(target)) => list::record::<Warehouse>(ctx, &target.id()).await,
        Command::Warehouse(WarehouseCommand::Add(fields)) => warehouse::add(ctx, &fields.input(None)).await,
        Command::Warehouse(WarehouseCommand::Edit { target, fields, status }) => {
            warehouse::edit(ctx, &target.id(), &fields.input(status)).await
        }
        Command::Warehouse(WarehouseCommand::Delete(target)) => {
            list::delete::<Warehouse>(ctx, &target.id(), &Default::default()).await
        }
        Command::Warehouse(WarehouseCommand::Cities { state }) => {
            warehouse::city_options(ctx, &state.into()).await
        }
    }
}

async fn list_page<R: CatalogResource>(ctx: &AppContext, options: &list::ListOptions) -> ConsoleResult<Screen> {
    if ctx.has_token() && !options.json {
        eprintln!("{}", render::loading_page(R::KIND));
    }
    list::show::<R>(ctx, options).await
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so stdout carries only the rendered screen.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=depot=trace` - Show trace for depot crates only
/// - Default: INFO, debug for depot crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,depot=debug,reqwest=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
