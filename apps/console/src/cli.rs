//! Command line definition.
//!
//! ```text
//! depot-console [--config FILE] [--api-url URL] [--json] <command>
//!
//!   login | register | forgot-password | reset-password | logout | home
//!   state     list | show | add | edit | delete
//!   city      list | show | add | edit | delete
//!   warehouse list | show | add | edit | delete | cities
//! ```
//!
//! New records always start Active, so `--status` exists only on `edit`.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use depot_core::{ListView, ResourceId, SortDirection, SortKey, Status};

use crate::commands::city::CityInput;
use crate::commands::list::ListOptions;
use crate::commands::state::StateInput;
use crate::commands::warehouse::WarehouseInput;

#[derive(Debug, Parser)]
#[command(name = "depot-console", about = "Admin console for States, Cities and Warehouses", version)]
pub struct Cli {
    /// Configuration file (defaults to the platform config dir)
    #[arg(long, global = true, env = "DEPOT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Catalog API origin, overriding the configuration
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[arg(
        long,
        global = true,
        action = ArgAction::SetTrue,
        help = "Print list rows as pretty JSON instead of a table"
    )]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and store the session token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Request a password reset email
    ForgotPassword {
        #[arg(long)]
        email: String,
    },
    /// Set a new password with the token from the reset email
    ResetPassword {
        #[arg(long)]
        token: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm: String,
    },
    /// Forget the stored session token
    Logout,
    /// Show the home page
    Home,
    #[command(subcommand)]
    State(StateCommand),
    #[command(subcommand)]
    City(CityCommand),
    #[command(subcommand)]
    Warehouse(WarehouseCommand),
}

// =============================================================================
// Shared Arguments
// =============================================================================

#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    /// Column to sort by (id, name, code, state, city, status)
    #[arg(long)]
    pub sort: Option<SortKey>,

    /// Sort descending
    #[arg(long, requires = "sort")]
    pub desc: bool,

    /// Case-insensitive substring filter
    #[arg(long, default_value = "")]
    pub search: String,
}

impl ListArgs {
    pub fn options(&self, json: bool) -> ListOptions {
        let mut view = ListView::new().searching(self.search.clone());
        if let Some(key) = self.sort {
            let direction = if self.desc {
                SortDirection::Descending
            } else {
                SortDirection::Ascending
            };
            view = view.sorted_by(key, direction);
        }
        ListOptions { view, json }
    }
}

#[derive(Debug, Clone, Args)]
pub struct IdArg {
    /// Record id (`_id`)
    pub id: String,
}

impl IdArg {
    pub fn id(&self) -> ResourceId {
        ResourceId::new(self.id.clone())
    }
}

// =============================================================================
// State
// =============================================================================

#[derive(Debug, Subcommand)]
pub enum StateCommand {
    List(ListArgs),
    Show(IdArg),
    Add(StateArgs),
    Edit {
        #[command(flatten)]
        target: IdArg,
        #[command(flatten)]
        fields: StateArgs,
        /// Active or Inactive
        #[arg(long)]
        status: Option<Status>,
    },
    Delete(IdArg),
}

#[derive(Debug, Clone, Args)]
pub struct StateArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub code: Option<String>,
}

impl StateArgs {
    pub fn input(&self, status: Option<Status>) -> StateInput {
        StateInput {
            name: self.name.clone(),
            code: self.code.clone(),
            status,
        }
    }
}

// =============================================================================
// City
// =============================================================================

#[derive(Debug, Subcommand)]
pub enum CityCommand {
    List(ListArgs),
    Show(IdArg),
    Add(CityArgs),
    Edit {
        #[command(flatten)]
        target: IdArg,
        #[command(flatten)]
        fields: CityArgs,
        /// Active or Inactive
        #[arg(long)]
        status: Option<Status>,
    },
    Delete(IdArg),
}

#[derive(Debug, Clone, Args)]
pub struct CityArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub code: Option<String>,
    /// Owning State id
    #[arg(long)]
    pub state: Option<String>,
}

impl CityArgs {
    pub fn input(&self, status: Option<Status>) -> CityInput {
        CityInput {
            name: self.name.clone(),
            code: self.code.clone(),
            state: self.state.clone().map(ResourceId::new),
            status,
        }
    }
}

// =============================================================================
// Warehouse
// =============================================================================

#[derive(Debug, Subcommand)]
pub enum WarehouseCommand {
    List(ListArgs),
    Show(IdArg),
    Add(WarehouseArgs),
    Edit {
        #[command(flatten)]
        target: IdArg,
        #[command(flatten)]
        fields: WarehouseArgs,
        /// Active or Inactive
        #[arg(long)]
        status: Option<Status>,
    },
    Delete(IdArg),
    /// List the Cities offered for a State
    Cities {
        #[arg(long)]
        state: String,
    },
}

#[derive(Debug, Clone, Args)]
pub struct WarehouseArgs {
    #[arg(long)]
    pub name: Option<String>,
    /// State id; changing it clears the City unless --city is given
    #[arg(long)]
    pub state: Option<String>,
    /// City id, one of the selected State's Cities
    #[arg(long)]
    pub city: Option<String>,
}

impl WarehouseArgs {
    pub fn input(&self, status: Option<Status>) -> WarehouseInput {
        WarehouseInput {
            name: self.name.clone(),
            state: self.state.clone().map(ResourceId::new),
            city: self.city.clone().map(ResourceId::new),
            status,
        }
    }
}
