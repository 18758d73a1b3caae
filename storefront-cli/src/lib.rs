//! Foodiful Storefront - Terminal client
//!
//! - Every invocation restores and validates the stored session first
//! - Command results go to stdout as JSON
//! - Toasts, alerts and navigation go to stderr

mod commands;
mod shell;
mod state;
#[cfg(test)]
mod test_server;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::process::ExitCode;
use std::sync::Arc;

use storefront_core::Config;

use commands::orders::OrderItem;
use shell::TerminalShell;
use state::AppState;

#[derive(Parser)]
#[command(name = "storefront")]
#[command(about = "Foodiful shop client: account, catalog, orders and class bookings")]
struct Cli {
    /// Backend REST API root
    #[arg(long, env = "STOREFRONT_API_URL")]
    api_url: Option<String>,

    /// Directory holding the client database
    #[arg(long, env = "STOREFRONT_DATA_DIR")]
    data_dir: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign in and store the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "STOREFRONT_PASSWORD")]
        password: String,
    },
    /// Create an account
    Signup {
        #[arg(long)]
        email: String,
        #[arg(long)]
        name: String,
        #[arg(long, env = "STOREFRONT_PASSWORD")]
        password: String,
        #[arg(long, default_value = "")]
        phone: String,
    },
    /// Sign out and drop the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// List products
    Products,
    /// Show one product
    Product { id: i64 },
    /// List classes
    Lectures,
    /// Show one class
    Lecture { id: i64 },
    /// List your orders
    Orders,
    /// Order products, e.g. `--item 3:2` for two of product 3
    Order {
        #[arg(long = "item", required = true, value_parser = commands::orders::parse_item)]
        items: Vec<OrderItem>,
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        address: String,
        #[arg(long)]
        message: Option<String>,
    },
    /// Cancel an order
    CancelOrder {
        id: i64,
        #[arg(long)]
        reason: String,
    },
    /// Booked class start times, optionally for one day
    ReservedTimes {
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Month view of the reservation calendar
    Calendar {
        /// Months to step forward from the current month
        #[arg(long, default_value_t = 0)]
        months: u32,
        /// Pick a day and show its booked times
        #[arg(long)]
        select: Option<NaiveDate>,
    },
}

pub async fn run() -> anyhow::Result<ExitCode> {
    storefront_core::init_logging();

    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    let host = Arc::new(TerminalShell::new());
    let state = AppState::new(config, host).context("failed to open the storefront")?;
    state.initialize().await;

    let success = dispatch(&state, cli.command).await?;

    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Flags win over the environment, which wins over defaults
fn resolve_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = Config::from_env()?;

    if let Some(dir) = &cli.data_dir {
        config.database_path = dir.join("storefront.db");
    }
    if let Some(url) = &cli.api_url {
        config.api_base_url = url.clone();
    }

    config.validate()?;
    Ok(config)
}

async fn dispatch(state: &AppState, command: Command) -> anyhow::Result<bool> {
    use commands::{auth, catalog, orders, reservations};

    match command {
        Command::Login { email, password } => auth::login(state, &email, &password).await.emit(),
        Command::Signup {
            email,
            name,
            password,
            phone,
        } => auth::signup(state, email, name, password, phone)
            .await
            .emit(),
        Command::Logout => auth::logout(state).await.emit(),
        Command::Whoami => auth::whoami(state).emit(),
        Command::Products => catalog::products(state).await.emit(),
        Command::Product { id } => catalog::product(state, id).await.emit(),
        Command::Lectures => catalog::lectures(state).await.emit(),
        Command::Lecture { id } => catalog::lecture(state, id).await.emit(),
        Command::Orders => orders::orders(state).await.emit(),
        Command::Order {
            items,
            name,
            phone,
            address,
            message,
        } => {
            let details = orders::OrderDetails {
                name,
                phone,
                address,
                request_message: message,
            };
            orders::place_order(state, details, &items).await.emit()
        }
        Command::CancelOrder { id, reason } => {
            orders::cancel_order(state, id, &reason).await.emit()
        }
        Command::ReservedTimes { date } => {
            reservations::reserved_times(state, date).await.emit()
        }
        Command::Calendar { months, select } => {
            reservations::calendar(state, months, select).await.emit()
        }
    }
}
