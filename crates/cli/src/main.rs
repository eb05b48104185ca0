//! `ShopEasy` CLI - drive the storefront from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Show the saved profile (starts a new one on first run)
//! shopeasy profile show
//!
//! # Edit and save the profile
//! shopeasy profile edit --first-name Jane --last-name Doe --email jane@example.com
//!
//! # Show the sample cart, adjusting quantities first
//! shopeasy cart --change 2:-1 --change 1:3
//!
//! # Play the home screen reveal, then list categories and products
//! shopeasy home
//! ```
//!
//! # Commands
//!
//! - `profile show` - Print the profile
//! - `profile edit` - Update profile fields and save
//! - `cart` - Print the cart with its totals
//! - `home` - Run the reveal and print the browse screen
//!
//! Invalid input exits with status 2, any other failure with status 1.
//!
//! Configuration comes from `SHOPEASY_*` environment variables, see
//! [`shopeasy_storefront::config`].

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use shopeasy_storefront::config::StorefrontConfig;
use shopeasy_storefront::error;
use shopeasy_storefront::navigation::{Navigator, Route};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::cart::QuantityDelta;

#[derive(Parser)]
#[command(name = "shopeasy")]
#[command(author, version, about = "ShopEasy storefront CLI")]
struct Cli {
    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// View or edit the user profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
    /// Show the cart
    Cart {
        /// Adjust a line's quantity before printing, as `ID:DELTA`
        #[arg(long = "change", value_name = "ID:DELTA")]
        changes: Vec<QuantityDelta>,
    },
    /// Play the intro reveal and show the browse screen
    Home,
}

impl Commands {
    const fn route(&self) -> Route {
        match self {
            Self::Profile { .. } => Route::Profile,
            Self::Cart { .. } => Route::Cart,
            Self::Home => Route::Home,
        }
    }
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Print the profile
    Show,
    /// Update fields and save
    Edit {
        /// First name
        #[arg(long)]
        first_name: Option<String>,

        /// Last name
        #[arg(long)]
        last_name: Option<String>,

        /// Email address
        #[arg(long)]
        email: Option<String>,

        /// Phone number
        #[arg(long)]
        phone: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load .env before the filter reads RUST_LOG
    let _ = dotenvy::dotenv();
    init_tracing(cli.json_logs);

    if let Err(e) = run(cli).await {
        if e.is_user_error() {
            tracing::warn!("{e}");
            std::process::exit(2);
        }
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

/// Defaults to info level for our crates if `RUST_LOG` is not set.
fn init_tracing(json: bool) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shopeasy_storefront=info,shopeasy_cli=info".into());

    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

async fn run(cli: Cli) -> error::Result<()> {
    let config = StorefrontConfig::from_env()?;

    // Cart and profile open on top of home
    let mut navigator = Navigator::new();
    navigator.navigate_to(cli.command.route());
    tracing::debug!(route = %navigator.current(), depth = navigator.depth(), "Screen opened");

    match cli.command {
        Commands::Profile { action } => match action {
            ProfileAction::Show => commands::profile::show(&config, &navigator).await?,
            ProfileAction::Edit {
                first_name,
                last_name,
                email,
                phone,
            } => {
                let edits = commands::profile::ProfileEdits {
                    first_name,
                    last_name,
                    email,
                    phone_number: phone,
                };
                commands::profile::edit(&config, &navigator, edits).await?;
            }
        },
        Commands::Cart { changes } => commands::cart::show(&changes, &mut navigator)?,
        Commands::Home => commands::home::run(&config, &navigator).await,
    }
    Ok(())
}
