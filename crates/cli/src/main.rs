//! Cartlane CLI - storefront and product admin from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! cartlane products list --filter mug
//! cartlane products show 7
//!
//! # Work with the local cart
//! cartlane cart add 7 --quantity 2
//! cartlane cart show
//!
//! # Manage products
//! cartlane admin add --name Mug --brand Acme --description "Holds coffee" \
//!     --category Kitchen --price 12.50 --stock 10 --image mug.png
//! cartlane admin edit 7 --price 11.00 --image mug.png
//! ```
//!
//! # Commands
//!
//! - `products` - Browse and search the catalog
//! - `collections` - List collections
//! - `cart` - Show and change the local cart
//! - `admin` - Create, edit and delete products
//!
//! Results are printed to stdout as JSON.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use cartlane_storefront::StorefrontConfig;
use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "cartlane")]
#[command(author, version, about = "Cartlane storefront and product admin")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the catalog
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
    /// List collections
    Collections,
    /// Show and change the local cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Create, edit and delete products
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum ProductsAction {
    /// List catalog items
    List {
        /// Only items whose title or description contains this text
        #[arg(short, long)]
        filter: Option<String>,
    },
    /// Show one catalog item
    Show {
        /// Product handle
        handle: String,
    },
    /// Search the product API
    Search {
        /// Search keyword
        keyword: String,
    },
    /// Items related to a product
    Related {
        /// Product handle
        handle: String,

        /// Maximum number of items
        #[arg(short, long, default_value_t = cartlane_storefront::catalog::DEFAULT_RELATED_LIMIT)]
        limit: usize,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart
    Show,
    /// Add a product to the cart
    Add {
        /// Merchandise (variant) id
        merchandise_id: String,

        /// Units to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Set the quantity of a line; zero or less removes it
    Update {
        /// Line id
        line_id: String,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove lines
    Remove {
        /// Line ids
        #[arg(required = true)]
        line_ids: Vec<String>,
    },
}

/// Product fields shared by `admin add` and `admin edit`.
#[derive(clap::Args, Debug)]
struct ProductFields {
    /// Product name
    #[arg(long)]
    name: Option<String>,

    /// Brand
    #[arg(long)]
    brand: Option<String>,

    /// Description
    #[arg(long)]
    description: Option<String>,

    /// Category
    #[arg(long)]
    category: Option<String>,

    /// Unit price, e.g. 12.50
    #[arg(long)]
    price: Option<String>,

    /// Units in stock
    #[arg(long)]
    stock: Option<String>,

    /// Release date (YYYY-MM-DD, default today)
    #[arg(long)]
    release_date: Option<String>,

    /// Whether the product can be bought
    #[arg(long)]
    available: Option<bool>,
}

#[derive(Subcommand)]
enum AdminAction {
    /// List products as stored by the API
    List,
    /// Create a product
    Add {
        #[command(flatten)]
        fields: ProductFields,

        /// Product image (png, jpg, gif, webp or svg)
        #[arg(long)]
        image: PathBuf,
    },
    /// Edit a product; unspecified fields keep their current values
    Edit {
        /// Product id
        id: String,

        #[command(flatten)]
        fields: ProductFields,

        /// Replacement image; the product API requires one on every edit
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Delete a product
    Delete {
        /// Product id
        id: String,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load configuration from environment (needed for Sentry init)
    let config = StorefrontConfig::from_env();

    // Initialize Sentry (must be done before tracing subscriber)
    let sentry_guard = config.as_ref().ok().and_then(init_sentry);

    // Logs go to stderr so stdout stays machine-readable JSON
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "cartlane_storefront=info,cartlane_admin=info,cartlane_cli=info".into()
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let result = match config {
        Ok(config) => run(cli, config).await,
        Err(e) => Err(e.into()),
    };

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        // Flush Sentry before exiting
        drop(sentry_guard);
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: StorefrontConfig) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Products { action } => {
            let catalog = commands::products::catalog(&config)?;
            match action {
                ProductsAction::List { filter } => {
                    commands::products::list(&catalog, filter.as_deref()).await?;
                }
                ProductsAction::Show { handle } => {
                    commands::products::show(&catalog, &handle).await?;
                }
                ProductsAction::Search { keyword } => {
                    commands::products::search(&catalog, &keyword).await?;
                }
                ProductsAction::Related { handle, limit } => {
                    commands::products::related(&catalog, &handle, limit).await?;
                }
            }
        }
        Commands::Collections => {
            let catalog = commands::products::catalog(&config)?;
            commands::products::collections(&catalog).await?;
        }
        Commands::Cart { action } => {
            let carts = commands::cart::service(&config)?;
            match action {
                CartAction::Show => commands::cart::show(&carts).await?,
                CartAction::Add {
                    merchandise_id,
                    quantity,
                } => commands::cart::add(&carts, &merchandise_id, quantity).await?,
                CartAction::Update { line_id, quantity } => {
                    commands::cart::update(&carts, &line_id, quantity).await?;
                }
                CartAction::Remove { line_ids } => {
                    commands::cart::remove(&carts, &line_ids).await?;
                }
            }
        }
        Commands::Admin { action } => {
            let client = commands::admin::client()?;
            match action {
                AdminAction::List => commands::admin::list(&client).await?,
                AdminAction::Add { fields, image } => {
                    commands::admin::add(&client, fields.into(), &image).await?;
                }
                AdminAction::Edit { id, fields, image } => {
                    commands::admin::edit(&client, &id, fields.into(), image.as_deref()).await?;
                }
                AdminAction::Delete { id } => commands::admin::delete(&client, &id).await?,
            }
        }
    }
    Ok(())
}

impl From<ProductFields> for commands::admin::FieldOverrides {
    fn from(fields: ProductFields) -> Self {
        Self {
            name: fields.name,
            brand: fields.brand,
            description: fields.description,
            category: fields.category,
            price: fields.price,
            stock_quantity: fields.stock,
            release_date: fields.release_date,
            product_available: fields.available,
        }
    }
}
