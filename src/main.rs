//! shopfront - Product catalog browser
//!
//! Lists, searches and inspects catalog products and manages a local wish list.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use shopfront::commands::{
    CategoriesCommand, ListCommand, ListOptions, ProductCommand, ShareCommand, WishlistAction,
    WishlistCommand,
};
use shopfront::config::{Config, OutputFormat};
use shopfront::sort::{SortDirection, SortOrder};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "shopfront",
    version,
    about = "Product catalog browser",
    long_about = "Browse a product catalog with local sorting, filtering and pagination, and keep a wish list."
)]
struct Cli {
    /// Catalog base URL
    #[arg(long, global = true, env = "SHOPFRONT_BASE_URL")]
    base_url: Option<String>,

    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long, global = true, env = "SHOPFRONT_PROXY")]
    proxy: Option<String>,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Directory holding the wish list
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ListArgs {
    /// Local title filter (case-insensitive)
    #[arg(long)]
    filter: Option<String>,

    /// Sort key or preset (price, rating, title, priceDesc, ...)
    #[arg(long)]
    sort: Option<SortOrder>,

    /// Sort direction, overrides the preset's
    #[arg(long, requires = "sort")]
    order: Option<SortDirection>,

    /// Number of pages to show
    #[arg(long, default_value = "1")]
    pages: usize,

    /// Products per page
    #[arg(long)]
    page_size: Option<usize>,

    /// Minimum price filter
    #[arg(long)]
    min_price: Option<f64>,

    /// Maximum price filter
    #[arg(long)]
    max_price: Option<f64>,

    /// Minimum rating filter (0.0-5.0)
    #[arg(long)]
    min_rating: Option<f64>,

    /// Only show products in stock
    #[arg(long)]
    in_stock: bool,
}

impl ListArgs {
    fn apply(&self, config: &mut Config) {
        if let Some(page_size) = self.page_size.filter(|&n| n > 0) {
            config.page_size = page_size;
        }
        if self.min_price.is_some() {
            config.min_price = self.min_price;
        }
        if self.max_price.is_some() {
            config.max_price = self.max_price;
        }
        if self.min_rating.is_some() {
            config.min_rating = self.min_rating;
        }
        if self.in_stock {
            config.in_stock_only = true;
        }
    }

    fn options(&self, category: Option<String>, search: Option<String>) -> ListOptions {
        let sort = match (self.sort, self.order) {
            (Some(sort), Some(direction)) => Some(SortOrder::new(sort.key, direction)),
            (sort, _) => sort,
        };

        ListOptions { category, search, filter: self.filter.clone(), sort, pages: self.pages }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List products, optionally from one category
    #[command(alias = "ls")]
    List {
        /// Category slug
        #[arg(long)]
        category: Option<String>,

        /// Server-side search query
        #[arg(long)]
        search: Option<String>,

        #[command(flatten)]
        list: ListArgs,
    },

    /// Search the catalog
    #[command(alias = "s")]
    Search {
        /// Search query
        query: String,

        #[command(flatten)]
        list: ListArgs,
    },

    /// Show product details by id
    #[command(alias = "p")]
    Product {
        /// Product id(s) to look up
        #[arg(required = true)]
        ids: Vec<u64>,
    },

    /// List catalog categories
    Categories,

    /// Manage the wish list
    #[command(alias = "wl")]
    Wishlist {
        #[command(subcommand)]
        action: WishlistCommands,
    },

    /// Print share text and deep link for a product
    Share {
        /// Product id
        id: u64,
    },
}

#[derive(Subcommand)]
enum WishlistCommands {
    /// Show saved products
    List,
    /// Save a product
    Add { id: u64 },
    /// Remove a saved product
    Remove { id: u64 },
    /// Save or unsave a product
    Toggle { id: u64 },
    /// Remove every saved product
    Clear,
}

impl From<WishlistCommands> for WishlistAction {
    fn from(command: WishlistCommands) -> Self {
        match command {
            WishlistCommands::List => WishlistAction::List,
            WishlistCommands::Add { id } => WishlistAction::Add(id),
            WishlistCommands::Remove { id } => WishlistAction::Remove(id),
            WishlistCommands::Toggle { id } => WishlistAction::Toggle(id),
            WishlistCommands::Clear => WishlistAction::Clear,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }
    if let Some(format) = cli.format {
        config.format = format;
    }
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = Some(data_dir);
    }

    let output = match cli.command {
        Commands::List { category, search, list } => {
            list.apply(&mut config);
            let options = list.options(category, search);
            ListCommand::new(config).execute(&options).await?
        }

        Commands::Search { query, list } => {
            list.apply(&mut config);
            let options = list.options(None, Some(query));
            ListCommand::new(config).execute(&options).await?
        }

        Commands::Product { ids } => {
            let cmd = ProductCommand::new(config);

            if ids.len() == 1 {
                cmd.execute(ids[0]).await?
            } else {
                cmd.execute_batch(&ids).await?
            }
        }

        Commands::Categories => CategoriesCommand::new(config).execute().await?,

        Commands::Wishlist { action } => WishlistCommand::new(config).execute(action.into()).await?,

        Commands::Share { id } => ShareCommand::new(config).execute(id).await?,
    };

    println!("{}", output);

    Ok(())
}
