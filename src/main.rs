//! CLI entry point for docsite

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "docsite")]
#[command(version)]
#[command(about = "Serve a folder of markdown pages with a shared sidebar", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the content and start the web server
    #[command(alias = "s")]
    Serve {
        /// Port to listen on (defaults to server.port in _config.yml)
        #[arg(short, long)]
        port: Option<u16>,

        /// IP address to bind to (defaults to server.ip in _config.yml)
        #[arg(short, long)]
        ip: Option<String>,
    },

    /// Load the content and report problems without serving
    Check,

    /// List pages or categories
    List {
        /// Type of content to list (page, category)
        #[arg(default_value = "page")]
        r#type: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Create a new content page
    New {
        /// Title of the new page
        title: String,

        /// URL slug (derived from the title by default)
        #[arg(short, long)]
        slug: Option<String>,

        /// Sidebar category
        #[arg(short, long)]
        parent: Option<String>,

        /// Sort rank within the sidebar
        #[arg(short, long)]
        order: Option<i64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "docsite=debug,info"
    } else {
        "docsite=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let site = docsite::Site::new(&base_dir)?;

    match cli.command {
        Commands::Serve { port, ip } => {
            let port = port.unwrap_or(site.config.server.port);
            let ip = ip.unwrap_or_else(|| site.config.server.ip.clone());

            tracing::info!("Loading content from {:?}", site.content_dir);
            docsite::server::start(&site, &ip, port).await?;
        }

        Commands::Check => {
            docsite::commands::check::run(&site)?;
            println!("Content OK");
        }

        Commands::List { r#type, json } => {
            docsite::commands::list::run(&site, &r#type, json)?;
        }

        Commands::New {
            title,
            slug,
            parent,
            order,
        } => {
            let path = docsite::commands::new::create_page(
                &site,
                &docsite::commands::new::NewPage {
                    title: &title,
                    slug: slug.as_deref(),
                    parent: parent.as_deref(),
                    order,
                },
            )?;
            println!("Created: {:?}", path);
        }
    }

    Ok(())
}
