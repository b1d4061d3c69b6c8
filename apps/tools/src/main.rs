use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use client_core::{
    load_settings, CatalogError, HttpCatalog, MovieCatalog, Settings, SettingsOverrides,
};
use shared::domain::{MovieResponse, UserProfile};
use storage::{Storage, UserStore, PROFILE_KEY};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "popular-tools", about = "Inspect the local profile and the movie catalog")]
struct Cli {
    #[arg(long)]
    database_url: Option<String>,
    #[arg(long)]
    data_dir: Option<PathBuf>,
    #[arg(long)]
    api_key: Option<String>,
    #[arg(long)]
    api_base_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(subcommand)]
    Profile(ProfileCommand),
    /// Fetch one page of popular movies
    Movies {
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        page: Option<u32>,
    },
}

#[derive(Subcommand, Debug)]
enum ProfileCommand {
    Show,
    Set {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        phone: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let page = match &cli.command {
        Command::Movies { page } => *page,
        Command::Profile(_) => None,
    };
    let settings = load_settings().apply(SettingsOverrides {
        api_key: cli.api_key,
        api_base_url: cli.api_base_url,
        database_url: cli.database_url,
        data_dir: cli.data_dir,
        page,
    });
    debug!(?settings, "resolved settings");

    match cli.command {
        Command::Profile(ProfileCommand::Show) => {
            let storage = Storage::new(&settings.resolved_database_url()?).await?;
            storage.health_check().await?;
            match storage.get_user().await? {
                Some(user) => {
                    print_profile(&user);
                    if let Some(at) = storage.last_updated(PROFILE_KEY).await? {
                        println!("saved:  {}", at.to_rfc3339());
                    }
                }
                None => {
                    print_profile(&UserProfile::placeholder());
                    println!("(placeholder; no profile saved yet)");
                }
            }
            storage.close().await;
        }
        Command::Profile(ProfileCommand::Set { name, email, phone }) => {
            let storage = Storage::new(&settings.resolved_database_url()?).await?;
            let user = UserProfile::singleton(name, email, phone);
            storage.insert_user(&user).await?;
            println!("saved profile id={}", user.id.0);
            storage.close().await;
        }
        Command::Movies { .. } => {
            let response = fetch_movies(&settings).await?;
            for movie in &response.results {
                println!("{}\t{}", movie.id.0, movie.title);
            }
            eprintln!("{} movies on page {}", response.results.len(), settings.page);
        }
    }

    Ok(())
}

/// Talks to the catalog only; the profile database is never opened.
async fn fetch_movies(settings: &Settings) -> Result<MovieResponse> {
    let api_key = settings
        .api_key
        .as_deref()
        .ok_or(CatalogError::MissingApiKey)?;
    let catalog = HttpCatalog::new(&settings.api_base_url)?;
    Ok(catalog.get_popular_movies(api_key, settings.page).await?)
}

fn print_profile(user: &UserProfile) {
    println!("name:   {}", user.name);
    println!("email:  {}", user.email);
    println!("phone:  {}", user.phone);
}
