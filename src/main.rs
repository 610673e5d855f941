use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use api::api::start_server;
use repository::TodoRepository;
use store::{MemoryStore, MongoStore, TodoStore};

mod api;
mod config;
mod errors;
mod models;
mod repository;
mod store;

#[derive(Debug, Parser)]
#[clap(author, version, about, long_about = "Serve title-keyed todos over HTTP")]
struct TodoArgs {
    /// Address to listen on, overrides API_URL
    #[clap(short = 'b', long = "bind")]
    bind: Option<String>,

    /// Keep todos in process memory instead of MongoDB
    #[clap(long = "in-memory")]
    in_memory: bool,
}

async fn open_store(in_memory: bool) -> anyhow::Result<Arc<dyn TodoStore>> {
    if in_memory {
        log::warn!("Using in-memory store, todos are lost on exit");
        return Ok(Arc::new(MemoryStore::new()));
    }

    log::info!(
        "Using MongoDB collection {}.{}",
        *config::MONGO_DATABASE,
        *config::MONGO_COLLECTION
    );

    let store = MongoStore::connect(
        &config::MONGO_URL,
        &config::MONGO_DATABASE,
        &config::MONGO_COLLECTION,
    )
    .await
    .context("Failed to configure MongoDB client")?;

    Ok(Arc::new(store))
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("todo_service=info,actix_web=info"),
    )
    .init();

    let args = TodoArgs::parse();

    let store = open_store(args.in_memory).await?;
    let bind = args.bind.unwrap_or_else(|| config::API_URL.clone());

    start_server(&bind, TodoRepository::new(store), *config::WORKERS)
        .await
        .with_context(|| format!("Server on {} stopped with an error", bind))?;

    Ok(())
}
