use std::{net::SocketAddr, path::PathBuf};

use anyhow::Context;
use remarque_mock_server::{app, load_seed, MockServer};
use tower_http::cors::CorsLayer;

#[derive(structopt::StructOpt)]
struct Opt {
    /// Address to listen on
    #[structopt(long, default_value = "127.0.0.1:3000")]
    addr: SocketAddr,

    /// JSON array of comments to start with, as output by generate-test-data
    #[structopt(long, parse(from_os_str))]
    seed: Option<PathBuf>,

    /// Answer edits and deletes without applying them
    #[structopt(long)]
    ignore_mutations: bool,

    /// Refuse every store insert with this message
    #[structopt(long)]
    refuse_inserts: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let opt = <Opt as structopt::StructOpt>::from_args();

    let comments = match &opt.seed {
        None => Vec::new(),
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("reading seed file {:?}", path))?;
            load_seed(&contents).with_context(|| format!("loading seed file {:?}", path))?
        }
    };
    tracing::info!(comments = comments.len(), "seeded mock server");

    let mut server = MockServer::with_comments(comments);
    server.ignore_mutations = opt.ignore_mutations;
    server.refuse_inserts = opt.refuse_inserts;
    let app = app(server.shared()).layer(CorsLayer::permissive());

    tracing::info!("listening on {}", opt.addr);
    axum::Server::bind(&opt.addr)
        .serve(app.into_make_service())
        .await
        .context("serving axum webserver")
}
