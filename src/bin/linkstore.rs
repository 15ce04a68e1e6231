//! linkstore CLI: create-or-replace linked-data resources.
//!
//! Usage:
//!   linkstore put <path> [--file F] [--content-type T] [--link L] [--acl] [--db path]
//!   linkstore audit <path> [--db path]
//!   linkstore init-config

use bytes::Bytes;
use clap::{Parser, Subcommand};
use linkstore::{
    Config, Digest, EntityTagList, FileBinaryService, Iri, LdpRequest, Link, OpenStore, PutHandler,
    ResourceService, ServiceBundle, Session, SqliteResourceService,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "linkstore",
    version,
    about = "Linked-data resource store"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Path to YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Path to SQLite database file
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    /// Public base URL
    #[arg(long, global = true)]
    base_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or replace a resource
    Put {
        /// Resource path relative to the base URL
        path: String,
        /// Read the entity from this file instead of stdin
        #[arg(long)]
        file: Option<PathBuf>,
        /// Media type of the entity
        #[arg(long)]
        content_type: Option<String>,
        /// Link header, e.g. '<http://www.w3.org/ns/ldp#BasicContainer>; rel="type"'
        #[arg(long)]
        link: Option<String>,
        /// Digest header, e.g. 'sha-256=...'
        #[arg(long)]
        digest: Option<String>,
        /// If-Match header
        #[arg(long)]
        if_match: Option<String>,
        /// If-None-Match header
        #[arg(long)]
        if_none_match: Option<String>,
        /// Write the access-control graph
        #[arg(long)]
        acl: bool,
        /// Agent IRI recorded in the audit history
        #[arg(long)]
        agent: Option<String>,
    },
    /// Print a resource's audit history as N-Quads
    Audit {
        /// Resource path relative to the base URL
        path: String,
    },
    /// Print the default configuration
    InitConfig,
}

struct PutArgs {
    path: String,
    file: Option<PathBuf>,
    content_type: Option<String>,
    link: Option<String>,
    digest: Option<String>,
    if_match: Option<String>,
    if_none_match: Option<String>,
    acl: bool,
    agent: Option<String>,
}

fn load_config(cli: &Cli) -> Result<Config, String> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path).map_err(|e| e.to_string())?,
        None => Config::default(),
    };
    if let Some(db) = &cli.db {
        config = config.with_database(db);
    }
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url);
    }
    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

fn open_store(config: &Config) -> Result<SqliteResourceService, String> {
    SqliteResourceService::open(&config.database)
        .map(|store| store.with_interaction_models(config.interaction_models.clone()))
        .map_err(|e| format!("Failed to open database: {}", e))
}

fn read_entity(file: Option<&Path>) -> Result<Bytes, String> {
    match file {
        Some(path) => std::fs::read(path)
            .map(Bytes::from)
            .map_err(|e| format!("cannot read '{}': {}", path.display(), e)),
        None => {
            let mut buf = Vec::new();
            std::io::Read::read_to_end(&mut std::io::stdin(), &mut buf)
                .map_err(|e| format!("cannot read stdin: {}", e))?;
            Ok(Bytes::from(buf))
        }
    }
}

fn build_request(config: &Config, args: &PutArgs, body: Bytes) -> Result<LdpRequest, String> {
    let mut request = LdpRequest::new(&config.base_url, &args.path).with_body(body);
    if let Some(content_type) = &args.content_type {
        request = request.with_content_type(content_type);
    }
    if let Some(link) = &args.link {
        request = request.with_link(link.parse::<Link>()?);
    }
    if let Some(digest) = &args.digest {
        request = request.with_digest(digest.parse::<Digest>()?);
    }
    if let Some(tags) = &args.if_match {
        request = request.with_if_match(tags.parse::<EntityTagList>()?);
    }
    if let Some(tags) = &args.if_none_match {
        request = request.with_if_none_match(tags.parse::<EntityTagList>()?);
    }
    if args.acl {
        request = request.with_ext(linkstore::http::ACL_EXTENSION);
    }
    Ok(request)
}

async fn cmd_put(config: &Config, args: PutArgs) -> i32 {
    let store = match open_store(config) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    let body = match read_entity(args.file.as_deref()) {
        Ok(body) => body,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    let request = match build_request(config, &args, body) {
        Ok(request) => request,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    let agent = args.agent.as_deref().unwrap_or(&config.agent);
    let services = ServiceBundle::new(
        Arc::new(store),
        Arc::new(FileBinaryService::new(&config.binary_dir)),
    );
    let response = PutHandler::new(services)
        .handle(request, Session::new(Iri::new(agent)))
        .await;

    print!("{}", response);
    if response.status.is_success() {
        0
    } else {
        1
    }
}

async fn cmd_audit(config: &Config, path: &str) -> i32 {
    let store = match open_store(config) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    let identifier = linkstore::internal_identifier(path);
    match store.audit(&identifier).await {
        Ok(quads) if quads.is_empty() => {
            eprintln!("No audit history for '{}'", path);
            1
        }
        Ok(quads) => {
            for quad in quads {
                println!("{}", quad);
            }
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_init_config() -> i32 {
    match Config::default().to_yaml() {
        Ok(yaml) => {
            print!("{}", yaml);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("linkstore=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Commands::InitConfig = cli.command {
        std::process::exit(cmd_init_config());
    }

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let code = match cli.command {
        Commands::Put {
            path,
            file,
            content_type,
            link,
            digest,
            if_match,
            if_none_match,
            acl,
            agent,
        } => {
            let args = PutArgs {
                path,
                file,
                content_type,
                link,
                digest,
                if_match,
                if_none_match,
                acl,
                agent,
            };
            cmd_put(&config, args).await
        }
        Commands::Audit { path } => cmd_audit(&config, &path).await,
        Commands::InitConfig => cmd_init_config(),
    };
    std::process::exit(code);
}
