//! domql - GraphQL binding for CSS-selector queries over HTML documents
//!
//! Usage:
//!   domql                          Serve GraphQL + GraphiQL on an ephemeral port
//!   domql --addr 127.0.0.1:8080    Serve on a fixed address
//!   domql --query '{ version }'    Run one query and print the JSON response
//!   domql --query-file q.graphql   Run a query read from a file (`-` = stdin)

mod server;

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;
use std::{fs, io};

use anyhow::{Context, Result};
use clap::Parser;
use domql_common::net::DEFAULT_USER_AGENT;
use domql_common::{FetchConfig, Fetcher, telemetry};
use domql_schema::{DomqlSchema, SchemaConfig, build_schema};
use owo_colors::OwoColorize;
use tokio::net::TcpListener;

/// Version reported by the `version` query field.
const VERSION: &str = concat!(env!("CARGO_PKG_NAME"), " ", env!("CARGO_PKG_VERSION"));

/// domql - query HTML documents with CSS selectors over GraphQL
#[derive(Parser, Debug)]
#[command(name = "domql")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Serve on a random port and open GraphiQL
    domql

    # Serve on a fixed port without opening a browser
    domql --addr 0.0.0.0:8080 --no-open

    # One-shot query
    domql --query '{ get(url: "https://example.com") { document { title } } }'

    # Query from stdin
    echo '{ version }' | domql --query-file -
"#)]
struct Cli {
    /// TCP address to listen on
    #[arg(long, env = "DOMQL_ADDR", default_value = "127.0.0.1:0")]
    addr: String,

    /// Timeout in seconds for fetching a document
    #[arg(long, env = "DOMQL_TIMEOUT", default_value_t = 30, value_name = "SECS")]
    timeout: u64,

    /// User-Agent header sent when fetching documents
    #[arg(long, env = "DOMQL_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    user_agent: String,

    /// Do not open GraphiQL in the default browser
    #[arg(long, env = "DOMQL_NO_OPEN")]
    no_open: bool,

    /// Run a single query, print the response and exit
    #[arg(short, long, value_name = "QUERY", conflicts_with = "query_file")]
    query: Option<String>,

    /// Run a single query read from FILE (`-` for stdin)
    #[arg(long, value_name = "FILE")]
    query_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    telemetry::init();

    let fetcher = Fetcher::new(&FetchConfig {
        timeout: Duration::from_secs(cli.timeout),
        user_agent: cli.user_agent.clone(),
    })
    .context("failed to create fetcher")?;

    if let Some(query) = read_query(&cli)? {
        let schema = build_schema(SchemaConfig {
            version: VERSION.to_string(),
            fetcher,
        });
        let succeeded = run_query(&schema, query).await?;
        return Ok(if succeeded {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    serve(&cli, fetcher).await?;
    Ok(ExitCode::SUCCESS)
}

/// The one-shot query from `--query` or `--query-file`, if any.
fn read_query(cli: &Cli) -> Result<Option<String>> {
    if let Some(query) = &cli.query {
        return Ok(Some(query.clone()));
    }
    cli.query_file.as_deref().map(read_query_file).transpose()
}

fn read_query_file(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut query = String::new();
        let _ = io::stdin()
            .read_to_string(&mut query)
            .context("failed to read query from stdin")?;
        Ok(query)
    } else {
        fs::read_to_string(path).with_context(|| format!("failed to read '{}'", path.display()))
    }
}

/// Execute one query and print the pretty JSON response to stdout.
///
/// Returns whether the response came back without errors.
async fn run_query(schema: &DomqlSchema, query: String) -> Result<bool> {
    let response = schema.execute(query).await;
    println!("{}", serde_json::to_string_pretty(&response)?);

    for error in &response.errors {
        eprintln!("{} {}", "error:".red().bold(), error.message);
    }
    Ok(response.errors.is_empty())
}

/// Start the HTTP server and block until Ctrl-C.
async fn serve(cli: &Cli, fetcher: Fetcher) -> Result<()> {
    tracing::info!("Starting domql service...");

    tracing::info!("create GraphQL schema instance");
    let schema = build_schema(SchemaConfig {
        version: VERSION.to_string(),
        fetcher,
    });

    tracing::info!("register GraphQL handler {}", server::GRAPHQL_PATH);
    let app = server::router(schema);

    tracing::info!("listen TCP on: {}", cli.addr);
    let listener = TcpListener::bind(&cli.addr)
        .await
        .with_context(|| format!("failed to listen on {}", cli.addr))?;

    let url = format!("http://{}", listener.local_addr()?);
    tracing::info!("Running on: {url}");
    eprintln!("{} {}", "domql running on".green().bold(), url.cyan());

    if !cli.no_open {
        open_browser(&url);
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")
}

fn open_browser(url: &str) {
    if let Err(e) = open::that_detached(url) {
        tracing::warn!(error = %e, "failed to open browser");
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for Ctrl-C");
        return;
    }
    tracing::info!("shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["domql"]).unwrap();
        assert_eq!(cli.addr, "127.0.0.1:0");
        assert_eq!(cli.timeout, 30);
        assert_eq!(cli.user_agent, DEFAULT_USER_AGENT);
        assert!(!cli.no_open);
        assert!(read_query(&cli).unwrap().is_none());
    }

    #[test]
    fn test_cli_query_conflicts_with_query_file() {
        let result = Cli::try_parse_from(["domql", "--query", "{ version }", "--query-file", "q"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_read_inline_query() {
        let cli = Cli::try_parse_from(["domql", "-q", "{ version }"]).unwrap();
        assert_eq!(read_query(&cli).unwrap().as_deref(), Some("{ version }"));
    }

    #[test]
    fn test_read_missing_query_file() {
        let cli = Cli::try_parse_from(["domql", "--query-file", "/nonexistent/q.graphql"]).unwrap();
        let err = read_query(&cli).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/q.graphql"));
    }

    #[tokio::test]
    async fn test_run_query_reports_errors() {
        let schema = build_schema(SchemaConfig {
            version: VERSION.to_string(),
            fetcher: Fetcher::new(&FetchConfig::default()).unwrap(),
        });
        assert!(run_query(&schema, "{ version }".to_string()).await.unwrap());
        assert!(!run_query(&schema, "{ nope }".to_string()).await.unwrap());
    }
}
