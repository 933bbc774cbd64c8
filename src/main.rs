use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use annuaire_search_widget::config::{
    DEFAULT_DEBOUNCE, DEFAULT_ENDPOINT, DEFAULT_FETCH_TIMEOUT, DEFAULT_INPUT_ID,
};
use annuaire_search_widget::render::{TerminalRenderer, format_page_summary, format_result_line};
use annuaire_search_widget::widget::{DomEvent, InputElement, Page, Rect};
use annuaire_search_widget::{
    FixtureRegistry, RemoteRegistry, SearchBackend, SearchWidget, WidgetConfig,
};

/// Search the French business registry as you type
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Registry search endpoint
    #[arg(long, env = "ANNUAIRE_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Request timeout in milliseconds
    #[arg(long, env = "ANNUAIRE_TIMEOUT_MS", default_value_t = DEFAULT_FETCH_TIMEOUT.as_millis() as u64)]
    timeout_ms: u64,

    /// Quiet period before typing triggers a search, in milliseconds
    #[arg(long, env = "ANNUAIRE_DEBOUNCE_MS", default_value_t = DEFAULT_DEBOUNCE.as_millis() as u64)]
    debounce_ms: u64,

    /// Id of the input the widget binds to
    #[arg(long, env = "ANNUAIRE_INPUT_ID", default_value = DEFAULT_INPUT_ID)]
    input_id: String,

    /// Serve the bundled sample data instead of querying the endpoint
    #[arg(long)]
    fixture: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a single query and print the results
    Search {
        /// Free-text query (name, address, SIREN...)
        query: String,
    },
    /// Drive the dropdown from stdin: each line is typed into the input,
    /// `:pick N` selects result N, `:focus`/`:blur` move focus, `:quit` exits
    Interactive,
}

impl Args {
    fn widget_config(&self) -> WidgetConfig {
        WidgetConfig::default()
            .with_input_id(self.input_id.clone())
            .with_endpoint(self.endpoint.clone())
            .with_debounce(Duration::from_millis(self.debounce_ms))
            .with_fetch_timeout(Duration::from_millis(self.timeout_ms))
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Results go to stdout, logs to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let config = args.widget_config();
    let backend = build_backend(&config, args.fixture)?;

    match args.command {
        Commands::Search { query } => run_search(backend.as_ref(), &query).await,
        Commands::Interactive => run_interactive(backend, &config).await,
    }
}

fn build_backend(config: &WidgetConfig, fixture: bool) -> Result<Arc<dyn SearchBackend>> {
    if fixture {
        tracing::info!("Using bundled sample data");
        let registry = FixtureRegistry::ganymede()
            .context("Failed to load bundled sample data")?
            .with_latency(config.fixture_latency);
        return Ok(Arc::new(registry));
    }

    tracing::info!("Using registry endpoint {}", config.endpoint);
    let registry = RemoteRegistry::new(config.endpoint.clone(), config.fetch_timeout)
        .context("Failed to create registry client")?;
    Ok(Arc::new(registry))
}

async fn run_search(backend: &dyn SearchBackend, query: &str) -> Result<()> {
    let page = backend
        .search(query)
        .await
        .with_context(|| format!("Search for '{query}' failed"))?;

    for result in &page.unite_legale {
        println!("{}", format_result_line(result));
    }
    println!("{}", format_page_summary(&page));
    Ok(())
}

async fn run_interactive(backend: Arc<dyn SearchBackend>, config: &WidgetConfig) -> Result<()> {
    let page = Page::new().with_input(InputElement::new(
        config.input_id.clone(),
        Rect::new(0.0, 0.0, 480.0, 32.0),
    ));

    let mut widget = SearchWidget::attach(&page, backend, config)?;
    widget.set_renderer(Arc::new(TerminalRenderer::new())).await;
    widget.init().await;
    widget.dispatch(DomEvent::Focus).await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        match line.trim() {
            ":quit" | ":q" => break,
            ":focus" => {
                widget.dispatch(DomEvent::Focus).await;
            }
            ":blur" => {
                widget.dispatch(DomEvent::Blur).await;
            }
            cmd if cmd.starts_with(":pick") => {
                let Some(index) = cmd
                    .trim_start_matches(":pick")
                    .trim()
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                else {
                    eprintln!("usage: :pick N (1-based)");
                    continue;
                };
                let outcome = widget.dispatch(DomEvent::MouseDown(index)).await;
                if !outcome.default_prevented {
                    eprintln!("no result #{}", index + 1);
                    continue;
                }
                widget.dispatch(DomEvent::Click(index)).await;
                let view = widget.snapshot().await;
                println!("Selected SIREN {}", view.input.value);
            }
            _ => {
                widget.type_text(line.as_str()).await;
            }
        }
    }

    Ok(())
}
