use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use anyhow::Result;
use axum::{
    extract::{Extension, Request},
    middleware::{self, Next},
    response::{Html, Response},
    routing::{get, post},
    Router,
};
use clap::Parser;
use pagetrace::{
    browser_timing_footer_label, browser_timing_header_label, Agent, CycleHandle,
    ListenerInvocation, PageClass, PagetraceConfig, PagetraceRouter, RequestTarget,
    RuntimeException, Session, SessionIdentity, TracingAgent,
};
use tracing::Level;
use tracing_subscriber::{filter::Targets, fmt, layer::SubscriberExt, util::SubscriberInitExt};

mod pages {
    pub struct Home;
    pub struct Orders;
}

#[derive(Debug, clap::Parser)]
#[command(name = "demo")]
#[command(about = "Serve a few pages named and timed by pagetrace.", long_about = None)]
struct Cli {
    /// The web server listening port.
    #[arg(short, default_value_t = 3000)]
    port: u16,
    /// TOML configuration; the demo's own pages are used when absent.
    #[arg(short)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            Targets::new()
                .with_target("pagetrace", Level::DEBUG)
                .with_target("pagetrace_agent", Level::DEBUG)
                .with_target("demo", Level::DEBUG),
        )
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => PagetraceConfig::parse_from_toml(path)?,
        None => format!("package_prefix = \"{}\"", module_path!()).parse::<PagetraceConfig>()?,
    };
    let agent: Arc<dyn Agent> = Arc::new(TracingAgent::new(config.agent.clone()));

    let app = Router::new()
        .route("/", get(home))
        .route("/orders", get(orders))
        .route("/orders/export", post(export))
        .with_pagetrace(config.request_cycle_factory(agent))
        .layer(middleware::from_fn(demo_session));

    let addr = SocketAddr::from(([127, 0, 0, 1], cli.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Web server listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

// Every visitor is signed in as the same demo user.
async fn demo_session(mut request: Request, next: Next) -> Response {
    request
        .extensions_mut()
        .insert(Session::identified(SessionIdentity::new("demo", "acme")));
    next.run(request).await
}

fn render(agent: &Arc<dyn Agent>, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\">{}<title>pagetrace</title></head><body>{}{}</body></html>",
        browser_timing_header_label(agent),
        body,
        browser_timing_footer_label(agent),
    ))
}

async fn home(
    Extension(cycle): Extension<CycleHandle>,
    Extension(agent): Extension<Arc<dyn Agent>>,
) -> Html<String> {
    cycle.set_target(RequestTarget::bookmarkable_page(PageClass::of::<pages::Home>()));
    render(&agent, "<a href=\"/orders\">Orders</a>")
}

async fn orders(
    Extension(cycle): Extension<CycleHandle>,
    Extension(agent): Extension<Arc<dyn Agent>>,
) -> Html<String> {
    cycle.set_target(RequestTarget::page(PageClass::of::<pages::Orders>()));
    render(
        &agent,
        "<form method=\"post\" action=\"/orders/export\"><button id=\"export\">Export</button></form>",
    )
}

async fn export(Extension(cycle): Extension<CycleHandle>) -> Result<Html<String>, RuntimeException> {
    cycle.set_target(RequestTarget::listener(
        PageClass::of::<pages::Orders>(),
        ListenerInvocation::new("export", "IFormSubmitListener"),
    ));
    Err(anyhow::anyhow!("export backend unavailable").into())
}
