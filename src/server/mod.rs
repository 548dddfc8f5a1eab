//! HTTP server for the loaded site
//!
//! Content is loaded and rendered once before the listener binds. Handlers
//! share that snapshot read-only through an `Arc`; nothing mutates it while
//! serving.

use anyhow::Result;
use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use percent_encoding::percent_decode_str;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::SiteConfig;
use crate::content::ContentPage;
use crate::templates::{
    HeadData, NavigationData, NotFoundContext, PageContext, SiteData, TemplateRenderer,
};
use crate::{Site, SiteContent};

/// Server state
struct ServerState {
    content: SiteContent,
    /// Slug to index into `content.pages`
    routes: HashMap<String, usize>,
    /// Index of the home page in `content.pages`
    index: Option<usize>,
    renderer: TemplateRenderer,
    config: SiteConfig,
    site: SiteData,
    navigation: NavigationData,
}

impl ServerState {
    fn new(site: &Site, content: SiteContent) -> Result<Self> {
        let renderer = match &site.template_dir {
            Some(dir) => TemplateRenderer::with_overrides(dir)?,
            None => TemplateRenderer::new()?,
        };

        let routes = build_routes(&content.pages);
        let index = content
            .pages
            .iter()
            .position(|p| p.source == site.config.index_file);
        if index.is_none() {
            tracing::warn!(
                "No index page '{}' found, `/` will return 404",
                site.config.index_file
            );
        }

        Ok(Self {
            routes,
            index,
            renderer,
            config: site.config.clone(),
            site: SiteData::from_config(&site.config),
            navigation: NavigationData::from(&content.navigation),
            content,
        })
    }

    fn page(&self, slug: &str) -> Option<&ContentPage> {
        self.routes.get(slug).map(|&i| &self.content.pages[i])
    }
}

/// Map each non-empty slug to its page; the first page with a slug wins
fn build_routes(pages: &[ContentPage]) -> HashMap<String, usize> {
    let mut routes = HashMap::new();

    for (i, page) in pages.iter().enumerate() {
        if page.slug().is_empty() {
            continue;
        }
        if let Some(&existing) = routes.get(page.slug()) {
            let first: &ContentPage = &pages[existing];
            tracing::warn!(
                "Slug '{}' of {} is already used by {}, ignoring it",
                page.slug(),
                page.source,
                first.source
            );
            continue;
        }
        routes.insert(page.slug().to_string(), i);
        tracing::debug!("Route /{} -> {}", page.slug(), page.source);
    }

    routes
}

/// Build the router for a loaded site
pub fn router(site: &Site, content: SiteContent) -> Result<Router> {
    let state = Arc::new(ServerState::new(site, content)?);

    let app = Router::new()
        .route("/", get(index_handler))
        .nest_service("/static", ServeDir::new(&site.static_dir))
        .fallback(page_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(app)
}

/// Load the site and serve it until Ctrl+C
pub async fn start(site: &Site, ip: &str, port: u16) -> Result<()> {
    let content = site.load()?;
    let app = router(site, content)?;

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

/// Home page
async fn index_handler(State(state): State<Arc<ServerState>>) -> Response {
    match state.index.map(|i| &state.content.pages[i]) {
        Some(page) => render_page(&state, "index.html", page),
        None => not_found(&state),
    }
}

/// Every other path: a page slug, or 404
async fn page_handler(State(state): State<Arc<ServerState>>, request: Request<Body>) -> Response {
    let path = request.uri().path();
    let slug = percent_decode_str(path.trim_start_matches('/')).decode_utf8_lossy();

    match state.page(&slug) {
        Some(page) => render_page(&state, "layout.html", page),
        None => not_found(&state),
    }
}

fn render_page(state: &ServerState, template: &str, page: &ContentPage) -> Response {
    let context = PageContext::new(&state.site, &state.navigation, page, &state.config);

    match state.renderer.render(template, &context) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Failed to render {} for '{}': {:#}", template, page.source, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": "Internal Server Error" })),
            )
                .into_response()
        }
    }
}

fn not_found(state: &ServerState) -> Response {
    let context = NotFoundContext {
        site: &state.site,
        head: HeadData::titled("Page Not Found", &state.config),
        navigation: &state.navigation,
        current_slug: "",
    };

    match state.renderer.render("404.html", &context) {
        Ok(html) => (StatusCode::NOT_FOUND, Html(html)).into_response(),
        Err(e) => {
            tracing::error!("Failed to render 404.html: {:#}", e);
            (StatusCode::NOT_FOUND, "Not found").into_response()
        }
    }
}
