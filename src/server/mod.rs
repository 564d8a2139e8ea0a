//! Site server
//!
//! One fallback handler dispatches every request: the path decides the page
//! kind, the page kind decides which loader runs. Anything outside the known
//! pages is a plain 404 and never touches the data source.

use anyhow::Result;
use axum::{
    extract::{Query, State},
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    Router,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;

use crate::config::SiteConfig;
use crate::pages::{self, PageKind};
use crate::source::PostSource;
use crate::Site;

/// Server state shared by every request
pub struct ServerState {
    config: SiteConfig,
    source: PostSource,
}

impl ServerState {
    /// Build the state from a site configuration
    pub fn new(config: SiteConfig) -> Result<Self> {
        let source = PostSource::new(&config.api_url, Duration::from_secs(config.timeout_secs))?;
        Ok(Self { config, source })
    }
}

/// Query parameters of the detail page
#[derive(Debug, Default, Deserialize)]
struct DetailParams {
    id: Option<String>,
}

/// Start the site server
pub async fn start(site: &Site, ip: &str, port: u16, open: bool) -> Result<()> {
    let state = Arc::new(ServerState::new(site.config.clone())?);
    let app = router(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}", ip, port);
    println!("Server running at {}", url);
    println!("Press Ctrl+C to stop.");

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the page router
pub fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .fallback(page_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Dispatch a request to the loader for its page kind
///
/// A malformed query string counts the same as an absent `id` parameter.
async fn page_handler(
    State(state): State<Arc<ServerState>>,
    uri: Uri,
    params: Option<Query<DetailParams>>,
) -> Response {
    let Some(kind) = PageKind::detect(uri.path()) else {
        return (StatusCode::NOT_FOUND, "Not found").into_response();
    };

    match kind {
        PageKind::Listing(authorship) => {
            let html = pages::load_listing(&state.config, &state.source, authorship).await;
            Html(html).into_response()
        }
        PageKind::Detail => {
            let id = params.and_then(|Query(p)| p.id);
            let html = pages::load_detail(&state.config, &state.source, id.as_deref()).await;
            Html(html).into_response()
        }
    }
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use axum::routing::get;
    use axum::Json;
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tower::ServiceExt;

    /// In-process stand-in for the spreadsheet API, counting every hit
    struct StubUpstream {
        base_url: String,
        hits: Arc<AtomicUsize>,
    }

    #[derive(Clone)]
    struct StubState {
        rows: Arc<Vec<Value>>,
        hits: Arc<AtomicUsize>,
        status: StatusCode,
    }

    async fn stub_all(State(state): State<StubState>) -> Response {
        state.hits.fetch_add(1, Ordering::SeqCst);
        if state.status != StatusCode::OK {
            return state.status.into_response();
        }
        Json(state.rows.as_ref().clone()).into_response()
    }

    async fn stub_search(
        State(state): State<StubState>,
        Query(params): Query<HashMap<String, String>>,
    ) -> Response {
        state.hits.fetch_add(1, Ordering::SeqCst);
        if state.status != StatusCode::OK {
            return state.status.into_response();
        }
        let id = json!(params.get("id").cloned().unwrap_or_default());
        let matches: Vec<Value> = state
            .rows
            .iter()
            .filter(|row| row["id"] == id)
            .cloned()
            .collect();
        Json(matches).into_response()
    }

    async fn spawn_upstream(rows: Vec<Value>, status: StatusCode) -> StubUpstream {
        let hits = Arc::new(AtomicUsize::new(0));
        let state = StubState {
            rows: Arc::new(rows),
            hits: hits.clone(),
            status,
        };
        let app = Router::new()
            .route("/", get(stub_all))
            .route("/search", get(stub_search))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        StubUpstream {
            base_url: format!("http://{}", addr),
            hits,
        }
    }

    fn site_router(api_url: &str) -> Router {
        let config = SiteConfig {
            api_url: api_url.to_string(),
            ..SiteConfig::default()
        };
        router(Arc::new(ServerState::new(config).unwrap()))
    }

    async fn get_page(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn sample_rows() -> Vec<Value> {
        vec![
            json!({
                "id": "1",
                "titulo": "O Processo",
                "imagem": "https://example.com/processo.jpg",
                "categoria": "Clássico",
                "autoria": "principal",
                "conteudo_completo": "**Intro**\nLine one\n\nLine two"
            }),
            json!({
                "id": "2",
                "titulo": "A Hora da Estrela",
                "imagem": "https://example.com/estrela.jpg",
                "categoria": "Romance",
                "autoria": "participante",
                "conteudo_completo": ""
            }),
        ]
    }

    #[tokio::test]
    async fn test_index_lists_only_principal_posts() {
        let upstream = spawn_upstream(sample_rows(), StatusCode::OK).await;
        let (status, body) = get_page(site_router(&upstream.base_url), "/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("O Processo"));
        assert!(!body.contains("A Hora da Estrela"));
        assert_eq!(upstream.hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_participantes_page_renders_one_card() {
        let upstream = spawn_upstream(sample_rows(), StatusCode::OK).await;
        let (status, body) =
            get_page(site_router(&upstream.base_url), "/participantes.html").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("A Hora da Estrela"));
        assert!(body.contains("post-participante"));
        assert!(!body.contains("O Processo"));
    }

    #[tokio::test]
    async fn test_empty_listing_shows_empty_state() {
        let rows = vec![json!({"id": "1", "titulo": "X", "autoria": "principal"})];
        let upstream = spawn_upstream(rows, StatusCode::OK).await;
        let (_, body) = get_page(site_router(&upstream.base_url), "/participantes.html").await;

        assert!(body.contains("Ainda não há contribuições de participantes publicados."));
        assert!(!body.contains("post-card"));
    }

    #[tokio::test]
    async fn test_listing_error_on_upstream_failure() {
        let upstream = spawn_upstream(vec![], StatusCode::INTERNAL_SERVER_ERROR).await;
        let (status, body) = get_page(site_router(&upstream.base_url), "/index.html").await;

        // The page itself still renders, with the inline error message
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Erro ao carregar o conteúdo"));
    }

    #[tokio::test]
    async fn test_detail_renders_formatted_content() {
        let upstream = spawn_upstream(sample_rows(), StatusCode::OK).await;
        let (_, body) = get_page(site_router(&upstream.base_url), "/post.html?id=1").await;

        assert!(body.contains(r#"<h1 id="post-titulo">O Processo</h1>"#));
        assert!(body.contains("Categoria: Clássico | Autoria: Coordenação"));
        assert!(body.contains("<h3>Intro</h3><br>Line one</p><p>Line two</p>"));
        assert!(body.contains("<title id=\"page-title\">O Processo | Direito em Cena</title>"));
    }

    #[tokio::test]
    async fn test_detail_not_found_for_unknown_id() {
        let upstream = spawn_upstream(sample_rows(), StatusCode::OK).await;
        let (_, body) = get_page(site_router(&upstream.base_url), "/post.html?id=99").await;

        assert!(body.contains("Resenha não encontrada"));
    }

    #[tokio::test]
    async fn test_detail_with_empty_content_is_not_found() {
        let upstream = spawn_upstream(sample_rows(), StatusCode::OK).await;
        let (_, body) = get_page(site_router(&upstream.base_url), "/post.html?id=2").await;

        assert!(body.contains("conteúdo não preenchido"));
    }

    #[tokio::test]
    async fn test_detail_without_id_skips_upstream() {
        let upstream = spawn_upstream(sample_rows(), StatusCode::OK).await;
        let (_, body) = get_page(site_router(&upstream.base_url), "/post.html").await;

        assert!(body.contains("ID da Resenha não encontrado"));
        assert_eq!(upstream.hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_detail_error_on_upstream_failure() {
        let upstream = spawn_upstream(vec![], StatusCode::SERVICE_UNAVAILABLE).await;
        let (_, body) = get_page(site_router(&upstream.base_url), "/post.html?id=1").await;

        assert!(body.contains("Erro ao carregar detalhes"));
    }

    #[tokio::test]
    async fn test_unknown_path_is_404_without_upstream_call() {
        let upstream = spawn_upstream(sample_rows(), StatusCode::OK).await;
        let (status, _) = get_page(site_router(&upstream.base_url), "/sobre.html").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(upstream.hits.load(Ordering::SeqCst), 0);
    }
}
