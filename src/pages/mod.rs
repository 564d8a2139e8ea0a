//! Page loaders and page-kind dispatch
//!
//! Each request resolves to one page kind, and each page kind runs exactly
//! one loader. A loader issues at most one upstream request, awaited to
//! completion before any HTML is produced; every failure is turned into an
//! inline message so a broken fetch never takes the page down.

use crate::config::SiteConfig;
use crate::content::Authorship;
use crate::render;
use crate::source::PostSource;

/// The kinds of page this site serves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    /// A listing page showing one authorship's posts
    Listing(Authorship),
    /// The single-post detail page
    Detail,
}

impl PageKind {
    /// Map a request path to its page kind
    ///
    /// Unknown paths map to `None`: no loader runs and nothing is fetched.
    pub fn detect(path: &str) -> Option<PageKind> {
        let file_name = path.trim_end_matches('/').rsplit('/').next().unwrap_or("");
        match file_name {
            "post.html" => Some(PageKind::Detail),
            "" | "index.html" | "participantes.html" => {
                Some(PageKind::Listing(Authorship::for_page(file_name)))
            }
            _ => None,
        }
    }
}

/// Load and render a listing page
pub async fn load_listing(
    config: &SiteConfig,
    source: &PostSource,
    authorship: Authorship,
) -> String {
    let body = match source.fetch_all().await {
        Ok(posts) => {
            let matching: Vec<_> = posts.iter().filter(|p| p.autoria == authorship).collect();
            render::listing(authorship, &matching)
        }
        Err(e) => {
            tracing::error!("failed to load posts: {}", e);
            render::listing_error()
        }
    };

    render::page(&config.title, &body)
}

/// Load and render the detail page for the post named by the `id` parameter
pub async fn load_detail(config: &SiteConfig, source: &PostSource, id: Option<&str>) -> String {
    let Some(id) = id else {
        let body = render::detail_message("Erro: ID da Resenha não encontrado.");
        return render::page(&config.title, &body);
    };

    match source.search_by_id(id).await {
        // The search returns at most a handful of rows; only the first one
        // counts, and only when its body has been filled in.
        Ok(posts) => match posts.into_iter().next().filter(|p| p.has_full_content()) {
            Some(post) => {
                let title = format!("{} | {}", post.titulo, config.title);
                render::page(&title, &render::detail(&post))
            }
            None => {
                let body = render::detail_message(
                    "Resenha não encontrada ou conteúdo não preenchido na planilha.",
                );
                render::page(&config.title, &body)
            }
        },
        Err(e) => {
            tracing::error!("failed to load post {}: {}", id, e);
            let body =
                render::detail_message("Erro ao carregar detalhes. Tente novamente mais tarde.");
            render::page(&config.title, &body)
        }
    }
}
