//! HTML rendering - page shell, post cards and inline messages
//!
//! All rendering is plain string construction; the pages are small enough
//! that a template engine would be more machinery than markup.

use crate::content::{format_text, Authorship, Post};

/// Render the full page shell around a body fragment
pub fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title id="page-title">{}</title>
</head>
<body>
{}
</body>
</html>
"#,
        html_escape(title),
        body
    )
}

/// Build the clickable summary card for one post
///
/// The card links to the detail page keyed by the post id and carries the
/// highlight class when the post comes from a participant.
pub fn post_card(post: &Post) -> String {
    let class = if post.autoria == Authorship::Participante {
        "post-card post-participante"
    } else {
        "post-card"
    };

    format!(
        concat!(
            r#"<a href="post.html?id={id}" class="{class}">"#,
            r#"<img src="{imagem}" alt="Capa da Obra: {titulo}">"#,
            "<h4>{titulo}</h4>",
            r#"<p class="category">Categoria: {categoria}</p>"#,
            r#"<span class="autor-tag">{badge}</span>"#,
            "</a>"
        ),
        id = html_escape(&post.id),
        class = class,
        imagem = html_escape(&post.imagem),
        titulo = html_escape(&post.titulo),
        categoria = html_escape(&post.categoria),
        badge = post.autoria.label(),
    )
}

/// Render the card container for a listing page
///
/// Posts are shown in source order; when none match, the container holds the
/// authorship-specific empty-state message instead.
pub fn listing(authorship: Authorship, posts: &[&Post]) -> String {
    let inner = if posts.is_empty() {
        let what = match authorship {
            Authorship::Principal => "destaques da coordenação",
            Authorship::Participante => "contribuições de participantes",
        };
        format!(
            r#"<p style="text-align: center; margin: 50px 0;">Ainda não há {} publicados.</p>"#,
            what
        )
    } else {
        posts.iter().map(|post| post_card(post)).collect()
    };

    format!(r#"<div class="card-container">{}</div>"#, inner)
}

/// Listing container with the generic load-failure message
pub fn listing_error() -> String {
    r#"<div class="card-container"><p>Erro ao carregar o conteúdo. Por favor, verifique a conexão com a fonte de dados.</p></div>"#.to_string()
}

/// Render the detail view of one published post
pub fn detail(post: &Post) -> String {
    let conteudo = format_text(post.conteudo_completo.as_deref().unwrap_or(""));

    format!(
        concat!(
            r#"<div class="post-detail-container">"#,
            r#"<h1 id="post-titulo">{titulo}</h1>"#,
            r#"<p id="post-meta">Categoria: {categoria} | Autoria: {autoria}</p>"#,
            r#"<div id="post-conteudo">"#,
            r#"<img src="{imagem}" alt="Capa da Obra: {titulo}" style="width: 100%; height: auto; margin-bottom: 20px;">"#,
            "{conteudo}",
            "</div>",
            "</div>"
        ),
        titulo = html_escape(&post.titulo),
        categoria = html_escape(&post.categoria),
        autoria = post.autoria.label(),
        imagem = html_escape(&post.imagem),
        conteudo = conteudo,
    )
}

/// Detail container holding only an inline message
pub fn detail_message(message: &str) -> String {
    format!(
        r#"<div class="post-detail-container"><h2>{}</h2></div>"#,
        message
    )
}

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
