//! List the posts currently published on the data source

use anyhow::Result;
use std::time::Duration;

use crate::content::Authorship;
use crate::source::PostSource;
use crate::Site;

/// Fetch all posts and print them grouped per authorship
pub async fn run(site: &Site) -> Result<()> {
    let source = PostSource::new(
        &site.config.api_url,
        Duration::from_secs(site.config.timeout_secs),
    )?;
    let posts = source.fetch_all().await?;

    for authorship in [Authorship::Principal, Authorship::Participante] {
        let group: Vec<_> = posts.iter().filter(|p| p.autoria == authorship).collect();
        println!("{} ({}):", authorship.label(), group.len());
        for post in group {
            let published = if post.has_full_content() {
                "publicado"
            } else {
                "sem conteúdo"
            };
            println!("  #{} {} [{}] - {}", post.id, post.titulo, post.categoria, published);
        }
    }

    Ok(())
}
