//! Landing page: where to go from the root

use axum::{routing::get, Json, Router};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Link {
    pub rel: &'static str,
    pub href: &'static str,
}

#[derive(Debug, Serialize)]
pub struct Home {
    pub name: &'static str,
    pub links: Vec<Link>,
}

/// GET /
async fn home() -> Json<Home> {
    Json(Home {
        name: "gigboard",
        links: vec![
            Link { rel: "venues", href: "/venues" },
            Link { rel: "artists", href: "/artists" },
            Link { rel: "shows", href: "/shows" },
            Link { rel: "new_venue", href: "/venues/create" },
            Link { rel: "new_artist", href: "/artists/create" },
            Link { rel: "new_show", href: "/shows/create" },
        ],
    })
}

pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/", get(home))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn links_every_listing() {
        let Json(body) = home().await;
        for href in ["/venues", "/artists", "/shows"] {
            assert!(body.links.iter().any(|l| l.href == href));
        }
    }
}
