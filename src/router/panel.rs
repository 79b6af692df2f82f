//! Diagnostic panel rendered in place of a page that failed to load.

use super::state::LoadError;
use crate::routes::HOME;
use maud::{Markup, html};

pub fn render_error_panel(
    page: &str,
    template_path: &str,
    error: &LoadError,
    home_href: &str,
) -> Markup {
    html! {
        div.container.load-error role="alert" {
            h2 { "Erreur de chargement" }
            p { strong { "Impossible de charger cette page." } }
            p."load-error__message" { (error.to_string()) }
            p."load-error__context" {
                "Page : " code { (page) }
                br;
                "Fichier : " code { (template_path) }
            }
            p {
                a.btn."btn--primary" href=(home_href) data-page=(HOME) { "Retour à l'accueil" }
            }
            details."load-error__details" {
                summary { "Détails techniques" }
                pre { (format!("{error:#?}")) }
            }
        }
    }
}
