use super::{RouteDef, View};

/// Route tree of the web client.
///
/// `collections/:id` is declared twice (item page with props, then the
/// collection page); the table keeps the first and reports the second.
pub fn default_routes() -> Vec<RouteDef> {
    vec![
        RouteDef::new("/login", View::Login),
        RouteDef::new("/", View::Layout)
            .redirect_to("/collections")
            .with_children(vec![
                RouteDef::new("collections", View::CollectionsIndex),
                RouteDef::new("collections/:id", View::CollectionItem).with_props(),
                RouteDef::new("searches", View::Searches),
                RouteDef::new("settings", View::Settings),
                RouteDef::new("collections/:id", View::Collection),
            ]),
    ]
}
