//! Navigation table
//!
//! Maps console paths onto pages. The root redirects to the login page and
//! unknown paths land on not-found. Trailing slashes are ignored.

use serde::Serialize;
use std::fmt;

/// A resolved console location
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "page", content = "clientId", rename_all = "kebab-case")]
pub enum Route {
    Login,
    Dashboard,
    Home,
    Exercises,
    Clients,
    /// Progress history of one client, keyed by identifier
    ClientProgress(String),
    Routines,
    Sessions,
    Reports,
    NotFound,
}

/// Outcome of resolving a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Page(Route),
    Redirect(&'static str),
}

/// Resolve a path against the route table
pub fn resolve(path: &str) -> Resolution {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    let route = match segments.as_slice() {
        [] => return Resolution::Redirect("/login"),
        ["login"] => Route::Login,
        ["dashboard"] => Route::Dashboard,
        ["inicio"] => Route::Home,
        ["ejercicios"] => Route::Exercises,
        ["clientes"] => Route::Clients,
        ["clientes", id, "progreso"] => Route::ClientProgress((*id).to_string()),
        ["rutinas"] => Route::Routines,
        ["sesiones"] => Route::Sessions,
        ["reportes"] => Route::Reports,
        _ => Route::NotFound,
    };
    Resolution::Page(route)
}

/// Resolve a path, following redirects until a page is reached
pub fn navigate(path: &str) -> Route {
    let mut current = path.to_string();
    // The table holds a single redirect; the bound guards future cycles
    for _ in 0..4 {
        match resolve(&current) {
            Resolution::Page(route) => return route,
            Resolution::Redirect(target) => current = target.to_string(),
        }
    }
    Route::NotFound
}

impl Route {
    /// Canonical path of this route
    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::Home => "/inicio".to_string(),
            Route::Exercises => "/ejercicios".to_string(),
            Route::Clients => "/clientes".to_string(),
            Route::ClientProgress(id) => format!("/clientes/{}/progreso", id),
            Route::Routines => "/rutinas".to_string(),
            Route::Sessions => "/sesiones".to_string(),
            Route::Reports => "/reportes".to_string(),
            Route::NotFound => "/404".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
