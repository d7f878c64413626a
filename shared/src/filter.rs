//! Client-side search over already-fetched lists
//!
//! Filters always run over the full list held by the page, never over a
//! previous result, so deleting characters from the search box widens the
//! match again.

use crate::models::{Client, Exercise};

/// Clients whose identifier, name or surname contains `term`
///
/// The term is trimmed and compared case-insensitively. An empty term
/// returns every client.
pub fn filter_clients<'a>(clients: &'a [Client], term: &str) -> Vec<&'a Client> {
    let needle = term.trim().to_lowercase();
    clients
        .iter()
        .filter(|client| {
            contains(&client.usuario_cedula, &needle)
                || contains(&client.usuario.nombre, &needle)
                || contains(&client.usuario.apellidos, &needle)
        })
        .collect()
}

/// Exercises whose name or type contains `term`, case-insensitively
pub fn filter_exercises<'a>(exercises: &'a [Exercise], term: &str) -> Vec<&'a Exercise> {
    let needle = term.to_lowercase();
    exercises
        .iter()
        .filter(|exercise| contains(&exercise.nombre, &needle) || contains(&exercise.tipo, &needle))
        .collect()
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}
