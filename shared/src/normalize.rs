//! Client payload normalization
//!
//! Servers return clients either with a nested `usuario` object or with the
//! profile fields flattened onto the client. Everything downstream works on
//! the canonical [`Client`], so the reconciliation lives here and nowhere else.

use crate::models::{Client, ClientRecord, RawUserProfile, UserProfile};

/// Reconcile a client record of either shape into the canonical shape
///
/// The identifier is taken from the nested user, then `usuarioCedula`, then
/// the flattened `cedula`, then the empty string. Each profile field prefers
/// the nested value, then the flattened one, then the empty string. The
/// flattened fields are dropped from the output; all other extra fields are
/// carried over untouched.
///
/// Normalizing the [`ClientRecord`] built from a normalized [`Client`] gives
/// back the same client.
pub fn normalize_client(record: ClientRecord) -> Client {
    let nested = record.usuario.unwrap_or_default();

    let usuario_cedula = first_non_empty([
        nested.cedula.as_deref(),
        record.usuario_cedula.as_deref(),
        record.cedula.as_deref(),
    ]);

    let usuario = UserProfile {
        cedula: usuario_cedula.clone(),
        nombre: pick(nested.nombre, record.nombre),
        apellidos: pick(nested.apellidos, record.apellidos),
        fecha_nacimiento: pick(nested.fecha_nacimiento, record.fecha_nacimiento),
        telefono: pick(nested.telefono, record.telefono),
        genero: pick(nested.genero, record.genero),
    };

    Client {
        usuario_cedula,
        fecha_registro: record.fecha_registro,
        peso_inicial: record.peso_inicial,
        altura_inicial: record.altura_inicial,
        usuario,
        extra: record.extra,
    }
}

/// Normalize every record of a fetched list
pub fn normalize_clients(records: Vec<ClientRecord>) -> Vec<Client> {
    records.into_iter().map(normalize_client).collect()
}

/// Whether a record already has the canonical nested shape
pub fn is_canonical(record: &ClientRecord) -> bool {
    matches!(
        &record.usuario,
        Some(RawUserProfile {
            cedula: Some(_),
            nombre: Some(_),
            apellidos: Some(_),
            fecha_nacimiento: Some(_),
            telefono: Some(_),
            genero: Some(_),
        })
    ) && record.cedula.is_none()
        && record.nombre.is_none()
        && record.apellidos.is_none()
        && record.fecha_nacimiento.is_none()
        && record.telefono.is_none()
        && record.genero.is_none()
}

fn first_non_empty<const N: usize>(candidates: [Option<&str>; N]) -> String {
    candidates
        .into_iter()
        .flatten()
        .find(|value| !value.is_empty())
        .unwrap_or_default()
        .to_string()
}

fn pick(nested: Option<String>, flattened: Option<String>) -> String {
    nested.or(flattened).unwrap_or_default()
}
