//! Data models for the Fitware console
//!
//! These mirror the server resources as they travel over the wire. Field
//! names follow the API's camelCase JSON; unknown fields are kept in `extra`
//! so a record can be echoed back without losing server-side data.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Read an explicit JSON `null` as the type's default
///
/// Older servers send `null` for blank columns where newer ones omit the key.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Profile of the person behind a client or coach account
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default, deserialize_with = "null_as_default")]
    pub cedula: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nombre: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub apellidos: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub fecha_nacimiento: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub telefono: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genero: String,
}

/// Nested user object as the server may send it, every field optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawUserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cedula: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apellidos: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha_nacimiento: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telefono: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genero: Option<String>,
}

impl From<UserProfile> for RawUserProfile {
    fn from(user: UserProfile) -> Self {
        Self {
            cedula: Some(user.cedula),
            nombre: Some(user.nombre),
            apellidos: Some(user.apellidos),
            fecha_nacimiento: Some(user.fecha_nacimiento),
            telefono: Some(user.telefono),
            genero: Some(user.genero),
        }
    }
}

/// Client record exactly as received
///
/// Newer servers nest the profile under `usuario`; older ones flatten the
/// profile fields onto the client itself. Use
/// [`normalize_client`](crate::normalize::normalize_client) to get a [`Client`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usuario_cedula: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub fecha_registro: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub peso_inicial: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub altura_inicial: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usuario: Option<RawUserProfile>,

    // Flattened legacy shape
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cedula: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apellidos: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha_nacimiento: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telefono: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genero: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Canonical client: natural key plus a fully populated profile
///
/// Only the nested `usuario` shape is serialized. Profile keys that arrived
/// flattened on a legacy record are folded into `usuario` and are not echoed
/// at the top level; every other unknown field stays in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    #[serde(default, deserialize_with = "null_as_default")]
    pub usuario_cedula: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub fecha_registro: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub peso_inicial: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub altura_inicial: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub usuario: UserProfile,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Client {
    /// Name and surname joined, skipping empty parts
    pub fn full_name(&self) -> String {
        [self.usuario.nombre.as_str(), self.usuario.apellidos.as_str()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl From<Client> for ClientRecord {
    fn from(client: Client) -> Self {
        Self {
            usuario_cedula: Some(client.usuario_cedula),
            fecha_registro: client.fecha_registro,
            peso_inicial: client.peso_inicial,
            altura_inicial: client.altura_inicial,
            usuario: Some(client.usuario.into()),
            extra: client.extra,
            ..Default::default()
        }
    }
}

/// Client half of a registration payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientDetails {
    pub usuario_cedula: String,
    pub fecha_registro: String,
    pub peso_inicial: f64,
    pub altura_inicial: f64,
}

/// Body for client create and update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientRegistration {
    pub usuario: UserProfile,
    pub cliente: ClientDetails,
}

/// Body-progress entry for a client
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub fecha: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub peso: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub imc: f64,
    #[serde(default)]
    pub observaciones: Option<String>,
}

/// Exercise catalogue entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nombre: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub descripcion: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tipo: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub equipamiento: String,
}

/// Workout routine owned by a coach
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Routine {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nombre: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub objetivo: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub duracion_semanas: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entrenador_cedula: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entrenador: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub planes: Option<Vec<MealPlan>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Routine {
    /// Coach identifier, read from the nested coach record when present
    pub fn coach_id(&self) -> Option<&str> {
        self.entrenador
            .as_ref()
            .and_then(|coach| coach.get("usuarioCedula"))
            .and_then(Value::as_str)
            .or(self.entrenador_cedula.as_deref())
    }
}

/// Body for routine create and update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutinePayload {
    pub nombre: String,
    pub objetivo: String,
    pub duracion_semanas: u32,
}

/// Meal plan attached to a routine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlan {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rutina_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rutina: Option<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nombre: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub descripcion: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub duracion_dias: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub fecha_inicio: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub fecha_fin: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alimentos: Option<Vec<PlanFood>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body for meal plan create and update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanPayload {
    pub nombre: String,
    pub descripcion: String,
    pub duracion_dias: u32,
    pub fecha_inicio: String,
    pub fecha_fin: String,
}

/// Food assigned to a meal plan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanFood {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub alimento_id: i64,
    /// Unit-bearing quantity, e.g. "200 g"
    #[serde(default, deserialize_with = "null_as_default")]
    pub cantidad: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub comida_del_dia: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alimento_nombre: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Training session as exchanged with the server
///
/// `estado` holds the canonical status code; see [`crate::status`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub estado: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estado_descripcion: Option<String>,
    #[serde(default)]
    pub fecha_inicio: Option<String>,
    #[serde(default)]
    pub fecha_fin: Option<String>,
    #[serde(default)]
    pub gasto_calorico: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cliente_cedula: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cliente: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ejercicios: Option<Vec<SessionExercise>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Session {
    /// Owning client identifier, falling back to the nested client record
    pub fn client_id(&self) -> Option<&str> {
        self.cliente_cedula
            .as_deref()
            .filter(|id| !id.is_empty())
            .or_else(|| {
                self.cliente
                    .as_ref()
                    .and_then(|client| client.get("cedula"))
                    .and_then(Value::as_str)
                    .filter(|id| !id.is_empty())
            })
    }

    /// Copy of this session with `clienteCedula` filled in
    pub fn with_client_id(mut self, fallback: &str) -> Self {
        let id = self.client_id().unwrap_or(fallback).to_string();
        self.cliente_cedula = Some(id);
        self
    }
}

/// Body for session create and update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionPayload {
    pub estado: String,
    pub fecha_inicio: Option<String>,
    pub fecha_fin: Option<String>,
    pub gasto_calorico: Option<f64>,
}

/// Exercise assigned to a session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionExercise {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sesion_id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ejercicio_id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub repeticiones: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub series: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub estado: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ejercicio_nombre: Option<String>,
}

/// Partial update of a session-exercise assignment
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionExerciseChanges {
    pub ejercicio_id: Option<i64>,
    pub repeticiones: Option<u32>,
    pub series: Option<u32>,
    pub estado: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_client_record_keeps_unknown_fields() {
        let record: ClientRecord = serde_json::from_value(json!({
            "usuarioCedula": "123456",
            "fechaRegistro": "2024-01-10",
            "pesoInicial": 70.5,
            "alturaInicial": 1.75,
            "activo": true
        }))
        .unwrap();

        assert_eq!(record.usuario_cedula.as_deref(), Some("123456"));
        assert_eq!(record.extra.get("activo"), Some(&json!(true)));
        assert!(record.usuario.is_none());
    }

    #[test]
    fn test_session_client_id_falls_back_to_nested_client() {
        let session: Session = serde_json::from_value(json!({
            "id": 4,
            "estado": "PROGRAMADA",
            "cliente": { "cedula": "998877" }
        }))
        .unwrap();

        assert_eq!(session.client_id(), Some("998877"));
        let filled = session.with_client_id("");
        assert_eq!(filled.cliente_cedula.as_deref(), Some("998877"));
    }

    #[test]
    fn test_session_client_id_uses_fallback() {
        let session = Session::default().with_client_id("555555");
        assert_eq!(session.cliente_cedula.as_deref(), Some("555555"));
    }

    #[test]
    fn test_routine_coach_id_prefers_nested_coach() {
        let routine: Routine = serde_json::from_value(json!({
            "id": 1,
            "nombre": "Fuerza",
            "objetivo": "Hipertrofia",
            "duracionSemanas": 8,
            "entrenador": { "usuarioCedula": "111111" }
        }))
        .unwrap();

        assert_eq!(routine.coach_id(), Some("111111"));
    }

    #[test]
    fn test_session_payload_serializes_nulls() {
        let payload = SessionPayload {
            estado: "PROGRAMADA".to_string(),
            fecha_inicio: Some("2024-05-01T10:00".to_string()),
            fecha_fin: None,
            gasto_calorico: None,
        };

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            value,
            json!({
                "estado": "PROGRAMADA",
                "fechaInicio": "2024-05-01T10:00",
                "fechaFin": null,
                "gastoCalorico": null
            })
        );
    }

    #[test]
    fn test_client_list_with_null_columns() {
        let records: Vec<ClientRecord> = serde_json::from_value(json!([
            {
                "usuarioCedula": "123456",
                "fechaRegistro": null,
                "pesoInicial": null,
                "alturaInicial": 1.7,
                "usuario": { "cedula": "123456", "nombre": "Ana", "telefono": null }
            },
            { "cedula": "654321", "nombre": "Luis", "pesoInicial": 80.0 }
        ]))
        .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].fecha_registro, "");
        assert_eq!(records[0].peso_inicial, 0.0);
        assert_eq!(records[0].altura_inicial, 1.7);
        assert_eq!(records[1].peso_inicial, 80.0);
    }

    #[test]
    fn test_canonical_client_with_null_profile_fields() {
        let client: Client = serde_json::from_value(json!({
            "usuarioCedula": "123456",
            "fechaRegistro": "2024-01-10",
            "pesoInicial": null,
            "alturaInicial": null,
            "usuario": { "cedula": "123456", "nombre": "Ana", "apellidos": null, "genero": null }
        }))
        .unwrap();

        assert_eq!(client.full_name(), "Ana");
        assert_eq!(client.usuario.genero, "");
        assert_eq!(client.peso_inicial, 0.0);
    }

    #[test]
    fn test_session_list_with_null_status() {
        let sessions: Vec<Session> = serde_json::from_value(json!([
            { "id": 1, "estado": null, "fechaInicio": null, "ejercicios": null },
            {
                "id": 2,
                "estado": "PROGRAMADA",
                "ejercicios": [
                    { "ejercicioId": 3, "repeticiones": null, "series": 4, "estado": null }
                ]
            }
        ]))
        .unwrap();

        assert_eq!(sessions[0].estado, "");
        assert!(sessions[0].ejercicios.is_none());
        let assigned = &sessions[1].ejercicios.as_ref().unwrap()[0];
        assert_eq!(assigned.repeticiones, 0);
        assert_eq!(assigned.series, 4);
        assert_eq!(assigned.estado, "");
    }

    #[test]
    fn test_exercise_and_progress_lists_with_nulls() {
        let exercises: Vec<Exercise> = serde_json::from_value(json!([
            { "id": 1, "nombre": "Sentadilla", "descripcion": null, "tipo": "Fuerza", "equipamiento": null }
        ]))
        .unwrap();
        assert_eq!(exercises[0].descripcion, "");
        assert_eq!(exercises[0].equipamiento, "");

        let entries: Vec<Progress> = serde_json::from_value(json!([
            { "id": 9, "fecha": "2024-02-01", "peso": 70.0, "imc": null, "observaciones": null }
        ]))
        .unwrap();
        assert_eq!(entries[0].imc, 0.0);
        assert!(entries[0].observaciones.is_none());
    }

    #[test]
    fn test_routine_and_plan_with_nulls() {
        let routine: Routine = serde_json::from_value(json!({
            "id": 1,
            "nombre": "Fuerza",
            "objetivo": null,
            "duracionSemanas": null,
            "planes": [{
                "id": 2,
                "nombre": "Volumen",
                "descripcion": null,
                "duracionDias": null,
                "fechaInicio": "2024-01-01",
                "fechaFin": null,
                "alimentos": [{ "alimentoId": null, "cantidad": "200 g", "comidaDelDia": null }]
            }]
        }))
        .unwrap();

        assert_eq!(routine.objetivo, "");
        assert_eq!(routine.duracion_semanas, 0);
        let plan = &routine.planes.as_ref().unwrap()[0];
        assert_eq!(plan.duracion_dias, 0);
        assert_eq!(plan.fecha_fin, "");
        let food = &plan.alimentos.as_ref().unwrap()[0];
        assert_eq!(food.alimento_id, 0);
        assert_eq!(food.cantidad, "200 g");
    }

    #[test]
    fn test_wrong_type_still_rejected() {
        let result: Result<Exercise, _> = serde_json::from_value(json!({ "nombre": 5 }));
        assert!(result.is_err());
    }

    #[test]
    fn test_full_name_skips_empty_parts() {
        let client = Client {
            usuario: UserProfile {
                nombre: "Ana".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(client.full_name(), "Ana");
    }
}
