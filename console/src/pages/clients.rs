//! Clients page: registration, edit, delete, search and the jump to a
//! client's progress history

use super::{invalid_form, number_input, Feedback, FormStatus};
use crate::api::ApiClient;
use crate::error::ConsoleResult;
use crate::routes::Route;
use fitware_shared::filter::filter_clients;
use fitware_shared::validation::{
    validate_cedula, validate_min_value, validate_one_of, validate_required, FieldErrors,
    VALID_GENDERS,
};
use fitware_shared::{
    normalize_client, normalize_clients, Client, ClientDetails, ClientRegistration, UserProfile,
};
use serde::Serialize;
use tracing::info;

pub const MSG_REGISTERED: &str = "Cliente registrado correctamente.";
pub const MSG_UPDATED: &str = "Cliente actualizado correctamente.";
pub const MSG_DELETED: &str = "Cliente eliminado correctamente.";
pub const MSG_INCOMPLETE: &str =
    "Por favor completa todos los campos obligatorios antes de guardar.";
pub const FALLBACK: &str = "No se pudo completar la operacion.";

/// Registration form buffer, values as typed
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientForm {
    pub cedula: String,
    pub nombre: String,
    pub apellidos: String,
    pub fecha_nacimiento: String,
    pub telefono: String,
    pub genero: String,
    pub fecha_registro: String,
    pub peso_inicial: String,
    pub altura_inicial: String,
}

impl ClientForm {
    /// Fill the form from a normalized client
    pub fn from_client(client: &Client) -> Self {
        Self {
            cedula: client.usuario_cedula.clone(),
            nombre: client.usuario.nombre.clone(),
            apellidos: client.usuario.apellidos.clone(),
            fecha_nacimiento: client.usuario.fecha_nacimiento.clone(),
            telefono: client.usuario.telefono.clone(),
            genero: client.usuario.genero.clone(),
            fecha_registro: client.fecha_registro.clone(),
            peso_inicial: number_input(client.peso_inicial),
            altura_inicial: number_input(client.altura_inicial),
        }
    }

    /// Check every field and build the nested registration payload
    pub fn validate(&self) -> Result<ClientRegistration, FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check("cedula", validate_cedula(&self.cedula));
        errors.check("nombre", validate_required(&self.nombre));
        errors.check("apellidos", validate_required(&self.apellidos));
        errors.check("fechaNacimiento", validate_required(&self.fecha_nacimiento));
        errors.check("telefono", validate_required(&self.telefono));
        errors.check("genero", validate_one_of(&self.genero, VALID_GENDERS));
        errors.check("fechaRegistro", validate_required(&self.fecha_registro));
        let peso = errors.check("pesoInicial", validate_min_value(&self.peso_inicial, 20.0));
        let altura = errors.check("alturaInicial", validate_min_value(&self.altura_inicial, 1.2));

        match (peso, altura) {
            (Some(peso_inicial), Some(altura_inicial)) if errors.is_empty() => {
                Ok(ClientRegistration {
                    usuario: UserProfile {
                        cedula: self.cedula.clone(),
                        nombre: self.nombre.clone(),
                        apellidos: self.apellidos.clone(),
                        fecha_nacimiento: self.fecha_nacimiento.clone(),
                        telefono: self.telefono.clone(),
                        genero: self.genero.clone(),
                    },
                    cliente: ClientDetails {
                        usuario_cedula: self.cedula.clone(),
                        fecha_registro: self.fecha_registro.clone(),
                        peso_inicial,
                        altura_inicial,
                    },
                })
            }
            _ => Err(errors),
        }
    }
}

/// Clients view-controller
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientsPage {
    #[serde(skip)]
    api: ApiClient,
    pub clients: Vec<Client>,
    pub filtered: Vec<Client>,
    pub search: String,
    pub form: ClientForm,
    pub form_status: FormStatus,
    pub edit_mode: bool,
    /// Identifier input is read-only while editing
    pub cedula_locked: bool,
    pub selected: Option<Client>,
    /// "Go to progress" form
    pub progress_cedula: String,
    pub progress_status: FormStatus,
    pub loading: bool,
    pub feedback: Feedback,
}

impl ClientsPage {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            clients: Vec::new(),
            filtered: Vec::new(),
            search: String::new(),
            form: ClientForm::default(),
            form_status: FormStatus::default(),
            edit_mode: false,
            cedula_locked: false,
            selected: None,
            progress_cedula: String::new(),
            progress_status: FormStatus::default(),
            loading: false,
            feedback: Feedback::default(),
        }
    }

    /// Fetch and normalize the client list
    pub async fn load(&mut self) -> ConsoleResult<()> {
        let result = self.api.clients().list().await;
        let records = self.feedback.capture(result, FALLBACK)?;
        self.clients = normalize_clients(records);
        self.apply_filter();
        Ok(())
    }

    /// Filter the full list by identifier, name or surname
    pub fn filter(&mut self, term: &str) {
        self.search = term.to_string();
        self.apply_filter();
    }

    fn apply_filter(&mut self) {
        self.filtered = filter_clients(&self.clients, &self.search)
            .into_iter()
            .cloned()
            .collect();
    }

    /// Register a new client or update the one being edited
    pub async fn save(&mut self) -> ConsoleResult<()> {
        self.feedback.clear();

        let payload = match self.form.validate() {
            Ok(payload) => payload,
            Err(errors) => {
                self.form_status.mark_all_touched(&errors);
                self.feedback.fail(MSG_INCOMPLETE);
                return Err(invalid_form(&errors));
            }
        };

        let identifier = self
            .selected
            .as_ref()
            .map(|client| client.usuario_cedula.clone())
            .filter(|id| !id.is_empty());

        self.loading = true;
        let result = match (self.edit_mode, identifier.as_deref()) {
            (true, Some(cedula)) => self.api.clients().update(cedula, &payload).await,
            _ => self.api.clients().register(&payload).await,
        };
        self.loading = false;
        self.feedback.capture(result, FALLBACK)?;

        let updated = self.edit_mode && identifier.is_some();
        info!(cedula = %payload.cliente.usuario_cedula, updated, "Client saved");
        self.feedback
            .succeed(if updated { MSG_UPDATED } else { MSG_REGISTERED });
        self.reset_form();
        self.load().await
    }

    /// Enter edit mode for a client, locking the identifier field
    pub fn edit(&mut self, client: &Client) {
        let normalized = normalize_client(client.clone().into());
        self.form = ClientForm::from_client(&normalized);
        self.form_status.reset();
        self.edit_mode = true;
        self.cedula_locked = true;
        self.selected = Some(normalized);
    }

    pub fn cancel_edit(&mut self) {
        self.reset_form();
    }

    /// Delete a client by its natural key
    pub async fn delete(&mut self, client: &Client) -> ConsoleResult<()> {
        let normalized = normalize_client(client.clone().into());
        let identifier = normalized.usuario_cedula.clone();

        self.loading = true;
        let result = self.api.clients().delete(&identifier).await;
        self.loading = false;
        self.feedback.capture(result, FALLBACK)?;

        info!(cedula = %identifier, name = %normalized.full_name(), "Client deleted");
        self.feedback.succeed(MSG_DELETED);
        let editing_deleted = self
            .selected
            .as_ref()
            .is_some_and(|c| c.usuario_cedula == identifier);
        if self.edit_mode && editing_deleted {
            self.reset_form();
        }
        self.load().await
    }

    /// Route of the progress page for the identifier typed in the jump form
    pub fn go_to_progress(&mut self) -> Option<Route> {
        let mut errors = FieldErrors::new();
        errors.check("cedula", validate_required(&self.progress_cedula));
        if !errors.is_empty() {
            self.progress_status.mark_all_touched(&errors);
            return None;
        }
        Some(Route::ClientProgress(self.progress_cedula.clone()))
    }

    fn reset_form(&mut self) {
        self.edit_mode = false;
        self.cedula_locked = false;
        self.selected = None;
        self.form = ClientForm::default();
        self.form_status.reset();
    }
}
