//! Input validation functions
//!
//! Form values arrive as text. These checks run before any request is
//! issued; a failing form is marked touched and nothing is sent.

/// Gender options offered by the client form
pub const VALID_GENDERS: &[&str] = &["Masculino", "Femenino", "Otro"];

/// Exercise types offered by the exercise form
pub const VALID_EXERCISE_TYPES: &[&str] = &[
    "Cardio",
    "Fuerza",
    "Resistencia",
    "Movilidad",
    "Flexibilidad",
    "HIIT",
    "Equilibrio",
    "Potencia",
];

/// Meal-of-day labels for plan foods
pub const VALID_MEALS: &[&str] = &["Desayuno", "Almuerzo", "Cena", "Snack"];

/// Default status label for a freshly assigned session exercise
pub const DEFAULT_SESSION_EXERCISE_STATUS: &str = "Pendiente";

/// Minimum length of a client identifier
pub const MIN_CEDULA_LENGTH: usize = 6;

/// Validate that a text field is filled in
pub fn validate_required(value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err("Este campo es obligatorio".to_string());
    }
    Ok(())
}

/// Validate minimum length (counted in characters)
pub fn validate_min_length(value: &str, min: usize) -> Result<(), String> {
    validate_required(value)?;
    if value.chars().count() < min {
        return Err(format!("Debe tener al menos {} caracteres", min));
    }
    Ok(())
}

/// Parse a numeric form field
pub fn parse_number(raw: &str) -> Result<f64, String> {
    validate_required(raw)?;
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| "Debe ser un número válido".to_string())?;
    if value.is_nan() || value.is_infinite() {
        return Err("Debe ser un número válido".to_string());
    }
    Ok(value)
}

/// Parse a numeric form field and check its lower bound
pub fn validate_min_value(raw: &str, min: f64) -> Result<f64, String> {
    let value = parse_number(raw)?;
    if value < min {
        return Err(format!("Debe ser mayor o igual a {}", min));
    }
    Ok(value)
}

/// Parse a whole-number form field and check its lower bound
pub fn validate_min_count(raw: &str, min: u32) -> Result<u32, String> {
    validate_required(raw)?;
    let value: u32 = raw
        .trim()
        .parse()
        .map_err(|_| "Debe ser un número entero".to_string())?;
    if value < min {
        return Err(format!("Debe ser mayor o igual a {}", min));
    }
    Ok(value)
}

/// Parse an identifier picked from a select
pub fn validate_id(raw: &str) -> Result<i64, String> {
    validate_required(raw)?;
    raw.trim()
        .parse()
        .map_err(|_| "Selecciona un elemento válido".to_string())
}

/// Validate a value against a fixed option list
pub fn validate_one_of(value: &str, options: &[&str]) -> Result<(), String> {
    validate_required(value)?;
    if options.contains(&value) {
        Ok(())
    } else {
        Err(format!("Debe ser una de: {}", options.join(", ")))
    }
}

/// Validate a client identifier
pub fn validate_cedula(value: &str) -> Result<(), String> {
    validate_min_length(value, MIN_CEDULA_LENGTH)
}

// ============================================================================
// User-Friendly Field Labels
// ============================================================================

/// Map form field names to the labels shown next to the inputs
pub fn get_field_display_label(field_name: &str) -> &str {
    match field_name {
        "cedula" | "clienteCedula" | "entrenadorCedula" => "Cédula",
        "nombre" => "Nombre",
        "apellidos" => "Apellidos",
        "fechaNacimiento" => "Fecha de nacimiento",
        "telefono" => "Teléfono",
        "genero" => "Género",
        "fechaRegistro" => "Fecha de registro",
        "pesoInicial" => "Peso inicial",
        "alturaInicial" => "Altura inicial",
        "descripcion" => "Descripción",
        "tipo" => "Tipo",
        "equipamiento" => "Equipamiento",
        "objetivo" => "Objetivo",
        "duracionSemanas" => "Duración (semanas)",
        "duracionDias" => "Duración (días)",
        "fechaInicio" => "Fecha de inicio",
        "fechaFin" => "Fecha de fin",
        "alimentoId" => "Alimento",
        "cantidad" => "Cantidad",
        "comidaDelDia" => "Comida del día",
        "estado" => "Estado",
        "gastoCalorico" => "Gasto calórico",
        "ejercicioId" => "Ejercicio",
        "repeticiones" => "Repeticiones",
        "series" => "Series",
        "fecha" => "Fecha",
        "peso" => "Peso",
        "imc" => "IMC",
        _ => field_name,
    }
}

/// Validation error with field context
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub display_label: String,
}

impl ValidationError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
            display_label: get_field_display_label(field).to_string(),
        }
    }

    /// Format as user-friendly error message
    pub fn user_message(&self) -> String {
        format!("{}: {}", self.display_label, self.message)
    }
}

/// Collects per-field failures while a form is checked
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors {
    errors: Vec<ValidationError>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of one check, returning the parsed value on success
    pub fn check<T>(&mut self, field: &str, result: Result<T, String>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(message) => {
                self.errors.push(ValidationError::new(field, &message));
                None
            }
        }
    }

    pub fn push(&mut self, field: &str, message: &str) {
        self.errors.push(ValidationError::new(field, message));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }
}
