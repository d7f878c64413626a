//! Landing dashboard (`/dashboard`, `/inicio`)

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Highlight {
    pub title: &'static str,
    pub description: &'static str,
    /// Bootstrap icon class
    pub icon: &'static str,
}

pub const HIGHLIGHTS: [Highlight; 3] = [
    Highlight {
        title: "Gestión de clientes",
        description: "Registra clientes y haz seguimiento a su progreso corporal en un mismo lugar.",
        icon: "bi-people",
    },
    Highlight {
        title: "Rutinas y planes",
        description: "Crea rutinas, planes alimenticios y asigna alimentos por comida fácilmente.",
        icon: "bi-clipboard-check",
    },
    Highlight {
        title: "Sesiones personalizadas",
        description: "Planifica sesiones y asigna ejercicios con repeticiones y series controladas.",
        icon: "bi-activity",
    },
];

#[derive(Debug, Clone, Serialize)]
pub struct DashboardPage {
    pub highlights: Vec<Highlight>,
}

impl DashboardPage {
    pub fn new() -> Self {
        Self {
            highlights: HIGHLIGHTS.to_vec(),
        }
    }
}

impl Default for DashboardPage {
    fn default() -> Self {
        Self::new()
    }
}
