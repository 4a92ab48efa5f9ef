//! Request inmutable que un aportante (caller o hook) pliega en un step.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::fetch::Fetch;

/// Trabajo adicional a plegar en el próximo step.
///
/// - `fetches`: outputs solicitados (obligatorio).
/// - `bindings`: overrides de inputs nombrados para este step (opcional).
/// - `options`: configuración de ejecución del step, opaca para esta capa
///   (opcional).
///
/// Inmutable una vez construido. Esta capa no valida nada en construcción:
/// la corrección estructural de `fetches` es responsabilidad del caller y
/// del motor que ejecuta el step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRequest {
    pub fetches: Fetch,
    pub bindings: Option<IndexMap<String, Value>>,
    pub options: Option<Value>,
}

impl RunRequest {
    /// Crea un request con solo `fetches`; `bindings` y `options` ausentes.
    pub fn new(fetches: impl Into<Fetch>) -> Self {
        Self { fetches: fetches.into(),
               bindings: None,
               options: None }
    }

    /// Añade bindings de inputs nombrados.
    pub fn with_bindings(mut self, bindings: IndexMap<String, Value>) -> Self {
        self.bindings = Some(bindings);
        self
    }

    /// Añade opciones de ejecución (opacas para esta capa).
    pub fn with_options(mut self, options: Value) -> Self {
        self.options = Some(options);
        self
    }
}
