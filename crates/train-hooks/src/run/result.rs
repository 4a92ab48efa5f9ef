//! Resultado inmutable de un step, repartido por hook.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::fetch::FetchValues;

/// Resultados de un step para un hook concreto.
///
/// - `results`: replica la forma del fetch que el hook aportó en su
///   `before_run` pareado; `None` si no aportó fetches en ese step.
/// - `options`: configuración efectivamente usada por el step.
/// - `run_metadata`: telemetría/diagnóstico producido por el step.
///
/// `options` y `run_metadata` son opacas para esta capa. Tres campos
/// obligatorios, sin defaults ni validación: puro portador de datos,
/// construido una vez por iteración por el loop dueño.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    pub results: Option<FetchValues>,
    pub options: Value,
    pub run_metadata: Value,
}

impl RunResult {
    /// Construye el resultado; los tres campos son obligatorios.
    #[inline]
    pub fn new(results: Option<FetchValues>, options: Value, run_metadata: Value) -> Self {
        Self { results,
               options,
               run_metadata }
    }
}
