//! Errores de la capa de hooks (simples por ahora).
//!
//! Los callbacks de los hooks son infalibles por contrato: un hook que se
//! comporta mal es problema del motor que lo aloja. El error de esta capa
//! vive únicamente en la superficie merge/split/resolve que consume el loop.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum HookError {
    #[error("binding already supplied for input '{0}'")] BindingConflict(String),
    #[error("unknown fetch node '{0}'")] UnknownFetch(String),
    #[error("step results do not mirror the merged fetches")] ResultShapeMismatch,
    #[error("expected exactly one run result per hook")] ResultCountMismatch,
}
