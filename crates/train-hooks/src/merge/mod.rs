//! Plegado determinista de requests y reparto de resultados.
//!
//! El loop dueño recolecta un aporte opcional por hook, los pliega junto al
//! request original en un único step (`MergedRun::merge`) y, tras ejecutar,
//! reparte el árbol de valores de vuelta: la porción del caller más una
//! porción por hook (`MergedRun::split_results`).

pub mod options;
pub mod plan;

pub use options::merge_options;
pub use plan::{MergedRun, SplitRunValues};
