//! Árboles de fetches y sus valores espejo.
//!
//! Rol en el protocolo:
//! - `Fetch` describe qué outputs del plan quiere recibir un aportante
//!   (caller o hook) al terminar un step.
//! - `FetchValues` es el espejo estructural con los valores ya computados.
//! - La forma es un tagged union de tres casos (nodo | secuencia | mapping),
//!   nunca inspección dinámica de formas.

pub mod tree;
pub mod values;

pub use tree::Fetch;
pub use values::FetchValues;
