//! Monitores predefinidos sobre el protocolo de hooks.
//!
//! Implementaciones concretas de `RunHook` listas para componer en un
//! `HookStack`: stop al alcanzar un step objetivo, logging periódico de
//! progreso y guardia de NaN sobre el loss. Ninguna toca el motor ni el
//! loop: consumen el contrato de `train-hooks` y nada más.

pub mod nan_guard;
pub mod progress;
pub mod stop_after;

pub use nan_guard::NanGuard;
pub use progress::ProgressLogger;
pub use stop_after::StopAfterSteps;
