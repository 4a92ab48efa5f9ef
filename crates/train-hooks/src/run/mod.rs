//! Las tres formas de valor del protocolo: request, contexto y resultado.

pub mod context;
pub mod request;
pub mod result;

pub use context::RunContext;
pub use request::RunRequest;
pub use result::RunResult;
