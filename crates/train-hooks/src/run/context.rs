//! Contexto por iteración entregado a los hooks.

use super::RunRequest;

/// Contexto de una iteración del loop.
///
/// Expone el request original del caller (no el de ningún hook), el handle
/// de sesión opaco y el stop flag cooperativo. Existe exactamente un
/// `RunContext` por iteración y no sobrevive a la iteración; los hooks no
/// lo retienen más allá del callback que lo recibe.
///
/// El stop flag nace en `false` y es monótono: no existe API para
/// revertirlo. El loop lo consulta una vez por iteración, al cierre de la
/// fase `after_run`, y termina antes de iniciar otra iteración si está
/// activo.
pub struct RunContext<'a, S> {
    original_request: &'a RunRequest,
    session: &'a S,
    stop_requested: bool,
}

impl<'a, S> RunContext<'a, S> {
    /// Crea el contexto de una iteración.
    #[inline]
    pub fn new(original_request: &'a RunRequest, session: &'a S) -> Self {
        Self { original_request,
               session,
               stop_requested: false }
    }

    /// Request original del caller para el step en curso.
    #[inline]
    pub fn original_request(&self) -> &'a RunRequest {
        self.original_request
    }

    /// Handle de sesión opaco, propiedad del caller.
    #[inline]
    pub fn session(&self) -> &'a S {
        self.session
    }

    /// Estado actual del stop flag.
    #[inline]
    pub fn stop_requested(&self) -> bool {
        self.stop_requested
    }

    /// Pide terminar el loop al cierre de la iteración en curso.
    /// Idempotente: llamadas repetidas equivalen a una.
    #[inline]
    pub fn request_stop(&mut self) {
        self.stop_requested = true;
    }
}
