//! Trait `RunHook`: cuatro callbacks de ciclo de vida con default no-op.

use crate::run::{RunContext, RunRequest, RunResult};

/// Hook que extiende cada step de una sesión de entrenamiento gestionada.
///
/// El loop dueño (externo a esta crate) invoca, para cada hook registrado y
/// en orden de registro:
///
/// 1. `begin` una vez, antes del primer step.
/// 2. Por cada step, `before_run` y luego `after_run`, siempre pareados.
/// 3. `end` una vez al salir del loop, sea por stop cooperativo o por
///    razón externa.
///
/// Todos los callbacks tienen default no-op: las implementaciones
/// sobreescriben solo lo que necesitan. Los callbacks no devuelven
/// `Result`; la política de errores pertenece al motor que aloja el loop.
///
/// `S` es el tipo de sesión del caller. Esta capa lo trata como opaco y
/// nunca lo retiene.
pub trait RunHook<S> {
    /// Una vez, antes del primer step, con el plan de cómputo aún mutable.
    ///
    /// Registrar nodos adicionales en el plan ocurre aquí. Al retornar este
    /// callback para todos los hooks el plan queda finalizado; una segunda
    /// llamada sobre un plan ya preparado debe ser no-op respecto a la
    /// estructura observable.
    fn begin(&mut self) {}

    /// Antes de cada step.
    ///
    /// Puede devolver un `RunRequest` cuyos `fetches`/`bindings` se pliegan
    /// al step por ejecutar; `None` significa "sin aporte en este step". El
    /// plan ya está finalizado: prohibido mutarlo aquí. El contexto expone
    /// el request original del caller vía `ctx.original_request()`.
    fn before_run(&mut self, _ctx: &mut RunContext<'_, S>) -> Option<RunRequest> {
        None
    }

    /// Después de cada step.
    ///
    /// `result.results` contiene exactamente la porción correspondiente a
    /// los fetches aportados en el `before_run` pareado. Puede pedir la
    /// terminación del loop vía `ctx.request_stop()`.
    fn after_run(&mut self, _ctx: &mut RunContext<'_, S>, _result: &RunResult) {}

    /// Una vez al terminar el loop; recibe la sesión a punto de cerrarse,
    /// útil para acciones finales antes del cierre.
    fn end(&mut self, _session: &S) {}
}
