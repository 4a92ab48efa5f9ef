//! `HookStack`: aplica una colección ordenada de hooks fase por fase.

use crate::errors::HookError;
use crate::run::{RunContext, RunRequest, RunResult};

use super::RunHook;

/// Colección ordenada y heterogénea de hooks.
///
/// Invoca el callback correspondiente de cada hook secuencialmente, en
/// orden de registro, sin solapamiento entre hooks ni entre fases. Ningún
/// invariante liga hooks entre sí: cada uno es independiente y el orden de
/// aportes que produce `before_run` es el mismo que consume `after_run`.
pub struct HookStack<S> {
    hooks: Vec<Box<dyn RunHook<S>>>,
}

impl<S> HookStack<S> {
    /// Crea un stack vacío.
    pub fn new() -> Self {
        Self { hooks: vec![] }
    }

    /// Crea el stack con la lista dada de hooks.
    pub fn with_hooks(hooks: Vec<Box<dyn RunHook<S>>>) -> Self {
        Self { hooks }
    }

    /// Registra un hook al final del orden de invocación.
    pub fn push(&mut self, hook: Box<dyn RunHook<S>>) {
        self.hooks.push(hook);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Fase `begin`: una vez, antes del primer step.
    pub fn begin(&mut self) {
        for hook in self.hooks.iter_mut() {
            hook.begin();
        }
    }

    /// Fase `before_run`: recolecta un aporte opcional por hook, en orden
    /// de registro. El vector resultante alimenta `MergedRun::merge`.
    pub fn before_run(&mut self, ctx: &mut RunContext<'_, S>) -> Vec<Option<RunRequest>> {
        self.hooks.iter_mut().map(|hook| hook.before_run(ctx)).collect()
    }

    /// Fase `after_run`: entrega a cada hook su `RunResult`, uno por hook y
    /// en el mismo orden que `before_run`.
    pub fn after_run(&mut self,
                     ctx: &mut RunContext<'_, S>,
                     results: &[RunResult])
                     -> Result<(), HookError> {
        if results.len() != self.hooks.len() {
            return Err(HookError::ResultCountMismatch);
        }
        for (hook, result) in self.hooks.iter_mut().zip(results) {
            hook.after_run(ctx, result);
        }
        Ok(())
    }

    /// Fase `end`: una vez, al salir del loop por la razón que sea.
    pub fn end(&mut self, session: &S) {
        for hook in self.hooks.iter_mut() {
            hook.end(session);
        }
    }
}

impl<S> Default for HookStack<S> {
    fn default() -> Self {
        Self::new()
    }
}
