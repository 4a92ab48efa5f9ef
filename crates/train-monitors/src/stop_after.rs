//! Stop cooperativo al alcanzar un step objetivo.

use train_hooks::{Fetch, FetchValues, RunContext, RunHook, RunRequest, RunResult};

/// Criterio de parada del monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StopMode {
    /// Parar cuando el contador alcance este valor absoluto.
    LastStep(u64),
    /// Parar tras esta cantidad de steps desde el primero observado.
    NumSteps(u64),
}

/// Hook que pide stop cuando el contador de steps llega a su objetivo.
///
/// En cada `before_run` pide el nodo contador configurado; en `after_run`
/// lee el valor observado y pide stop al alcanzar el objetivo. Con
/// `after`, el objetivo se fija relativo al primer valor observado, así el
/// monitor funciona igual sobre sesiones retomadas a mitad de
/// entrenamiento.
#[derive(Debug)]
pub struct StopAfterSteps {
    step_node: String,
    mode: StopMode,
    target: Option<u64>,
}

impl StopAfterSteps {
    /// Para cuando el contador `step_node` alcance el valor `last_step`.
    pub fn at_step(step_node: impl Into<String>, last_step: u64) -> Self {
        Self { step_node: step_node.into(),
               mode: StopMode::LastStep(last_step),
               target: Some(last_step) }
    }

    /// Para tras `num_steps` steps contados desde el primero observado.
    pub fn after(step_node: impl Into<String>, num_steps: u64) -> Self {
        Self { step_node: step_node.into(),
               mode: StopMode::NumSteps(num_steps),
               target: None }
    }
}

impl<S> RunHook<S> for StopAfterSteps {
    fn before_run(&mut self, _ctx: &mut RunContext<'_, S>) -> Option<RunRequest> {
        Some(RunRequest::new(Fetch::node(self.step_node.as_str())))
    }

    fn after_run(&mut self, ctx: &mut RunContext<'_, S>, result: &RunResult) {
        let Some(FetchValues::Node(value)) = &result.results else {
            return;
        };
        let Some(step) = value.as_u64() else {
            return;
        };
        let target = match self.mode {
            StopMode::LastStep(last) => last,
            StopMode::NumSteps(n) => {
                *self.target.get_or_insert(step + n.saturating_sub(1))
            }
        };
        if step >= target {
            tracing::debug!(step, target, "objetivo de steps alcanzado; pidiendo stop");
            ctx.request_stop();
        }
    }
}
