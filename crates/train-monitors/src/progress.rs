//! Logging periódico de nodos observados.

use indexmap::IndexMap;
use train_hooks::{Fetch, FetchValues, RunContext, RunHook, RunRequest, RunResult};

/// Hook que loggea los valores de un conjunto de nodos cada N steps.
///
/// Pide los nodos configurados como mapping nombre -> nodo (el orden de
/// configuración se preserva en el log) y emite una línea estructurada vía
/// `tracing` cuando el período lo indica. No pide stop nunca.
pub struct ProgressLogger {
    nodes: Vec<String>,
    every_n_steps: u64,
    seen: u64,
}

impl ProgressLogger {
    /// Loggea `nodes` cada `every_n_steps` steps (mínimo 1).
    pub fn new(nodes: Vec<String>, every_n_steps: u64) -> Self {
        Self { nodes,
               every_n_steps: every_n_steps.max(1),
               seen: 0 }
    }
}

impl<S> RunHook<S> for ProgressLogger {
    fn begin(&mut self) {
        self.seen = 0;
    }

    fn before_run(&mut self, _ctx: &mut RunContext<'_, S>) -> Option<RunRequest> {
        let entries: IndexMap<String, Fetch> =
            self.nodes
                .iter()
                .map(|name| (name.clone(), Fetch::node(name.as_str())))
                .collect();
        Some(RunRequest::new(entries))
    }

    fn after_run(&mut self, _ctx: &mut RunContext<'_, S>, result: &RunResult) {
        self.seen += 1;
        if self.seen % self.every_n_steps != 0 {
            return;
        }
        let Some(FetchValues::Map(values)) = &result.results else {
            return;
        };
        let rendered = values.iter()
                             .map(|(name, part)| match part {
                                 FetchValues::Node(value) => format!("{name} = {value}"),
                                 other => format!("{name} = {other:?}"),
                             })
                             .collect::<Vec<_>>()
                             .join(", ");
        tracing::info!(step = self.seen, "{rendered}");
    }
}
