//! Guardia de NaN sobre un nodo escalar (típicamente el loss).

use serde_json::Value;
use train_hooks::{Fetch, FetchValues, RunContext, RunHook, RunRequest, RunResult};

/// Hook que vigila un nodo escalar y pide stop si el valor deja de ser un
/// número finito.
///
/// El protocolo no da canal de fallo a los callbacks, así que ambas
/// variantes paran el loop cooperativamente; `fail_on_nan` solo decide la
/// severidad del log (error vs warning).
#[derive(Debug)]
pub struct NanGuard {
    loss_node: String,
    fail_on_nan: bool,
}

impl NanGuard {
    /// Vigila `loss_node`; loggea a nivel error al detectar NaN.
    pub fn new(loss_node: impl Into<String>) -> Self {
        Self { loss_node: loss_node.into(),
               fail_on_nan: true }
    }

    /// Variante que solo advierte (y aun así para el loop).
    pub fn warn_only(loss_node: impl Into<String>) -> Self {
        Self { loss_node: loss_node.into(),
               fail_on_nan: false }
    }
}

impl<S> RunHook<S> for NanGuard {
    fn before_run(&mut self, _ctx: &mut RunContext<'_, S>) -> Option<RunRequest> {
        Some(RunRequest::new(Fetch::node(self.loss_node.as_str())))
    }

    fn after_run(&mut self, ctx: &mut RunContext<'_, S>, result: &RunResult) {
        let Some(FetchValues::Node(value)) = &result.results else {
            return;
        };
        // El payload JSON no representa NaN/inf: serde_json los colapsa a
        // null, así que null cuenta como valor no finito.
        let non_finite = match value {
            Value::Null => true,
            Value::Number(n) => n.as_f64().map(|f| !f.is_finite()).unwrap_or(false),
            _ => false,
        };
        if non_finite {
            if self.fail_on_nan {
                tracing::error!(node = %self.loss_node, "valor no finito; pidiendo stop");
            } else {
                tracing::warn!(node = %self.loss_node, "valor no finito; pidiendo stop");
            }
            ctx.request_stop();
        }
    }
}
