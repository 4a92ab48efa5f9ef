//! Demo ejecutable: una sesión de entrenamiento simulada con el stack de
//! monitores estándar colgado del loop canónico de hooks.
//!
//! Variables de entorno (cargadas vía dotenvy):
//! - `TRAIN_LAST_STEP`: step objetivo de `StopAfterSteps` (default 10).
//! - `TRAIN_NAN_AT`: step en el que el loss simulado degenera (default:
//!   nunca).

use std::cell::RefCell;
use std::rc::Rc;

use chrono::Utc;
use indexmap::IndexMap;
use serde_json::{json, Value};
use train_hooks::{FetchValues, HookError, HookStack, MergedRun, RunContext, RunRequest,
                  RunResult};
use train_monitors::{NanGuard, ProgressLogger, StopAfterSteps};
use uuid::Uuid;

/// Sesión simulada: resuelve nodos del plan a valores por step.
struct DemoSession {
    id: Uuid,
    step: u64,
    nan_at: Option<u64>,
}

impl DemoSession {
    fn new(nan_at: Option<u64>) -> Self {
        Self { id: Uuid::new_v4(),
               step: 0,
               nan_at }
    }

    /// Ejecuta un step: avanza el contador y resuelve el árbol combinado.
    fn execute(&mut self, merged: &MergedRun) -> Result<FetchValues, HookError> {
        self.step += 1;
        let step = self.step;
        // loss decreciente; degenerado en el step configurado (NaN llega
        // como null en el payload JSON)
        let loss = if self.nan_at == Some(step) {
            Value::Null
        } else {
            json!(1.0 / step as f64)
        };
        let lr = merged.bindings()
                       .get("learning_rate")
                       .cloned()
                       .unwrap_or(json!(0.01));
        FetchValues::resolve_with(merged.fetches(), &mut |node| match node {
            "train_op" => Some(Value::Null),
            "global_step" => Some(json!(step)),
            "loss" => Some(loss.clone()),
            "learning_rate" => Some(lr.clone()),
            _ => None,
        })
    }
}

type SharedSession = Rc<RefCell<DemoSession>>;

/// Corre el loop canónico (`begin` -> steps -> `end`) y devuelve cuántos
/// steps se ejecutaron. El stop flag se consulta una vez por iteración, al
/// cierre de la fase `after_run`.
fn run_demo_loop(session: &SharedSession,
                 stack: &mut HookStack<SharedSession>,
                 caller: &RunRequest)
                 -> Result<u64, HookError> {
    let mut steps = 0u64;
    stack.begin();
    loop {
        let mut ctx = RunContext::new(caller, session);
        let contributions = stack.before_run(&mut ctx);
        let merged = MergedRun::merge(caller, &contributions)?;
        tracing::debug!(nodes = ?merged.fetches().leaf_nodes(), "step combinado");

        let values = session.borrow_mut().execute(&merged)?;
        let split = merged.split_results(values)?;
        tracing::trace!(caller_values = ?split.caller, "porción del caller");

        let options = merged.options().cloned().unwrap_or(Value::Null);
        let metadata = json!({
            "session": session.borrow().id,
            "step": session.borrow().step,
            "ts": Utc::now(),
        });
        let results: Vec<RunResult> = split.per_hook
                                           .into_iter()
                                           .map(|part| RunResult::new(part, options.clone(), metadata.clone()))
                                           .collect();
        stack.after_run(&mut ctx, &results)?;

        steps += 1;
        if ctx.stop_requested() {
            break;
        }
    }
    stack.end(session);
    Ok(steps)
}

fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::try_from_default_env()
                             .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")))
        .init();

    let last_step = std::env::var("TRAIN_LAST_STEP")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(10);
    let nan_at = std::env::var("TRAIN_NAN_AT").ok().and_then(|v| v.parse().ok());

    let session: SharedSession = Rc::new(RefCell::new(DemoSession::new(nan_at)));
    let mut stack: HookStack<SharedSession> = HookStack::new();
    stack.push(Box::new(StopAfterSteps::at_step("global_step", last_step)));
    stack.push(Box::new(ProgressLogger::new(vec!["loss".to_string(), "learning_rate".to_string()], 2)));
    stack.push(Box::new(NanGuard::new("loss")));

    let caller = RunRequest::new("train_op")
        .with_bindings(IndexMap::from([("learning_rate".to_string(), json!(0.05))]));

    match run_demo_loop(&session, &mut stack, &caller) {
        Ok(steps) => {
            println!("Sesión demo {}: {steps} steps ejecutados", session.borrow().id);
        }
        Err(e) => {
            tracing::error!(error = %e, "el loop demo terminó con error");
            std::process::exit(1);
        }
    }
}
