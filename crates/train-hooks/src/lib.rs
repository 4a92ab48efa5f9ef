//! train-hooks: protocolo de extensión (hooks) para el loop de steps de una
//! sesión de entrenamiento gestionada.
//!
//! Cuatro formas cooperantes, sin control de flujo propio:
//! - [`RunHook`]: cuatro callbacks de ciclo de vida con default no-op.
//! - [`RunRequest`]: aporte inmutable de fetches/bindings/options a un step.
//! - [`RunContext`]: request original + sesión opaca + stop flag cooperativo,
//!   uno por iteración.
//! - [`RunResult`]: resultados espejo + options + metadata, uno por hook.
//!
//! El loop dueño (externo a esta crate) ejecuta:
//! `begin` una vez -> { `before_run` -> merge -> ejecutar step ->
//! `after_run` -> consultar stop flag } -> `end` una vez.
//!
//! Esta capa no define concurrencia: los callbacks de una fase se invocan
//! uno tras otro, en orden de registro, sin solapamiento. La única
//! cancelación es el stop flag cooperativo, efectivo en el borde de la
//! iteración.

pub mod errors;
pub mod fetch;
pub mod hook;
pub mod merge;
pub mod run;

pub use errors::HookError;
pub use fetch::{Fetch, FetchValues};
pub use hook::{HookStack, RunHook};
pub use merge::{merge_options, MergedRun, SplitRunValues};
pub use run::{RunContext, RunRequest, RunResult};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Hook que cuenta callbacks y pide stop al alcanzar un contador.
    struct CountingHook {
        stop_at: u64,
        state: Rc<RefCell<HookTrace>>,
    }

    #[derive(Default)]
    struct HookTrace {
        begins: usize,
        befores: usize,
        afters: usize,
        ends: usize,
        last_counter: u64,
    }

    impl RunHook<String> for CountingHook {
        fn begin(&mut self) {
            self.state.borrow_mut().begins += 1;
        }

        fn before_run(&mut self, ctx: &mut RunContext<'_, String>) -> Option<RunRequest> {
            assert!(matches!(ctx.original_request().fetches, Fetch::Node(_)));
            self.state.borrow_mut().befores += 1;
            Some(RunRequest::new(Fetch::node("counter")))
        }

        fn after_run(&mut self, ctx: &mut RunContext<'_, String>, result: &RunResult) {
            let mut trace = self.state.borrow_mut();
            trace.afters += 1;
            if let Some(FetchValues::Node(value)) = &result.results {
                trace.last_counter = value.as_u64().unwrap();
            }
            if trace.last_counter >= self.stop_at {
                ctx.request_stop();
            }
        }

        fn end(&mut self, session: &String) {
            assert_eq!(session, "sess-demo");
            self.state.borrow_mut().ends += 1;
        }
    }

    #[test]
    fn full_loop_with_counting_hook_stops_cooperatively() {
        let session = "sess-demo".to_string();
        let trace = Rc::new(RefCell::new(HookTrace::default()));
        let mut stack: HookStack<String> = HookStack::new();
        stack.push(Box::new(CountingHook { stop_at: 3, state: trace.clone() }));

        let caller = RunRequest::new(Fetch::node("train_op"));
        let mut counter = 0u64;

        stack.begin();
        loop {
            let mut ctx = RunContext::new(&caller, &session);
            let contributions = stack.before_run(&mut ctx);
            let merged = MergedRun::merge(&caller, &contributions).unwrap();

            // step simulado: resolver el árbol combinado contra un contador
            counter += 1;
            let values = FetchValues::resolve_with(merged.fetches(), &mut |node| match node {
                "train_op" => Some(Value::Null),
                "counter" => Some(json!(counter)),
                _ => None,
            })
            .unwrap();

            let split = merged.split_results(values).unwrap();
            let options = merged.options().cloned().unwrap_or(Value::Null);
            let results: Vec<RunResult> = split.per_hook
                                               .into_iter()
                                               .map(|part| RunResult::new(part, options.clone(), json!({})))
                                               .collect();
            stack.after_run(&mut ctx, &results).unwrap();
            if ctx.stop_requested() {
                break;
            }
        }
        stack.end(&session);

        let trace = trace.borrow();
        assert_eq!(trace.begins, 1, "begin se invoca exactamente una vez");
        assert_eq!(trace.befores, 3, "un before_run por iteración");
        assert_eq!(trace.afters, 3, "un after_run por iteración, pareado");
        assert_eq!(trace.ends, 1, "end se invoca exactamente una vez");
        assert_eq!(trace.last_counter, 3, "el stop llega en el borde de la iteración 3");
        assert_eq!(counter, 3, "el loop no inicia otra iteración tras el stop");
    }

    #[test]
    fn hooks_run_in_registration_order_within_each_phase() {
        struct OrderHook {
            tag: &'static str,
            order: Rc<RefCell<Vec<String>>>,
        }
        impl RunHook<String> for OrderHook {
            fn before_run(&mut self, _ctx: &mut RunContext<'_, String>) -> Option<RunRequest> {
                self.order.borrow_mut().push(format!("before:{}", self.tag));
                None
            }
            fn after_run(&mut self, _ctx: &mut RunContext<'_, String>, _result: &RunResult) {
                self.order.borrow_mut().push(format!("after:{}", self.tag));
            }
        }

        let session = "sess-demo".to_string();
        let order = Rc::new(RefCell::new(Vec::new()));
        let mut stack: HookStack<String> = HookStack::new();
        stack.push(Box::new(OrderHook { tag: "a", order: order.clone() }));
        stack.push(Box::new(OrderHook { tag: "b", order: order.clone() }));

        let caller = RunRequest::new(Fetch::node("train_op"));
        let mut ctx = RunContext::new(&caller, &session);
        let contributions = stack.before_run(&mut ctx);
        assert_eq!(contributions, vec![None, None]);

        let results = vec![RunResult::new(None, Value::Null, Value::Null),
                           RunResult::new(None, Value::Null, Value::Null)];
        stack.after_run(&mut ctx, &results).unwrap();

        assert_eq!(*order.borrow(),
                   vec!["before:a", "before:b", "after:a", "after:b"]);
    }

    #[test]
    fn after_run_rejects_wrong_result_count() {
        struct Silent;
        impl RunHook<String> for Silent {}

        let session = "sess-demo".to_string();
        let mut stack: HookStack<String> = HookStack::with_hooks(vec![Box::new(Silent)]);
        let caller = RunRequest::new(Fetch::node("train_op"));
        let mut ctx = RunContext::new(&caller, &session);

        let err = stack.after_run(&mut ctx, &[]).unwrap_err();
        assert_eq!(err, HookError::ResultCountMismatch);
    }
}
