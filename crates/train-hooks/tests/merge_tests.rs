use indexmap::IndexMap;
use serde_json::{json, Value};
use train_hooks::{Fetch, FetchValues, HookError, MergedRun, RunRequest};

fn bindings(entries: &[(&str, Value)]) -> IndexMap<String, Value> {
    entries.iter()
           .map(|(k, v)| (k.to_string(), v.clone()))
           .collect()
}

#[test]
fn merge_assigns_one_slot_per_contributing_hook() {
    let original = RunRequest::new(Fetch::node("train_op"));
    let contributions = vec![Some(RunRequest::new(Fetch::node("loss"))),
                             None,
                             Some(RunRequest::new(Fetch::node("global_step")))];

    let merged = MergedRun::merge(&original, &contributions).expect("merge sin colisiones");
    assert_eq!(merged.hook_count(), 3);

    // slot 0 = caller, luego un slot por hook aportante, en orden
    let Fetch::Seq(parts) = merged.fetches() else {
        panic!("el fetch combinado debe ser una secuencia");
    };
    assert_eq!(parts.len(), 3);
    assert_eq!(parts[0], Fetch::node("train_op"));
    assert_eq!(parts[1], Fetch::node("loss"));
    assert_eq!(parts[2], Fetch::node("global_step"));
}

#[test]
fn merge_accumulates_bindings_in_contribution_order() {
    let original = RunRequest::new(Fetch::node("train_op"))
        .with_bindings(bindings(&[("learning_rate", json!(0.05))]));
    let contributions =
        vec![Some(RunRequest::new(Fetch::node("loss")).with_bindings(bindings(&[("dropout", json!(0.5))]))),
             Some(RunRequest::new(Fetch::node("step")).with_bindings(bindings(&[("seed", json!(7))])))];

    let merged = MergedRun::merge(&original, &contributions).unwrap();
    let keys: Vec<&str> = merged.bindings().keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["learning_rate", "dropout", "seed"]);
    assert_eq!(merged.bindings()["seed"], json!(7));
}

#[test]
fn merge_rejects_binding_name_collision() {
    let original = RunRequest::new(Fetch::node("train_op"))
        .with_bindings(bindings(&[("learning_rate", json!(0.05))]));
    let contributions = vec![Some(RunRequest::new(Fetch::node("loss"))
        .with_bindings(bindings(&[("learning_rate", json!(0.01))])))];

    let err = MergedRun::merge(&original, &contributions).unwrap_err();
    assert_eq!(err, HookError::BindingConflict("learning_rate".to_string()));
}

#[test]
fn merge_rejects_collision_between_two_hooks() {
    let original = RunRequest::new(Fetch::node("train_op"));
    let contributions =
        vec![Some(RunRequest::new(Fetch::node("a")).with_bindings(bindings(&[("x", json!(1))]))),
             Some(RunRequest::new(Fetch::node("b")).with_bindings(bindings(&[("x", json!(2))])))];

    let err = MergedRun::merge(&original, &contributions).unwrap_err();
    assert_eq!(err, HookError::BindingConflict("x".to_string()));
}

#[test]
fn merge_options_shallow_last_writer_wins() {
    let original = RunRequest::new(Fetch::node("train_op"))
        .with_options(json!({"trace": "none", "timeout_ms": 100}));
    let contributions =
        vec![Some(RunRequest::new(Fetch::node("a")).with_options(json!({"trace": "full"}))),
             Some(RunRequest::new(Fetch::node("b")).with_options(json!({"sample": true})))];

    let merged = MergedRun::merge(&original, &contributions).unwrap();
    assert_eq!(merged.options(),
               Some(&json!({"trace": "full", "timeout_ms": 100, "sample": true})));
}

#[test]
fn merge_options_absent_when_nobody_contributes() {
    let original = RunRequest::new(Fetch::node("train_op"));
    let merged = MergedRun::merge(&original, &[None, None]).unwrap();
    assert_eq!(merged.options(), None);
    assert!(merged.bindings().is_empty());
}

#[test]
fn split_returns_caller_slice_and_one_slice_per_hook() {
    let original = RunRequest::new(Fetch::node("train_op"));
    let contributions = vec![Some(RunRequest::new(Fetch::node("loss"))),
                             None,
                             Some(RunRequest::new(Fetch::node("step")))];
    let merged = MergedRun::merge(&original, &contributions).unwrap();

    let values = FetchValues::resolve_with(merged.fetches(), &mut |node| match node {
        "train_op" => Some(Value::Null),
        "loss" => Some(json!(0.25)),
        "step" => Some(json!(12)),
        _ => None,
    })
    .unwrap();

    let split = merged.split_results(values).unwrap();
    assert_eq!(split.caller, FetchValues::Node(Value::Null));
    assert_eq!(split.per_hook.len(), 3);
    assert_eq!(split.per_hook[0], Some(FetchValues::Node(json!(0.25))));
    assert_eq!(split.per_hook[1], None);
    assert_eq!(split.per_hook[2], Some(FetchValues::Node(json!(12))));
}

#[test]
fn split_rejects_values_that_do_not_mirror_the_merged_fetches() {
    let original = RunRequest::new(Fetch::node("train_op"));
    let merged = MergedRun::merge(&original, &[Some(RunRequest::new(Fetch::node("loss")))]).unwrap();

    // dos slots esperados, llega uno solo
    let short = FetchValues::Seq(vec![FetchValues::Node(Value::Null)]);
    assert_eq!(merged.split_results(short).unwrap_err(),
               HookError::ResultShapeMismatch);

    // forma correcta en longitud pero no en estructura interna
    let wrong = FetchValues::Seq(vec![FetchValues::Node(Value::Null),
                                      FetchValues::Seq(vec![])]);
    assert_eq!(merged.split_results(wrong).unwrap_err(),
               HookError::ResultShapeMismatch);
}

#[test]
fn resolve_with_reports_unknown_nodes() {
    let fetch = Fetch::Seq(vec![Fetch::node("known"), Fetch::node("missing")]);
    let err = FetchValues::resolve_with(&fetch, &mut |node| match node {
        "known" => Some(json!(1)),
        _ => None,
    })
    .unwrap_err();
    assert_eq!(err, HookError::UnknownFetch("missing".to_string()));
}
