//! Merge shallow de options JSON, determinista.
//!
//! Las claves de `b` reemplazan a las de `a` cuando ambos son objetos; si
//! alguno de los dos no es objeto, `b` tiene precedencia completa. La
//! semántica se mantiene simple y predecible a propósito.

use serde_json::Value;

/// Merge shallow: keys from `b` override keys from `a` when both are objects.
pub fn merge_options(a: &Value, b: &Value) -> Value {
    match (a, b) {
        (Value::Object(ma), Value::Object(mb)) => {
            let mut out = ma.clone();
            for (k, v) in mb.iter() {
                out.insert(k.clone(), v.clone());
            }
            Value::Object(out)
        }
        // Non-objects: override
        (_, other) => other.clone(),
    }
}
