//! Valores resultantes de un step, espejo estructural de un `Fetch`.
//!
//! Las hojas son `serde_json::Value`: el payload es neutro y esta capa no
//! interpreta su semántica. La garantía central es estructural: el árbol de
//! valores replica exactamente la forma del árbol de fetches que lo pidió.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Fetch;
use crate::errors::HookError;

/// Valores computados con la misma forma que el `Fetch` que los solicitó.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FetchValues {
    /// Valor de un nodo único.
    Node(Value),
    /// Valores de una secuencia, en el mismo orden.
    Seq(Vec<FetchValues>),
    /// Valores de un mapping, mismas claves y mismo orden.
    Map(IndexMap<String, FetchValues>),
}

impl FetchValues {
    /// Verifica que este árbol replica exactamente la forma de `fetch`:
    /// mismos casos, mismas longitudes, mismas claves en el mismo orden.
    pub fn mirrors(&self, fetch: &Fetch) -> bool {
        match (self, fetch) {
            (FetchValues::Node(_), Fetch::Node(_)) => true,
            (FetchValues::Seq(vs), Fetch::Seq(fs)) => {
                vs.len() == fs.len() && vs.iter().zip(fs).all(|(v, f)| v.mirrors(f))
            }
            (FetchValues::Map(vm), Fetch::Map(fm)) => {
                vm.len() == fm.len()
                    && vm.iter()
                         .zip(fm.iter())
                         .all(|((vk, v), (fk, f))| vk == fk && v.mirrors(f))
            }
            _ => false,
        }
    }

    /// Construye el espejo de `fetch` resolviendo cada hoja vía `lookup`.
    /// Un nombre de nodo que `lookup` no conoce se reporta como
    /// `HookError::UnknownFetch`; esta capa no tiene panics.
    pub fn resolve_with<F>(fetch: &Fetch, lookup: &mut F) -> Result<FetchValues, HookError>
        where F: FnMut(&str) -> Option<Value>
    {
        match fetch {
            Fetch::Node(name) => lookup(name).map(FetchValues::Node)
                                             .ok_or_else(|| HookError::UnknownFetch(name.clone())),
            Fetch::Seq(items) => {
                let mut out = Vec::with_capacity(items.len());
                for f in items {
                    out.push(Self::resolve_with(f, lookup)?);
                }
                Ok(FetchValues::Seq(out))
            }
            Fetch::Map(entries) => {
                let mut out = IndexMap::with_capacity(entries.len());
                for (name, f) in entries {
                    out.insert(name.clone(), Self::resolve_with(f, lookup)?);
                }
                Ok(FetchValues::Map(out))
            }
        }
    }
}
