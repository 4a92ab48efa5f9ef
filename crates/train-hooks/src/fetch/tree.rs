//! Estructura recursiva de outputs solicitados a un step.
//!
//! Un `Fetch` identifica outputs del plan de cómputo por nombre. Puede ser
//! un nodo único, una secuencia ordenada o un mapping nombre -> fetch, con
//! anidamiento arbitrario. La forma solicitada se replica 1:1 en los
//! resultados del step (ver `FetchValues::mirrors`).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Outputs solicitados para un step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Fetch {
    /// Un output único del plan, identificado por nombre.
    Node(String),
    /// Secuencia ordenada de fetches.
    Seq(Vec<Fetch>),
    /// Mapping nombre -> fetch. El orden de inserción se preserva.
    Map(IndexMap<String, Fetch>),
}

impl Fetch {
    /// Atajo para el caso más común: un único nodo por nombre.
    #[inline]
    pub fn node(name: impl Into<String>) -> Self {
        Fetch::Node(name.into())
    }

    /// Nombres de nodo referenciados por el árbol, en preorden.
    pub fn leaf_nodes(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Fetch::Node(name) => out.push(name.as_str()),
            Fetch::Seq(items) => {
                for f in items {
                    f.collect_leaves(out);
                }
            }
            Fetch::Map(entries) => {
                for f in entries.values() {
                    f.collect_leaves(out);
                }
            }
        }
    }
}

impl From<&str> for Fetch {
    fn from(name: &str) -> Self {
        Fetch::Node(name.to_string())
    }
}

impl From<String> for Fetch {
    fn from(name: String) -> Self {
        Fetch::Node(name)
    }
}

impl From<Vec<Fetch>> for Fetch {
    fn from(items: Vec<Fetch>) -> Self {
        Fetch::Seq(items)
    }
}

impl From<IndexMap<String, Fetch>> for Fetch {
    fn from(entries: IndexMap<String, Fetch>) -> Self {
        Fetch::Map(entries)
    }
}
