//! `MergedRun`: un step combinado a partir del caller y los hooks.

use indexmap::IndexMap;
use serde_json::Value;

use crate::errors::HookError;
use crate::fetch::{Fetch, FetchValues};
use crate::run::RunRequest;

use super::merge_options;

/// Step combinado: el request original del caller más los aportes de los
/// hooks, plegados en orden de registro.
///
/// El fetch combinado es una secuencia cuyo slot 0 es el fetch del caller,
/// seguido de un slot por hook aportante; `slots` recuerda qué slot ocupa
/// cada hook (`None` = sin aporte en este step) para poder repartir los
/// resultados de vuelta.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedRun {
    fetches: Fetch,
    bindings: IndexMap<String, Value>,
    options: Option<Value>,
    slots: Vec<Option<usize>>,
}

impl MergedRun {
    /// Pliega el request original y los aportes (uno opcional por hook, en
    /// orden de registro) en un único step.
    ///
    /// Política de colisiones:
    /// - `bindings`: un nombre de input ya ligado por el caller o por un
    ///   hook anterior produce `HookError::BindingConflict`.
    /// - `options`: merge shallow en orden de aporte; claves posteriores
    ///   reemplazan a las anteriores (ver `merge_options`).
    /// - `fetches`: sin colisión posible, cada aportante ocupa su slot.
    pub fn merge(original: &RunRequest,
                 contributions: &[Option<RunRequest>])
                 -> Result<MergedRun, HookError> {
        let mut parts = vec![original.fetches.clone()];
        let mut slots = Vec::with_capacity(contributions.len());
        let mut bindings = original.bindings.clone().unwrap_or_default();
        let mut options = original.options.clone();

        for contribution in contributions {
            let Some(request) = contribution else {
                slots.push(None);
                continue;
            };
            slots.push(Some(parts.len()));
            parts.push(request.fetches.clone());

            if let Some(extra) = &request.bindings {
                for (name, value) in extra {
                    if bindings.contains_key(name) {
                        return Err(HookError::BindingConflict(name.clone()));
                    }
                    bindings.insert(name.clone(), value.clone());
                }
            }
            if let Some(extra) = &request.options {
                options = Some(match options.take() {
                    Some(base) => merge_options(&base, extra),
                    None => extra.clone(),
                });
            }
        }

        Ok(MergedRun { fetches: Fetch::Seq(parts),
                       bindings,
                       options,
                       slots })
    }

    /// Árbol de fetches combinado a ejecutar (slot 0 = caller).
    #[inline]
    pub fn fetches(&self) -> &Fetch {
        &self.fetches
    }

    /// Bindings combinados, libres de colisiones.
    #[inline]
    pub fn bindings(&self) -> &IndexMap<String, Value> {
        &self.bindings
    }

    /// Options efectivas del step; ausente si nadie las aportó.
    #[inline]
    pub fn options(&self) -> Option<&Value> {
        self.options.as_ref()
    }

    /// Cantidad de hooks considerados en el merge (aporten o no).
    #[inline]
    pub fn hook_count(&self) -> usize {
        self.slots.len()
    }

    /// Reparte los valores del step ejecutado: la porción del caller más
    /// una porción opcional por hook, en orden de registro.
    ///
    /// `values` debe replicar la forma del fetch combinado; si no, el step
    /// ejecutó otra cosa y se reporta `HookError::ResultShapeMismatch`.
    pub fn split_results(&self, values: FetchValues) -> Result<SplitRunValues, HookError> {
        if !values.mirrors(&self.fetches) {
            return Err(HookError::ResultShapeMismatch);
        }
        let FetchValues::Seq(parts) = values else {
            return Err(HookError::ResultShapeMismatch);
        };
        let mut parts: Vec<Option<FetchValues>> = parts.into_iter().map(Some).collect();

        let Some(caller) = parts.get_mut(0).and_then(Option::take) else {
            return Err(HookError::ResultShapeMismatch);
        };
        let mut per_hook = Vec::with_capacity(self.slots.len());
        for slot in &self.slots {
            match slot {
                None => per_hook.push(None),
                Some(idx) => match parts.get_mut(*idx).and_then(Option::take) {
                    Some(part) => per_hook.push(Some(part)),
                    None => return Err(HookError::ResultShapeMismatch),
                },
            }
        }
        Ok(SplitRunValues { caller, per_hook })
    }
}

/// Resultado del reparto de un step: valores del caller y porción por hook.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitRunValues {
    /// Valores correspondientes al fetch original del caller.
    pub caller: FetchValues,
    /// Una porción por hook, en orden de registro (`None` = sin aporte).
    pub per_hook: Vec<Option<FetchValues>>,
}
