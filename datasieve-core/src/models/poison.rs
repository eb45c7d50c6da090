use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// How poison was injected into a synthetic dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InjectionMechanism {
    LabelFlip,
    TriggerPatch,
    OutlierInjection,
}

/// Ground-truth poison bookkeeping, available only in synthetic/test mode.
///
/// Never consumed by detector logic — only by the orchestrator's accuracy
/// computation, so detectors cannot cheat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoisonMetadata {
    pub indices: BTreeSet<usize>,
    pub mechanism: Option<InjectionMechanism>,
}

impl PoisonMetadata {
    pub fn new(indices: BTreeSet<usize>, mechanism: Option<InjectionMechanism>) -> Self {
        Self { indices, mechanism }
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Detector-derived poisoning evidence fed into the risk engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PoisoningInfo {
    pub suspected_indices: BTreeSet<usize>,
    /// Trigger detector severity in [0, 100], if that method ran.
    pub trigger_score: f64,
}
