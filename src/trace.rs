//! Optional structured trace stream.
//!
//! The engines emit events at well-defined points (candidate counted, level
//! finished, tree built, pattern emitted, rule evaluated). Tracing is purely
//! observational: nothing in the mining contract depends on a sink seeing an
//! event. Events carry interned [`ItemId`]s; resolve them through
//! [`Corpus::item`](crate::Corpus::item).

use std::sync::Mutex;

use serde::Serialize;

use crate::corpus::ItemId;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TraceEvent {
    /// An Apriori candidate was counted against the corpus.
    CandidateEvaluated { itemset: Vec<ItemId>, support: u64, frequent: bool },
    /// An Apriori level finished filtering.
    LevelFinished { size: usize, survivors: usize },
    /// An FP-tree (initial or conditional) was constructed.
    TreeBuilt { nodes: usize, items: usize },
    /// A frequent pattern was emitted with its exact support.
    PatternEmitted { itemset: Vec<ItemId>, support: u64 },
    /// A candidate rule was checked against the confidence threshold.
    RuleEvaluated {
        antecedent: Vec<ItemId>,
        consequent: Vec<ItemId>,
        confidence: f64,
        accepted: bool,
    },
}

/// Receiver for [`TraceEvent`]s. Sinks must be `Sync`: the engines emit from
/// rayon worker threads.
pub trait TraceSink: Sync {
    fn record(&self, event: TraceEvent);
}

/// Discards every event. The default sink.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl TraceSink for NoopSink {
    fn record(&self, _event: TraceEvent) {}
}

/// Buffers events in memory, in arrival order.
#[derive(Debug, Default)]
pub struct CollectingSink {
    events: Mutex<Vec<TraceEvent>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drains and returns everything recorded so far.
    pub fn take(&self) -> Vec<TraceEvent> {
        std::mem::take(&mut *self.events.lock().unwrap_or_else(|e| e.into_inner()))
    }
}

impl TraceSink for CollectingSink {
    fn record(&self, event: TraceEvent) {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collecting_sink_buffers_in_order() {
        let sink = CollectingSink::new();
        sink.record(TraceEvent::LevelFinished { size: 1, survivors: 3 });
        sink.record(TraceEvent::LevelFinished { size: 2, survivors: 0 });
        let events = sink.take();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], TraceEvent::LevelFinished { size: 1, survivors: 3 });
        assert!(sink.take().is_empty());
    }
}
