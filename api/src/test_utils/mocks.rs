//! Mock implementations of port traits
//!
//! Scripted standings sources whose behaviour tests can configure and change
//! between refreshes, and which count how often they were called.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use crate::domain::entities::RawRow;
use crate::domain::ports::StandingsSource;
use crate::error::SourceError;

use super::fixtures::csv_rows;

// ============================================================================
// Scripted Standings Source
// ============================================================================

/// What a scripted source does on its next fetch
#[derive(Debug, Clone)]
pub enum SourceBehavior {
    Rows(Vec<RawRow>),
    RateLimited,
    ApiError(u16),
}

pub struct ScriptedSource {
    label: String,
    behavior: RwLock<SourceBehavior>,
    calls: AtomicUsize,
}

impl ScriptedSource {
    pub fn new(label: &str, behavior: SourceBehavior) -> Arc<Self> {
        Arc::new(Self {
            label: label.to_string(),
            behavior: RwLock::new(behavior),
            calls: AtomicUsize::new(0),
        })
    }

    /// A source that returns the given CSV text as rows
    pub fn serving(label: &str, csv: &str) -> Arc<Self> {
        Self::new(label, SourceBehavior::Rows(csv_rows(csv)))
    }

    pub fn rate_limited(label: &str) -> Arc<Self> {
        Self::new(label, SourceBehavior::RateLimited)
    }

    pub fn failing(label: &str, status: u16) -> Arc<Self> {
        Self::new(label, SourceBehavior::ApiError(status))
    }

    pub fn set_behavior(&self, behavior: SourceBehavior) {
        *self.behavior.write().unwrap() = behavior;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StandingsSource for ScriptedSource {
    fn label(&self) -> String {
        self.label.clone()
    }

    async fn fetch_rows(&self) -> Result<Vec<RawRow>, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let behavior = self.behavior.read().unwrap().clone();
        match behavior {
            SourceBehavior::Rows(rows) => Ok(rows),
            SourceBehavior::RateLimited => Err(SourceError::RateLimited {
                label: self.label.clone(),
            }),
            SourceBehavior::ApiError(status) => Err(SourceError::Api {
                status,
                message: format!("{} failed", self.label),
            }),
        }
    }
}

/// Erase a list of scripted sources into the chain's element type
pub fn as_sources(sources: &[Arc<ScriptedSource>]) -> Vec<Arc<dyn StandingsSource>> {
    sources
        .iter()
        .map(|s| s.clone() as Arc<dyn StandingsSource>)
        .collect()
}
