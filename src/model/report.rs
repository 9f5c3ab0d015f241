use std::path::PathBuf;

use crate::error::FlashgenError;

#[derive(Debug)]
pub enum TopicOutcome {
    Written { path: PathBuf, cards: usize },
    Failed { file_name: String, error: FlashgenError },
}

/// Result of one generation batch, in topic order.
#[derive(Debug, Default)]
pub struct RunReport {
    pub outcomes: Vec<TopicOutcome>,
}

impl RunReport {
    pub fn written(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, TopicOutcome::Written { .. }))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.written()
    }
}
