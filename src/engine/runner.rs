use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use crate::engine::llm_client::TextModel;
use crate::engine::prompt_builder::PromptBuilder;
use crate::error::{FlashgenError, Result};
use crate::model::report::{RunReport, TopicOutcome};
use crate::sanitize::{sanitize_csv_content, sanitize_filename, CSV_EXTENSION};

/// Drives one generation batch, one topic at a time.
pub struct TopicRunner<'a, M: TextModel> {
    model: &'a M,
    prompts: &'a PromptBuilder,
    output_dir: PathBuf,
}

impl<'a, M: TextModel> TopicRunner<'a, M> {
    pub fn new(model: &'a M, prompts: &'a PromptBuilder, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            model,
            prompts,
            output_dir: output_dir.into(),
        }
    }

    /// Fails only when the output directory cannot be created. Every per-topic
    /// failure is logged and recorded in the report instead.
    pub fn run(&self, topics: &[String]) -> Result<RunReport> {
        fs::create_dir_all(&self.output_dir).map_err(|source| FlashgenError::OutputDir {
            path: self.output_dir.clone(),
            source,
        })?;

        let mut report = RunReport::default();
        // file name -> topic that wrote it
        let mut written: HashMap<String, String> = HashMap::new();

        for topic in topics {
            let file_name = format!("{}.{CSV_EXTENSION}", sanitize_filename(topic));
            let outcome = match self.process_topic(topic, &file_name, &written) {
                Ok((path, cards)) => {
                    info!("Wrote {} ({} cards)", path.display(), cards);
                    written.insert(file_name, topic.clone());
                    TopicOutcome::Written { path, cards }
                }
                Err(error) => {
                    error!("Error generating '{}': {}", file_name, error);
                    TopicOutcome::Failed { file_name, error }
                }
            };
            report.outcomes.push(outcome);
        }

        Ok(report)
    }

    fn process_topic(
        &self,
        topic: &str,
        file_name: &str,
        written: &HashMap<String, String>,
    ) -> Result<(PathBuf, usize)> {
        // sanitized names never start with '.', so this is an empty base name
        if file_name.starts_with('.') {
            return Err(FlashgenError::EmptyFilename(topic.to_string()));
        }
        if let Some(first_topic) = written.get(file_name) {
            warn!(
                "Topics '{}' and '{}' share the file name {}; skipping the later one",
                first_topic, topic, file_name
            );
            return Err(FlashgenError::FilenameCollision {
                topic: topic.to_string(),
                first_topic: first_topic.clone(),
                file_name: file_name.to_string(),
            });
        }

        let path = self.output_dir.join(file_name);
        info!("Generating {} ...", file_name);
        let response = self.model.complete(&self.prompts.build(topic))?;
        let cards = save_csv(&path, &response)?;
        Ok((path, cards))
    }
}

/// Writes repaired model output, always ending with exactly one newline.
/// Returns the number of card lines written.
pub fn save_csv(path: &Path, response: &str) -> Result<usize> {
    let mut contents = sanitize_csv_content(response);
    let cards = contents.lines().count();
    if cards == 0 {
        warn!("Model returned no cards for {}", path.display());
    }

    contents.push('\n');
    fs::write(path, contents).map_err(|source| FlashgenError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(cards)
}
