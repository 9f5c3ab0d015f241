use crate::config::{Config, DEFAULT_LANGUAGE, DEFAULT_NUM_QUESTIONS};

/// Builds the flashcard prompt sent to the LLM.
/// Formatting only: no networking, no parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptBuilder {
    language: String,
    num_questions: u32,
}

/// Per-call replacements for the builder's language and card count.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptOverrides<'a> {
    pub language: Option<&'a str>,
    pub num_questions: Option<u32>,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_LANGUAGE, DEFAULT_NUM_QUESTIONS)
    }
}

impl PromptBuilder {
    pub fn new(language: impl Into<String>, num_questions: u32) -> Self {
        Self {
            language: language.into(),
            num_questions,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.language.clone(), config.num_questions)
    }

    pub fn build(&self, topic: &str) -> String {
        self.build_with(topic, PromptOverrides::default())
    }

    pub fn build_with(&self, topic: &str, overrides: PromptOverrides<'_>) -> String {
        let language = overrides.language.unwrap_or(&self.language);
        let num_questions = overrides.num_questions.unwrap_or(self.num_questions);

        let mut prompt = String::new();
        push_topic_section(&mut prompt, topic, language);
        push_task(&mut prompt, num_questions);
        push_guidelines(&mut prompt, num_questions);
        push_output_requirements(&mut prompt, language);
        prompt
    }
}

fn push_topic_section(prompt: &mut String, topic: &str, language: &str) {
    prompt.push_str("What follows is the name of a topic in ");
    prompt.push_str(language);
    prompt.push_str(" for an expert-level exam.\n\n");
    prompt.push_str(topic);
    prompt.push_str("\n\n");
}

fn push_task(prompt: &mut String, num_questions: u32) {
    prompt.push_str(&format!(
        "Your task is to generate exactly {num_questions} double-sided Anki flashcards (in CSV format) \
containing expert-level questions and answers related to the topic. These cards are intended for a user \
preparing for elite-level technical certifications, advanced competitions, or high-difficulty technical \
interviews.\n\n"
    ));
}

fn push_guidelines(prompt: &mut String, num_questions: u32) {
    prompt.push_str(
        "Guidelines:\n\n\
- Each flashcard should have a clear, specific question (front) and a concise, technically accurate answer (back).\n\n\
- Go beyond university level; questions should require deep understanding and expert-level insight.\n\n\
- Cover a range of card types: key definitions, algorithm/formula analysis, tool/library usage, real-world scenarios, and trade-off/design decisions.\n\n\
- Include content involving real-world tools, libraries, frameworks, and problem-solving techniques used by top professionals in the sector.\n\n",
    );
    prompt.push_str(&format!(
        "- Ensure all {num_questions} questions are unique (no duplicates or minor variations) \
and all answers are precise and accurate.\n\n"
    ));
}

fn push_output_requirements(prompt: &mut String, language: &str) {
    prompt.push_str("Output requirements:\n\n- Output language: ");
    prompt.push_str(language);
    prompt.push_str(
        "\n\n\
- CSV format: **exactly as shown**:\n\
card_front_text;card_back_text\n\
card_front_text;card_back_text\n\
...\n\n\
- **Do not include** explanations, headings or greetings in your response.",
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_all_placeholders() {
        let prompt = PromptBuilder::default().build("Database Performance Tuning");
        assert!(prompt.starts_with(
            "What follows is the name of a topic in English (en-US) for an expert-level exam."
        ));
        assert!(prompt.contains("exam.\n\nDatabase Performance Tuning\n\nYour task"));
        assert!(prompt.contains("generate exactly 20 double-sided Anki flashcards"));
        assert!(prompt.contains("Ensure all 20 questions are unique"));
        assert!(prompt.contains("- Output language: English (en-US)\n"));
        assert!(prompt.contains("card_front_text;card_back_text\ncard_front_text;card_back_text\n...\n"));
        assert!(prompt.ends_with("greetings in your response."));
    }

    #[test]
    fn overrides_win_over_builder_settings() {
        let builder = PromptBuilder::new("Deutsch (de-DE)", 12);
        let prompt = builder.build_with(
            "Kubernetes",
            PromptOverrides {
                language: Some("Français (fr-FR)"),
                num_questions: Some(3),
            },
        );
        assert!(prompt.contains("topic in Français (fr-FR)"));
        assert!(prompt.contains("exactly 3 double-sided"));
        assert!(!prompt.contains("Deutsch"));
        assert!(!prompt.contains("12"));

        let partial = builder.build_with(
            "Kubernetes",
            PromptOverrides {
                num_questions: Some(7),
                ..Default::default()
            },
        );
        assert!(partial.contains("topic in Deutsch (de-DE)"));
        assert!(partial.contains("exactly 7 double-sided"));
    }

    #[test]
    fn topic_passes_through_verbatim() {
        let builder = PromptBuilder::default();
        assert!(builder.build("").contains("exam.\n\n\n\nYour task"));

        let odd = "{language} {num_questions} <topic> ;;";
        let prompt = builder.build(odd);
        assert!(prompt.contains(&format!("exam.\n\n{odd}\n\nYour task")));
    }

    #[test]
    fn from_config_uses_configured_values() {
        let config = Config {
            language: "Português (pt-BR)".into(),
            num_questions: 8,
            ..Config::default()
        };
        let prompt = PromptBuilder::from_config(&config).build("Redes");
        assert!(prompt.contains("Output language: Português (pt-BR)"));
        assert!(prompt.contains("exactly 8 double-sided"));
    }
}
