use crate::adapters::genai::TextGenerator;
use crate::error::Result;
use opentelemetry::{KeyValue, global, metrics::Counter};
use std::sync::Arc;

/// The contract with the model is a `||`-delimited triple; the server parses
/// it so clients receive a structured array instead of the raw wire string.
const SUGGESTION_PROMPT: &str = "Create a list of three open-ended and engaging questions \
formatted as a single string. Each question should be separated by '||'. These questions are \
for an anonymous social messaging platform and should be suitable for a diverse audience. \
Avoid personal or sensitive topics, focusing instead on universal themes that encourage \
friendly interaction. For example, your output should be structured like this: \
'What's a hobby you've recently started?||If you could have dinner with any historical \
figure, who would it be?||What's a simple thing that makes you happy?'. Ensure the questions \
are intriguing, foster curiosity, and contribute to a positive and welcoming conversational \
environment.";

#[derive(Clone, Debug)]
struct Metrics {
    requests_total: Counter<u64>,
}

impl Metrics {
    fn new() -> Self {
        let meter = global::meter("whisperbox-server");
        Self {
            requests_total: meter
                .u64_counter("whisperbox_suggestions_requests_total")
                .with_description("Total suggestion requests forwarded upstream")
                .build(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct SuggestionService {
    generator: Arc<dyn TextGenerator>,
    metrics: Metrics,
}

impl SuggestionService {
    #[must_use]
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator, metrics: Metrics::new() }
    }

    /// Fetches suggested message prompts from the generative-text service.
    ///
    /// # Errors
    /// `AppError::Upstream` carrying the upstream error message on failure.
    #[tracing::instrument(skip(self), err(level = "warn"))]
    pub async fn suggest(&self) -> Result<Vec<String>> {
        match self.generator.generate(SUGGESTION_PROMPT).await {
            Ok(raw) => {
                let suggestions = parse_suggestions(&raw);
                self.metrics.requests_total.add(1, &[KeyValue::new("status", "success")]);
                tracing::debug!(count = suggestions.len(), "Suggestions parsed");
                Ok(suggestions)
            }
            Err(e) => {
                self.metrics.requests_total.add(1, &[KeyValue::new("status", "failure")]);
                Err(e)
            }
        }
    }
}

/// Splits the model output on the `||` delimiter, stripping whitespace and
/// stray quote or fence fragments models tend to wrap answers in.
fn parse_suggestions(raw: &str) -> Vec<String> {
    raw.split("||")
        .map(|s| s.trim().trim_matches(['"', '\'', '`']).trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
