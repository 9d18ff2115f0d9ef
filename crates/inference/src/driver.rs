//! Streaming inference over a JSONL dataset.
//!
//! Records are handled strictly one at a time: read, prompt, await the model,
//! write. The output file therefore always holds every record processed so
//! far, and a failed request only marks its own record with `ERROR`.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use complexity_common::{Config, EvalError, Result, SampleReader, SampleWriter, ERROR_MARKER};
use tracing::{debug, info, instrument, warn};

use crate::client::{OllamaClient, TextGenerator};
use crate::prompt::PromptTemplate;

const PROGRESS_EVERY: usize = 50;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InferenceSummary {
    /// Records written to the output.
    pub processed: usize,
    /// Records whose prediction is the `ERROR` marker.
    pub failed: usize,
}

pub struct InferenceDriver<G> {
    generator: G,
    prompt: PromptTemplate,
    max_samples: usize,
}

impl InferenceDriver<OllamaClient> {
    pub fn from_config(config: &Config) -> Result<Self> {
        let prompt = PromptTemplate::from_config(config.inference.prompt_template.as_deref())?;
        Ok(Self::new(
            OllamaClient::from_config(&config.ollama),
            prompt,
            config.inference.max_samples,
        ))
    }
}

impl<G: TextGenerator> InferenceDriver<G> {
    pub fn new(generator: G, prompt: PromptTemplate, max_samples: usize) -> Self {
        Self {
            generator,
            prompt,
            max_samples,
        }
    }

    pub fn max_samples(&self) -> usize {
        self.max_samples
    }

    /// Classify up to `max_samples` records from `reader`, writing each one
    /// with its `llm_prediction` to `writer` before reading the next.
    ///
    /// A malformed line or a record without a string `code` stops the run;
    /// records already written stay in the output.
    pub async fn run<R: BufRead, W: Write>(&self, reader: R, writer: W) -> Result<InferenceSummary> {
        let mut out = SampleWriter::new(writer);
        let mut summary = InferenceSummary::default();

        for record in SampleReader::new(reader).take(self.max_samples) {
            let mut sample = record?;
            let prompt = self.prompt.render(sample.code()?);

            let prediction = match self.generator.generate(&prompt).await {
                Ok(text) => text,
                Err(e) => {
                    warn!(line = sample.line(), error = %e, "Inference failed, recording {ERROR_MARKER}");
                    summary.failed += 1;
                    ERROR_MARKER.to_string()
                }
            };
            debug!(line = sample.line(), prediction = %prediction, "Classified record");

            sample.set_prediction(prediction);
            out.write(&sample)?;
            summary.processed += 1;

            if summary.processed % PROGRESS_EVERY == 0 {
                info!(
                    processed = summary.processed,
                    failed = summary.failed,
                    "Classifying with LLM"
                );
            }
        }

        Ok(summary)
    }

    /// [`run`](Self::run) from one file into another, truncating the output.
    #[instrument(skip(self, input, output), fields(input = %input.display(), output = %output.display()))]
    pub async fn run_files(&self, input: &Path, output: &Path) -> Result<InferenceSummary> {
        let reader = File::open(input)
            .map(BufReader::new)
            .map_err(|e| EvalError::Config(format!("cannot open {}: {e}", input.display())))?;
        let writer = File::create(output)
            .map(BufWriter::new)
            .map_err(|e| EvalError::Config(format!("cannot create {}: {e}", output.display())))?;

        let summary = self.run(reader, writer).await?;
        info!(
            processed = summary.processed,
            failed = summary.failed,
            "Done. Saved predictions to {}",
            output.display()
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::io::Cursor;
    use std::sync::Mutex;

    /// Replies from a fixed script and remembers every prompt.
    struct Scripted {
        replies: Mutex<Vec<Result<String>>>,
        prompts: Mutex<Vec<String>>,
    }

    impl Scripted {
        fn new(replies: Vec<Result<String>>) -> Self {
            Self {
                replies: Mutex::new(replies.into_iter().rev().collect()),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for Scripted {
        async fn generate(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.replies
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Ok("O(1)".to_string()))
        }
    }

    fn driver(replies: Vec<Result<String>>, max_samples: usize) -> InferenceDriver<Scripted> {
        InferenceDriver::new(
            Scripted::new(replies),
            PromptTemplate::new("code: {code}").unwrap(),
            max_samples,
        )
    }

    fn output_lines(buf: Vec<u8>) -> Vec<serde_json::Value> {
        String::from_utf8(buf)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_failure_becomes_error_marker() {
        let input = "{\"code\": \"a\"}\n{\"code\": \"b\"}\n{\"code\": \"c\"}\n";
        let driver = driver(
            vec![
                Ok("O(n)".to_string()),
                Err(EvalError::Inference("boom".to_string())),
                Ok("O(1)".to_string()),
            ],
            10,
        );

        let mut buf = Vec::new();
        let summary = driver.run(Cursor::new(input), &mut buf).await.unwrap();
        assert_eq!(summary, InferenceSummary { processed: 3, failed: 1 });

        let predictions: Vec<_> = output_lines(buf)
            .iter()
            .map(|v| v["llm_prediction"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(predictions, ["O(n)", "ERROR", "O(1)"]);
    }

    #[tokio::test]
    async fn test_prompt_is_rendered_per_record() {
        let driver = driver(vec![], 10);
        let mut buf = Vec::new();
        driver
            .run(Cursor::new("{\"code\": \"def f(): pass\"}\n"), &mut buf)
            .await
            .unwrap();

        let prompts = driver.generator.prompts.lock().unwrap();
        assert_eq!(prompts.as_slice(), ["code: def f(): pass"]);
    }

    #[tokio::test]
    async fn test_zero_cap_processes_nothing() {
        let driver = driver(vec![], 0);
        let mut buf = Vec::new();
        let summary = driver
            .run(Cursor::new("{\"code\": \"a\"}\n"), &mut buf)
            .await
            .unwrap();
        assert_eq!(summary.processed, 0);
        assert!(buf.is_empty());
    }
}
