//! In-memory stand-ins for the database, PDF parser and generation API.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::core::error::{AppError, Result};
use crate::features::analyses::models::AnalysisRecord;
use crate::features::analyses::repositories::AnalysisRepository;
use crate::features::analyses::AnalysisService;
use crate::modules::llm::{LlmError, TextGenerator};
use crate::modules::pdf::{PdfError, TextExtractor};
use crate::shared::prompts::PromptEngine;

/// Bytes that `StubExtractor` refuses to parse
pub const CORRUPT_DOCUMENT: &[u8] = b"\x00CORRUPT\x00";

/// Output of `StubGenerator::default()`
pub const DEFAULT_GENERATED_REPORT: &str = "# Generated report";

/// Treats document bytes as a single UTF-8 page
pub struct StubExtractor;

impl TextExtractor for StubExtractor {
    fn extract_pages(&self, bytes: &[u8]) -> std::result::Result<Vec<String>, PdfError> {
        if bytes == CORRUPT_DOCUMENT {
            return Err(PdfError::Load("invalid file header".to_string()));
        }
        Ok(vec![String::from_utf8_lossy(bytes).into_owned()])
    }
}

/// Returns queued outputs in order, repeating the last one once exhausted
pub struct StubGenerator {
    outputs: Mutex<VecDeque<String>>,
    last_output: Mutex<Option<String>>,
    fail: bool,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl StubGenerator {
    pub fn returning<S: Into<String>>(outputs: impl IntoIterator<Item = S>) -> Self {
        Self {
            outputs: Mutex::new(outputs.into_iter().map(Into::into).collect()),
            last_output: Mutex::new(None),
            fail: false,
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::returning(Vec::<String>::new())
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }
}

impl Default for StubGenerator {
    fn default() -> Self {
        Self::returning([DEFAULT_GENERATED_REPORT])
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn generate(&self, prompt: &str) -> std::result::Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());

        if self.fail {
            return Err(LlmError::Api {
                status: 503,
                message: "The model is overloaded. Please try again later.".to_string(),
            });
        }

        let mut last = self.last_output.lock().unwrap();
        if let Some(next) = self.outputs.lock().unwrap().pop_front() {
            *last = Some(next);
        }
        last.clone().ok_or(LlmError::EmptyResponse)
    }
}

/// `AnalysisRepository` over a Vec, with the same upsert and ordering rules
/// as the PostgreSQL table
#[derive(Default)]
pub struct InMemoryAnalysisRepository {
    // (write sequence, record); higher sequence = more recently updated
    records: Mutex<Vec<(u64, AnalysisRecord)>>,
    next_id: AtomicI64,
    write_seq: AtomicU64,
    fail_writes: AtomicBool,
    fail_reads: AtomicBool,
}

impl InMemoryAnalysisRepository {
    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    pub fn fail_reads(&self) {
        self.fail_reads.store(true, Ordering::SeqCst);
    }

    fn check_reads(&self) -> Result<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(AppError::Database(sqlx::Error::Protocol(
                "simulated read failure".to_string(),
            )));
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn get(&self, company_name: &str, analysis_quarter: &str) -> Option<AnalysisRecord> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .find(|(_, r)| r.company_name == company_name && r.analysis_quarter == analysis_quarter)
            .map(|(_, r)| r.clone())
    }
}

#[async_trait]
impl AnalysisRepository for InMemoryAnalysisRepository {
    async fn upsert(
        &self,
        company_name: &str,
        analysis_quarter: &str,
        final_summary: &str,
    ) -> Result<AnalysisRecord> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::Database(sqlx::Error::Protocol(
                "simulated write failure".to_string(),
            )));
        }

        let seq = self.write_seq.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        let mut records = self.records.lock().unwrap();

        if let Some((existing_seq, record)) = records.iter_mut().find(|(_, r)| {
            r.company_name == company_name && r.analysis_quarter == analysis_quarter
        }) {
            *existing_seq = seq;
            record.final_summary = final_summary.to_string();
            record.updated_at = now;
            return Ok(record.clone());
        }

        let record = AnalysisRecord {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            company_name: company_name.to_string(),
            analysis_quarter: analysis_quarter.to_string(),
            final_summary: final_summary.to_string(),
            created_at: now,
            updated_at: now,
        };
        records.push((seq, record.clone()));
        Ok(record)
    }

    async fn find_by_company(&self, company_name: &str) -> Result<Vec<AnalysisRecord>> {
        self.check_reads()?;
        let mut matching: Vec<(u64, AnalysisRecord)> = self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, r)| r.company_name == company_name)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(matching.into_iter().map(|(_, r)| r).collect())
    }

    async fn find_by_company_and_quarter(
        &self,
        company_name: &str,
        analysis_quarter: &str,
    ) -> Result<Option<AnalysisRecord>> {
        self.check_reads()?;
        Ok(self.get(company_name, analysis_quarter))
    }

    async fn list_companies(&self) -> Result<Vec<String>> {
        self.check_reads()?;
        let mut names: Vec<String> = self
            .records
            .lock()
            .unwrap()
            .iter()
            .map(|(_, r)| r.company_name.clone())
            .collect();
        names.sort();
        names.dedup();
        Ok(names)
    }
}

/// An `AnalysisService` wired to in-memory collaborators
pub struct TestContext {
    pub service: Arc<AnalysisService>,
    pub repository: Arc<InMemoryAnalysisRepository>,
    pub generator: Arc<StubGenerator>,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_generator(StubGenerator::default())
    }

    pub fn with_generator(generator: StubGenerator) -> Self {
        let repository = Arc::new(InMemoryAnalysisRepository::default());
        let generator = Arc::new(generator);
        let prompts = Arc::new(PromptEngine::builtin().expect("built-in templates compile"));

        let service = Arc::new(AnalysisService::new(
            repository.clone(),
            Arc::new(StubExtractor),
            generator.clone(),
            prompts,
        ));

        Self {
            service,
            repository,
            generator,
        }
    }
}
