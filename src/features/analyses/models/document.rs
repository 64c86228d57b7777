use axum::body::Bytes;

/// The three document slots accepted by an upload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    QuarterlyReport,
    InvestorPresentation,
    EarningsCallTranscript,
}

impl DocumentKind {
    /// Fixed section order of the combined document
    pub const ALL: [DocumentKind; 3] = [
        DocumentKind::QuarterlyReport,
        DocumentKind::InvestorPresentation,
        DocumentKind::EarningsCallTranscript,
    ];

    /// Multipart field name
    pub fn field_name(self) -> &'static str {
        match self {
            DocumentKind::QuarterlyReport => "quarterly_report",
            DocumentKind::InvestorPresentation => "investor_presentation",
            DocumentKind::EarningsCallTranscript => "earnings_call_transcript",
        }
    }

    /// Section heading used in the combined document
    pub fn label(self) -> &'static str {
        match self {
            DocumentKind::QuarterlyReport => "Quarterly Report",
            DocumentKind::InvestorPresentation => "Investor Presentation",
            DocumentKind::EarningsCallTranscript => "Earnings Call Transcript",
        }
    }

    pub fn from_field_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.field_name() == name)
    }

    fn index(self) -> usize {
        match self {
            DocumentKind::QuarterlyReport => 0,
            DocumentKind::InvestorPresentation => 1,
            DocumentKind::EarningsCallTranscript => 2,
        }
    }
}

/// Raw bytes per slot; `None` means the slot was not uploaded
#[derive(Debug, Clone, Default)]
pub struct DocumentUploads {
    slots: [Option<Bytes>; 3],
}

impl DocumentUploads {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a document; zero-length parts count as not uploaded
    pub fn set(&mut self, kind: DocumentKind, bytes: Bytes) {
        self.slots[kind.index()] = if bytes.is_empty() { None } else { Some(bytes) };
    }

    pub fn with(mut self, kind: DocumentKind, bytes: impl Into<Bytes>) -> Self {
        self.set(kind, bytes.into());
        self
    }

    pub fn get(&self, kind: DocumentKind) -> Option<&Bytes> {
        self.slots[kind.index()].as_ref()
    }

    pub fn provided_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }
}

/// Extracted text per slot; absent slots hold an empty string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedDocuments {
    texts: [String; 3],
}

impl ExtractedDocuments {
    pub fn set(&mut self, kind: DocumentKind, text: String) {
        self.texts[kind.index()] = text;
    }

    pub fn get(&self, kind: DocumentKind) -> &str {
        &self.texts[kind.index()]
    }

    /// True when at least one document produced non-whitespace text
    pub fn has_content(&self) -> bool {
        self.texts.iter().any(|text| !text.trim().is_empty())
    }

    /// All three sections under their labels, always in the fixed order
    pub fn combined_text(&self) -> String {
        DocumentKind::ALL
            .iter()
            .map(|kind| format!("{}:\n{}\n", kind.label(), self.get(*kind)))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// A validated upload request, ready for processing
#[derive(Debug, Clone)]
pub struct AnalysisSubmission {
    pub company_name: String,
    pub analysis_quarter: String,
    pub documents: DocumentUploads,
}
