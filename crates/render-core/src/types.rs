use chrono::{DateTime, Utc};

/// Values for the PDF document information dictionary.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentMetadata {
    pub title: String,
    pub subject: String,
    pub producer: String,
    /// Omitted from the output when `None`, which makes output bytes a pure
    /// function of the input.
    pub creation_date: Option<DateTime<Utc>>,
}

impl DocumentMetadata {
    pub fn new(title: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subject: subject.into(),
            producer: concat!("coursedoc ", env!("CARGO_PKG_VERSION")).to_string(),
            creation_date: None,
        }
    }

    pub fn with_creation_date(mut self, date: DateTime<Utc>) -> Self {
        self.creation_date = Some(date);
        self
    }

    /// Stamps the current time when `embed` is set.
    pub fn stamped(self, embed: bool) -> Self {
        if embed {
            self.with_creation_date(Utc::now())
        } else {
            self
        }
    }

    /// The creation date in PDF date syntax (`D:YYYYMMDDHHmmSSZ`).
    pub fn pdf_creation_date(&self) -> Option<String> {
        self.creation_date
            .map(|date| date.format("D:%Y%m%d%H%M%SZ").to_string())
    }
}
