//! Ledger source trait and CSV parsing
//!
//! The spreadsheet is published as CSV with four columns in fixed order:
//! Name, Balance, Total Debit, Total Paid. The last few rows are summary
//! totals, not people, and are dropped by position.

use async_trait::async_trait;
use log::{debug, warn};
use std::time::Duration;
use tokio::time::timeout;

use crate::core::currency::parse_amount;
use crate::core::errors::{LoadError, ParseError};

use super::person::Person;

/// Trailing summary rows appended by the spreadsheet, dropped on every load.
pub const FOOTER_ROWS: usize = 3;

/// Upper bound on one spreadsheet export request.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Anything that can produce the raw ledger CSV.
#[async_trait]
pub trait LedgerSource: Send + Sync {
    async fn fetch(&self) -> Result<String, LoadError>;
}

/// Ledger source backed by a Google Sheets CSV export URL.
pub struct SheetLedger {
    url: String,
    client: reqwest::Client,
}

impl SheetLedger {
    pub fn new(spreadsheet_id: &str, sheet_name: &str) -> Self {
        SheetLedger {
            url: format!(
                "https://docs.google.com/spreadsheets/d/{spreadsheet_id}/export?format=csv&gid={sheet_name}"
            ),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl LedgerSource for SheetLedger {
    async fn fetch(&self) -> Result<String, LoadError> {
        // A stalled export connection must not hang the caller.
        let request = async {
            let response = self
                .client
                .get(&self.url)
                .send()
                .await
                .map_err(|e| LoadError::Fetch(e.to_string()))?
                .error_for_status()
                .map_err(|e| LoadError::Fetch(e.to_string()))?;

            response
                .text()
                .await
                .map_err(|e| LoadError::Fetch(e.to_string()))
        };

        timeout(FETCH_TIMEOUT, request)
            .await
            .map_err(|_| LoadError::Fetch(format!("timed out after {FETCH_TIMEOUT:?}")))?
    }
}

/// Parse CSV text into people, dropping the footer rows.
///
/// Rows whose currency cells cannot be normalized are skipped and reported
/// in the second half of the returned pair; one bad row never aborts the
/// listing.
pub fn parse_people(csv_text: &str) -> Result<(Vec<Person>, Vec<ParseError>), LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| LoadError::Malformed(e.to_string()))?;
        rows.push(record);
    }

    // The last FOOTER_ROWS records are summary totals, dropped by position.
    let people_rows = rows.len().saturating_sub(FOOTER_ROWS);
    let mut people = Vec::with_capacity(people_rows);
    let mut skipped = Vec::new();

    for record in rows.into_iter().take(people_rows) {
        let name = record.get(0).unwrap_or("").trim().to_string();
        if name.is_empty() {
            continue;
        }

        match parse_row(&name, &record) {
            Ok(person) => people.push(person),
            Err(err) => {
                warn!("skipping ledger row: {err}");
                skipped.push(err);
            }
        }
    }

    debug!("parsed {} people ({} rows skipped)", people.len(), skipped.len());
    Ok((people, skipped))
}

fn parse_row(name: &str, record: &csv::StringRecord) -> Result<Person, ParseError> {
    let cell = |index: usize, field: &'static str| {
        let value = record.get(index).unwrap_or("");
        parse_amount(value).ok_or_else(|| ParseError {
            name: name.to_string(),
            field,
            value: value.to_string(),
        })
    };

    Ok(Person {
        name: name.to_string(),
        current_balance: cell(1, "balance")?,
        total_debit: cell(2, "total debit")?,
        total_paid: cell(3, "total paid")?,
    })
}

/// Fetch and parse the ledger in one step, logging skipped rows.
pub async fn load_people(source: &dyn LedgerSource) -> Result<Vec<Person>, LoadError> {
    let text = source.fetch().await?;
    let (people, _skipped) = parse_people(&text)?;
    Ok(people)
}
