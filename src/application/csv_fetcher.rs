use crate::application::url_resolver::RawUrlResolver;
use crate::domain::errors::{DashboardError, Result};
use crate::domain::ports::HttpTransport;
use crate::domain::records::CsvRecord;
use csv::{ReaderBuilder, Terminator, Trim};
use std::sync::Arc;
use tracing::{debug, warn};

/// Downloads a repository CSV file and splits it into records.
pub struct CsvFetcher {
    resolver: RawUrlResolver,
    transport: Arc<dyn HttpTransport>,
}

impl CsvFetcher {
    pub fn new(resolver: RawUrlResolver, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            resolver,
            transport,
        }
    }

    pub fn resolver(&self) -> &RawUrlResolver {
        &self.resolver
    }

    pub async fn fetch(&self, path: &str) -> Result<Vec<CsvRecord>> {
        let url = self.resolver.resolve(path);
        debug!("Fetching {} from {}", path, url);

        let response = self
            .transport
            .get(&url)
            .await
            .map_err(|e| DashboardError::Transport {
                path: path.to_string(),
                reason: format!("{:#}", e),
            })?;

        if !response.is_success() {
            warn!("GET {} returned HTTP {}", url, response.status);
            return Err(DashboardError::Fetch {
                path: path.to_string(),
                status: response.status,
            });
        }

        let records = parse_csv(path, &response.body)?;
        debug!("Parsed {} records from {}", records.len(), path);
        Ok(records)
    }
}

/// Splits CSV text into records keyed by the first line.
///
/// Lines end at `\n` or `\r\n`; a lone `\r` stays inside the line. Every
/// line after the header yields one record, blank ones included. Fields are
/// a plain comma split: quotes are ordinary characters and a comma inside a
/// field always starts a new field. Short rows are padded with empty strings
/// and surplus values are dropped. An empty or whitespace-only body yields
/// no records.
pub fn parse_csv(path: &str, text: &str) -> Result<Vec<CsvRecord>> {
    let body = text.trim();
    let mut lines = body.lines();
    let Some(header_line) = lines.next() else {
        return Ok(Vec::new());
    };
    let headers = split_line(path, header_line)?;

    lines
        .map(|line| -> Result<CsvRecord> {
            let values = split_line(path, line)?;
            Ok(headers
                .iter()
                .enumerate()
                .map(|(i, name)| (name.clone(), values.get(i).cloned().unwrap_or_default()))
                .collect())
        })
        .collect()
}

/// Trimmed comma-separated fields of one line. A blank line has none.
fn split_line(path: &str, line: &str) -> Result<Vec<String>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .terminator(Terminator::Any(b'\n'))
        .from_reader(line.as_bytes());

    match reader.records().next() {
        Some(row) => {
            let row = row.map_err(|source| DashboardError::Csv {
                path: path.to_string(),
                source,
            })?;
            Ok(row.iter().map(str::to_string).collect())
        }
        None => Ok(Vec::new()),
    }
}
