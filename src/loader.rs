//! Download and parsing of the published per-district case table.
//!
//! The source is a `;`-delimited CSV in a legacy single-byte encoding whose
//! first column is the reporting date and whose remaining columns are the
//! twelve districts. Parsing either produces a complete [`CaseTable`] or
//! fails; rows are never skipped.

use crate::cases::{CaseRow, CaseTable};
use crate::config::Config;
use crate::districts::District;
use crate::errors::DashboardError;
use chrono::NaiveDate;
use encoding_rs::{UTF_8, WINDOWS_1252};
use reqwest::StatusCode;
use std::{borrow::Cow, time::Duration};
use tracing::{debug, info, warn};

const DELIMITER: u8 = b';';
const UTF8_BOM: &[u8; 3] = b"\xEF\xBB\xBF";
const DATE_FORMATS: [&str; 2] = ["%d.%m.%Y", "%Y-%m-%d"];

/// Fetches the case table from a fixed URL. No caching: every call to
/// [`CaseDataLoader::load`] goes to the network.
#[derive(Debug, Clone)]
pub struct CaseDataLoader {
    client: reqwest::Client,
    url: String,
    retry: bool,
}

impl CaseDataLoader {
    pub fn new(
        url: impl Into<String>,
        timeout: Duration,
        retry: bool,
    ) -> Result<Self, DashboardError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
            retry,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, DashboardError> {
        Self::new(config.cases_url.clone(), config.fetch_timeout, config.fetch_retry)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn load(&self) -> Result<CaseTable, DashboardError> {
        let bytes = self.fetch().await?;
        debug!("downloaded {} bytes from {}", bytes.len(), self.url);

        let table = parse_cases(&bytes)?;
        info!(
            rows = table.len(),
            first = ?table.first_date(),
            last = ?table.last_date(),
            url = %self.url,
            "loaded case table"
        );
        Ok(table)
    }

    async fn fetch(&self) -> Result<Vec<u8>, DashboardError> {
        match self.fetch_once().await {
            Err(err) if self.retry && is_transient(&err) => {
                warn!("fetching {} failed ({err}), retrying once", self.url);
                Ok(self.fetch_once().await?)
            }
            result => Ok(result?),
        }
    }

    /// Anything other than `200 OK` counts as a failed fetch.
    async fn fetch_once(&self) -> Result<Vec<u8>, FetchFailure> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchFailure::Status(status));
        }
        Ok(response.bytes().await?.to_vec())
    }
}

#[derive(Debug)]
enum FetchFailure {
    Request(reqwest::Error),
    Status(StatusCode),
}

impl std::fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchFailure::Request(err) => err.fmt(f),
            FetchFailure::Status(status) => write!(f, "HTTP {status}"),
        }
    }
}

impl From<reqwest::Error> for FetchFailure {
    fn from(err: reqwest::Error) -> Self {
        FetchFailure::Request(err)
    }
}

impl From<FetchFailure> for DashboardError {
    fn from(failure: FetchFailure) -> Self {
        match failure {
            FetchFailure::Request(err) => err.into(),
            FetchFailure::Status(status) => DashboardError::Fetch(format!("HTTP {status}")),
        }
    }
}

fn is_transient(failure: &FetchFailure) -> bool {
    match failure {
        FetchFailure::Request(err) => err.is_timeout() || err.is_connect(),
        FetchFailure::Status(status) => status.is_server_error(),
    }
}

/// Parses a raw case table payload.
pub fn parse_cases(bytes: &[u8]) -> Result<CaseTable, DashboardError> {
    let text = decode(bytes);
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    let columns = district_columns(&headers)?;

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result?;
        let line = record
            .position()
            .map_or(idx as u64 + 2, |position| position.line());
        rows.push(parse_row(&record, &columns, line)?);
    }

    if rows.is_empty() {
        return Err(DashboardError::Parse("case table has no data rows".into()));
    }
    check_contiguous(&rows)?;

    Ok(CaseTable::from_rows(rows))
}

fn decode(bytes: &[u8]) -> Cow<'_, str> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    match UTF_8.decode_without_bom_handling_and_without_replacement(bytes) {
        Some(text) => text,
        None => WINDOWS_1252.decode_without_bom_handling(bytes).0,
    }
}

/// Maps header columns after the date column to districts, requiring each
/// named district exactly once.
fn district_columns(headers: &csv::StringRecord) -> Result<Vec<District>, DashboardError> {
    if headers.len() < 2 {
        return Err(DashboardError::Parse(format!(
            "expected a date column followed by district columns, found {} column(s)",
            headers.len()
        )));
    }

    let mut columns = Vec::with_capacity(District::NAMED.len());
    let mut unexpected = Vec::new();
    for name in headers.iter().skip(1) {
        match District::from_name(name) {
            Some(district) if !district.is_aggregate() && !columns.contains(&district) => {
                columns.push(district)
            }
            _ => unexpected.push(name.to_string()),
        }
    }

    if !unexpected.is_empty() {
        return Err(DashboardError::Parse(format!(
            "unexpected column(s): {}",
            unexpected.join(", ")
        )));
    }

    let missing: Vec<&str> = District::NAMED
        .iter()
        .filter(|district| !columns.contains(district))
        .map(|district| district.name())
        .collect();
    if !missing.is_empty() {
        return Err(DashboardError::Parse(format!(
            "missing district column(s): {}",
            missing.join(", ")
        )));
    }

    Ok(columns)
}

fn parse_row(
    record: &csv::StringRecord,
    columns: &[District],
    line: u64,
) -> Result<CaseRow, DashboardError> {
    let raw_date = record.get(0).unwrap_or_default();
    let date = parse_date(raw_date)
        .ok_or_else(|| DashboardError::Parse(format!("line {line}: invalid date '{raw_date}'")))?;

    let mut named = [0u64; 12];
    for (district, raw) in columns.iter().zip(record.iter().skip(1)) {
        named[district.index()] = raw.parse::<u64>().map_err(|_| {
            DashboardError::Parse(format!("line {line}: invalid count '{raw}' for {district}"))
        })?;
    }

    CaseRow::new(date, named).ok_or_else(|| {
        DashboardError::Parse(format!("line {line}: daily total exceeds the supported range"))
    })
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
}

fn check_contiguous(rows: &[CaseRow]) -> Result<(), DashboardError> {
    for pair in rows.windows(2) {
        let (prev, next) = (pair[0].date, pair[1].date);
        if prev.succ_opt() != Some(next) {
            return Err(DashboardError::Parse(format!(
                "dates must be consecutive days: {next} follows {prev}"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Datum;Mitte;Friedrichshain-Kreuzberg;Pankow;Charlottenburg-Wilmersdorf;Spandau;Steglitz-Zehlendorf;Tempelhof-Schöneberg;Neukölln;Treptow-Köpenick;Marzahn-Hellersdorf;Lichtenberg;Reinickendorf";

    fn csv_with_rows(header: &str, rows: &[&str]) -> String {
        let mut out = String::from(header);
        for row in rows {
            out.push('\n');
            out.push_str(row);
        }
        out.push('\n');
        out
    }

    fn latin1(text: &str) -> Vec<u8> {
        let (bytes, _, unmappable) = WINDOWS_1252.encode(text);
        assert!(!unmappable);
        bytes.into_owned()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_latin1_payload_with_umlaut_headers() {
        let text = csv_with_rows(
            HEADER,
            &[
                "01.09.2020;1;2;3;4;5;6;7;8;9;10;11;12",
                "02.09.2020;0;0;0;0;0;0;0;5;0;0;0;0",
            ],
        );
        let bytes = latin1(&text);
        assert!(std::str::from_utf8(&bytes).is_err());

        let table = parse_cases(&bytes).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.first_date(), Some(date(2020, 9, 1)));
        assert_eq!(table.column(District::Mitte), vec![1, 0]);
        assert_eq!(table.column(District::Neukoelln), vec![8, 5]);
        assert_eq!(table.column(District::Reinickendorf), vec![12, 0]);
        assert_eq!(table.column(District::AllBerlin), vec![78, 5]);
    }

    #[test]
    fn accepts_utf8_ascii_headers_and_iso_dates() {
        let header = "Datum;Lichtenberg;Reinickendorf;Mitte;Friedrichshain-Kreuzberg;Pankow;Charlottenburg-Wilmersdorf;Spandau;Steglitz-Zehlendorf;Tempelhof-Schoeneberg;Neukoelln;Treptow-Koepenick;Marzahn-Hellersdorf";
        let text = format!(
            "\u{feff}{}",
            csv_with_rows(header, &["2020-03-01;11;12;1;2;3;4;5;6;7;8;9;10"])
        );

        let table = parse_cases(text.as_bytes()).unwrap();
        let row = &table.rows()[0];
        assert_eq!(row.date, date(2020, 3, 1));
        assert_eq!(row.count(District::Lichtenberg), 11);
        assert_eq!(row.count(District::Mitte), 1);
        assert_eq!(row.count(District::MarzahnHellersdorf), 10);
        assert_eq!(row.count(District::AllBerlin), 78);
    }

    #[test]
    fn missing_district_column_is_a_parse_error() {
        let header = HEADER.trim_end_matches(";Reinickendorf");
        let text = csv_with_rows(header, &["01.09.2020;1;2;3;4;5;6;7;8;9;10;11"]);
        let err = parse_cases(text.as_bytes()).unwrap_err();
        match err {
            DashboardError::Parse(message) => {
                assert!(message.contains("Reinickendorf"), "{message}")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unexpected_and_duplicate_columns_are_rejected() {
        let extra = format!("{HEADER};All Berlin");
        let text = csv_with_rows(&extra, &["01.09.2020;1;2;3;4;5;6;7;8;9;10;11;12;78"]);
        assert!(matches!(parse_cases(text.as_bytes()), Err(DashboardError::Parse(_))));

        let duplicate = HEADER.replace("Pankow", "Mitte");
        let text = csv_with_rows(&duplicate, &["01.09.2020;1;2;3;4;5;6;7;8;9;10;11;12"]);
        assert!(matches!(parse_cases(text.as_bytes()), Err(DashboardError::Parse(_))));
    }

    #[test]
    fn comma_delimited_payload_is_rejected() {
        let text = csv_with_rows(
            &HEADER.replace(';', ","),
            &["01.09.2020,1,2,3,4,5,6,7,8,9,10,11,12"],
        );
        assert!(matches!(parse_cases(text.as_bytes()), Err(DashboardError::Parse(_))));
    }

    #[test]
    fn bad_cells_fail_the_whole_table() {
        let cases = [
            "01.09.2020;1;2;3;4;5;6;7;8;9;10;11;-1",
            "01.09.2020;1;2;3;4;5;6;7;8;9;10;11;x",
            "31.02.2020;1;2;3;4;5;6;7;8;9;10;11;12",
            "01.09.2020;1;2;3",
        ];
        for row in cases {
            let text = csv_with_rows(HEADER, &["31.08.2020;0;0;0;0;0;0;0;0;0;0;0;0", row]);
            assert!(
                matches!(parse_cases(text.as_bytes()), Err(DashboardError::Parse(_))),
                "row should be rejected: {row}"
            );
        }
    }

    #[test]
    fn invalid_count_reports_line_and_district() {
        let text = csv_with_rows(
            HEADER,
            &[
                "01.09.2020;0;0;0;0;0;0;0;0;0;0;0;0",
                "02.09.2020;0;0;0;0;0;0;0;oops;0;0;0;0",
            ],
        );
        let err = parse_cases(text.as_bytes()).unwrap_err().to_string();
        assert!(err.contains("line 3"), "{err}");
        assert!(err.contains("Neukölln"), "{err}");
    }

    #[test]
    fn overflowing_daily_total_is_a_parse_error() {
        let half = u64::MAX / 2 + 1;
        let text = csv_with_rows(
            HEADER,
            &[&format!("01.09.2020;{half};{half};0;0;0;0;0;0;0;0;0;0")],
        );
        let err = parse_cases(text.as_bytes()).unwrap_err();
        match err {
            DashboardError::Parse(message) => assert!(message.contains("line 2"), "{message}"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn gaps_and_reordering_are_rejected() {
        let gap = csv_with_rows(
            HEADER,
            &[
                "01.09.2020;0;0;0;0;0;0;0;0;0;0;0;0",
                "03.09.2020;0;0;0;0;0;0;0;0;0;0;0;0",
            ],
        );
        assert!(matches!(parse_cases(gap.as_bytes()), Err(DashboardError::Parse(_))));

        let backwards = csv_with_rows(
            HEADER,
            &[
                "02.09.2020;0;0;0;0;0;0;0;0;0;0;0;0",
                "01.09.2020;0;0;0;0;0;0;0;0;0;0;0;0",
            ],
        );
        assert!(matches!(parse_cases(backwards.as_bytes()), Err(DashboardError::Parse(_))));
    }

    #[test]
    fn empty_payloads_are_rejected() {
        assert!(matches!(parse_cases(b""), Err(DashboardError::Parse(_))));
        let header_only = csv_with_rows(HEADER, &[]);
        assert!(matches!(parse_cases(header_only.as_bytes()), Err(DashboardError::Parse(_))));
    }
}
