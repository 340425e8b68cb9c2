use crate::cases::CaseTable;
use crate::districts::District;
use crate::errors::DashboardError;
use crate::population::PopulationTable;
use crate::window::last_n;
use chrono::NaiveDate;
use serde::Serialize;

/// Trailing window length for the rolling views.
pub const ROLLING_WINDOW: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point<T> {
    pub date: NaiveDate,
    pub value: T,
}

/// A rolling view; `None` where the window does not yet have enough history.
pub type RollingSeries = Vec<Point<Option<f64>>>;

/// The derived views for one district, all aligned to the same dates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistrictSeries {
    pub district: District,
    pub population: f64,
    pub new_cases: Vec<Point<u64>>,
    pub rolling_average: RollingSeries,
    pub incidence: RollingSeries,
}

impl DistrictSeries {
    pub fn len(&self) -> usize {
        self.new_cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.new_cases.is_empty()
    }

    /// The newest `n` days of every view.
    pub fn last_n(&self, n: usize) -> DistrictSeries {
        DistrictSeries {
            district: self.district,
            population: self.population,
            new_cases: last_n(&self.new_cases, n),
            rolling_average: last_n(&self.rolling_average, n),
            incidence: last_n(&self.incidence, n),
        }
    }
}

/// Derives the new-case, 7-day average and 7-day incidence series for a
/// district given by name.
pub fn derive(
    table: &CaseTable,
    district: &str,
    populations: &PopulationTable,
) -> Result<DistrictSeries, DashboardError> {
    let district = District::from_name(district)
        .ok_or_else(|| DashboardError::UnknownDistrict(district.to_string()))?;
    derive_for(table, district, populations)
}

pub fn derive_for(
    table: &CaseTable,
    district: District,
    populations: &PopulationTable,
) -> Result<DistrictSeries, DashboardError> {
    let population = populations.get(district)?;
    let counts = table.column(district);
    let dates: Vec<NaiveDate> = table.dates().collect();

    let new_cases = dates
        .iter()
        .zip(&counts)
        .map(|(date, count)| Point {
            date: *date,
            value: *count,
        })
        .collect();

    Ok(DistrictSeries {
        district,
        population,
        new_cases,
        rolling_average: align(&dates, rolling_average(&counts, ROLLING_WINDOW)),
        incidence: align(&dates, rolling_incidence(&counts, ROLLING_WINDOW, population)),
    })
}

fn align(dates: &[NaiveDate], values: Vec<Option<f64>>) -> RollingSeries {
    dates
        .iter()
        .zip(values)
        .map(|(date, value)| Point { date: *date, value })
        .collect()
}

/// Trailing sums over `window` values, inclusive of the current index.
/// Indices with fewer than `window` values of history yield `None`.
///
/// Sums are accumulated in `u128` so any window of `u64` counts fits.
pub fn rolling_sum(counts: &[u64], window: usize) -> Vec<Option<u128>> {
    let mut out = Vec::with_capacity(counts.len());
    let mut sum = 0u128;
    for (idx, count) in counts.iter().enumerate() {
        sum += u128::from(*count);
        if idx >= window {
            sum -= u128::from(counts[idx - window]);
        }
        if window == 0 || idx + 1 < window {
            out.push(None);
        } else {
            out.push(Some(sum));
        }
    }
    out
}

pub fn rolling_average(counts: &[u64], window: usize) -> Vec<Option<f64>> {
    rolling_sum(counts, window)
        .into_iter()
        .map(|sum| sum.map(|sum| sum as f64 / window as f64))
        .collect()
}

/// Trailing sums divided by a fixed population (in units of 100,000).
pub fn rolling_incidence(counts: &[u64], window: usize, population: f64) -> Vec<Option<f64>> {
    rolling_sum(counts, window)
        .into_iter()
        .map(|sum| sum.map(|sum| sum as f64 / population))
        .collect()
}
