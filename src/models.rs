use crate::districts::District;
use crate::series::{DistrictSeries, Point, RollingSeries};
use crate::window::last_n;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Number of newest rows shown in the table under each chart.
pub const LATEST_ROWS: usize = 3;

#[derive(Debug, Deserialize)]
pub struct SeriesQuery {
    pub district: Option<String>,
    pub days: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct DistrictInfo {
    pub name: District,
    pub population: f64,
}

#[derive(Debug, Serialize)]
pub struct LatestRows {
    pub incidence: RollingSeries,
    pub rolling_average: RollingSeries,
    pub new_cases: Vec<Point<u64>>,
}

#[derive(Debug, Serialize)]
pub struct SeriesResponse {
    pub district: District,
    pub population: f64,
    pub days: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    pub incidence: RollingSeries,
    pub rolling_average: RollingSeries,
    pub new_cases: Vec<Point<u64>>,
    pub latest: LatestRows,
}

impl SeriesResponse {
    /// Windows `series` to `days` for the charts; the tables always show the
    /// newest [`LATEST_ROWS`] rows of the full series.
    pub fn new(series: &DistrictSeries, days: usize) -> Self {
        let latest = LatestRows {
            incidence: last_n(&series.incidence, LATEST_ROWS),
            rolling_average: last_n(&series.rolling_average, LATEST_ROWS),
            new_cases: last_n(&series.new_cases, LATEST_ROWS),
        };
        let shown = series.last_n(days);

        Self {
            district: series.district,
            population: series.population,
            days,
            first_date: shown.new_cases.first().map(|point| point.date),
            last_date: shown.new_cases.last().map(|point| point.date),
            incidence: shown.incidence,
            rolling_average: shown.rolling_average,
            new_cases: shown.new_cases,
            latest,
        }
    }
}
