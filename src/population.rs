use crate::districts::District;
use crate::errors::DashboardError;
use serde::Serialize;

/// Resident population of one district, in units of 100,000.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PopulationEntry {
    pub district: District,
    pub population: f64,
}

const fn entry(district: District, population: f64) -> PopulationEntry {
    PopulationEntry {
        district,
        population,
    }
}

const BERLIN: [PopulationEntry; 13] = [
    entry(District::Lichtenberg, 2.91452),
    entry(District::Mitte, 3.84172),
    entry(District::Neukoelln, 3.29691),
    entry(District::FriedrichshainKreuzberg, 2.89762),
    entry(District::CharlottenburgWilmersdorf, 3.42332),
    entry(District::TempelhofSchoeneberg, 3.51644),
    entry(District::Pankow, 4.07765),
    entry(District::Reinickendorf, 2.65225),
    entry(District::SteglitzZehlendorf, 3.08697),
    entry(District::Spandau, 2.43977),
    entry(District::MarzahnHellersdorf, 2.68548),
    entry(District::TreptowKoepenick, 2.71153),
    entry(District::AllBerlin, 37.54418),
];

/// Fixed population divisors used for 7-day incidence.
#[derive(Debug, Clone, Copy)]
pub struct PopulationTable {
    entries: &'static [PopulationEntry],
}

impl Default for PopulationTable {
    fn default() -> Self {
        Self::berlin()
    }
}

impl PopulationTable {
    pub const fn berlin() -> Self {
        Self { entries: &BERLIN }
    }

    pub fn entries(&self) -> &[PopulationEntry] {
        self.entries
    }

    /// Population of a district given by name, canonical or transliterated.
    pub fn population_of(&self, district: &str) -> Result<f64, DashboardError> {
        District::from_name(district)
            .and_then(|district| self.lookup(district))
            .ok_or_else(|| DashboardError::UnknownDistrict(district.to_string()))
    }

    pub fn get(&self, district: District) -> Result<f64, DashboardError> {
        self.lookup(district)
            .ok_or_else(|| DashboardError::UnknownDistrict(district.name().to_string()))
    }

    fn lookup(&self, district: District) -> Option<f64> {
        self.entries
            .iter()
            .find(|entry| entry.district == district)
            .map(|entry| entry.population)
    }
}
