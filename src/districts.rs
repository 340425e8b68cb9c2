use crate::errors::DashboardError;
use serde::{Serialize, Serializer};
use std::{fmt, str::FromStr};

/// A Berlin district, or the synthesized city-wide aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum District {
    Mitte,
    FriedrichshainKreuzberg,
    Pankow,
    CharlottenburgWilmersdorf,
    Spandau,
    SteglitzZehlendorf,
    TempelhofSchoeneberg,
    Neukoelln,
    TreptowKoepenick,
    MarzahnHellersdorf,
    Lichtenberg,
    Reinickendorf,
    AllBerlin,
}

impl District {
    /// The twelve administrative districts, in the column order of the
    /// published case table.
    pub const NAMED: [District; 12] = [
        District::Mitte,
        District::FriedrichshainKreuzberg,
        District::Pankow,
        District::CharlottenburgWilmersdorf,
        District::Spandau,
        District::SteglitzZehlendorf,
        District::TempelhofSchoeneberg,
        District::Neukoelln,
        District::TreptowKoepenick,
        District::MarzahnHellersdorf,
        District::Lichtenberg,
        District::Reinickendorf,
    ];

    /// Every selectable district, in the order the dashboard lists them.
    pub const ALL: [District; 13] = [
        District::Lichtenberg,
        District::AllBerlin,
        District::Mitte,
        District::FriedrichshainKreuzberg,
        District::Neukoelln,
        District::TempelhofSchoeneberg,
        District::Pankow,
        District::Reinickendorf,
        District::CharlottenburgWilmersdorf,
        District::Spandau,
        District::SteglitzZehlendorf,
        District::TreptowKoepenick,
        District::MarzahnHellersdorf,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            District::Mitte => "Mitte",
            District::FriedrichshainKreuzberg => "Friedrichshain-Kreuzberg",
            District::Pankow => "Pankow",
            District::CharlottenburgWilmersdorf => "Charlottenburg-Wilmersdorf",
            District::Spandau => "Spandau",
            District::SteglitzZehlendorf => "Steglitz-Zehlendorf",
            District::TempelhofSchoeneberg => "Tempelhof-Schöneberg",
            District::Neukoelln => "Neukölln",
            District::TreptowKoepenick => "Treptow-Köpenick",
            District::MarzahnHellersdorf => "Marzahn-Hellersdorf",
            District::Lichtenberg => "Lichtenberg",
            District::Reinickendorf => "Reinickendorf",
            District::AllBerlin => "All Berlin",
        }
    }

    /// Column slot of this district inside a case row. `AllBerlin` sits
    /// after the twelve named districts.
    pub const fn index(self) -> usize {
        match self {
            District::Mitte => 0,
            District::FriedrichshainKreuzberg => 1,
            District::Pankow => 2,
            District::CharlottenburgWilmersdorf => 3,
            District::Spandau => 4,
            District::SteglitzZehlendorf => 5,
            District::TempelhofSchoeneberg => 6,
            District::Neukoelln => 7,
            District::TreptowKoepenick => 8,
            District::MarzahnHellersdorf => 9,
            District::Lichtenberg => 10,
            District::Reinickendorf => 11,
            District::AllBerlin => 12,
        }
    }

    pub const fn is_aggregate(self) -> bool {
        matches!(self, District::AllBerlin)
    }

    /// Resolves a district from either its canonical spelling or the ASCII
    /// transliteration (`Neukoelln`, `Tempelhof-Schoeneberg`, ...).
    /// Matching is case-sensitive; surrounding whitespace is ignored.
    pub fn from_name(name: &str) -> Option<District> {
        let name = name.trim();
        District::ALL
            .into_iter()
            .find(|district| district.name() == name || transliterate(district.name()) == name)
    }
}

fn transliterate(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    for ch in name.chars() {
        match ch {
            'ä' => out.push_str("ae"),
            'ö' => out.push_str("oe"),
            'ü' => out.push_str("ue"),
            'Ä' => out.push_str("Ae"),
            'Ö' => out.push_str("Oe"),
            'Ü' => out.push_str("Ue"),
            'ß' => out.push_str("ss"),
            other => out.push(other),
        }
    }
    out
}

impl fmt::Display for District {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for District {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        District::from_name(s).ok_or_else(|| DashboardError::UnknownDistrict(s.to_string()))
    }
}

impl Serialize for District {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}
