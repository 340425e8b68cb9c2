use crate::districts::District;
use chrono::NaiveDate;

/// Daily new-case counts for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseRow {
    pub date: NaiveDate,
    counts: [u64; 13],
}

impl CaseRow {
    /// Builds a row from the twelve named district counts (in
    /// [`District::NAMED`] order) and fills in the `All Berlin` total.
    /// Returns `None` if the total does not fit in a `u64`.
    pub fn new(date: NaiveDate, named: [u64; 12]) -> Option<Self> {
        let total = named
            .iter()
            .try_fold(0u64, |acc, count| acc.checked_add(*count))?;
        let mut counts = [0u64; 13];
        counts[..12].copy_from_slice(&named);
        counts[District::AllBerlin.index()] = total;
        Some(Self { date, counts })
    }

    pub fn count(&self, district: District) -> u64 {
        self.counts[district.index()]
    }
}

/// The published case table: one row per day, oldest first, with no gaps.
///
/// Only the loader constructs it, after checking that invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseTable {
    rows: Vec<CaseRow>,
}

impl CaseTable {
    pub(crate) fn from_rows(rows: Vec<CaseRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[CaseRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.rows.first().map(|row| row.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.rows.last().map(|row| row.date)
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.rows.iter().map(|row| row.date)
    }

    /// The count column for one district, aligned with [`CaseTable::dates`].
    pub fn column(&self, district: District) -> Vec<u64> {
        self.rows.iter().map(|row| row.count(district)).collect()
    }
}
