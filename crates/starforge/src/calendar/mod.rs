//! Calendar ("date") dimension generation.
//!
//! Produces one row per calendar day covering the observed date range of the
//! source table, extended forward to a configurable horizon. Labels follow
//! the pt-BR business conventions the downstream reports were built on:
//! the partial week before a month's first Monday is "Semana 0", and the
//! business-day counter advances on weekdays only. These conventions are
//! reproduced exactly; they are not aligned to any external standard.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::config::Thresholds;
use crate::error::Result;
use crate::inference::parse_date_day_first;
use crate::input::DataTable;
use crate::schema::MaterializedTable;

/// pt-BR weekday names, Monday = 0.
static WEEKDAY_NAMES: [&str; 7] = [
    "SEGUNDA-FEIRA",
    "TERÇA-FEIRA",
    "QUARTA-FEIRA",
    "QUINTA-FEIRA",
    "SEXTA-FEIRA",
    "SÁBADO",
    "DOMINGO",
];

/// pt-BR month names, January = index 0.
static MONTH_NAMES: [&str; 12] = [
    "JANEIRO",
    "FEVEREIRO",
    "MARÇO",
    "ABRIL",
    "MAIO",
    "JUNHO",
    "JULHO",
    "AGOSTO",
    "SETEMBRO",
    "OUTUBRO",
    "NOVEMBRO",
    "DEZEMBRO",
];

static MONTH_ABBREVS: [&str; 12] = [
    "JAN", "FEV", "MAR", "ABR", "MAI", "JUN", "JUL", "AGO", "SET", "OUT", "NOV", "DEZ",
];

/// One generated calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarRow {
    /// The calendar date.
    pub date: NaiveDate,
    /// Localized weekday name.
    pub weekday_name: String,
    /// Localized month name.
    pub month_name: String,
    /// Three-letter month abbreviation.
    pub month_abbrev: String,
    /// `ABREV/AAAA` label, e.g. `MAR/2024`.
    pub month_year: String,
    /// Month number, 1-12.
    pub month_number: u32,
    /// Calendar year.
    pub year: i32,
    /// Ordinal day within the year, 1-based.
    pub day_of_year: u32,
    /// `Semana N` within the month; days before the month's first Monday
    /// are `Semana 0`.
    pub week_of_month: String,
    /// `N Trimestre AAAA` label.
    pub quarter_label: String,
    /// Saturday or Sunday.
    pub is_weekend: bool,
    /// Running count of weekdays within the year; holds its value over
    /// weekends and resets each January 1st.
    pub business_day_of_year: u32,
    /// Total weekdays in this row's month.
    pub business_days_in_month: u32,
    /// Holiday marker. Always empty here: holiday enrichment is an
    /// extension point, not computed by this engine.
    pub holiday_name: String,
    /// Holiday category. Always empty, same extension point.
    pub holiday_kind: String,
}

/// Scan all date-like columns of the table and return the overall
/// min/max dates found, if any.
pub fn discover_date_range(
    table: &DataTable,
    thresholds: &Thresholds,
) -> Option<(NaiveDate, NaiveDate)> {
    let row_count = table.row_count();
    if row_count == 0 {
        return None;
    }

    let mut min_date: Option<NaiveDate> = None;
    let mut max_date: Option<NaiveDate> = None;

    for index in 0..table.column_count() {
        let parsed: Vec<NaiveDate> = table
            .column_values(index)
            .filter_map(parse_date_day_first)
            .collect();

        let fraction = parsed.len() as f64 / row_count as f64;
        if fraction < thresholds.date_like_fraction {
            continue;
        }

        for date in parsed {
            min_date = Some(min_date.map_or(date, |m| m.min(date)));
            max_date = Some(max_date.map_or(date, |m| m.max(date)));
        }
    }

    min_date.zip(max_date)
}

/// Generates the calendar dimension.
///
/// Deterministic for a given table and horizon: rerunning yields an
/// identical row sequence. Output always fully replaces any previous
/// calendar; there is no incremental merge.
pub struct CalendarGenerator {
    thresholds: Thresholds,
}

impl CalendarGenerator {
    /// Create a generator with default date-detection thresholds.
    pub fn new() -> Self {
        Self {
            thresholds: Thresholds::default(),
        }
    }

    /// Create a generator with custom thresholds.
    pub fn with_thresholds(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    /// Generate one row per day in `[min_date, max(max_date, horizon)]`.
    ///
    /// When the table holds no date-like column the span falls back to
    /// `[Jan 1 of (horizon year - 10), horizon]`.
    pub fn generate(&self, table: &DataTable, horizon: NaiveDate) -> Vec<CalendarRow> {
        let (start, end) = match discover_date_range(table, &self.thresholds) {
            Some((min, max)) => (min, max.max(horizon)),
            None => {
                let start = NaiveDate::from_ymd_opt(horizon.year() - 10, 1, 1)
                    .unwrap_or(horizon);
                (start, horizon)
            }
        };
        self.generate_range(start, end)
    }

    /// Generate rows for an explicit inclusive date range.
    pub fn generate_range(&self, start: NaiveDate, end: NaiveDate) -> Vec<CalendarRow> {
        let mut rows = Vec::new();
        let mut current = start;
        // The counter starts at the first generated day, not January 1st:
        // a range opening mid-year numbers its first weekday 1.
        let mut business_counter = 0u32;
        let mut counter_year = start.year();

        let mut month_weekdays = weekdays_in_month(current.year(), current.month());
        let mut month_key = (current.year(), current.month());

        while current <= end {
            if current.year() != counter_year {
                counter_year = current.year();
                business_counter = 0;
            }
            if (current.year(), current.month()) != month_key {
                month_key = (current.year(), current.month());
                month_weekdays = weekdays_in_month(current.year(), current.month());
            }

            let weekend = is_weekend(current);
            if !weekend {
                business_counter += 1;
            }

            rows.push(self.build_row(current, weekend, business_counter, month_weekdays));

            match current.succ_opt() {
                Some(next) => current = next,
                None => break,
            }
        }

        rows
    }

    fn build_row(
        &self,
        date: NaiveDate,
        weekend: bool,
        business_day_of_year: u32,
        business_days_in_month: u32,
    ) -> CalendarRow {
        let weekday = date.weekday().num_days_from_monday() as usize;
        let month_idx = (date.month() - 1) as usize;
        let quarter = (date.month() - 1) / 3 + 1;

        CalendarRow {
            date,
            weekday_name: WEEKDAY_NAMES[weekday].to_string(),
            month_name: MONTH_NAMES[month_idx].to_string(),
            month_abbrev: MONTH_ABBREVS[month_idx].to_string(),
            month_year: format!("{}/{}", MONTH_ABBREVS[month_idx], date.year()),
            month_number: date.month(),
            year: date.year(),
            day_of_year: date.ordinal(),
            week_of_month: week_of_month_label(date),
            quarter_label: format!("{} Trimestre {}", quarter, date.year()),
            is_weekend: weekend,
            business_day_of_year,
            business_days_in_month,
            holiday_name: String::new(),
            holiday_kind: String::new(),
        }
    }
}

impl Default for CalendarGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Headers of the exported `dim_calendario` table, matching the report
/// conventions downstream consumers expect.
static CALENDAR_HEADERS: &[&str] = &[
    "DATA",
    "DATA_DIA",
    "DATA_MES",
    "MÊS_ABREV",
    "MÊS/ANO",
    "ANO",
    "DIA_ANO",
    "SEMANA",
    "TRI",
    "É FDS?",
    "DIAÚTIL_ANO",
    "QTD D.U",
    "NOME_FERIADO",
    "TIPO",
];

/// Project generated rows into the exportable `dim_calendario` table.
/// Dates render day-first; booleans render as `SIM`/`NÃO`.
pub fn dimension_table(rows: &[CalendarRow]) -> Result<MaterializedTable> {
    let data: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            vec![
                row.date.format("%d/%m/%Y").to_string(),
                row.weekday_name.clone(),
                row.month_name.clone(),
                row.month_abbrev.clone(),
                row.month_year.clone(),
                row.year.to_string(),
                row.day_of_year.to_string(),
                row.week_of_month.clone(),
                row.quarter_label.clone(),
                if row.is_weekend { "SIM" } else { "NÃO" }.to_string(),
                row.business_day_of_year.to_string(),
                row.business_days_in_month.to_string(),
                row.holiday_name.clone(),
                row.holiday_kind.clone(),
            ]
        })
        .collect();

    MaterializedTable::new(
        "dim_calendario",
        CALENDAR_HEADERS.iter().map(|h| h.to_string()).collect(),
        data,
    )
}

fn is_weekend(date: NaiveDate) -> bool {
    date.weekday().num_days_from_monday() >= 5
}

/// First Monday of the date's month.
fn first_monday(date: NaiveDate) -> NaiveDate {
    let first = date.with_day(1).unwrap();
    let offset = (7 - first.weekday().num_days_from_monday()) % 7;
    first.checked_add_days(Days::new(offset as u64)).unwrap()
}

/// `Semana N` within the month. Days strictly before the first Monday form
/// the partial `Semana 0`; full weeks count from 1 thereafter.
pub fn week_of_month_label(date: NaiveDate) -> String {
    let monday = first_monday(date);
    let week = if date < monday {
        0
    } else {
        1 + (date - monday).num_days() / 7
    };
    format!("Semana {}", week)
}

/// Count of weekdays (Mon-Fri) in the given month.
fn weekdays_in_month(year: i32, month: u32) -> u32 {
    let first = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1).unwrap()
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1).unwrap()
    };

    let mut count = 0;
    let mut d = first;
    while d < next_month {
        if !is_weekend(d) {
            count += 1;
        }
        d = d.succ_opt().unwrap();
    }
    count
}
