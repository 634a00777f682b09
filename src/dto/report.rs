use serde::Serialize;

/// Aggregated counts for one calendar month.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MonthlyReportRow {
    /// Month label, e.g. `Marzo 2024`.
    pub mes: String,
    pub total: usize,
    pub pendientes: usize,
    pub aprobadas: usize,
    pub rechazadas: usize,
}

/// Counts across the whole reporting period.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ReportTotals {
    pub total: usize,
    pub pendientes: usize,
    pub aprobadas: usize,
    pub rechazadas: usize,
}

/// Data required to render the monthly report page.
#[derive(Debug, Clone, Serialize)]
pub struct ReportPageData {
    pub rows: Vec<MonthlyReportRow>,
    pub totals: ReportTotals,
    /// Years that have at least one constancia, newest first.
    pub years: Vec<i32>,
    /// Year the report was computed for.
    pub year: i32,
}
