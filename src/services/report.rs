use std::collections::BTreeMap;

use chrono::Datelike;

use crate::domain::constancia::{Constancia, ConstanciaEstado};
use crate::dto::report::{MonthlyReportRow, ReportPageData, ReportTotals};
use crate::models::auth::AuthenticatedUser;
use crate::repository::{ConstanciaListQuery, ConstanciaReader};
use crate::routes::check_role;
use crate::services::{ServiceError, ServiceResult};
use crate::{ADMIN_ROLE, PLANILLERO_ROLE};

const MONTH_NAMES: [&str; 12] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

fn month_label(month: u32, year: i32) -> String {
    let name = MONTH_NAMES
        .get(month.saturating_sub(1) as usize)
        .copied()
        .unwrap_or("");
    format!("{name} {year}")
}

/// Groups the requests of one calendar year into per-month counts plus the
/// annual totals. Months without requests are omitted.
pub fn group_by_month(
    constancias: &[Constancia],
    year: i32,
) -> (Vec<MonthlyReportRow>, ReportTotals) {
    let mut months: BTreeMap<u32, MonthlyReportRow> = BTreeMap::new();
    let mut totals = ReportTotals::default();

    for constancia in constancias {
        let created = constancia.created_at.date();
        if created.year() != year {
            continue;
        }

        let month = created.month();
        let row = months.entry(month).or_insert_with(|| MonthlyReportRow {
            mes: month_label(month, year),
            total: 0,
            pendientes: 0,
            aprobadas: 0,
            rechazadas: 0,
        });

        row.total += 1;
        totals.total += 1;
        match constancia.estado {
            ConstanciaEstado::Pendiente => {
                row.pendientes += 1;
                totals.pendientes += 1;
            }
            ConstanciaEstado::Aprobada => {
                row.aprobadas += 1;
                totals.aprobadas += 1;
            }
            ConstanciaEstado::Rechazada => {
                row.rechazadas += 1;
                totals.rechazadas += 1;
            }
        }
    }

    (months.into_values().collect(), totals)
}

/// Computes the monthly report for the requested year. Reviewers only.
/// Without an explicit year the most recent year with data is used.
pub fn monthly_report<R>(
    repo: &R,
    user: &AuthenticatedUser,
    year: Option<i32>,
) -> ServiceResult<ReportPageData>
where
    R: ConstanciaReader + ?Sized,
{
    if !check_role(ADMIN_ROLE, &user.roles) && !check_role(PLANILLERO_ROLE, &user.roles) {
        return Err(ServiceError::Unauthorized);
    }

    let constancias = repo
        .list(ConstanciaListQuery::new())
        .map_err(ServiceError::from)?;

    let mut years: Vec<i32> = constancias
        .iter()
        .map(|c| c.created_at.date().year())
        .collect();
    years.sort_unstable();
    years.dedup();
    years.reverse();

    let year = year
        .or_else(|| years.first().copied())
        .unwrap_or_else(|| chrono::Utc::now().year());

    let (rows, totals) = group_by_month(&constancias, year);

    Ok(ReportPageData {
        rows,
        totals,
        years,
        year,
    })
}
