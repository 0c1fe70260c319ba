//! Seniority ranking for turn order
//!
//! Employees inside a block are presented by hire date ascending; equal
//! hire dates fall back to the numeric payroll code ascending. Display
//! order only - the server decides actual scheduling.

use crate::transform::EmployeeView;
use chrono::NaiveDate;

/// Sort key for one employee: (hire timestamp, numeric nomina)
///
/// Unparsable hire dates and non-numeric nominas sort last so malformed
/// records never float to the top of a turn list.
fn sort_key(employee: &EmployeeView) -> (i64, i64) {
    let hired = parse_hire_date(&employee.fecha_ingreso)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp())
        .unwrap_or(i64::MAX);
    let code = employee.codigo.trim().parse::<i64>().unwrap_or(i64::MAX);
    (hired, code)
}

fn parse_hire_date(raw: &str) -> Option<NaiveDate> {
    // plain date or full ISO timestamp
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| raw.get(..10).and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok()))
}

/// Return the employees ordered by seniority
///
/// The sort is stable, so ranking an already-ranked list yields the same
/// order.
pub fn rank_by_seniority(employees: &[EmployeeView]) -> Vec<EmployeeView> {
    let mut ranked = employees.to_vec();
    ranked.sort_by_key(sort_key);
    ranked
}
