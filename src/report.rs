use std::fmt::Write;

use crate::schemas::{LeaseStatus, Snapshot};
use crate::services::labels::{resolve_property, resolve_tenant, resolve_unit, unit_full_label};
use crate::services::ledger::{
    aggregate_payments, compute_delinquency, compute_status, compute_totals, EntityIndex,
};

/// One display row of the rent roll for the reporting month.
#[derive(Debug, Clone)]
pub struct RentRollRow {
    pub property: String,
    pub unit: String,
    pub tenant: String,
    pub status: LeaseStatus,
}

/// Join each lease in the snapshot to its property, unit, and tenant labels
/// together with its computed financial status, in snapshot order.
pub fn build_rent_roll(snapshot: &Snapshot) -> Vec<RentRollRow> {
    let index = EntityIndex::build(&snapshot.properties, &snapshot.units, &snapshot.tenants);
    let paid_by_lease = aggregate_payments(&snapshot.payments);

    snapshot
        .leases
        .iter()
        .map(|lease| {
            let property = match index.unit(&lease.unit_id) {
                Some(unit) => resolve_property(&index, &unit.property_id),
                None => "-".to_string(),
            };
            RentRollRow {
                property,
                unit: resolve_unit(&index, &lease.unit_id),
                tenant: resolve_tenant(&index, &lease.tenant_id),
                status: compute_status(lease, &paid_by_lease),
            }
        })
        .collect()
}

/// Currency display. Non-finite values render as "-".
pub fn money(value: f64) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }
    format!("${value:.2}")
}

/// Render the monthly report: totals, the rent roll, and the top delinquent
/// leases (largest outstanding balance first, capped at `delinquency_limit`).
pub fn render_monthly_report(snapshot: &Snapshot, delinquency_limit: usize) -> String {
    let mut out = String::new();

    let totals = compute_totals(&snapshot.leases, &snapshot.payments);
    let _ = writeln!(out, "Reporting month: {}", snapshot.month);
    let _ = writeln!(
        out,
        "Due {}  Collected {}  Outstanding {}",
        money(totals.due),
        money(totals.collected),
        money(totals.outstanding)
    );
    let _ = writeln!(out);

    let rent_roll = build_rent_roll(snapshot);
    let _ = writeln!(out, "Rent roll ({} leases)", rent_roll.len());
    let _ = writeln!(
        out,
        "{:<10} {:<24} {:<28} {:<24} {:>12} {:>12} {:>12} {:<8}",
        "lease", "property", "unit", "tenant", "due", "paid", "outstanding", "status"
    );
    for row in &rent_roll {
        let _ = writeln!(
            out,
            "{:<10} {:<24} {:<28} {:<24} {:>12} {:>12} {:>12} {:<8}",
            row.status.lease_id,
            row.property,
            row.unit,
            row.tenant,
            money(row.status.due),
            money(row.status.paid),
            money(row.status.outstanding),
            row.status.status
        );
    }
    let _ = writeln!(out);

    let index = EntityIndex::build(&snapshot.properties, &snapshot.units, &snapshot.tenants);
    let paid_by_lease = aggregate_payments(&snapshot.payments);
    let delinquent = compute_delinquency(&snapshot.leases, &paid_by_lease);
    if delinquent.is_empty() {
        let _ = writeln!(out, "No delinquent leases for {}.", snapshot.month);
    } else {
        let _ = writeln!(
            out,
            "Delinquent leases ({} total, showing up to {})",
            delinquent.len(),
            delinquency_limit
        );
        let leases_by_id: std::collections::HashMap<_, _> = snapshot
            .leases
            .iter()
            .map(|lease| (lease.id.clone(), lease))
            .collect();
        for status in delinquent.iter().take(delinquency_limit) {
            let (unit, tenant) = match leases_by_id.get(&status.lease_id) {
                Some(lease) => (
                    unit_full_label(&index, &lease.unit_id),
                    resolve_tenant(&index, &lease.tenant_id),
                ),
                None => ("-".to_string(), "-".to_string()),
            };
            let _ = writeln!(
                out,
                "{:<10} {:<40} {:<24} {:>12}",
                status.lease_id,
                unit,
                tenant,
                money(status.outstanding)
            );
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::{build_rent_roll, money, render_monthly_report};
    use crate::month::ReportingMonth;
    use crate::schemas::{Lease, Payment, PaymentStatus, Property, Snapshot, Tenant, Unit};

    fn snapshot() -> Snapshot {
        Snapshot {
            month: ReportingMonth::parse("2026-03").unwrap(),
            properties: vec![Property {
                id: 1.into(),
                name: "Maple Court".to_string(),
                ..Property::default()
            }],
            units: vec![Unit {
                id: 10.into(),
                property_id: 1.into(),
                unit_number: "3B".to_string(),
                ..Unit::default()
            }],
            tenants: vec![Tenant {
                id: 20.into(),
                first_name: "Ana".to_string(),
                last_name: "Silva".to_string(),
                ..Tenant::default()
            }],
            leases: vec![
                Lease {
                    id: 100.into(),
                    unit_id: 10.into(),
                    tenant_id: 20.into(),
                    monthly_rent: 1000.0,
                    ..Lease::default()
                },
                // Dangling unit and tenant references.
                Lease {
                    id: 101.into(),
                    unit_id: 99.into(),
                    tenant_id: 98.into(),
                    monthly_rent: 800.0,
                    ..Lease::default()
                },
            ],
            payments: vec![Payment {
                id: 1000.into(),
                lease_id: 100.into(),
                amount: 400.0,
                ..Payment::default()
            }],
        }
    }

    #[test]
    fn rent_roll_joins_labels_and_status() {
        let rows = build_rent_roll(&snapshot());
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].property, "Maple Court");
        assert_eq!(rows[0].unit, "3B");
        assert_eq!(rows[0].tenant, "Ana Silva");
        assert_eq!(rows[0].status.status, PaymentStatus::Partial);
        assert_eq!(rows[0].status.outstanding, 600.0);

        // Dangling references degrade to placeholders, never errors.
        assert_eq!(rows[1].property, "-");
        assert_eq!(rows[1].unit, "Unit #99");
        assert_eq!(rows[1].tenant, "Tenant #98");
        assert_eq!(rows[1].status.status, PaymentStatus::Unpaid);
    }

    #[test]
    fn money_formats_two_decimals() {
        assert_eq!(money(1000.0), "$1000.00");
        assert_eq!(money(0.5), "$0.50");
        assert_eq!(money(f64::NAN), "-");
    }

    #[test]
    fn report_lists_delinquents_largest_first() {
        let rendered = render_monthly_report(&snapshot(), 10);
        assert!(rendered.contains("Due $1800.00  Collected $400.00  Outstanding $1400.00"));
        let lease_800 = rendered.rfind("$800.00").unwrap();
        let lease_600 = rendered.rfind("$600.00").unwrap();
        assert!(lease_800 < lease_600, "largest outstanding renders first");
    }

    #[test]
    fn report_caps_delinquency_rows() {
        let mut snap = snapshot();
        snap.payments.clear();
        let rendered = render_monthly_report(&snap, 1);
        assert!(rendered.contains("2 total, showing up to 1"));
    }
}
