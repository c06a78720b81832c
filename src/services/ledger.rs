use std::collections::HashMap;

use crate::schemas::{
    EntityId, Lease, LeaseStatus, Payment, PaymentStatus, Property, SnapshotTotals, Tenant, Unit,
};

/// Id-keyed lookups over one snapshot's entity collections.
///
/// Duplicate ids within a collection overwrite silently; the last row wins.
#[derive(Debug, Default)]
pub struct EntityIndex {
    properties: HashMap<EntityId, Property>,
    units: HashMap<EntityId, Unit>,
    tenants: HashMap<EntityId, Tenant>,
}

impl EntityIndex {
    pub fn build(properties: &[Property], units: &[Unit], tenants: &[Tenant]) -> Self {
        let mut index = Self::default();
        for property in properties {
            index
                .properties
                .insert(property.id.clone(), property.clone());
        }
        for unit in units {
            index.units.insert(unit.id.clone(), unit.clone());
        }
        for tenant in tenants {
            index.tenants.insert(tenant.id.clone(), tenant.clone());
        }
        index
    }

    pub fn property(&self, id: &EntityId) -> Option<&Property> {
        self.properties.get(id)
    }

    pub fn unit(&self, id: &EntityId) -> Option<&Unit> {
        self.units.get(id)
    }

    pub fn tenant(&self, id: &EntityId) -> Option<&Tenant> {
        self.tenants.get(id)
    }
}

/// Sum of payment amounts per lease id for the reporting month.
///
/// Payments whose lease_id matches no lease still land in the map; they are
/// simply never looked up, so they cannot break status computation.
pub fn aggregate_payments(payments: &[Payment]) -> HashMap<EntityId, f64> {
    let mut paid_by_lease = HashMap::new();
    for payment in payments {
        *paid_by_lease.entry(payment.lease_id.clone()).or_insert(0.0) += payment.amount;
    }
    paid_by_lease
}

/// Per-lease status for the month.
///
/// A lease with no rent due is always `Unpaid`, even when payments were
/// recorded against it; a rent-free lease is never reported as "Paid".
pub fn compute_status(lease: &Lease, paid_by_lease: &HashMap<EntityId, f64>) -> LeaseStatus {
    let due = lease.monthly_rent;
    let paid = paid_by_lease.get(&lease.id).copied().unwrap_or(0.0);
    let outstanding = (due - paid).max(0.0);

    let status = if due > 0.0 && paid >= due {
        PaymentStatus::Paid
    } else if due > 0.0 && paid > 0.0 {
        PaymentStatus::Partial
    } else {
        PaymentStatus::Unpaid
    };

    LeaseStatus {
        lease_id: lease.id.clone(),
        due,
        paid,
        outstanding,
        status,
    }
}

/// Leases with an outstanding balance, largest balance first.
///
/// The sort is stable: equal balances keep their snapshot order, which the
/// "top delinquents" display relies on.
pub fn compute_delinquency(
    leases: &[Lease],
    paid_by_lease: &HashMap<EntityId, f64>,
) -> Vec<LeaseStatus> {
    let mut rows: Vec<LeaseStatus> = leases
        .iter()
        .map(|lease| compute_status(lease, paid_by_lease))
        .filter(|status| status.outstanding > 0.0)
        .collect();
    rows.sort_by(|a, b| b.outstanding.total_cmp(&a.outstanding));
    rows
}

/// Snapshot totals over the raw sums: total due over all leases, total
/// collected over all payments, and the clamped difference.
///
/// Deliberately NOT the sum of per-lease `outstanding` values. An overpaid
/// lease offsets an underpaid one here, while the per-lease clamp in
/// `compute_status` never lets an individual balance go negative, so the two
/// figures differ whenever both over- and underpayment occur in one month.
pub fn compute_totals(leases: &[Lease], payments: &[Payment]) -> SnapshotTotals {
    let due: f64 = leases.iter().map(|lease| lease.monthly_rent).sum();
    let collected: f64 = payments.iter().map(|payment| payment.amount).sum();
    SnapshotTotals {
        due,
        collected,
        outstanding: (due - collected).max(0.0),
    }
}

/// Prefill amount for recording a manual payment: the outstanding balance
/// when there is one, otherwise the full monthly rent.
#[allow(dead_code)]
pub fn suggested_payment(status: &LeaseStatus) -> f64 {
    if status.outstanding > 0.0 {
        status.outstanding
    } else {
        status.due
    }
}
