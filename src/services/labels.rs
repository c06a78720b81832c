use crate::schemas::{EntityId, Property, Tenant, Unit};
use crate::services::ledger::EntityIndex;

/// Placeholder for a reference that resolves to nothing at all.
const UNRESOLVED: &str = "-";

pub fn property_label(property: &Property) -> String {
    let name = property.name.trim();
    if name.is_empty() {
        format!("Property #{}", property.id)
    } else {
        name.to_string()
    }
}

pub fn tenant_label(tenant: &Tenant) -> String {
    let full = format!("{} {}", tenant.first_name.trim(), tenant.last_name.trim());
    let full = full.trim();
    if full.is_empty() {
        format!("Tenant #{}", tenant.id)
    } else {
        full.to_string()
    }
}

pub fn unit_label(unit: &Unit) -> String {
    let number = unit.unit_number.trim();
    if number.is_empty() {
        format!("Unit #{}", unit.id)
    } else {
        number.to_string()
    }
}

/// Resolve a property foreign key to a display label. A dangling id keeps
/// the id visible; an absent id shows the generic placeholder.
pub fn resolve_property(index: &EntityIndex, id: &EntityId) -> String {
    if id.is_empty() {
        return UNRESOLVED.to_string();
    }
    match index.property(id) {
        Some(property) => property_label(property),
        None => format!("Property #{id}"),
    }
}

pub fn resolve_tenant(index: &EntityIndex, id: &EntityId) -> String {
    if id.is_empty() {
        return UNRESOLVED.to_string();
    }
    match index.tenant(id) {
        Some(tenant) => tenant_label(tenant),
        None => format!("Tenant #{id}"),
    }
}

pub fn resolve_unit(index: &EntityIndex, id: &EntityId) -> String {
    if id.is_empty() {
        return UNRESOLVED.to_string();
    }
    match index.unit(id) {
        Some(unit) => unit_label(unit),
        None => format!("Unit #{id}"),
    }
}

/// Combined `<property> — <unit>` label for a unit foreign key.
pub fn unit_full_label(index: &EntityIndex, unit_id: &EntityId) -> String {
    if unit_id.is_empty() {
        return UNRESOLVED.to_string();
    }
    match index.unit(unit_id) {
        Some(unit) => format!(
            "{} — {}",
            resolve_property(index, &unit.property_id),
            unit_label(unit)
        ),
        None => format!("Unit #{unit_id}"),
    }
}
