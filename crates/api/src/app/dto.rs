use axum::http::StatusCode;
use serde_json::{json, Value};

use ntt_core::AccountId;
use ntt_infra::{AdminDashboard, EntityHistory, EntityListing, ReceivedFromEntity, UserDashboard};
use ntt_ledger::{CounterpartyGroup, TransactionRecord};

use crate::app::errors;

// -------------------------
// Path parameters
// -------------------------

pub fn parse_address(raw: &str) -> Result<AccountId, axum::response::Response> {
    raw.parse::<AccountId>()
        .map_err(|e| errors::json_error(StatusCode::BAD_REQUEST, "invalid_address", e.to_string()))
}

// -------------------------
// Response mapping
// -------------------------

pub fn record_to_json(r: &TransactionRecord) -> Value {
    json!({
        "type": r.kind.label(),
        "from": r.from.to_string(),
        "to": r.to.to_string(),
        "amount": r.amount.format_units(),
        "timestamp": r.timestamp,
    })
}

pub fn entity_listing_to_json(e: &EntityListing) -> Value {
    json!({
        "address": e.address.to_string(),
        "name": e.name,
        "physicalAddress": e.physical_address,
        "balance": e.balance.format_units(),
    })
}

pub fn admin_dashboard_to_json(d: &AdminDashboard) -> Value {
    json!({
        "mintedTotal": d.minted_total.format_units(),
        "revokedTotal": d.revoked_total.format_units(),
        "returnedTotal": d.returned_total.format_units(),
        "entities": d.entities.iter().map(entity_listing_to_json).collect::<Vec<_>>(),
        "skipped": d.skipped,
    })
}

pub fn counterparty_group_to_json(g: &CounterpartyGroup) -> Value {
    json!({
        "counterparty": g.counterparty.to_string(),
        "received": g.received.format_units(),
        "sent": g.sent.format_units(),
        "net": g.net.format_units(),
        "transactions": g.records.len(),
    })
}

pub fn entity_history_to_json(h: &EntityHistory) -> Value {
    json!({
        "entity": h.entity.to_string(),
        "name": h.name,
        "balance": h.balance.format_units(),
        "totals": {
            "received": h.summary.total_received.format_units(),
            "sent": h.summary.total_sent.format_units(),
            "sentToUsers": h.sent_to_users.format_units(),
            "sentToAdmin": h.sent_to_admin.format_units(),
            "revoked": h.summary.revoked_total.format_units(),
            "net": h.summary.net.format_units(),
        },
        "counterparties": h.counterparties.iter().map(counterparty_group_to_json).collect::<Vec<_>>(),
        "transactions": h.records.iter().map(record_to_json).collect::<Vec<_>>(),
        "skipped": h.skipped,
    })
}

pub fn received_from_entity_to_json(r: &ReceivedFromEntity) -> Value {
    json!({
        "entity": r.entity.to_string(),
        "name": r.name,
        "received": r.received.format_units(),
        "paid": r.paid.format_units(),
        "net": r.net.format_units(),
    })
}

pub fn user_dashboard_to_json(d: &UserDashboard) -> Value {
    json!({
        "user": d.user.to_string(),
        "totalReceived": d.total_received.format_units(),
        "entities": d.entities.iter().map(received_from_entity_to_json).collect::<Vec<_>>(),
        "skipped": d.skipped,
    })
}

/// `Content-Disposition` value of an entity's CSV download.
pub fn csv_attachment(entity: &AccountId) -> String {
    format!("attachment; filename=\"ntt_transactions_{entity}.csv\"")
}
