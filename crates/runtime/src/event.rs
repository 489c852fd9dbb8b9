//! Decoding of structured event text.
//!
//! Event text comes from outside the program and is only loosely shaped.
//! Text that is not a JSON object is rejected outright; inside an object,
//! recognized fields are extracted leniently and anything malformed is
//! dropped with a warning instead of failing the whole event.
//!
//! Falsy values (`null`, `false`, `0`, `""`) count as absent.

use game_core::{EquipDirective, Item, ItemKind, Modifiers, StructuredEvent};
use serde_json::{Map, Value};
use tracing::warn;

use crate::error::{Result, RuntimeError};

/// Parses event text into a [`StructuredEvent`].
pub fn parse_event(raw: &str) -> Result<StructuredEvent> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| RuntimeError::InvalidEvent(e.to_string()))?;

    let Value::Object(fields) = value else {
        return Err(RuntimeError::InvalidEvent(
            "event must be a JSON object".into(),
        ));
    };

    Ok(event_from_fields(&fields))
}

fn event_from_fields(fields: &Map<String, Value>) -> StructuredEvent {
    StructuredEvent {
        log: fields.get("log").and_then(log_text),
        gain_items: fields
            .get("gainItems")
            .map(items)
            .unwrap_or_default(),
        remove_items: fields
            .get("removeItems")
            .map(item_ids)
            .unwrap_or_default(),
        xp: fields.get("xp").and_then(integer).filter(|&xp| xp != 0),
        stats_delta: fields
            .get("statsDelta")
            .map(|value| modifiers(value, "statsDelta"))
            .unwrap_or_default(),
        equip: fields.get("equip").and_then(equip_directive),
    }
}

fn log_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(number) if number.as_f64() != Some(0.0) => Some(number.to_string()),
        Value::Bool(true) => Some("true".into()),
        Value::Null | Value::Bool(false) | Value::String(_) | Value::Number(_) => None,
        other => {
            warn!(field = "log", value = %other, "ignoring non-text event log");
            None
        }
    }
}

/// Whole-number view of a JSON number or numeric string; fractions truncate
/// toward zero.
fn integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|f| f.trunc() as i64)),
        Value::String(text) if text.trim().is_empty() => None,
        Value::String(text) => match text.trim().parse::<f64>() {
            Ok(parsed) if parsed.is_finite() => Some(parsed.trunc() as i64),
            _ => {
                warn!(value = %text, "ignoring non-numeric event value");
                None
            }
        },
        Value::Null | Value::Bool(false) => None,
        other => {
            warn!(value = %other, "ignoring non-numeric event value");
            None
        }
    }
}

fn items(value: &Value) -> Vec<Item> {
    let Value::Array(entries) = value else {
        warn!(field = "gainItems", "expected an array, ignoring");
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| {
            let item = item(entry);
            if item.is_none() {
                warn!(entry = %entry, "dropping malformed item grant");
            }
            item
        })
        .collect()
}

fn item(value: &Value) -> Option<Item> {
    let fields = value.as_object()?;
    let id = match fields.get("id")? {
        Value::String(id) if !id.is_empty() => id.clone(),
        Value::Number(number) => number.to_string(),
        _ => return None,
    };
    let text = |key: &str| {
        fields
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned()
    };

    let kind = ItemKind::from(text("type"));
    let name = match text("name") {
        name if name.is_empty() => id.clone(),
        name => name,
    };

    Some(
        Item::new(id, name, kind)
            .with_description(text("description"))
            .with_modifiers(
                fields
                    .get("modifiers")
                    .map(|value| modifiers(value, "modifiers"))
                    .unwrap_or_default(),
            ),
    )
}

fn item_ids(value: &Value) -> Vec<String> {
    let Value::Array(entries) = value else {
        warn!(field = "removeItems", "expected an array, ignoring");
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| match entry {
            Value::String(id) => Some(id.clone()),
            other => {
                warn!(entry = %other, "ignoring non-string item id");
                None
            }
        })
        .collect()
}

fn modifiers(value: &Value, field: &str) -> Modifiers {
    let Value::Object(entries) = value else {
        warn!(field, "expected an object of stat deltas, ignoring");
        return Modifiers::new();
    };

    Modifiers::from_raw(
        entries
            .iter()
            .filter_map(|(key, delta)| Some((key.as_str(), integer(delta)?))),
    )
}

fn equip_directive(value: &Value) -> Option<EquipDirective> {
    let fields = match value {
        Value::Object(fields) => fields,
        Value::Null | Value::Bool(false) => return None,
        other => {
            warn!(field = "equip", value = %other, "expected an object, ignoring");
            return None;
        }
    };

    let slot = fields.get("slot").and_then(Value::as_str);
    let item_id = fields.get("itemId").and_then(Value::as_str);
    match (slot, item_id) {
        (Some(slot), Some(item_id)) => Some(EquipDirective::new(slot, item_id)),
        _ => {
            warn!(field = "equip", "directive needs string slot and itemId, ignoring");
            None
        }
    }
}
