use std::io::Read;
use std::path::Path;

use serde_json::Value;

use tessera_core::event::{Event, EventDescriptor, EventTypeRegistry, Request};
use tessera_core::KernelError;

/// One-line summary of a registered event type.
pub fn describe_descriptor(descriptor: &EventDescriptor) -> String {
    let mut constructors = Vec::new();
    if descriptor.has_default_constructor() {
        constructors.push("default");
    }
    if descriptor.has_parts_constructor() {
        constructors.push("parts");
    }
    let mut line = format!("{} ({}) [{}]", descriptor.type_name(), descriptor.rust_name(), constructors.join(", "));
    if let Some(parent) = descriptor.parent() {
        line.push_str(&format!(" falls back to {}", parent));
    }
    line
}

/// One-line summary of a decoded event: its type, the registered type it was
/// built as (or `generic`) and its payload.
pub fn describe_event(event: &dyn Event, registry: &EventTypeRegistry) -> String {
    let built_as = registry
        .type_name_of(event.as_any().type_id())
        .unwrap_or("generic");
    let data = event.data().map(Value::to_string).unwrap_or_else(|| "null".to_string());
    format!("{} -> {} {}", event.event_type(), built_as, data)
}

/// Read requests from a JSON file or, for `-`, from stdin. The document is
/// either one request or an array of them.
pub fn read_requests(input: &str) -> Result<Vec<Request>, KernelError> {
    let text = if input == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(|e| KernelError::Other(format!("failed to read stdin: {}", e)))?;
        text
    } else {
        std::fs::read_to_string(Path::new(input))
            .map_err(|e| KernelError::Other(format!("failed to read {}: {}", input, e)))?
    };

    let document: Value = serde_json::from_str(&text)
        .map_err(|e| KernelError::Other(format!("invalid JSON: {}", e)))?;
    let parse = |value: Value| {
        serde_json::from_value::<Request>(value)
            .map_err(|e| KernelError::Other(format!("invalid request: {}", e)))
    };
    match document {
        Value::Array(items) => items.into_iter().map(parse).collect(),
        other => Ok(vec![parse(other)?]),
    }
}
