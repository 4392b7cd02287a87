//! Plain-text renderers for command results.

use serde_json::Value;

/// Extract a display string for one field of a response object: strings
/// verbatim, arrays comma-joined, missing or null as `N/A`.
fn field(value: &Value, key: &str) -> String {
    match value.get(key) {
        None | Some(Value::Null) => "N/A".to_string(),
        Some(Value::String(text)) => text.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(", "),
        Some(other) => other.to_string(),
    }
}

pub(crate) fn print_email_sent(data: &Value) {
    println!("Email sent!");
    println!("ID: {}", field(data, "id"));
}

pub(crate) fn print_email_status(data: &Value) {
    for key in ["id", "from", "to", "subject", "created_at", "last_event"] {
        println!("{key}: {}", field(data, key));
    }
}

pub(crate) fn print_inbound_list(items: &[Value]) {
    if items.is_empty() {
        println!("No inbound emails found.");
        return;
    }
    println!("{:<34} {:<28} {:<34} DATE", "ID", "FROM", "SUBJECT");
    for item in items {
        println!(
            "{:<34} {:<28} {:<34} {}",
            field(item, "id"),
            field(item, "from"),
            field(item, "subject"),
            field(item, "created_at"),
        );
    }
}

pub(crate) fn print_inbound_detail(data: &Value) {
    for key in ["id", "from", "to", "subject", "created_at", "text", "html"] {
        println!("{key}: {}", field(data, key));
    }
}

pub(crate) fn print_domains(items: &[Value]) {
    if items.is_empty() {
        println!("No domains found.");
        return;
    }
    println!("{:<34} {:<26} STATUS", "ID", "NAME");
    for item in items {
        println!(
            "{:<34} {:<26} {}",
            field(item, "id"),
            field(item, "name"),
            field(item, "status"),
        );
    }
}

pub(crate) fn print_domain_verified(data: &Value) {
    println!("Domain verification initiated");
    println!("ID: {}", field(data, "id"));
}

pub(crate) fn print_audiences(items: &[Value]) {
    if items.is_empty() {
        println!("No audiences found.");
        return;
    }
    println!("{:<34} NAME", "ID");
    for item in items {
        println!("{:<34} {}", field(item, "id"), field(item, "name"));
    }
}

pub(crate) fn print_audience_created(data: &Value) {
    println!("Audience created!");
    println!("ID: {}", field(data, "id"));
}

pub(crate) fn print_audience_deleted() {
    println!("Audience deleted.");
}

pub(crate) fn print_contacts(items: &[Value]) {
    if items.is_empty() {
        println!("No contacts found.");
        return;
    }
    println!("{:<34} {:<30} {:<16} LAST NAME", "ID", "EMAIL", "FIRST NAME");
    for item in items {
        println!(
            "{:<34} {:<30} {:<16} {}",
            field(item, "id"),
            field(item, "email"),
            field(item, "first_name"),
            field(item, "last_name"),
        );
    }
}

pub(crate) fn print_contact_created(data: &Value) {
    println!("Contact created!");
    println!("ID: {}", field(data, "id"));
}

pub(crate) fn print_contact_deleted() {
    println!("Contact deleted.");
}
