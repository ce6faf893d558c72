//! Contact Form
//!
//! This example walks a contact form through the full engine lifecycle.
//!
//! Key concepts:
//! - Declaring fields with `field_enum!` and a record with `FormData`
//! - Rule-based sync validation that reports every failing rule
//! - Debounced async validation and stale result discarding
//! - Blocked submits, failed submits, and recovery by editing
//!
//! Run with: cargo run --example contact_form

use formstate::core::{Field, FormData};
use formstate::schema::SchemaBuilder;
use formstate::{field_enum, FormConfig, FormEngine, FormOptions, FormState};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

field_enum! {
    pub enum ContactField {
        Name,
        Email,
        Message,
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
struct Contact {
    name: String,
    email: String,
    message: String,
}

impl FormData for Contact {
    type Field = ContactField;
    type Value = String;

    fn get(&self, field: ContactField) -> String {
        match field {
            ContactField::Name => self.name.clone(),
            ContactField::Email => self.email.clone(),
            ContactField::Message => self.message.clone(),
        }
    }

    fn set(&mut self, field: ContactField, value: String) {
        match field {
            ContactField::Name => self.name = value,
            ContactField::Email => self.email = value,
            ContactField::Message => self.message = value,
        }
    }
}

// Simulated remote lookup
async fn check_email_domain(email: String) -> Result<(), String> {
    tokio::time::sleep(Duration::from_millis(150)).await;
    if email.ends_with("@spam.com") {
        Err("This email domain is not allowed".to_string())
    } else {
        Ok(())
    }
}

fn print_state(label: &str, state: &FormState<Contact>) {
    println!("--- {label}");
    println!("  status:     {}", state.status().name());
    println!("  validating: {:?}", state.validating());
    println!("  touched:    {:?}", state.touched());
    for (field, messages) in state.errors() {
        println!("  {}: {}", field.name(), messages.join("; "));
    }
    if let Some(error) = state.submission_error() {
        println!("  submission error: {error}");
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let options = FormOptions::from_json(r#"{ "mode": "on_change", "async_debounce_ms": 200 }"#)?;
    let network_up = Arc::new(AtomicBool::new(false));
    let network = Arc::clone(&network_up);

    let schema = SchemaBuilder::<Contact>::new()
        .require_value(ContactField::Name, |v: &String| !v.trim().is_empty(), "Name is required")
        .require_value(ContactField::Email, |v: &String| v.contains('@'), "Invalid email address")
        .require_value(ContactField::Message, |v: &String| !v.is_empty(), "Message is required")
        .require_value(
            ContactField::Message,
            |v: &String| v.chars().count() >= 10,
            "Message must be at least 10 characters",
        )
        .build();

    let config = FormConfig::builder(Contact::default())
        .schema(schema)
        .options(options)
        .async_validator(ContactField::Email, check_email_domain)
        .on_submit(move |contact: Contact| {
            let up = network.load(Ordering::SeqCst);
            async move {
                tokio::time::sleep(Duration::from_millis(100)).await;
                if up {
                    println!("  (server accepted message from {})", contact.email);
                    Ok(())
                } else {
                    Err("network error".to_string())
                }
            }
        })
        .on_submit_success(|contact: &Contact| println!("  success listener: thanks, {}!", contact.name))
        .on_submit_error(|error: &str| println!("  error listener: {error}"))
        .build()?;

    let engine = FormEngine::new(config)?;

    engine.submit();
    print_state("empty submit is rejected", &engine.state());

    // Typing quickly: only the last value is checked.
    for value in ["ada", "ada@", "ada@spam.com"] {
        engine.set_field(ContactField::Email, value.to_string());
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    print_state("email settled", &engine.settled().await);

    engine.set_field(ContactField::Name, "Ada".to_string());
    engine.set_field(ContactField::Email, "ada@example.com".to_string());
    engine.set_field(ContactField::Message, "Hello from the engine!".to_string());
    engine.submit();
    print_state("submit while validating waits", &engine.state());
    print_state("first submission", &engine.settled().await);

    network_up.store(true, Ordering::SeqCst);
    engine.set_field(ContactField::Message, "Hello again from the engine!".to_string());
    print_state("editing returns to idle", &engine.settled().await);

    engine.submit();
    print_state("second submission", &engine.settled().await);

    println!("--- status history");
    for step in engine.history().transitions() {
        println!(
            "  #{} {} -> {} at {}",
            step.submission,
            step.from.name(),
            step.to.name(),
            step.timestamp.format("%H:%M:%S%.3f")
        );
    }

    Ok(())
}
