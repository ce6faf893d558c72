//! Contact form fixture shared by the integration tests.

#![allow(dead_code)]

use formstate::core::FormData;
use formstate::schema::{RuleSchema, SchemaBuilder};
use formstate::{field_enum, FormConfig, FormConfigBuilder, ValidationMode};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const SPAM_ERROR: &str = "This email domain is not allowed";

field_enum! {
    pub enum ContactField {
        Name,
        Email,
        Message,
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl FormData for ContactForm {
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

pub fn contact(name: &str, email: &str, message: &str) -> ContactForm {
    ContactForm {
        name: name.to_string(),
        email: email.to_string(),
        message: message.to_string(),
    }
}

pub fn valid_contact() -> ContactForm {
    contact("Ada", "ada@example.com", "Hello there, engine!")
}

pub fn contact_schema() -> RuleSchema<ContactForm> {
    SchemaBuilder::<ContactForm>::new()
        .require_value(ContactField::Name, |v: &String| !v.is_empty(), "Name is required")
        .require_value(ContactField::Email, |v: &String| v.contains('@'), "Invalid email address")
        .require_value(ContactField::Message, |v: &String| !v.is_empty(), "Message is required")
        .require_value(
            ContactField::Message,
            |v: &String| v.chars().count() >= 10,
            "Message must be at least 10 characters",
        )
        .build()
}

/// Builder with the contact schema and mode set; validators and handlers are
/// up to each test.
pub fn contact_builder(mode: ValidationMode, initial: ContactForm) -> FormConfigBuilder<ContactForm> {
    FormConfig::builder(initial).schema(contact_schema()).mode(mode)
}

/// Thread-safe call log.
#[derive(Clone, Debug)]
pub struct Recorder<V> {
    calls: Arc<Mutex<Vec<V>>>,
}

impl<V: Clone> Recorder<V> {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn push(&self, value: V) {
        self.calls.lock().unwrap().push(value);
    }

    pub fn len(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<V> {
        self.calls.lock().unwrap().clone()
    }
}

/// Email domain check that takes `latency` and records every value it sees.
pub fn domain_check(
    latency: Duration,
    seen: Recorder<String>,
) -> impl Fn(String) -> futures::future::BoxFuture<'static, Result<(), String>> + Send + Sync + 'static
{
    use futures::FutureExt;

    move |value: String| {
        seen.push(value.clone());
        async move {
            tokio::time::sleep(latency).await;
            if value.ends_with("@spam.com") {
                Err(SPAM_ERROR.to_string())
            } else {
                Ok(())
            }
        }
        .boxed()
    }
}

/// Let spawned tasks run without moving past any debounce window.
pub async fn tick() {
    tokio::time::sleep(Duration::from_millis(1)).await;
}
