//! Shared fixtures for unit tests: a contact form with an email check.

use crate::builder::{FormConfig, ValidationMode};
use crate::core::FormData;
use crate::field_enum;
use crate::schema::{RuleSchema, SchemaBuilder};
use serde::{Deserialize, Serialize};

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

/// Contact form config with an email domain validator. The submit handler
/// always succeeds; reducer tests never run it.
pub fn contact_config(mode: ValidationMode, initial: ContactForm) -> FormConfig<ContactForm> {
    let built = FormConfig::builder(initial)
        .schema(contact_schema())
        .mode(mode)
        .async_validator(ContactField::Email, |value: String| async move {
            if value.ends_with("@spam.com") {
                Err("This email domain is not allowed")
            } else {
                Ok(())
            }
        })
        .on_submit(|_data: ContactForm| async { Ok::<(), String>(()) })
        .build();

    match built {
        Ok(config) => config,
        Err(error) => panic!("contact config must build: {error}"),
    }
}
