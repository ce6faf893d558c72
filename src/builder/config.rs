//! Form configuration and its fluent builder.

use crate::builder::error::ConfigError;
use crate::core::{Field, FormData, FormState};
use crate::effects::{AsyncValidator, ErrorListener, SubmitHandler, SuccessListener};
use crate::schema::{AcceptAll, Schema};
use futures::FutureExt;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Default quiet period before a change-triggered async validation runs.
pub const DEFAULT_ASYNC_DEBOUNCE_MS: u64 = 300;

/// Default number of status changes the engine keeps.
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// When async validators run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// On every value change, debounced.
    #[default]
    OnChange,
    /// When a field loses focus.
    OnBlur,
    /// Only when the form is submitted.
    OnSubmit,
}

/// Serializable form behavior settings.
///
/// # Example
///
/// ```rust
/// use formstate::{FormOptions, ValidationMode};
///
/// let options = FormOptions::from_json(r#"{ "mode": "on_blur" }"#).unwrap();
/// assert_eq!(options.mode, ValidationMode::OnBlur);
/// assert_eq!(options.async_debounce_ms, 300);
/// assert_eq!(options.history_limit, 100);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormOptions {
    pub mode: ValidationMode,
    pub async_debounce_ms: u64,
    /// Oldest status changes are dropped beyond this many.
    pub history_limit: usize,
}

impl Default for FormOptions {
    fn default() -> Self {
        Self {
            mode: ValidationMode::OnChange,
            async_debounce_ms: DEFAULT_ASYNC_DEBOUNCE_MS,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl FormOptions {
    /// Parse options from JSON; missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn async_debounce(&self) -> Duration {
        Duration::from_millis(self.async_debounce_ms)
    }
}

/// Immutable configuration of one form.
pub struct FormConfig<T: FormData> {
    initial_data: T,
    schema: Arc<dyn Schema<T>>,
    options: FormOptions,
    async_validators: BTreeMap<T::Field, AsyncValidator<T::Value>>,
    on_submit: SubmitHandler<T>,
    on_submit_success: Option<SuccessListener<T>>,
    on_submit_error: Option<ErrorListener>,
}

impl<T: FormData> FormConfig<T> {
    /// Start building a configuration around `initial_data`.
    pub fn builder(initial_data: T) -> FormConfigBuilder<T> {
        FormConfigBuilder::new(initial_data)
    }

    pub fn initial_data(&self) -> &T {
        &self.initial_data
    }

    pub fn schema(&self) -> &dyn Schema<T> {
        self.schema.as_ref()
    }

    pub fn options(&self) -> FormOptions {
        self.options
    }

    pub fn mode(&self) -> ValidationMode {
        self.options.mode
    }

    pub fn async_debounce(&self) -> Duration {
        self.options.async_debounce()
    }

    pub fn history_limit(&self) -> usize {
        self.options.history_limit
    }

    pub fn has_async_validator(&self, field: T::Field) -> bool {
        self.async_validators.contains_key(&field)
    }

    /// Fields with an async validator, in field order.
    pub fn async_fields(&self) -> impl Iterator<Item = T::Field> + '_ {
        self.async_validators.keys().copied()
    }

    pub(crate) fn async_validator(&self, field: T::Field) -> Option<AsyncValidator<T::Value>> {
        self.async_validators.get(&field).cloned()
    }

    pub(crate) fn submit_handler(&self) -> SubmitHandler<T> {
        Arc::clone(&self.on_submit)
    }

    pub(crate) fn success_listener(&self) -> Option<&SuccessListener<T>> {
        self.on_submit_success.as_ref()
    }

    pub(crate) fn error_listener(&self) -> Option<&ErrorListener> {
        self.on_submit_error.as_ref()
    }

    /// State of a freshly mounted (or reset) form.
    pub fn initial_state(&self) -> FormState<T> {
        FormState::new(self.initial_data.clone(), self.async_fields())
    }
}

/// Builder for constructing form configurations with a fluent API.
pub struct FormConfigBuilder<T: FormData> {
    initial_data: T,
    schema: Arc<dyn Schema<T>>,
    options: FormOptions,
    async_validators: Vec<(T::Field, AsyncValidator<T::Value>)>,
    on_submit: Option<SubmitHandler<T>>,
    on_submit_success: Option<SuccessListener<T>>,
    on_submit_error: Option<ErrorListener>,
}

impl<T: FormData> FormConfigBuilder<T> {
    pub fn new(initial_data: T) -> Self {
        Self {
            initial_data,
            schema: Arc::new(AcceptAll),
            options: FormOptions::default(),
            async_validators: Vec::new(),
            on_submit: None,
            on_submit_success: None,
            on_submit_error: None,
        }
    }

    /// Set the synchronous schema. Defaults to accepting everything.
    pub fn schema(mut self, schema: impl Schema<T> + 'static) -> Self {
        self.schema = Arc::new(schema);
        self
    }

    pub fn options(mut self, options: FormOptions) -> Self {
        self.options = options;
        self
    }

    pub fn mode(mut self, mode: ValidationMode) -> Self {
        self.options.mode = mode;
        self
    }

    pub fn async_debounce(mut self, debounce: Duration) -> Self {
        self.options.async_debounce_ms = u64::try_from(debounce.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn history_limit(mut self, limit: usize) -> Self {
        self.options.history_limit = limit;
        self
    }

    /// Register an async validator for a field.
    ///
    /// The validator resolves `Ok(())` for a valid value or `Err(e)` with a
    /// displayable reason.
    pub fn async_validator<F, Fut, E>(mut self, field: T::Field, validator: F) -> Self
    where
        F: Fn(T::Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), E>> + Send + 'static,
        E: Display + 'static,
    {
        let validator: AsyncValidator<T::Value> = Arc::new(move |value: T::Value| {
            validator(value)
                .map(|result| result.map_err(|e| e.to_string()))
                .boxed()
        });
        self.async_validators.push((field, validator));
        self
    }

    /// Set the submit handler (required).
    pub fn on_submit<F, Fut, E>(mut self, handler: F) -> Self
    where
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), E>> + Send + 'static,
        E: Display + 'static,
    {
        let handler: SubmitHandler<T> = Arc::new(move |data: T| {
            handler(data)
                .map(|result| result.map_err(|e| e.to_string()))
                .boxed()
        });
        self.on_submit = Some(handler);
        self
    }

    pub fn on_submit_success<F>(mut self, listener: F) -> Self
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.on_submit_success = Some(Arc::new(listener));
        self
    }

    pub fn on_submit_error<F>(mut self, listener: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.on_submit_error = Some(Arc::new(listener));
        self
    }

    /// Build the configuration.
    /// Returns an error if the configuration is inconsistent.
    pub fn build(self) -> Result<FormConfig<T>, ConfigError> {
        let on_submit = self.on_submit.ok_or(ConfigError::MissingSubmitHandler)?;

        let mut known = BTreeSet::new();
        for field in T::fields() {
            if !known.insert(*field) {
                return Err(ConfigError::DuplicateField {
                    field: field.name().to_string(),
                });
            }
        }

        for field in self.schema.fields() {
            if !known.contains(&field) {
                return Err(ConfigError::UnknownSchemaField {
                    field: field.name().to_string(),
                });
            }
        }
        self.schema.check(&self.initial_data)?;

        let mut async_validators = BTreeMap::new();
        for (field, validator) in self.async_validators {
            if !known.contains(&field) {
                return Err(ConfigError::UnknownValidatorField {
                    field: field.name().to_string(),
                });
            }
            if async_validators.insert(field, validator).is_some() {
                return Err(ConfigError::DuplicateValidator {
                    field: field.name().to_string(),
                });
            }
        }

        Ok(FormConfig {
            initial_data: self.initial_data,
            schema: self.schema,
            options: self.options,
            async_validators,
            on_submit,
            on_submit_success: self.on_submit_success,
            on_submit_error: self.on_submit_error,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaError;
    use crate::test_support::{contact_schema, ContactField, ContactForm};
    use crate::core::FieldErrors;

    fn submit_ok(_: ContactForm) -> futures::future::Ready<Result<(), String>> {
        futures::future::ready(Ok(()))
    }

    #[test]
    fn builder_requires_submit_handler() {
        let result = FormConfig::builder(ContactForm::default()).build();
        assert!(matches!(result, Err(ConfigError::MissingSubmitHandler)));
    }

    #[test]
    fn fluent_api_builds_config() {
        let config = FormConfig::builder(ContactForm::default())
            .schema(contact_schema())
            .mode(ValidationMode::OnBlur)
            .async_debounce(Duration::from_millis(150))
            .async_validator(ContactField::Email, |_value: String| async { Ok::<(), String>(()) })
            .on_submit(submit_ok)
            .build()
            .unwrap();

        assert_eq!(config.mode(), ValidationMode::OnBlur);
        assert_eq!(config.async_debounce(), Duration::from_millis(150));
        assert!(config.has_async_validator(ContactField::Email));
        assert!(!config.has_async_validator(ContactField::Name));
        assert_eq!(config.async_fields().collect::<Vec<_>>(), vec![ContactField::Email]);
    }

    #[test]
    fn duplicate_async_validator_is_rejected() {
        let result = FormConfig::builder(ContactForm::default())
            .async_validator(ContactField::Email, |_value: String| async { Ok::<(), String>(()) })
            .async_validator(ContactField::Email, |_value: String| async { Ok::<(), String>(()) })
            .on_submit(submit_ok)
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::DuplicateValidator { field }) if field == "Email"
        ));
    }

    struct StrictSchema;

    impl Schema<ContactForm> for StrictSchema {
        fn validate(&self, _data: &ContactForm) -> FieldErrors<ContactField> {
            FieldErrors::new()
        }

        fn check(&self, sample: &ContactForm) -> Result<(), SchemaError> {
            if sample.email.is_empty() {
                Err(SchemaError::Rejected("email must be seeded".to_string()))
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn schema_rejection_is_fatal_at_build() {
        let result = FormConfig::builder(ContactForm::default())
            .schema(StrictSchema)
            .on_submit(submit_ok)
            .build();

        assert!(matches!(result, Err(ConfigError::SchemaRejected(_))));
    }

    #[test]
    fn options_default_to_on_change_with_debounce() {
        let options = FormOptions::default();
        assert_eq!(options.mode, ValidationMode::OnChange);
        assert_eq!(options.async_debounce(), Duration::from_millis(300));
        assert_eq!(options.history_limit, DEFAULT_HISTORY_LIMIT);
    }

    #[test]
    fn options_load_from_json() {
        let options =
            FormOptions::from_json(r#"{ "mode": "on_submit", "async_debounce_ms": 50, "history_limit": 8 }"#)
                .unwrap();
        assert_eq!(options.mode, ValidationMode::OnSubmit);
        assert_eq!(options.async_debounce_ms, 50);
        assert_eq!(options.history_limit, 8);
    }

    #[test]
    fn invalid_options_json_is_reported() {
        let result = FormOptions::from_json(r#"{ "mode": "sometimes" }"#);
        assert!(matches!(result, Err(ConfigError::InvalidOptions(_))));
    }

    #[test]
    fn initial_state_tracks_async_fields() {
        let config = FormConfig::builder(ContactForm::default())
            .async_validator(ContactField::Email, |_value: String| async { Ok::<(), String>(()) })
            .on_submit(submit_ok)
            .build()
            .unwrap();

        let state = config.initial_state();
        assert!(state.epochs().tracks(ContactField::Email));
        assert!(!state.epochs().tracks(ContactField::Name));
        assert_eq!(state.data(), &ContactForm::default());
    }
}
