#[cfg(test)]
#[path = "form_test.rs"]
mod tests;

use serde::{Deserialize, Serialize};

/// The four fields of the contact form. Every field is optional on the wire
/// and defaults to an empty string.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ContactForm {
    name: String,
    email: String,
    subject: String,
    message: String,
}

/// A persisted contact form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRecord {
    id: i64,
    form: ContactForm,
}

impl ContactForm {
    pub const FIELDS: [&'static str; 4] = ["name", "email", "subject", "message"];

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Sets a field by its wire name. Returns false for unknown names.
    pub fn set_field(&mut self, field: &str, value: impl Into<String>) -> bool {
        let slot = match field {
            "name" => &mut self.name,
            "email" => &mut self.email,
            "subject" => &mut self.subject,
            "message" => &mut self.message,
            _ => return false,
        };
        *slot = value.into();
        true
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Field name and value pairs in wire order.
    pub fn fields(&self) -> [(&'static str, &str); 4] {
        let [name, email, subject, message] = Self::FIELDS;
        [
            (name, self.name.as_str()),
            (email, self.email.as_str()),
            (subject, self.subject.as_str()),
            (message, self.message.as_str()),
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.fields().iter().all(|(_, value)| value.is_empty())
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl MessageRecord {
    pub fn new(id: i64, form: ContactForm) -> Self {
        Self { id, form }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }
}
