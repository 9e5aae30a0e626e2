//! Validators - Attribute checks run before every save.

use crate::record::{is_blank, lookup, Attributes, Context};

/// Trait for checking a record's attributes before it is written.
///
/// On rejection the validator returns the messages to report; the store wraps
/// them in [`crate::RecordError::InvalidAttributes`].
pub trait Validator: Send + Sync {
    fn validate(&self, attributes: &Attributes, context: Context) -> Result<(), Vec<String>>;
}

impl<F> Validator for F
where
    F: Fn(&Attributes, Context) -> Result<(), Vec<String>> + Send + Sync,
{
    fn validate(&self, attributes: &Attributes, context: Context) -> Result<(), Vec<String>> {
        self(attributes, context)
    }
}

/// Validator that accepts everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl Validator for AcceptAll {
    fn validate(&self, _attributes: &Attributes, _context: Context) -> Result<(), Vec<String>> {
        Ok(())
    }
}

/// Requires each listed (dotted) attribute to be present and non-empty.
#[derive(Debug, Clone, Default)]
pub struct RequiredAttributes {
    paths: Vec<String>,
    only_on: Option<Context>,
}

impl RequiredAttributes {
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
            only_on: None,
        }
    }

    /// Only enforce in the given context (e.g. on create).
    pub fn on(mut self, context: Context) -> Self {
        self.only_on = Some(context);
        self
    }
}

impl Validator for RequiredAttributes {
    fn validate(&self, attributes: &Attributes, context: Context) -> Result<(), Vec<String>> {
        if self.only_on.is_some_and(|only| only != context) {
            return Ok(());
        }

        let missing: Vec<String> = self
            .paths
            .iter()
            .filter(|path| {
                lookup(attributes, path)
                    .map(is_blank)
                    .unwrap_or(true)
            })
            .map(|path| format!("{} is required", path))
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(missing)
        }
    }
}
