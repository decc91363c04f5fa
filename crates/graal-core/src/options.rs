//! Ordered `native-image` option list mixing literal and deferred entries.
//!
//! See `SubstrateOptions` in the GraalVM sources for the flags themselves.

use std::fmt;
use std::sync::Arc;

use graal_util::errors::GraalError;

/// Prefix reserved for the output name, which is always set from `output-name`.
pub const NAME_OPTION_PREFIX: &str = "-H:Name=";

type Provider = Arc<dyn Fn() -> Option<String> + Send + Sync>;

/// One entry in the option list.
#[derive(Clone)]
pub enum NativeImageOption {
    /// A flag known when the configuration is built.
    Literal(String),
    /// A flag computed when the list is rendered; `None` drops the entry.
    Deferred(Provider),
}

impl NativeImageOption {
    pub fn deferred(f: impl Fn() -> Option<String> + Send + Sync + 'static) -> Self {
        Self::Deferred(Arc::new(f))
    }

    /// An option read from the environment variable `name` at render time.
    pub fn from_env(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::deferred(move || std::env::var(&name).ok())
    }

    fn evaluate(&self) -> Option<String> {
        match self {
            Self::Literal(s) => Some(s.clone()),
            Self::Deferred(f) => f(),
        }
    }
}

impl fmt::Debug for NativeImageOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(s) => f.debug_tuple("Literal").field(s).finish(),
            Self::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

impl From<&str> for NativeImageOption {
    fn from(s: &str) -> Self {
        Self::Literal(s.to_string())
    }
}

impl From<String> for NativeImageOption {
    fn from(s: String) -> Self {
        Self::Literal(s)
    }
}

fn reject_name_option(option: &str) -> Result<(), GraalError> {
    if option.trim().starts_with(NAME_OPTION_PREFIX) {
        return Err(GraalError::InvalidConfiguration {
            message: format!("Use 'outputName' instead of '{option}'"),
        });
    }
    Ok(())
}

/// Insertion-ordered list of `native-image` options.
#[derive(Debug, Clone, Default)]
pub struct NativeImageOptions {
    entries: Vec<NativeImageOption>,
}

impl NativeImageOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an option. A literal `-H:Name=` is rejected immediately;
    /// deferred entries are checked when rendered.
    pub fn push(&mut self, option: impl Into<NativeImageOption>) -> Result<(), GraalError> {
        let option = option.into();
        if let NativeImageOption::Literal(ref s) = option {
            reject_name_option(s)?;
        }
        self.entries.push(option);
        Ok(())
    }

    /// Append an entry without the eager `-H:Name=` check. Rendering still
    /// rejects it, so unrelated flows that never read the options are unaffected.
    pub fn push_unchecked(&mut self, option: NativeImageOption) {
        self.entries.push(option);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Evaluate every entry in order, dropping deferred entries that yield
    /// nothing and rejecting any `-H:Name=`.
    pub fn render(&self) -> Result<Vec<String>, GraalError> {
        let mut rendered = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            if let Some(value) = entry.evaluate() {
                reject_name_option(&value)?;
                rendered.push(value);
            }
        }
        Ok(rendered)
    }
}
