// config.rs — Lint options
//
// Rule options with their defaults, loaded from a JSON file. Unknown keys
// are rejected.
//
// Preconditions: none.
// Postconditions: a loaded `Options` has every field populated.
// Failure modes: unreadable file (`ConfigError::Io`), malformed JSON or
//                unknown keys (`ConfigError::Parse`).
// Side effects: reads the config file in `Options::load`.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Default name of the factory-style component creator.
pub const DEFAULT_CREATE_CLASS: &str = "createReactClass";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct Options {
    /// Skip plain function and arrow components entirely.
    pub ignore_functional_components: bool,
    /// Also report required props that have a default.
    pub forbid_default_for_required: bool,
    /// Calls to these functions are unwrapped to their first argument.
    /// Dotted names (`Object.freeze`) match member callees.
    pub prop_wrapper_functions: Vec<String>,
    /// Factory-style component creator; `React.<name>` is also recognised.
    pub create_class: String,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            ignore_functional_components: false,
            forbid_default_for_required: false,
            prop_wrapper_functions: Vec::new(),
            create_class: DEFAULT_CREATE_CLASS.to_string(),
        }
    }
}

impl Options {
    /// Load options from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|e| match e {
            ConfigError::Parse { message, .. } => ConfigError::Parse {
                path: Some(path.to_path_buf()),
                message,
            },
            other => other,
        })
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(|e| ConfigError::Parse {
            path: None,
            message: e.to_string(),
        })
    }

    /// Whether `callee` (a dotted name) is a configured transparent wrapper.
    pub fn is_wrapper(&self, callee: &str) -> bool {
        self.prop_wrapper_functions.iter().any(|w| w == callee)
    }

    /// Whether `callee` (a dotted name) creates a factory-style component.
    pub fn is_create_class(&self, callee: &str) -> bool {
        callee == self.create_class
            || callee
                .strip_prefix("React.")
                .is_some_and(|rest| rest == self.create_class)
    }
}

// ── Errors ──────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: Option<PathBuf>,
        message: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => write!(f, "{}: {}", path.display(), source),
            ConfigError::Parse {
                path: Some(path),
                message,
            } => write!(f, "{}: invalid config: {}", path.display(), message),
            ConfigError::Parse {
                path: None,
                message,
            } => write!(f, "invalid config: {}", message),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse { .. } => None,
        }
    }
}
