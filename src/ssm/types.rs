//! Parameter Store data types

/// A parameter relative to a path prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    /// Name with the path prefix removed
    pub name: String,
    /// Decrypted value
    pub value: String,
    /// Stored as SecureString
    pub secure: bool,
}

impl Param {
    pub fn new(name: impl Into<String>, value: impl Into<String>, secure: bool) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            secure,
        }
    }

    /// Parameter Store type name
    pub fn type_name(&self) -> &'static str {
        if self.secure {
            "SecureString"
        } else {
            "String"
        }
    }
}

/// A parameter as returned by the API, full name included
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RawParameter {
    pub name: String,
    pub value: String,
    pub secure: bool,
}

/// One page of `GetParametersByPath`
#[derive(Debug, Clone, Default)]
pub struct ParameterPage {
    pub parameters: Vec<RawParameter>,
    pub next_token: Option<String>,
}

/// Result of a `DeleteParameters` call
#[derive(Debug, Clone, Default)]
pub struct DeleteOutcome {
    pub deleted: Vec<String>,
    pub invalid: Vec<String>,
}

/// How `ssm read` renders parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// `NAME="value"` lines
    Dotenv,
    /// JSON object of name to value
    Json,
}

impl OutputFormat {
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Dotenv
        }
    }
}
