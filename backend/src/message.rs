use serde::{Deserialize, Serialize};

use crate::error::LimitError;
use crate::limit::ExponentLimit;

pub type Port = u16;

pub const GENERATED_TITLE: &str = "Mersenne Primes Generated!";
pub const ERROR_TITLE: &str = "Error";

/// A limit as the page sends it: a JSON number or the raw text of the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawLimit {
    Number(i64),
    Text(String),
}

impl RawLimit {
    pub fn resolve(&self) -> Result<ExponentLimit, LimitError> {
        match self {
            RawLimit::Number(value) => ExponentLimit::new(*value),
            RawLimit::Text(text) => text.parse(),
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub limit: Option<RawLimit>,
}

#[derive(Debug, Serialize)]
pub struct Notice {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct Generation {
    pub limit: ExponentLimit,
    pub count: usize,
    pub primes: Vec<u64>,
    pub notice: Notice,
}

impl Generation {
    pub fn new(limit: ExponentLimit, primes: Vec<u64>) -> Self {
        Generation {
            limit,
            count: primes.len(),
            notice: Notice {
                title: GENERATED_TITLE.to_string(),
                description: format!("Found {} Mersenne primes.", primes.len()),
            },
            primes,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Verification {
    pub exponent: ExponentLimit,
    pub candidate: u64,
    pub prime: bool,
}

/// Body of every rejected request.
#[derive(Debug, Serialize)]
pub struct Problem {
    pub title: String,
    pub description: String,
}

impl Problem {
    pub fn new(description: impl Into<String>) -> Self {
        Problem {
            title: ERROR_TITLE.to_string(),
            description: description.into(),
        }
    }
}
