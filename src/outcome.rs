use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::{account::AccountError, store::StoreError};

pub const NOT_FOUND: u16 = 404;
pub const BAD_REQUEST: u16 = 400;

/// The request was processed, but a business rule rejected it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("Error: StatusCode={status_code}, Message={message}")]
pub struct Warning {
    pub status_code: u16,
    pub message: String,
}

impl Warning {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status_code: NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status_code: BAD_REQUEST,
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ContractError {
    #[error(transparent)]
    Warning(#[from] Warning),
    #[error("Incorrect number of arguments. Expecting = {expected}, Actual = {actual:?}")]
    ArgumentCount {
        expected: &'static str,
        actual: Vec<String>,
    },
    #[error("Incorrect arguments. Expecting = {expected}, Actual = {actual:?}")]
    InvalidArgument {
        expected: &'static str,
        actual: Vec<String>,
    },
    #[error("No such function. function = {function}, args = {args:?}")]
    UnknownFunction { function: String, args: Vec<String> },
    #[error("could not find an unused no after {attempts} attempts")]
    IdSpaceExhausted { attempts: u32 },
    #[error("cannot generate a no from an empty alphabet")]
    EmptyAlphabet,
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
}

impl From<AccountError> for ContractError {
    fn from(err: AccountError) -> Self {
        Self::Warning(Warning::bad_request(err.to_string()))
    }
}

/// Result of one invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success(Value),
    Warning(Warning),
    Failure(String),
}

/// What the transport sees. Warnings travel as successful responses, so
/// callers tell them apart by the payload shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Success(Value),
    Error(String),
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failure(_))
    }

    pub fn into_response(self) -> Response {
        match self {
            Outcome::Success(payload) => Response::Success(payload),
            Outcome::Warning(warning) => match serde_json::to_value(&warning) {
                Ok(payload) => Response::Success(payload),
                Err(err) => Response::Error(err.to_string()),
            },
            Outcome::Failure(message) => Response::Error(message),
        }
    }
}

impl From<Result<Value, ContractError>> for Outcome {
    fn from(result: Result<Value, ContractError>) -> Self {
        match result {
            Ok(payload) => Outcome::Success(payload),
            Err(ContractError::Warning(warning)) => Outcome::Warning(warning),
            Err(err) => Outcome::Failure(err.to_string()),
        }
    }
}
