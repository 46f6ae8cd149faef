use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use serde_json::error::Category;
use serde_json::Error as SerdeError;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum AppResponse {
    MalformedInput(String),
    SerializationError(String),
    NotFound(String),
    Collision(String),
    BadRequest(String),
    Ok(String),
}

impl Display for AppResponse {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AppResponse::MalformedInput(msg) => write!(f, "Malformed input: {}", msg),
            AppResponse::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
            AppResponse::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppResponse::Collision(msg) => write!(f, "Collision: {}", msg),
            AppResponse::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppResponse::Ok(msg) => write!(f, "Ok: {}", msg),
        }
    }
}

impl std::error::Error for AppResponse {}

// Well-formed JSON with the wrong shape is a malformed catalog; anything
// that is not JSON at all is a serialization failure.
impl From<SerdeError> for AppResponse {
    fn from(err: SerdeError) -> Self {
        match err.classify() {
            Category::Data => {
                AppResponse::MalformedInput(format!("Unexpected document shape: {}", err))
            }
            Category::Syntax | Category::Eof => {
                AppResponse::SerializationError(format!("JSON parse error: {}", err))
            }
            Category::Io => AppResponse::SerializationError(format!("JSON read error: {}", err)),
        }
    }
}

impl AppResponse {
    pub fn success(msg: impl Into<String>) -> Self {
        AppResponse::Ok(msg.into())
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, AppResponse::Ok(_))
    }
}
