//! Wire schema of the responses.

use bytes::Bytes;
use http_body_util::Full;
use hyper::{
    header::{HeaderValue, CONTENT_TYPE},
    Response, StatusCode,
};
use log::error;
use serde::{Deserialize, Serialize};

/// Body of the successful response.
/// Empty fields are not serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Resolved or requested name.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    /// Resolved address with `0x` prefix.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub addr: String,
}

/// Body of the error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Error message.
    pub error: String,
}

impl ErrorBody {
    /// Create error body with the message.
    pub fn new(error: &str) -> Self {
        Self {
            error: error.to_owned(),
        }
    }
}

//////////////////////////////////////////////////////////////////////////////////////////

/// Make JSON response with specified status.
pub fn make_response(status: StatusCode, body: &impl Serialize) -> Response<Full<Bytes>> {
    match serde_json::to_vec(body) {
        Ok(mut data) => {
            data.push(b'\n');
            json_response(status, Bytes::from(data))
        }
        Err(err) => {
            error!("can not serialize response: {}", err);
            json_response(StatusCode::INTERNAL_SERVER_ERROR, Bytes::new())
        }
    }
}

/// Make response with specified status and empty body.
pub fn make_empty_response(status: StatusCode) -> Response<Full<Bytes>> {
    json_response(status, Bytes::new())
}

/// Make response with JSON content type.
fn json_response(status: StatusCode, data: Bytes) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(data));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response
}
