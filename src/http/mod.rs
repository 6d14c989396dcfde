//! HTTP protocol of the name server.
//!
//! Two read-only routes are exposed:
//! - `GET /name/{name}` resolves name to the address;
//! - `GET /addr/{addr}` resolves address to the name.
//!
//! Both routes also answer `OPTIONS` for CORS preflight.

pub mod response;


use std::{borrow::Cow, convert::Infallible};

use bytes::Bytes;
use http_body_util::Full;
use hyper::{
    header::{HeaderValue, ACCESS_CONTROL_ALLOW_METHODS, ALLOW},
    Method, Request, Response, StatusCode,
};
use log::info;

use crate::{error::NOT_REGISTERED, resolver::SharedResolver};

use self::response::{make_empty_response, make_response, ErrorBody, Resolution};

/// Methods registered on every route, as advertised to CORS clients.
pub const ROUTE_METHODS: &str = "GET,OPTIONS";

/// Value of the `Allow` header on every route.
pub const ALLOW_METHODS: &str = "GET, OPTIONS";

//////////////////////////////////////////////////////////////////////////////////////////

/// Route matched by the request path.
/// Path parameters are percent-decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route<'a> {
    /// `/name/{name}`
    Name(Cow<'a, str>),
    /// `/addr/{addr}`
    Addr(Cow<'a, str>),
}

impl<'a> Route<'a> {
    /// Match request path against known routes.
    pub fn from_path(path: &'a str) -> Option<Self> {
        if let Some(name) = path_param(path, "/name/") {
            Some(Route::Name(name))
        } else {
            path_param(path, "/addr/").map(Route::Addr)
        }
    }
}

/// Returns single non-empty decoded path segment after prefix.
/// Segment which is not UTF-8 or contains `/` after decoding does not match.
fn path_param<'a>(path: &'a str, prefix: &str) -> Option<Cow<'a, str>> {
    let param = path.strip_prefix(prefix)?;
    if param.is_empty() || param.contains('/') {
        return None;
    }

    let param = urlencoding::decode(param).ok()?;
    if param.contains('/') {
        None
    } else {
        Some(param)
    }
}

//////////////////////////////////////////////////////////////////////////////////////////

/// Resolve route with resolver and make response.
fn resolve(route: &Route<'_>, resolver: &SharedResolver) -> Response<Full<Bytes>> {
    let result = match route {
        Route::Name(name) => {
            info!("request to resolve name: {:?}", name);
            resolver.resolve_name(name).map(|addr| Resolution {
                name: name.to_string(),
                addr,
            })
        }
        Route::Addr(addr) => {
            info!("request to resolve address: {:?}", addr);
            resolver.resolve_addr(addr).map(|name| Resolution {
                name,
                addr: String::new(),
            })
        }
    };

    match result {
        Ok(mut resolution) => {
            if !resolution.addr.is_empty() {
                resolution.addr = format!("0x{}", resolution.addr);
            }
            make_response(StatusCode::OK, &resolution)
        }
        // internal error text never reaches the client
        Err(_) => make_response(StatusCode::NOT_FOUND, &ErrorBody::new(NOT_REGISTERED)),
    }
}

/// Advertise methods of the matched route.
fn with_allowed_methods(mut response: Response<Full<Bytes>>) -> Response<Full<Bytes>> {
    let headers = response.headers_mut();
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ROUTE_METHODS),
    );
    headers.insert(ALLOW, HeaderValue::from_static(ALLOW_METHODS));
    response
}

/// Serve one http request.
///
/// Request body is never read, so any body type is accepted.
pub async fn serve_request<B>(
    request: Request<B>,
    resolver: SharedResolver,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let Some(route) = Route::from_path(request.uri().path()) else {
        return Ok(make_response(
            StatusCode::NOT_FOUND,
            &ErrorBody::new("not found"),
        ));
    };

    let response = match request.method() {
        &Method::GET => resolve(&route, &resolver),
        &Method::OPTIONS => make_empty_response(StatusCode::OK),
        _ => make_response(
            StatusCode::METHOD_NOT_ALLOWED,
            &ErrorBody::new("method not allowed"),
        ),
    };

    Ok(with_allowed_methods(response))
}
