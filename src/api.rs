//! HTTP-facing boundary of the pad manager.
//!
//! This module knows the route table, the Basic-auth user table and how each
//! [`FaserError`] maps to a status code, but not how bytes reach it: a server
//! decodes the request line, the form body and the `Authorization` header
//! into a [`Request`] and writes the returned [`Response`] back out.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::{FaserError, FaserResult};
use crate::interface::Connector;
use crate::interface::serialport::SerialConnector;
use crate::session::DeviceSession;

pub const STATUS_OK: u16 = 200;
pub const STATUS_BAD_REQUEST: u16 = 400;
pub const STATUS_UNAUTHORIZED: u16 = 401;
pub const STATUS_NOT_FOUND: u16 = 404;
pub const STATUS_METHOD_NOT_ALLOWED: u16 = 405;
pub const STATUS_INTERNAL_ERROR: u16 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// Decoded HTTP Basic credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub form: HashMap<String, String>,
    pub credentials: Option<Credentials>,
}

impl Request {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Request {
            method,
            path: path.into(),
            form: HashMap::new(),
            credentials: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.form.insert(name.into(), value.into());
        self
    }

    pub fn basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials = Some(Credentials {
            username: username.into(),
            password: password.into(),
        });
        self
    }

    fn require(&self, name: &str) -> FaserResult<&str> {
        self.form
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| FaserError::MissingParameter(name.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    fn new(status: u16, body: impl Into<String>) -> Self {
        Response {
            status,
            body: body.into(),
        }
    }
}

/// Static username -> password table
#[derive(Debug, Clone)]
pub struct Users {
    passwords: HashMap<String, String>,
}

impl Users {
    pub fn empty() -> Self {
        Users {
            passwords: HashMap::new(),
        }
    }

    pub fn with_user(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.passwords.insert(username.into(), password.into());
        self
    }

    pub fn verify(&self, credentials: &Credentials) -> bool {
        self.passwords
            .get(&credentials.username)
            .is_some_and(|password| *password == credentials.password)
    }
}

impl Default for Users {
    fn default() -> Self {
        Users::empty().with_user("admin", "admin")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    Index,
    ReadSensitivities,
    UpdateSensitivity(u32),
    UpdateDebounce,
}

impl Route {
    fn parse(path: &str) -> Option<Route> {
        let rest = path.strip_prefix('/')?;
        if rest.is_empty() {
            return Some(Route::Index);
        }
        let segments: Vec<&str> = rest.split('/').collect();

        match segments.as_slice() {
            ["sensors", "sensitivities"] => Some(Route::ReadSensitivities),
            ["sensors", "debounce"] => Some(Route::UpdateDebounce),
            ["sensors", index, "sensitivity"] if index.bytes().all(|b| b.is_ascii_digit()) => {
                index.parse().ok().map(Route::UpdateSensitivity)
            }
            _ => None,
        }
    }

    fn method(self) -> Method {
        match self {
            Route::Index | Route::ReadSensitivities => Method::Get,
            Route::UpdateSensitivity(_) | Route::UpdateDebounce => Method::Post,
        }
    }
}

pub struct Api<C = SerialConnector> {
    session: Arc<DeviceSession<C>>,
    users: Users,
}

impl<C: Connector> Api<C> {
    pub fn new(session: Arc<DeviceSession<C>>, users: Users) -> Self {
        Api { session, users }
    }

    pub fn handle(&self, request: &Request) -> Response {
        let Some(route) = Route::parse(&request.path) else {
            return Response::new(STATUS_NOT_FOUND, "Not found");
        };

        if route.method() != request.method {
            return Response::new(STATUS_METHOD_NOT_ALLOWED, "Method not allowed");
        }

        let authorized = request
            .credentials
            .as_ref()
            .is_some_and(|credentials| self.users.verify(credentials));
        if !authorized {
            debug!("Rejected unauthenticated request for {}", request.path);
            return Response::new(STATUS_UNAUTHORIZED, "Unauthorized");
        }

        match self.dispatch(route, request) {
            Ok(body) => Response::new(STATUS_OK, body),
            Err(e) => error_response(&e),
        }
    }

    fn dispatch(&self, route: Route, request: &Request) -> FaserResult<String> {
        match route {
            Route::Index => Ok(String::new()),
            Route::ReadSensitivities => self.session.read_sensitivities(),
            Route::UpdateSensitivity(index) => {
                let value = request.require("value")?;
                let value = value.parse::<i32>().map_err(|_| {
                    FaserError::InvalidParameter(format!("value {:?} is not an integer", value))
                })?;
                self.session.update_sensitivity(index, value)
            }
            // 1 = enabled
            Route::UpdateDebounce => {
                let enabled = match request.require("value")? {
                    "1" => true,
                    "0" => false,
                    other => {
                        return Err(FaserError::InvalidParameter(format!(
                            "debounce value {:?} is not 0 or 1",
                            other
                        )));
                    }
                };
                self.session.update_debounce(enabled)
            }
        }
    }
}

/// Terse plain-text error bodies; details only go to the log
pub fn error_response(error: &FaserError) -> Response {
    warn!("Request failed: {}", error);
    match error {
        FaserError::MissingParameter(_) => Response::new(STATUS_BAD_REQUEST, "Missing param"),
        FaserError::InvalidParameter(_) => Response::new(STATUS_BAD_REQUEST, "Invalid param"),
        FaserError::PortUnavailable(_) => {
            Response::new(STATUS_INTERNAL_ERROR, "Unavailable Serial port")
        }
        FaserError::Io(_) | FaserError::Decode(_) => {
            Response::new(STATUS_INTERNAL_ERROR, "Internal error")
        }
    }
}
