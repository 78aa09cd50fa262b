//! Per-request detection context.
//!
//! Detection never reaches into ambient framework state: the host
//! application builds a `DetectionContext` from its request object and
//! passes it in explicitly, which keeps the detector deterministic and
//! unit-testable without a simulated web framework.

use std::collections::HashMap;

/// Snapshot of one inbound request, as seen by region detection.
///
/// Constructed fresh per request and discarded after detection.
#[derive(Debug, Clone, Default)]
pub struct DetectionContext {
    /// Client IP address, if the host framework resolved one
    pub ip: Option<String>,
    /// Request host (e.g., "app.example.com", "myapp.test")
    pub host: String,
    /// Request port
    pub port: Option<u16>,
    /// Request path (e.g., "/admin/users"), used for context classification
    pub path: String,
    /// Request headers; names are matched case-insensitively
    headers: HashMap<String, String>,
    /// Host application declares itself to be running in local/testing mode
    pub app_local: bool,
}

impl DetectionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ip(mut self, ip: impl Into<String>) -> Self {
        self.ip = Some(ip.into());
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into().to_ascii_lowercase(), value.into());
        self
    }

    /// Mark the request as coming from an app running in local/testing mode.
    pub fn with_app_local(mut self, local: bool) -> Self {
        self.app_local = local;
        self
    }

    /// Case-insensitive header lookup. Empty values read as absent.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    /// The full Accept-Language header, or an empty string.
    pub fn accept_language(&self) -> &str {
        self.header("Accept-Language").unwrap_or("")
    }

    /// The User-Agent header, or an empty string.
    pub fn user_agent(&self) -> &str {
        self.header("User-Agent").unwrap_or("")
    }
}
