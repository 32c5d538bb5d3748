use serde::Serialize;

const FALLBACK_HOSTNAME: &str = "localhost";

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct HealthStatus {
    pub status: &'static str,
    pub hostname: String,
}

impl HealthStatus {
    /// Snapshot of liveness plus the local host name. Never fails: an
    /// unreadable or empty host name is reported as `localhost`.
    pub fn capture() -> Self {
        let hostname = hostname::get()
            .ok()
            .and_then(|name| name.into_string().ok())
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| FALLBACK_HOSTNAME.to_string());

        Self {
            status: "200",
            hostname,
        }
    }
}
