//! # Record Links
//!
//! The text encoded into each planogram's QR code.
//!
//! The payload has the form `<host>:<port>/<record-id>`. It is a label
//! printed on the shelf, not a route served by this application.

use serde::{Deserialize, Serialize};

use crate::types::PlanogramId;

/// Host and port advertised in record links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordLink {
    pub host: String,
    pub port: u16,
}

impl RecordLink {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        RecordLink {
            host: host.into(),
            port,
        }
    }

    /// Returns the link payload for a record.
    ///
    /// ## Example
    /// ```rust
    /// use planogram_core::RecordLink;
    ///
    /// let link = RecordLink::new("localhost", 8501);
    /// assert_eq!(link.url_for(12), "localhost:8501/12");
    /// ```
    pub fn url_for(&self, id: PlanogramId) -> String {
        format!("{}:{}/{}", self.host, self.port, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_is_stable_per_record() {
        let link = RecordLink::new("10.0.0.5", 8080);
        assert_eq!(link.url_for(1), "10.0.0.5:8080/1");
        assert_eq!(link.url_for(1), link.url_for(1));
        assert_ne!(link.url_for(1), link.url_for(2));
    }
}
