pub mod admin;
pub mod analyses;
pub mod auth;
pub mod jobs;
pub mod leads;
pub mod reports;
pub mod session;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;
pub mod transport;

pub use auth::Registration;
pub use reports::ReportExport;
pub use session::{FileSession, MemorySession, SessionStore};
pub use transport::{ApiRequest, HttpSend, OutboundRequest, RawResponse, ReqwestSender, Transport};

use std::sync::Arc;

use geolens_common::error::Result;
use geolens_common::Config;

/// Authenticated client for the GEO analysis API.
///
/// One configured transport; the endpoint surface lives in per-resource
/// modules (`auth`, `leads`, `jobs`, `reports`, `analyses`, `admin`) as
/// stateless one-shot calls.
pub struct GeoLensClient {
    transport: Transport,
}

impl GeoLensClient {
    /// Production client: reqwest sender, durable file-backed session.
    pub fn connect(config: &Config) -> Result<Self> {
        let session = Arc::new(FileSession::load(&config.session_file)?);
        Ok(Self::with_parts(
            &config.api_url,
            Arc::new(ReqwestSender::new()),
            session,
        ))
    }

    /// Assemble a client from explicit parts. Tests inject scripted senders
    /// and in-memory sessions here.
    pub fn with_parts(
        base_url: &str,
        sender: Arc<dyn HttpSend>,
        session: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            transport: Transport::new(base_url, sender, session),
        }
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub fn session(&self) -> &Arc<dyn SessionStore> {
        self.transport.session()
    }
}
