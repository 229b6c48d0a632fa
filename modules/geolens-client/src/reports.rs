use uuid::Uuid;

use geolens_common::error::Result;
use geolens_common::Report;

use crate::GeoLensClient;

/// Alternate renders of a finished report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportExport {
    Pdf,
    Docx,
    Dashboard,
}

impl ReportExport {
    pub fn path_segment(self) -> &'static str {
        match self {
            ReportExport::Pdf => "pdf",
            ReportExport::Docx => "docx",
            ReportExport::Dashboard => "dashboard",
        }
    }

    pub fn file_extension(self) -> &'static str {
        match self {
            ReportExport::Pdf => "pdf",
            ReportExport::Docx => "docx",
            ReportExport::Dashboard => "html",
        }
    }
}

impl std::str::FromStr for ReportExport {
    type Err = String;

    fn from_str(raw: &str) -> std::result::Result<Self, Self::Err> {
        match raw {
            "pdf" => Ok(ReportExport::Pdf),
            "docx" => Ok(ReportExport::Docx),
            "dashboard" => Ok(ReportExport::Dashboard),
            other => Err(format!("unknown export format: {other}")),
        }
    }
}

impl GeoLensClient {
    /// Fetch a finished report in full.
    pub async fn report(&self, id: Uuid) -> Result<Report> {
        self.transport().get(&format!("/reports/{id}")).await
    }

    /// Download an alternate render of the report as raw bytes.
    pub async fn export_report(&self, id: Uuid, format: ReportExport) -> Result<Vec<u8>> {
        self.transport()
            .get_bytes(&format!("/reports/{id}/{}", format.path_segment()))
            .await
    }
}
