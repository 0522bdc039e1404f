//! Claim documentation workflow
//!
//! A claim moves towards settlement as the insured hands in the documents
//! the insurer asks for. Each document is one flag on the checklist; an
//! update always replaces the whole checklist.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A document required before a claim can be settled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimDocument {
    /// Copy of the insured's identity document
    IdReceived,
    /// Video of the damaged device
    VideoReceived,
    /// Deductible paid by the insured
    DeductablePaid,
    /// IMEI blocked with the carrier
    ImeiBlock,
    /// Police report for theft or loss
    PoliceNoticeReport,
}

impl ClaimDocument {
    /// Every document, in checklist order
    pub const ALL: [ClaimDocument; 5] = [
        ClaimDocument::IdReceived,
        ClaimDocument::VideoReceived,
        ClaimDocument::DeductablePaid,
        ClaimDocument::ImeiBlock,
        ClaimDocument::PoliceNoticeReport,
    ];
}

impl fmt::Display for ClaimDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ClaimDocument::IdReceived => "id_received",
            ClaimDocument::VideoReceived => "video_received",
            ClaimDocument::DeductablePaid => "deductable_paid",
            ClaimDocument::ImeiBlock => "imei_block",
            ClaimDocument::PoliceNoticeReport => "police_notice_report",
        };
        write!(f, "{}", name)
    }
}

/// Documentation flags of one claim
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentationChecklist {
    pub id_received: bool,
    pub video_received: bool,
    pub deductable_paid: bool,
    pub imei_block: bool,
    pub police_notice_report: bool,
}

impl DocumentationChecklist {
    /// Creates a checklist from the five flags, in checklist order
    pub fn new(
        id_received: bool,
        video_received: bool,
        deductable_paid: bool,
        imei_block: bool,
        police_notice_report: bool,
    ) -> Self {
        Self {
            id_received,
            video_received,
            deductable_paid,
            imei_block,
            police_notice_report,
        }
    }

    /// Checklist with every document received
    pub fn complete() -> Self {
        Self::new(true, true, true, true, true)
    }

    /// Returns whether the given document was received
    pub fn has(&self, document: ClaimDocument) -> bool {
        match document {
            ClaimDocument::IdReceived => self.id_received,
            ClaimDocument::VideoReceived => self.video_received,
            ClaimDocument::DeductablePaid => self.deductable_paid,
            ClaimDocument::ImeiBlock => self.imei_block,
            ClaimDocument::PoliceNoticeReport => self.police_notice_report,
        }
    }

    /// Documents still outstanding
    pub fn missing(&self) -> Vec<ClaimDocument> {
        ClaimDocument::ALL
            .into_iter()
            .filter(|document| !self.has(*document))
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        ClaimDocument::ALL.iter().all(|document| self.has(*document))
    }

    /// Number of documents received
    pub fn received_count(&self) -> usize {
        ClaimDocument::ALL.iter().filter(|document| self.has(**document)).count()
    }
}
