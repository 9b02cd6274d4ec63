use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Document types of the portal index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocType {
    DonorCentric,
    GeneCentric,
    MutationCentric,
    Project,
    File,
}

impl DocType {
    pub const ALL: [DocType; 5] = [
        DocType::DonorCentric,
        DocType::GeneCentric,
        DocType::MutationCentric,
        DocType::Project,
        DocType::File,
    ];

    /// Index type name, as sent to the search engine.
    pub fn id(self) -> &'static str {
        match self {
            Self::DonorCentric => "donor-centric",
            Self::GeneCentric => "gene-centric",
            Self::MutationCentric => "mutation-centric",
            Self::Project => "project",
            Self::File => "file",
        }
    }
}

impl fmt::Display for DocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for DocType {
    type Err = Error;

    /// Accepts both `donor_centric` and `donor-centric`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|t| t.id() == normalized)
            .ok_or_else(|| Error::UnknownDocType(s.to_owned()))
    }
}
