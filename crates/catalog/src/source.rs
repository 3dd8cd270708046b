use serde::{Deserialize, Serialize};

use crate::builtin::{builtin_id, BuiltinDefinition};

/// Base URL for CelesTrak general-perturbations element sets.
pub const CELESTRAK_GP_URL: &str = "https://celestrak.org/NORAD/elements/gp.php";

/// Where a source's data comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceKind {
    /// A named group in the remote catalog; locator is the group slug.
    #[serde(rename = "celestrak")]
    RemoteCatalog,
    /// An arbitrary URL; locator is the URL.
    #[serde(rename = "url")]
    RemoteUrl,
    /// Text pasted by the user, stored under the source id.
    #[serde(rename = "text")]
    PastedText,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::RemoteCatalog => "celestrak",
            SourceKind::RemoteUrl => "url",
            SourceKind::PastedText => "text",
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Identity and provenance of one data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceDescriptor {
    pub id: String,
    pub name: String,
    pub kind: SourceKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locator: Option<String>,
    pub builtin: bool,
}

impl SourceDescriptor {
    pub fn from_builtin(def: &BuiltinDefinition) -> Self {
        Self {
            id: builtin_id(def.group),
            name: def.name.to_string(),
            kind: SourceKind::RemoteCatalog,
            locator: Some(def.group.to_string()),
            builtin: true,
        }
    }

    pub(crate) fn from_record(record: CustomRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            kind: record.kind,
            locator: record.locator,
            builtin: false,
        }
    }

    pub(crate) fn to_record(&self) -> CustomRecord {
        CustomRecord {
            id: self.id.clone(),
            name: self.name.clone(),
            kind: self.kind,
            locator: self.locator.clone(),
        }
    }

    /// URL a fetcher should request for this source, if it is remote.
    pub fn fetch_url(&self) -> Option<String> {
        let locator = self.locator.as_deref()?;
        match self.kind {
            SourceKind::RemoteCatalog => {
                Some(format!("{CELESTRAK_GP_URL}?GROUP={locator}&FORMAT=tle"))
            }
            SourceKind::RemoteUrl => Some(locator.to_string()),
            SourceKind::PastedText => None,
        }
    }
}

/// Persisted form of a custom source. Built-ins are never serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct CustomRecord {
    pub id: String,
    pub name: String,
    pub kind: SourceKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locator: Option<String>,
}
