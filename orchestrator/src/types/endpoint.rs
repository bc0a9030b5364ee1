use serde::{Deserialize, Serialize};
use url::Url;

/// Closed set of processing endpoint kinds a continuation can bind to.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EndpointKind {
    /// `/locations/{location}/processing_async`
    EphemeralProcessing,
    /// `/locations/{location}/mapsets/{mapset}/processing_async`
    PersistentMapsetProcessing,
    /// `/locations/{location}/processing_async_export`
    EphemeralExport,
}

/// Result of classifying a submission URL against the known path templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointTarget {
    pub kind: EndpointKind,
    pub location: String,
    pub mapset: Option<String>,
}

impl EndpointTarget {
    /// Resolves a submission URL to exactly one endpoint kind by matching the
    /// path segments after `locations` against the closed template set. Any
    /// other shape is unsupported.
    pub fn classify(post_url: &str) -> Option<Self> {
        let url = Url::parse(post_url).ok()?;
        let segments: Vec<&str> = url.path_segments()?.filter(|s| !s.is_empty()).collect();
        let at = segments.iter().position(|s| *s == "locations")?;
        match &segments[at + 1..] {
            [location, "processing_async"] => Some(EndpointTarget {
                kind: EndpointKind::EphemeralProcessing,
                location: (*location).to_string(),
                mapset: None,
            }),
            [location, "processing_async_export"] => Some(EndpointTarget {
                kind: EndpointKind::EphemeralExport,
                location: (*location).to_string(),
                mapset: None,
            }),
            [location, "mapsets", mapset, "processing_async"] => Some(EndpointTarget {
                kind: EndpointKind::PersistentMapsetProcessing,
                location: (*location).to_string(),
                mapset: Some((*mapset).to_string()),
            }),
            _ => None,
        }
    }
}
