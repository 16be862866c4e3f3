//! Response types for the secrets API

use serde::Deserialize;

/// Error body: `{"errors": ["permission denied"]}`
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub errors: Vec<String>,
}

/// Response of `GET /v1/sys/internal/ui/mounts/{mount}`
#[derive(Debug, Deserialize)]
pub struct MountResponse {
    pub data: MountData,
}

#[derive(Debug, Deserialize)]
pub struct MountData {
    #[serde(rename = "type")]
    pub engine_type: String,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub options: Option<MountOptions>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MountOptions {
    #[serde(default)]
    pub version: Option<String>,
}

/// Walk a dotted field path such as `data.keys` into a JSON body
pub fn extract_field<'a>(body: &'a serde_json::Value, path: &str) -> Option<&'a serde_json::Value> {
    path.split('.')
        .filter(|segment| !segment.is_empty())
        .try_fold(body, |value, segment| value.get(segment))
}
