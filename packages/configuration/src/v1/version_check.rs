use serde::{Deserialize, Serialize};
use url::Url;

/// One-shot check for a newer release when the proxy starts.
///
/// The endpoint must answer with a JSON object containing a `tag_name` field,
/// like the "latest release" endpoint of the GitHub REST API.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone, Default)]
pub struct VersionCheck {
    #[serde(default)]
    pub enabled: bool,

    #[serde(default)]
    pub url: Option<Url>,
}
