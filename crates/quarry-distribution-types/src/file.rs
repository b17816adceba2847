use jiff::Timestamp;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// A single (remote) file belonging to a package, either a wheel or a source
/// distribution.
///
/// <https://peps.python.org/pep-0691/#project-detail>
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct File {
    #[serde(alias = "core-metadata", alias = "data-dist-info-metadata")]
    pub dist_info_metadata: Option<DistMetadata>,
    pub filename: String,
    #[serde(default)]
    pub hashes: FxHashMap<String, String>,
    pub requires_python: Option<String>,
    pub size: Option<u64>,
    pub upload_time: Option<Timestamp>,
    pub url: String,
    pub yanked: Option<Yanked>,
}

/// Availability of the metadata sidecar for a distribution file: a bare
/// boolean, or a map of hash algorithm to digest asserted for the sidecar
/// itself.
///
/// <https://peps.python.org/pep-0658/>
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DistMetadata {
    Bool(bool),
    Hashes(FxHashMap<String, String>),
}

impl DistMetadata {
    /// Whether a metadata endpoint is advertised at all.
    pub fn is_available(&self) -> bool {
        match self {
            Self::Bool(available) => *available,
            Self::Hashes(_) => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Yanked {
    Bool(bool),
    Reason(String),
}

impl Yanked {
    pub fn is_yanked(&self) -> bool {
        match self {
            Self::Bool(yanked) => *yanked,
            Self::Reason(_) => true,
        }
    }

    /// The yank reason, with an empty reason standing in for a bare `true`.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Bool(true) => Some(""),
            Self::Bool(false) => None,
            Self::Reason(reason) => Some(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_pep_691_file() {
        let file: File = serde_json::from_str(
            r#"{
                "core-metadata": {"sha256": "e3b0c44298fc1c149afbf4c8996fb924"},
                "filename": "tqdm-4.66.1-py3-none-any.whl",
                "hashes": {"sha256": "d88e651f9db8d8551a62556d3cff9e3034274ca5d66e93197cf2490e2dcb69c7"},
                "requires-python": ">=3.7",
                "size": 78351,
                "upload-time": "2023-08-10T11:30:18.223450Z",
                "url": "https://files.pythonhosted.org/packages/00/e5/tqdm-4.66.1-py3-none-any.whl",
                "yanked": false
            }"#,
        )
        .unwrap();
        assert_eq!(file.filename, "tqdm-4.66.1-py3-none-any.whl");
        assert_eq!(file.requires_python.as_deref(), Some(">=3.7"));
        assert!(file
            .dist_info_metadata
            .as_ref()
            .is_some_and(DistMetadata::is_available));
        assert_eq!(file.yanked, Some(Yanked::Bool(false)));
    }

    #[test]
    fn yanked_variants() {
        let yanked: Yanked = serde_json::from_str(r#""broken on 3.12""#).unwrap();
        assert!(yanked.is_yanked());
        assert_eq!(yanked.reason(), Some("broken on 3.12"));

        let yanked: Yanked = serde_json::from_str("true").unwrap();
        assert!(yanked.is_yanked());
        assert_eq!(yanked.reason(), Some(""));

        let yanked: Yanked = serde_json::from_str("false").unwrap();
        assert!(!yanked.is_yanked());
        assert_eq!(yanked.reason(), None);
    }

    #[test]
    fn dist_metadata_variants() {
        let metadata: DistMetadata = serde_json::from_str("true").unwrap();
        assert!(metadata.is_available());

        let metadata: DistMetadata = serde_json::from_str("false").unwrap();
        assert!(!metadata.is_available());

        let metadata: DistMetadata =
            serde_json::from_str(r#"{"sha256": "deadbeef"}"#).unwrap();
        assert!(metadata.is_available());
    }
}
