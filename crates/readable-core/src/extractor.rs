//! Resource validation and metadata extraction.
//!
//! [`ReadableExtractor`] is what a host metadata system talks to. It takes a
//! [`ContentExtractor`] (the component that turns a file or URL into plain
//! text) and a [`Calculator`], decides whether a resource can be scored, and
//! produces [`ReadabilityMetadata`] for it.
//!
//! Error policy:
//! - content extractor not ready: [`ExtractionError::MissingDependency`]
//! - network failures: propagated as [`ExtractionError::Network`] so the host
//!   can retry
//! - any other extraction failure or an unsupported mimetype: the resource is
//!   reported as invalid (validation) or as having no metadata (extraction)
//! - empty content: no metadata

use camino::{Utf8Path, Utf8PathBuf};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use url::Url;

use crate::calculator::{Calculator, ReadingSpeedProvider, ScoreSet};
use crate::error::{ExtractionError, ExtractionResult};
use crate::mimetype;

/// A stored file as the host describes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileResource {
    /// Where the file lives.
    pub path: Utf8PathBuf,
    /// Hash identifying the file content; used as the metadata record key.
    pub content_hash: String,
    /// Whether the entry is a directory rather than a file.
    pub is_directory: bool,
}

impl FileResource {
    /// Describe a file the host has already hashed.
    pub fn new(path: impl Into<Utf8PathBuf>, content_hash: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content_hash: content_hash.into(),
            is_directory: false,
        }
    }

    /// Describe a directory entry.
    pub fn directory(path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            path: path.into(),
            content_hash: String::new(),
            is_directory: true,
        }
    }

    /// Describe a local path, hashing its content with SHA-256.
    pub fn from_path(path: &Utf8Path) -> std::io::Result<Self> {
        if path.is_dir() {
            return Ok(Self::directory(path));
        }
        let bytes = std::fs::read(path)?;
        Ok(Self::new(path, format!("{:x}", Sha256::digest(&bytes))))
    }
}

/// An external URL resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlResource {
    /// The URL as entered by the user.
    pub external_url: String,
}

impl UrlResource {
    /// Wrap an external URL.
    pub fn new(external_url: impl Into<String>) -> Self {
        Self {
            external_url: external_url.into(),
        }
    }

    /// SHA-256 hex digest of the URL, used as the metadata record key.
    pub fn resource_hash(&self) -> String {
        format!("{:x}", Sha256::digest(self.external_url.as_bytes()))
    }

    /// Whether the URL is a well-formed `http` or `https` URL with a host.
    pub fn is_web_url(&self) -> bool {
        let url = self.external_url.trim();
        let scheme_ok = url
            .get(..8)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("https://"))
            || url
                .get(..7)
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case("http://"));
        scheme_ok
            && Url::parse(url).is_ok_and(|parsed| {
                matches!(parsed.scheme(), "http" | "https") && parsed.host_str().is_some()
            })
    }
}

/// Any resource the host can ask about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    /// A stored file.
    File(FileResource),
    /// An external URL.
    Url(UrlResource),
}

impl Resource {
    /// The key the host stores metadata under.
    pub fn resource_hash(&self) -> String {
        match self {
            Self::File(file) => file.content_hash.clone(),
            Self::Url(url) => url.resource_hash(),
        }
    }
}

/// Turns resources into plain text and reports their mimetypes.
///
/// Implementations signal network trouble with [`ExtractionError::Network`]
/// and everything else with [`ExtractionError::Failed`]. Returning
/// `Ok(None)` or an empty string from a content method means the resource
/// has no text.
pub trait ContentExtractor {
    /// Name reported when the extractor is not ready.
    fn name(&self) -> &str;

    /// Whether the extractor can be used right now.
    fn is_ready(&self) -> bool;

    /// Plain text of a file.
    fn extract_file_content(&self, file: &FileResource) -> ExtractionResult<Option<String>>;

    /// Plain text of a URL.
    fn extract_url_content(&self, url: &UrlResource) -> ExtractionResult<Option<String>>;

    /// Mimetype of a file, possibly with parameters.
    fn extract_file_mimetype(&self, file: &FileResource) -> ExtractionResult<String>;

    /// Mimetype (`Content-Type`) of a URL, possibly with parameters.
    fn extract_url_mimetype(&self, url: &UrlResource) -> ExtractionResult<String>;
}

/// Readability metadata for one resource, ready for the host to persist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReadabilityMetadata {
    /// Identity of the resource the scores belong to.
    pub resource_hash: String,
    /// The score set, flattened into the record.
    #[serde(flatten)]
    pub scores: ScoreSet,
}

/// The readability extractor: resource validation plus metadata extraction.
#[derive(Debug, Clone)]
pub struct ReadableExtractor<E, P = Option<i64>> {
    extractor: E,
    calculator: Calculator<P>,
}

impl<E: ContentExtractor, P: ReadingSpeedProvider> ReadableExtractor<E, P> {
    /// Name under which the host registers this extractor.
    pub const NAME: &'static str = "readable";

    /// Compose a content extractor and a calculator.
    pub const fn new(extractor: E, calculator: Calculator<P>) -> Self {
        Self {
            extractor,
            calculator,
        }
    }

    /// The calculator used for scoring.
    pub const fn calculator(&self) -> &Calculator<P> {
        &self.calculator
    }

    fn ensure_ready(&self) -> ExtractionResult<()> {
        if self.extractor.is_ready() {
            Ok(())
        } else {
            Err(ExtractionError::MissingDependency {
                name: self.extractor.name().to_string(),
            })
        }
    }

    /// Whether metadata can be extracted for a resource.
    ///
    /// Directories and non-HTTP(S) URLs are rejected without consulting the
    /// content extractor; otherwise the resource's mimetype decides.
    ///
    /// # Errors
    ///
    /// [`ExtractionError::MissingDependency`] when the content extractor is
    /// not ready, and [`ExtractionError::Network`] when the mimetype could not
    /// be fetched.
    #[tracing::instrument(skip_all)]
    pub fn validate_resource(&self, resource: &Resource) -> ExtractionResult<bool> {
        let mimetype = match resource {
            Resource::File(file) => {
                if file.is_directory {
                    tracing::debug!(path = %file.path, "directory rejected");
                    return Ok(false);
                }
                self.ensure_ready()?;
                self.extractor.extract_file_mimetype(file)
            }
            Resource::Url(url) => {
                if !url.is_web_url() {
                    tracing::debug!(url = %url.external_url, "not an http(s) url");
                    return Ok(false);
                }
                self.ensure_ready()?;
                self.extractor.extract_url_mimetype(url)
            }
        };

        match mimetype {
            Ok(mimetype) => {
                let bare = mimetype::mimetype_without_parameters(&mimetype);
                let supported = mimetype::is_mimetype_supported(bare);
                tracing::debug!(mimetype = bare, supported, "checked mimetype");
                Ok(supported)
            }
            Err(err) if err.is_fatal() => Err(err),
            Err(err) => {
                tracing::debug!(error = %err, "mimetype unavailable");
                Ok(false)
            }
        }
    }

    /// Score a file.
    ///
    /// Returns `Ok(None)` when the file yields no text.
    ///
    /// # Errors
    ///
    /// [`ExtractionError::MissingDependency`] or [`ExtractionError::Network`].
    #[tracing::instrument(skip_all, fields(path = %file.path))]
    pub fn extract_file_metadata(
        &self,
        file: &FileResource,
    ) -> ExtractionResult<Option<ReadabilityMetadata>> {
        self.ensure_ready()?;
        let content = self.extractor.extract_file_content(file);
        self.score(content, || file.content_hash.clone())
    }

    /// Score a URL.
    ///
    /// Returns `Ok(None)` when the URL yields no text.
    ///
    /// # Errors
    ///
    /// [`ExtractionError::MissingDependency`] or [`ExtractionError::Network`].
    #[tracing::instrument(skip_all, fields(url = %url.external_url))]
    pub fn extract_url_metadata(
        &self,
        url: &UrlResource,
    ) -> ExtractionResult<Option<ReadabilityMetadata>> {
        self.ensure_ready()?;
        let content = self.extractor.extract_url_content(url);
        self.score(content, || url.resource_hash())
    }

    /// Score a resource of either kind.
    ///
    /// # Errors
    ///
    /// See [`Self::extract_file_metadata`] and [`Self::extract_url_metadata`].
    pub fn extract_metadata(
        &self,
        resource: &Resource,
    ) -> ExtractionResult<Option<ReadabilityMetadata>> {
        match resource {
            Resource::File(file) => self.extract_file_metadata(file),
            Resource::Url(url) => self.extract_url_metadata(url),
        }
    }

    fn score(
        &self,
        content: ExtractionResult<Option<String>>,
        resource_hash: impl FnOnce() -> String,
    ) -> ExtractionResult<Option<ReadabilityMetadata>> {
        let text = match content {
            Ok(Some(text)) if !text.trim().is_empty() => text,
            Ok(_) => {
                tracing::debug!("no content extracted");
                return Ok(None);
            }
            Err(err) if err.is_fatal() => return Err(err),
            Err(err) => {
                tracing::warn!(error = %err, "content extraction failed");
                return Ok(None);
            }
        };

        Ok(Some(ReadabilityMetadata {
            resource_hash: resource_hash(),
            scores: self.calculator.calculate_scores(&text),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &str = "An easy word to read is deal. Others I can learn are make, gem and the.";

    /// Content extractor returning canned results.
    struct MockExtractor {
        ready: bool,
        content: ExtractionResult<Option<String>>,
        mimetype: ExtractionResult<String>,
    }

    impl MockExtractor {
        fn serving(content: &str, mimetype: &str) -> Self {
            Self {
                ready: true,
                content: Ok(Some(content.to_string())),
                mimetype: Ok(mimetype.to_string()),
            }
        }
    }

    impl ContentExtractor for MockExtractor {
        fn name(&self) -> &str {
            "mock"
        }

        fn is_ready(&self) -> bool {
            self.ready
        }

        fn extract_file_content(&self, _file: &FileResource) -> ExtractionResult<Option<String>> {
            self.content.clone()
        }

        fn extract_url_content(&self, _url: &UrlResource) -> ExtractionResult<Option<String>> {
            self.content.clone()
        }

        fn extract_file_mimetype(&self, _file: &FileResource) -> ExtractionResult<String> {
            self.mimetype.clone()
        }

        fn extract_url_mimetype(&self, _url: &UrlResource) -> ExtractionResult<String> {
            self.mimetype.clone()
        }
    }

    fn extractor(mock: MockExtractor) -> ReadableExtractor<MockExtractor> {
        ReadableExtractor::new(mock, Calculator::new(None))
    }

    fn file() -> FileResource {
        FileResource::new("/docs/guide.txt", "abc123")
    }

    #[test]
    fn validate_file_by_mimetype() {
        let readable = extractor(MockExtractor::serving(TEXT, "text/plain; charset=utf-8"));
        assert_eq!(readable.validate_resource(&Resource::File(file())), Ok(true));

        let readable = extractor(MockExtractor::serving(TEXT, "image/png"));
        assert_eq!(readable.validate_resource(&Resource::File(file())), Ok(false));
    }

    #[test]
    fn directories_are_invalid() {
        let readable = extractor(MockExtractor::serving(TEXT, "text/plain"));
        let directory = Resource::File(FileResource::directory("/docs"));
        assert_eq!(readable.validate_resource(&directory), Ok(false));
    }

    #[test]
    fn only_http_urls_are_valid() {
        let readable = extractor(MockExtractor::serving(TEXT, "text/html; charset=utf-8"));
        for (url, valid) in [
            ("https://example.com/page", true),
            ("HTTP://example.com", true),
            ("ftp://example.com/file.txt", false),
            ("example.com", false),
            ("https://", false),
            ("mailto:someone@example.com", false),
        ] {
            let resource = Resource::Url(UrlResource::new(url));
            assert_eq!(readable.validate_resource(&resource), Ok(valid), "{url}");
        }
    }

    #[test]
    fn not_ready_is_missing_dependency() {
        let mut mock = MockExtractor::serving(TEXT, "text/plain");
        mock.ready = false;
        let readable = extractor(mock);

        let missing = || ExtractionError::MissingDependency {
            name: "mock".to_string(),
        };
        assert_eq!(readable.validate_resource(&Resource::File(file())), Err(missing()));
        assert_eq!(readable.extract_file_metadata(&file()), Err(missing()));
    }

    #[test]
    fn network_failure_propagates() {
        let mut mock = MockExtractor::serving(TEXT, "text/plain");
        mock.mimetype = Err(ExtractionError::Network("connection reset".to_string()));
        mock.content = Err(ExtractionError::Network("connection reset".to_string()));
        let readable = extractor(mock);
        let url = UrlResource::new("https://example.com");

        assert!(matches!(
            readable.validate_resource(&Resource::Url(url.clone())),
            Err(ExtractionError::Network(_))
        ));
        assert!(matches!(
            readable.extract_url_metadata(&url),
            Err(ExtractionError::Network(_))
        ));
    }

    #[test]
    fn other_failures_are_negative() {
        let mut mock = MockExtractor::serving(TEXT, "text/plain");
        mock.mimetype = Err(ExtractionError::Failed("unknown format".to_string()));
        mock.content = Err(ExtractionError::Failed("no text layer".to_string()));
        let readable = extractor(mock);

        assert_eq!(readable.validate_resource(&Resource::File(file())), Ok(false));
        assert_eq!(readable.extract_file_metadata(&file()), Ok(None));
    }

    #[test]
    fn empty_content_has_no_metadata() {
        let readable = extractor(MockExtractor::serving("  \n\t ", "text/plain"));
        assert_eq!(readable.extract_file_metadata(&file()), Ok(None));

        let mut mock = MockExtractor::serving(TEXT, "text/plain");
        mock.content = Ok(None);
        assert_eq!(extractor(mock).extract_file_metadata(&file()), Ok(None));
    }

    #[test]
    fn file_metadata_uses_content_hash() {
        let readable = extractor(MockExtractor::serving(TEXT, "text/plain"));
        let metadata = readable
            .extract_file_metadata(&file())
            .expect("extraction succeeds")
            .expect("metadata present");
        assert_eq!(metadata.resource_hash, "abc123");
        assert_eq!(metadata.scores.word_count, 16);
    }

    #[test]
    fn url_metadata_uses_url_hash() {
        let readable = extractor(MockExtractor::serving(TEXT, "text/html"));
        let url = UrlResource::new("https://example.com");
        let metadata = readable
            .extract_metadata(&Resource::Url(url.clone()))
            .expect("extraction succeeds")
            .expect("metadata present");
        assert_eq!(metadata.resource_hash, url.resource_hash());
        assert_eq!(metadata.resource_hash.len(), 64);
        assert_eq!(
            url.resource_hash(),
            "100680ad546ce6a577f42f52df33b4cfdca756859e664b8d7de329b150d09ce9"
        );
    }

    #[test]
    fn metadata_serializes_flat() {
        let readable = extractor(MockExtractor::serving(TEXT, "text/plain"));
        let metadata = readable
            .extract_file_metadata(&file())
            .expect("extraction succeeds")
            .expect("metadata present");
        let json = serde_json::to_value(&metadata).expect("serializes");
        assert_eq!(json["resource_hash"], "abc123");
        assert_eq!(json["wordcount"], 16);
        assert_eq!(json["readingtime"], 4);
    }

    #[test]
    fn file_resource_from_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = Utf8Path::from_path(dir.path()).expect("utf-8 path");
        let path = root.join("note.txt");
        std::fs::write(&path, "test content").expect("write");

        let resource = FileResource::from_path(&path).expect("hashes file");
        assert!(!resource.is_directory);
        assert_eq!(
            resource.content_hash,
            format!("{:x}", Sha256::digest(b"test content"))
        );

        let directory = FileResource::from_path(root).expect("reads directory");
        assert!(directory.is_directory);
    }
}
