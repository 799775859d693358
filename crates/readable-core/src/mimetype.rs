//! MIME types readability metadata can be extracted for.

/// Document formats with a text layer worth scoring.
pub const SUPPORTED_MIMETYPES: &[&str] = &[
    "text/plain",
    "text/html",
    "application/pdf",
    "application/msword",
    "application/vnd.oasis.opendocument.text",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/x-abiword",
    "application/vnd.ms-powerpoint",
    "application/vnd.oasis.opendocument.presentation",
    "application/vnd.openxmlformats-officedocument.presentationml.presentation",
];

/// The `type/subtype` part of a MIME type or `Content-Type` header, without
/// parameters such as `charset` or `boundary`.
pub fn mimetype_without_parameters(mimetype: &str) -> &str {
    mimetype.split(';').next().unwrap_or_default().trim()
}

/// Whether a bare `type/subtype` is on the allow-list.
///
/// Empty input is never supported. Matching is exact: strip parameters with
/// [`mimetype_without_parameters`] first.
pub fn is_mimetype_supported(mimetype: &str) -> bool {
    !mimetype.is_empty() && SUPPORTED_MIMETYPES.contains(&mimetype)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// (content type, bare mimetype, supported)
    const CONTENT_TYPES: &[(&str, &str, bool)] = &[
        (
            "multipart/form-data; boundary=---------------------------8721656041911415653955004498",
            "multipart/form-data",
            false,
        ),
        ("application/json; charset=utf-8", "application/json", false),
        ("application/octet-stream", "application/octet-stream", false),
        ("text/html; charset=utf-8", "text/html", true),
        ("text/plain; charset=ISO-8859-1", "text/plain", true),
        ("text/plain", "text/plain", true),
        ("application/pdf", "application/pdf", true),
        ("application/x-abiword", "application/x-abiword", true),
        (
            "application/vnd.openxmlformats-officedocument.presentationml.presentation",
            "application/vnd.openxmlformats-officedocument.presentationml.presentation",
            true,
        ),
    ];

    #[test]
    fn strips_parameters() {
        for &(content_type, expected, _) in CONTENT_TYPES {
            assert_eq!(mimetype_without_parameters(content_type), expected);
        }
        assert_eq!(mimetype_without_parameters("  text/plain ;charset=utf-8"), "text/plain");
        assert_eq!(mimetype_without_parameters(""), "");
    }

    #[test]
    fn allow_list() {
        for &(_, mimetype, supported) in CONTENT_TYPES {
            assert_eq!(is_mimetype_supported(mimetype), supported, "{mimetype}");
        }
    }

    #[test]
    fn every_listed_type_is_supported() {
        for mimetype in SUPPORTED_MIMETYPES {
            assert!(is_mimetype_supported(mimetype));
        }
        assert!(!is_mimetype_supported(""));
        assert!(!is_mimetype_supported("text/html; charset=utf-8"));
    }
}
