//! Canonical reason phrases for HTTP status codes
//!
//! Used whenever the transport does not hand us a reason phrase of its own.

/// Reason phrase reported when a status code is not in the table
pub const UNKNOWN_ERROR_TEXT: &str = "Unknown Error";

/// Status text reported for failures where no response was received
pub const CLIENT_ERROR_TEXT: &str = "Client Error";

/// Status code reported for failures where no response was received
pub const CLIENT_ERROR_CODE: u16 = 500;

/// Sorted by status code.
static STATUS_TEXT: &[(u16, &str)] = &[
    (400, "Bad Request"),
    (401, "Unauthorized"),
    (402, "Payment Required"),
    (403, "Forbidden"),
    (404, "Not Found"),
    (405, "Method Not Allowed"),
    (406, "Not Acceptable"),
    (407, "Proxy Authentication Required"),
    (408, "Request Timeout"),
    (409, "Conflict"),
    (410, "Gone"),
    (411, "Length Required"),
    (412, "Precondition Failed"),
    (413, "Payload Too Large"),
    (414, "URI Too Long"),
    (415, "Unsupported Media Type"),
    (416, "Range Not Satisfiable"),
    (417, "Expectation Failed"),
    (418, "I'm a teapot"),
    (421, "Misdirected Request"),
    (422, "Unprocessable Entity"),
    (423, "Locked"),
    (424, "Failed Dependency"),
    (425, "Too Early"),
    (426, "Upgrade Required"),
    (428, "Precondition Required"),
    (429, "Too Many Requests"),
    (431, "Request Header Fields Too Large"),
    (451, "Unavailable For Legal Reasons"),
    (500, "Internal Server Error"),
    (501, "Not Implemented"),
    (502, "Bad Gateway"),
    (503, "Service Unavailable"),
    (504, "Gateway Timeout"),
    (505, "HTTP Version Not Supported"),
    (506, "Variant Also Negotiates"),
    (507, "Insufficient Storage"),
    (508, "Loop Detected"),
    (510, "Not Extended"),
    (511, "Network Authentication Required"),
];

/// Look up the canonical reason phrase for a status code
pub fn status_text(code: u16) -> Option<&'static str> {
    STATUS_TEXT
        .binary_search_by_key(&code, |(c, _)| *c)
        .ok()
        .map(|idx| STATUS_TEXT[idx].1)
}

/// Pick the status text for an error response.
///
/// A non-empty phrase supplied by the transport wins, then the table, then
/// [`UNKNOWN_ERROR_TEXT`].
pub fn resolve_status_text(code: u16, transport_text: Option<&str>) -> String {
    transport_text
        .filter(|text| !text.trim().is_empty())
        .or_else(|| status_text(code))
        .unwrap_or(UNKNOWN_ERROR_TEXT)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_sorted() {
        assert!(STATUS_TEXT.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn test_well_known_codes() {
        assert_eq!(status_text(400), Some("Bad Request"));
        assert_eq!(status_text(401), Some("Unauthorized"));
        assert_eq!(status_text(403), Some("Forbidden"));
        assert_eq!(status_text(404), Some("Not Found"));
        assert_eq!(status_text(409), Some("Conflict"));
        assert_eq!(status_text(429), Some("Too Many Requests"));
        assert_eq!(status_text(500), Some("Internal Server Error"));
        assert_eq!(status_text(501), Some("Not Implemented"));
        assert_eq!(status_text(503), Some("Service Unavailable"));
    }

    #[test]
    fn test_unlisted_codes() {
        assert_eq!(status_text(200), None);
        assert_eq!(status_text(499), None);
        assert_eq!(status_text(599), None);
    }

    #[test]
    fn test_resolve_prefers_transport_text() {
        assert_eq!(resolve_status_text(401, Some("Unauthenticated")), "Unauthenticated");
        assert_eq!(resolve_status_text(401, Some("")), "Unauthorized");
        assert_eq!(resolve_status_text(401, Some("   ")), "Unauthorized");
        assert_eq!(resolve_status_text(401, None), "Unauthorized");
        assert_eq!(resolve_status_text(499, None), UNKNOWN_ERROR_TEXT);
    }
}
