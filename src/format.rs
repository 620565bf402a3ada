//! Pure key and format utilities. No state, no I/O.

/// Units for human-readable byte formatting, decimal steps of 1000
const BYTE_UNITS: [&str; 6] = ["Bytes", "KB", "MB", "GB", "TB", "PB"];

/// Format an API key as a bearer token header value
pub fn bearer_token(api_key: &str) -> String {
    format!("Bearer {}", api_key)
}

/// Compose the storage endpoint from the project base URL
///
/// Deliberately does not normalize a trailing slash in `api_url`: a trailing
/// slash yields a doubled separator in the composed path, matching the
/// backend's documented API shape for existing deployments.
pub fn storage_endpoint(api_url: &str) -> String {
    format!("{}/storage/v1", api_url)
}

/// Derive the object key for a file inside the bucket
///
/// The leaf segment is `hash + ext`. An empty `directory` yields the leaf
/// alone with no leading separator; otherwise the directory is stripped of
/// leading and trailing slashes and joined with exactly one `/`. Behaves
/// identically on every host platform.
pub fn object_key(hash: &str, ext: &str, directory: &str) -> String {
    let prefix = directory.trim_matches('/');
    if prefix.is_empty() {
        format!("{}{}", hash, ext)
    } else {
        format!("{}/{}{}", prefix, hash, ext)
    }
}

/// Convert kilobytes to bytes (decimal convention, 1 KB = 1000 bytes)
pub fn kilobytes_to_bytes(kb: f64) -> f64 {
    kb * 1000.0
}

/// Format a byte count with the largest fitting decimal unit
///
/// Zero is special-cased to `"0 Bytes"` (log of zero is undefined). All
/// other values are scaled by 1000^i and printed with exactly two decimal
/// digits, e.g. `"1.50 MB"`.
pub fn human_readable_bytes(bytes: f64) -> String {
    if bytes == 0.0 {
        return "0 Bytes".to_string();
    }
    let exponent = (bytes.ln() / 1000f64.ln()).floor() as usize;
    let exponent = exponent.min(BYTE_UNITS.len() - 1);
    let scaled = bytes / 1000f64.powi(exponent as i32);
    format!("{:.2} {}", scaled, BYTE_UNITS[exponent])
}
