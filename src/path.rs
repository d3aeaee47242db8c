//! Browser path strings, independent of any file system.

use kstring::KString;

/// Normalize a browser path for route matching: trailing slashes are
/// insignificant (`"/projects/"` matches `"/projects"`), everything
/// else is exact and case-sensitive. The bare root `"/"` survives;
/// the empty string stays empty and thus matches no route.
pub fn normalize_path(s: &str) -> KString {
    let trimmed = s.trim_end_matches('/');
    if trimmed.is_empty() && s.starts_with('/') {
        KString::from_static("/")
    } else {
        KString::from_ref(trimmed)
    }
}
