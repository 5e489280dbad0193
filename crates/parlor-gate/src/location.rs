//! Sign-in redirect locations.
//!
//! The gate sends the visitor to `<sign-in path>?for=<current path>` and
//! the sign-in page reads `for` back to return them after signing in.

/// Query parameter carrying the page to return to.
pub const RETURN_PARAM: &str = "for";

/// Builds the sign-in location for a visitor currently at `current_path`.
///
/// The whole path (including any query string of its own) is
/// percent-encoded into a single parameter.
///
/// ```rust
/// use parlor_gate::sign_in_location;
///
/// assert_eq!(sign_in_location("/signin", "/control"), "/signin?for=%2Fcontrol");
/// ```
pub fn sign_in_location(sign_in_path: &str, current_path: &str) -> String {
    if current_path.is_empty() {
        return sign_in_path.to_string();
    }
    let separator = if sign_in_path.contains('?') { '&' } else { '?' };
    format!(
        "{sign_in_path}{separator}{RETURN_PARAM}={}",
        urlencoding::encode(current_path)
    )
}

/// Extracts the return path from a sign-in page query string.
///
/// Accepts the query with or without its leading `?`. Only same-origin
/// absolute paths are returned; anything that could leave the site
/// (`//host`, `https://..`, `/\host`) yields `None`.
pub fn return_location(query: &str) -> Option<String> {
    let query = query.strip_prefix('?').unwrap_or(query);
    let raw = query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key == RETURN_PARAM).then_some(value)
    })?;

    let decoded = urlencoding::decode(raw).ok()?;
    let is_local = decoded.starts_with('/')
        && !decoded.starts_with("//")
        && !decoded.starts_with("/\\");
    if !is_local {
        tracing::debug!(location = %decoded, "ignoring non-local return location");
        return None;
    }
    Some(decoded.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_in_location_encodes_slashes() {
        assert_eq!(sign_in_location("/signin", "/control"), "/signin?for=%2Fcontrol");
    }

    #[test]
    fn test_sign_in_location_encodes_nested_query() {
        assert_eq!(
            sign_in_location("/signin", "/mails?page=2&sort=new"),
            "/signin?for=%2Fmails%3Fpage%3D2%26sort%3Dnew"
        );
    }

    #[test]
    fn test_sign_in_location_appends_to_existing_query() {
        assert_eq!(
            sign_in_location("/signin?lang=ja", "/control"),
            "/signin?lang=ja&for=%2Fcontrol"
        );
    }

    #[test]
    fn test_sign_in_location_empty_path_has_no_param() {
        assert_eq!(sign_in_location("/signin", ""), "/signin");
    }

    #[test]
    fn test_return_location_decodes_param() {
        assert_eq!(return_location("?for=%2Fcontrol"), Some("/control".into()));
        assert_eq!(
            return_location("lang=ja&for=%2Fmails%3Fpage%3D2"),
            Some("/mails?page=2".into())
        );
    }

    #[test]
    fn test_return_location_missing_param() {
        assert_eq!(return_location("?lang=ja"), None);
        assert_eq!(return_location(""), None);
    }

    #[test]
    fn test_return_location_rejects_offsite_targets() {
        assert_eq!(return_location("for=%2F%2Fevil.example"), None);
        assert_eq!(return_location("for=https%3A%2F%2Fevil.example"), None);
        assert_eq!(return_location("for=%2F%5Cevil.example"), None);
    }

    #[test]
    fn test_round_trip_through_sign_in_page() {
        let location = sign_in_location("/signin", "/characters/42/edit");
        let (_, query) = location.split_once('?').unwrap();

        assert_eq!(return_location(query), Some("/characters/42/edit".into()));
    }
}
