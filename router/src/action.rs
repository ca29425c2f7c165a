//! Action name resolution for convention based controller dispatch.
//!
//! A resource registered at `/pages` receives the optional `id` and `action` parameters from paths
//! like `/pages/10/edit`. [resolve] turns them together with the request method into the name of
//! the controller action that should handle the request.

use std::borrow::Cow;

use http::Method;

/// Action name returned when no convention applies to the request.
pub const WRONG_ACTION: &str = "WrongAction";

/// Resolve the action name of a request.
///
/// Rules are applied in order:
///
/// 1. Without an id `GET` is `Index` and `POST` is `Create`.
/// 2. With an action it is `method + capitalize(action)`.
/// 3. With an id that reads as a declared extra action (`GET /pages/collection` with `GETCollection`
///    in `extras`) it is that extra action.
/// 4. `GET` is `Show`, `POST` and `PUT` are `Update` and `DELETE` is `Destroy`.
/// 5. Anything else is [WRONG_ACTION].
///
/// # Examples
/// ```rust
/// # use flash_router::action::{resolve, WRONG_ACTION};
/// # use http::Method;
/// assert_eq!(resolve(&Method::GET, "", "", &[] as &[&str]), "Index");
/// assert_eq!(resolve(&Method::GET, "10", "edit", &[] as &[&str]), "GETEdit");
/// assert_eq!(resolve(&Method::GET, "collection", "", &["GETCollection"]), "GETCollection");
/// assert_eq!(resolve(&Method::PATCH, "10", "", &[] as &[&str]), WRONG_ACTION);
/// ```
pub fn resolve<E>(method: &Method, id: &str, action: &str, extras: &[E]) -> Cow<'static, str>
where
    E: AsRef<str>,
{
    if id.is_empty() {
        match *method {
            Method::GET => return Cow::Borrowed("Index"),
            Method::POST => return Cow::Borrowed("Create"),
            _ => {}
        }
    }

    if !action.is_empty() {
        return Cow::Owned(prefixed(method, action));
    }

    if !id.is_empty() && !extras.is_empty() {
        let candidate = prefixed(method, id);
        if extras.iter().any(|extra| extra.as_ref() == candidate) {
            return Cow::Owned(candidate);
        }
    }

    let action = match *method {
        Method::GET => "Show",
        Method::POST | Method::PUT => "Update",
        Method::DELETE => "Destroy",
        _ => WRONG_ACTION,
    };

    Cow::Borrowed(action)
}

fn prefixed(method: &Method, name: &str) -> String {
    let method = method.as_str();
    let mut action = String::with_capacity(method.len() + name.len());
    action.push_str(method);
    push_capitalized(&mut action, name);
    action
}

/// Uppercase the first character of a string and leave the rest untouched.
///
/// A character without a single character uppercase form (`ß`, `ŉ`) is kept as is.
///
/// # Examples
/// ```rust
/// # use flash_router::action::capitalize;
/// assert_eq!(capitalize("edit"), "Edit");
/// assert_eq!(capitalize("éclair"), "Éclair");
/// assert_eq!(capitalize("ßx"), "ßx");
/// assert_eq!(capitalize(""), "");
/// ```
pub fn capitalize(s: &str) -> Cow<'_, str> {
    match s.chars().next() {
        Some(c) if to_upper(c) != c => {
            let mut out = String::with_capacity(s.len());
            push_capitalized(&mut out, s);
            Cow::Owned(out)
        }
        _ => Cow::Borrowed(s),
    }
}

fn push_capitalized(buf: &mut String, s: &str) {
    let mut chars = s.chars();
    if let Some(first) = chars.next() {
        buf.push(to_upper(first));
        buf.push_str(chars.as_str());
    }
}

// simple uppercase mapping. multi char mappings leave the char unchanged.
fn to_upper(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: &[&str] = &[];

    #[test]
    fn crud() {
        assert_eq!(resolve(&Method::GET, "", "", NONE), "Index");
        assert_eq!(resolve(&Method::POST, "", "", NONE), "Create");
        assert_eq!(resolve(&Method::GET, "1", "", NONE), "Show");
        assert_eq!(resolve(&Method::POST, "1", "", NONE), "Update");
        assert_eq!(resolve(&Method::PUT, "1", "", NONE), "Update");
        assert_eq!(resolve(&Method::DELETE, "1", "", NONE), "Destroy");
    }

    #[test]
    fn with_action() {
        assert_eq!(resolve(&Method::GET, "1", "action", NONE), "GETAction");
        assert_eq!(resolve(&Method::POST, "1", "action", NONE), "POSTAction");
        assert_eq!(resolve(&Method::PUT, "1", "action", NONE), "PUTAction");
        assert_eq!(resolve(&Method::DELETE, "1", "action", NONE), "DELETEAction");
        assert_eq!(resolve(&Method::PATCH, "1", "edit", NONE), "PATCHEdit");
    }

    #[test]
    fn extras() {
        assert_eq!(resolve(&Method::GET, "action", "", &["GETAction"]), "GETAction");
        assert_eq!(resolve(&Method::POST, "action", "", &["POSTAction"]), "POSTAction");
        // extra registered for another method.
        assert_eq!(resolve(&Method::POST, "action", "", &["GETAction"]), "Update");
        assert_eq!(
            resolve(&Method::GET, "action3", "", &["GETAction", "GETAction1", "GETAction2", "GETAction3"]),
            "GETAction3"
        );
    }

    #[test]
    fn no_id_falls_through() {
        assert_eq!(resolve(&Method::PUT, "", "", NONE), "Update");
        assert_eq!(resolve(&Method::DELETE, "", "", NONE), "Destroy");
        assert_eq!(resolve(&Method::PUT, "", "edit", NONE), "PUTEdit");
    }

    #[test]
    fn wrong_action() {
        assert_eq!(resolve(&Method::PATCH, "10", "", NONE), WRONG_ACTION);
        assert_eq!(resolve(&Method::OPTIONS, "", "", NONE), WRONG_ACTION);
        assert_eq!(resolve(&Method::HEAD, "1", "", &["GETOne"]), WRONG_ACTION);
    }

    #[test]
    fn capitalize_first_code_point() {
        assert_eq!(capitalize("a"), "A");
        assert_eq!(capitalize("aBC"), "ABC");
        assert_eq!(capitalize("Edit"), "Edit");
        assert_eq!(capitalize("1st"), "1st");
        assert_eq!(capitalize("éclair"), "Éclair");
        assert_eq!(capitalize("ǆx"), "Ǆx");
        assert!(matches!(capitalize("Edit"), Cow::Borrowed(_)));
    }

    #[test]
    fn capitalize_keeps_multi_char_uppercase() {
        assert_eq!(capitalize("ßx"), "ßx");
        assert_eq!(capitalize("ŉame"), "ŉame");
        assert!(matches!(capitalize("ßx"), Cow::Borrowed(_)));
        assert_eq!(capitalize("ßx").chars().count(), 2);

        assert_eq!(resolve(&Method::GET, "1", "ßx", NONE), "GETßx");
        assert_eq!(resolve(&Method::GET, "1", "ŉame", NONE), "GETŉame");
    }
}
