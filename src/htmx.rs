/// HTMX utils
use axum::{
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

/// True for requests that swap a fragment. Boosted links and forms are
/// navigations and still get the whole page.
pub fn is_htmx(headers: &HeaderMap) -> bool {
    headers.contains_key("Hx-Request") && !headers.contains_key("Hx-Boosted")
}

/// Send the browser somewhere else: `Hx-Redirect` for HTMX requests, a plain
/// `303 See Other` for full page loads.
pub fn navigate(request_headers: &HeaderMap, to: &str) -> Response {
    navigate_with(request_headers, to, HeaderMap::new())
}

pub fn navigate_with(
    request_headers: &HeaderMap,
    to: &str,
    extra: HeaderMap,
) -> Response {
    if is_htmx(request_headers) {
        (StatusCode::OK, merge([extra, redirect(to)]), "").into_response()
    } else {
        let mut location = HeaderMap::new();
        location.insert(
            "Location",
            HeaderValue::from_str(to).unwrap_or(HeaderValue::from_static("/")),
        );
        (StatusCode::SEE_OTHER, merge([extra, location])).into_response()
    }
}

pub fn redirect(to: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        "Hx-Redirect",
        HeaderValue::from_str(to).unwrap_or(HeaderValue::from_static("/")),
    );
    headers
}

/// Fire a client-side event on `body`. Containers listen with
/// `hx-trigger="{event} from:body"` and reload themselves.
pub fn trigger(event: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if let Ok(v) = HeaderValue::from_str(event) {
        headers.insert("Hx-Trigger", v);
    }
    headers
}

/// Merge header maps; later maps win. A name repeated within one map (like
/// two `Set-Cookie`s) keeps every value.
pub fn merge(maps: impl IntoIterator<Item = HeaderMap>) -> HeaderMap {
    let mut out = HeaderMap::new();
    for map in maps {
        for name in map.keys() {
            out.remove(name);
        }
        for (name, value) in map.iter() {
            out.append(name.clone(), value.clone());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boosted_requests_are_navigations() {
        let mut headers = HeaderMap::new();
        assert!(!is_htmx(&headers));
        headers.insert("Hx-Request", HeaderValue::from_static("true"));
        assert!(is_htmx(&headers));
        headers.insert("Hx-Boosted", HeaderValue::from_static("true"));
        assert!(!is_htmx(&headers));
    }

    #[test]
    fn test_merge_keeps_all_headers() {
        let headers = merge([redirect("/dashboard/owner"), trigger("x")]);
        assert_eq!(
            headers.get("Hx-Redirect").map(|v| v.to_str().unwrap()),
            Some("/dashboard/owner")
        );
        assert_eq!(
            headers.get("Hx-Trigger").map(|v| v.to_str().unwrap()),
            Some("x")
        );
    }

    #[test]
    fn test_merge_keeps_repeated_cookies() {
        let mut cookies = HeaderMap::new();
        cookies.append("Set-Cookie", HeaderValue::from_static("a=1"));
        cookies.append("Set-Cookie", HeaderValue::from_static("b=2"));
        let headers = merge([redirect("/"), cookies]);
        let values: Vec<_> = headers
            .get_all("Set-Cookie")
            .iter()
            .map(|v| v.to_str().unwrap())
            .collect();
        assert_eq!(values, ["a=1", "b=2"]);
    }
}
