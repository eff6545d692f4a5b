use http::{HeaderMap, HeaderValue};

/// Every response carries the same CORS headers; only the allowed-methods
/// value differs between handlers.
pub const ALLOW_ORIGIN: &'static str = "*";
pub const ALLOW_HEADERS: &'static str =
    "Content-Type,X-Amz-Date,Authorization,X-Api-Key,X-Amz-Security-Token";

pub fn cors_headers(allowed_methods: &str) -> HeaderMap {
    let mut headers: HeaderMap = HeaderMap::new();

    headers.insert(
        "Access-Control-Allow-Origin",
        HeaderValue::from_static(ALLOW_ORIGIN),
    );
    headers.insert(
        "Access-Control-Allow-Headers",
        HeaderValue::from_static(ALLOW_HEADERS),
    );
    headers.insert(
        "Access-Control-Allow-Methods",
        HeaderValue::from_str(allowed_methods).expect("allowed methods form a valid header value"),
    );

    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headers_are_fixed_apart_from_methods() {
        let headers: HeaderMap = cors_headers("DELETE,OPTIONS");

        assert_eq!("*", headers["Access-Control-Allow-Origin"]);
        assert_eq!(
            "Content-Type,X-Amz-Date,Authorization,X-Api-Key,X-Amz-Security-Token",
            headers["Access-Control-Allow-Headers"]
        );
        assert_eq!("DELETE,OPTIONS", headers["Access-Control-Allow-Methods"]);
    }
}
