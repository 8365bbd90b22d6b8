//! HTTP method types

use core::fmt;

use reqwest::Method;

/// HTTP method for a request.
///
/// `Update` is not a registered HTTP verb; it is kept for servers that
/// expect the literal `UPDATE` token on the wire and is sent verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// DELETE
    Delete,
    /// Non-standard `UPDATE` verb
    Update,
}

impl HttpMethod {
    /// Wire representation of the method.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
            Self::Update => "UPDATE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<HttpMethod> for Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
            // "UPDATE" contains only valid token characters
            HttpMethod::Update => {
                Method::from_bytes(b"UPDATE").expect("UPDATE is a valid method token")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_values() {
        assert_eq!(HttpMethod::Get.as_str(), "GET");
        assert_eq!(HttpMethod::Post.as_str(), "POST");
        assert_eq!(HttpMethod::Put.as_str(), "PUT");
        assert_eq!(HttpMethod::Delete.as_str(), "DELETE");
        assert_eq!(HttpMethod::Update.as_str(), "UPDATE");
    }

    #[test]
    fn test_update_converts_to_custom_method() {
        let method: Method = HttpMethod::Update.into();
        assert_eq!(method.as_str(), "UPDATE");
    }

    #[test]
    fn test_standard_methods_convert() {
        assert_eq!(Method::from(HttpMethod::Get), Method::GET);
        assert_eq!(Method::from(HttpMethod::Post), Method::POST);
        assert_eq!(Method::from(HttpMethod::Put), Method::PUT);
        assert_eq!(Method::from(HttpMethod::Delete), Method::DELETE);
    }

    #[test]
    fn test_display_matches_wire_value() {
        assert_eq!(format!("{}", HttpMethod::Update), "UPDATE");
    }
}
