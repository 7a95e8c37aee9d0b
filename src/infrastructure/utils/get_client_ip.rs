use actix_web::{http::header, HttpRequest};

/// Extract the client's IP address from the request, considering X-Forwarded-For if trusted.
/// Returns `None` when neither the header (if trusted) nor the peer address is available.
pub fn get_client_ip(req: &HttpRequest, trust_x_forwarded_for: bool) -> Option<String> {
    if trust_x_forwarded_for {
        let forwarded = req
            .headers()
            .get("x-forwarded-for")
            .and_then(|value| value.to_str().ok())
            .and_then(|s| s.split(',').next())
            .map(str::trim)
            .filter(|ip| !ip.is_empty());

        if let Some(ip) = forwarded {
            return Some(ip.to_string());
        }
    }

    req.peer_addr().map(|addr| addr.ip().to_string())
}

/// The declared client identifier, or an empty string.
pub fn get_user_agent(req: &HttpRequest) -> String {
    req.headers()
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;

    use actix_web::test::TestRequest;

    use super::*;

    fn peer() -> SocketAddr {
        "203.0.113.7:51000".parse().unwrap()
    }

    #[test]
    fn uses_peer_address_by_default() {
        let req = TestRequest::default()
            .peer_addr(peer())
            .insert_header(("x-forwarded-for", "198.51.100.1"))
            .to_http_request();

        assert_eq!(get_client_ip(&req, false).as_deref(), Some("203.0.113.7"));
    }

    #[test]
    fn trusts_first_forwarded_entry_when_enabled() {
        let req = TestRequest::default()
            .peer_addr(peer())
            .insert_header(("x-forwarded-for", " 198.51.100.1 , 10.0.0.2"))
            .to_http_request();

        assert_eq!(get_client_ip(&req, true).as_deref(), Some("198.51.100.1"));
    }

    #[test]
    fn missing_address_is_none() {
        let req = TestRequest::default().to_http_request();
        assert_eq!(get_client_ip(&req, true), None);
    }

    #[test]
    fn user_agent_defaults_to_empty() {
        let req = TestRequest::default().to_http_request();
        assert_eq!(get_user_agent(&req), "");

        let req = TestRequest::default()
            .insert_header((header::USER_AGENT, "curl/8.5.0"))
            .to_http_request();
        assert_eq!(get_user_agent(&req), "curl/8.5.0");
    }
}
