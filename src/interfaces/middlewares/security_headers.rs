use actix_web::middleware::DefaultHeaders;

/// Hardening headers added to every response.
pub fn security_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("X-Content-Type-Options", "nosniff"))
        .add(("X-Frame-Options", "SAMEORIGIN"))
        .add(("Referrer-Policy", "no-referrer"))
        .add(("X-DNS-Prefetch-Control", "off"))
        .add(("Cross-Origin-Resource-Policy", "same-origin"))
        .add(("Strict-Transport-Security", "max-age=15552000; includeSubDomains"))
        // JSON-only API: nothing may be loaded or framed from its responses.
        .add(("Content-Security-Policy", "default-src 'none'; frame-ancestors 'self'"))
        .add(("Cross-Origin-Opener-Policy", "same-origin"))
        .add(("X-Permitted-Cross-Domain-Policies", "none"))
        .add(("Origin-Agent-Cluster", "?1"))
}
