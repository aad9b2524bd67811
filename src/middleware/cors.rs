// src/middleware/cors.rs

use actix_cors::Cors;

/// Any origin, any method, any header. Simple responses carry
/// `Access-Control-Allow-Origin: *`; preflights are answered here and never
/// reach a handler.
pub fn permissive() -> Cors {
    Cors::default()
        .allow_any_origin()
        .send_wildcard()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600)
}
