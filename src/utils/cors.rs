use actix_cors::Cors;
use actix_web::{
    Error, HttpResponse,
    body::{BoxBody, MessageBody},
    dev::{ServiceRequest, ServiceResponse},
    http::{
        Method,
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_REQUEST_METHOD, CONTENT_TYPE,
            HeaderValue, ORIGIN,
        },
    },
    middleware::Next,
};

const ALLOWED_METHODS: [Method; 5] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::OPTIONS,
];

const ALLOWED_METHODS_HEADER: &str = "GET, POST, PUT, DELETE, OPTIONS";

/// Browser CORS: preflights are answered here and cross-origin responses
/// readable from any origin.
pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .send_wildcard()
        .allowed_methods(ALLOWED_METHODS)
        .allowed_header(CONTENT_TYPE)
        .max_age(3600)
}

/// Sits outside [`cors`]. Answers `OPTIONS` requests that are not browser
/// preflights, which `Cors` would reject, and marks responses to requests
/// without an `Origin` header as readable from any origin.
pub async fn preflight_fallback<B>(
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<BoxBody>, Error>
where
    B: MessageBody + 'static,
{
    if req.method() == Method::OPTIONS && !is_preflight(&req) {
        let resp = HttpResponse::Ok()
            .insert_header((ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
            .insert_header((ACCESS_CONTROL_ALLOW_METHODS, ALLOWED_METHODS_HEADER))
            .insert_header((ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"))
            .finish();
        return Ok(req.into_response(resp));
    }

    let mut res = next.call(req).await?.map_into_boxed_body();
    if !res.headers().contains_key(ACCESS_CONTROL_ALLOW_ORIGIN) {
        res.headers_mut()
            .insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    }
    Ok(res)
}

fn is_preflight(req: &ServiceRequest) -> bool {
    let headers = req.headers();
    headers.contains_key(ORIGIN) && headers.contains_key(ACCESS_CONTROL_REQUEST_METHOD)
}
