use rocket::request::{FromRequest, Outcome};
use rocket::Request;

/// Originating address of a request, used as the rate-limit key. Proxy
/// headers take precedence over the socket peer; the guard never fails.
#[derive(Debug, Clone)]
pub struct ClientInfo {
    pub ip: String,
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for ClientInfo {
    type Error = ();

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let headers = req.headers();

        let ip = headers
            .get_one("X-Forwarded-For")
            .and_then(|list| list.split(',').next())
            .map(str::trim)
            .filter(|ip| !ip.is_empty())
            .or_else(|| headers.get_one("X-Real-IP"))
            .map(ToString::to_string)
            .or_else(|| req.client_ip().map(|ip| ip.to_string()))
            .unwrap_or_else(|| "unknown".to_string());

        Outcome::Success(ClientInfo { ip })
    }
}
