use actix_web::HttpRequest;
use chrono::Local;

// Line for the access log, or the error log when a message is given.
pub fn log_request(req: &HttpRequest, status_code: u16, error_message: Option<&str>) -> String {
    let referer = req.headers()
        .get("Referer")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");
    let user_agent = req.headers()
        .get("User-Agent")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");
    let client_ip = req.peer_addr().map(|addr| addr.ip().to_string()).unwrap_or_else(|| "unknown".to_string());
    let time = Local::now().format("%d/%b/%Y:%H:%M:%S %z");

    let mut line = format!(
        "{client_ip} - - [{time}] \"{method} {uri} {version:?}\" {status_code} \"{referer}\" \"{user_agent}\"",
        method = req.method(),
        uri = req.uri(),
        version = req.version(),
    );
    if let Some(msg) = error_message {
        line.push_str(&format!(" \"{}\"", msg));
    }
    line
}
