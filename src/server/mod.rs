use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};

pub mod api;
pub mod routes;

pub fn run_server(bind_addr: &str) -> std::io::Result<()> {
    let listener = TcpListener::bind(bind_addr)?;
    println!("overlord server listening on http://{bind_addr}");

    for stream in listener.incoming() {
        match stream {
            Ok(mut stream) => {
                if let Err(err) = handle_connection(&mut stream) {
                    eprintln!("request error: {err}");
                }
            }
            Err(err) => eprintln!("connection failed: {err}"),
        }
    }

    Ok(())
}

/// Minimal HTTP/1.1 request split: (method, path, body). Headers are not
/// interpreted; bodies are whatever follows the first blank line.
fn parse_request(raw: &str) -> (&str, &str, &str) {
    let request_line = raw.lines().next().unwrap_or_default();
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or("GET");
    let path = parts.next().unwrap_or("/");

    let body = raw
        .split("\r\n\r\n")
        .nth(1)
        .or_else(|| raw.split("\n\n").nth(1))
        .unwrap_or("");

    (method, path, body)
}

fn handle_connection(stream: &mut TcpStream) -> std::io::Result<()> {
    let mut buffer = [0_u8; 16_384];
    let bytes_read = stream.read(&mut buffer)?;
    if bytes_read == 0 {
        return Ok(());
    }

    let raw = String::from_utf8_lossy(&buffer[..bytes_read]);
    let (method, path, body) = parse_request(&raw);
    let response = routes::route_request(method, path, body).to_http_string();

    stream.write_all(response.as_bytes())?;
    stream.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::parse_request;

    #[test]
    fn parses_method_path_and_body() {
        let raw = "POST /api/simulate HTTP/1.1\r\nContent-Type: application/json\r\n\r\n{\"seed\":7}";
        let (method, path, body) = parse_request(raw);
        assert_eq!(method, "POST");
        assert_eq!(path, "/api/simulate");
        assert_eq!(body, "{\"seed\":7}");
    }

    #[test]
    fn defaults_for_an_empty_request() {
        let (method, path, body) = parse_request("");
        assert_eq!(method, "GET");
        assert_eq!(path, "/");
        assert_eq!(body, "");
    }
}
