use crate::server::api;

pub struct HttpResponse {
    pub status_code: u16,
    pub status_text: &'static str,
    pub content_type: &'static str,
    pub body: String,
}

impl HttpResponse {
    pub fn to_http_string(&self) -> String {
        format!(
            "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            self.status_code,
            self.status_text,
            self.content_type,
            self.body.len(),
            self.body
        )
    }
}

pub fn route_request(method: &str, path: &str, body: &str) -> HttpResponse {
    match (method, path) {
        ("GET", "/") => HttpResponse {
            status_code: 200,
            status_text: "OK",
            content_type: "text/html; charset=utf-8",
            body: index_html(),
        },
        ("GET", "/api/health") => match api::health_payload() {
            Ok(payload) => ok_json(payload),
            Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
        },
        ("GET", "/api/units") => match api::units_payload() {
            Ok(payload) => ok_json(payload),
            Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
        },
        ("POST", "/api/simulate") => match api::simulate_payload(body) {
            Ok(payload) => ok_json(payload),
            Err(api::RequestError::Parse(err)) => {
                error_response(400, "Bad Request", &format!("Invalid request body: {err}"))
            }
            Err(api::RequestError::Validation(message)) => {
                error_response(400, "Bad Request", &message)
            }
        },
        ("POST", "/api/montecarlo") => match api::montecarlo_payload(body) {
            Ok(payload) => ok_json(payload),
            Err(api::RequestError::Parse(err)) => {
                error_response(400, "Bad Request", &format!("Invalid request body: {err}"))
            }
            Err(api::RequestError::Validation(message)) => {
                error_response(400, "Bad Request", &message)
            }
        },
        _ => error_response(404, "Not Found", "Route not found"),
    }
}

fn ok_json(body: String) -> HttpResponse {
    HttpResponse {
        status_code: 200,
        status_text: "OK",
        content_type: "application/json",
        body,
    }
}

fn error_response(status_code: u16, status_text: &'static str, message: &str) -> HttpResponse {
    HttpResponse {
        status_code,
        status_text,
        content_type: "application/json",
        body: format!(
            "{{\n  \"status\": \"error\",\n  \"message\": {}\n}}",
            serde_json::to_string(message).unwrap_or_else(|_| "\"Unknown error\"".to_string())
        ),
    }
}

fn index_html() -> String {
    r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width,initial-scale=1" />
  <title>Overlord Combat API</title>
  <style>
    body { font-family: Arial, sans-serif; max-width: 860px; margin: 24px auto; padding: 0 12px; }
    h1 { margin-bottom: 8px; }
    .card { border: 1px solid #ddd; border-radius: 8px; padding: 14px; margin: 14px 0; }
    label { display:block; margin: 8px 0 4px; font-weight: 600; }
    input, select { width: 100%; padding: 8px; box-sizing: border-box; }
    button { margin-top: 12px; padding: 8px 14px; }
    pre { background: #111; color: #aef2ae; padding: 12px; overflow: auto; border-radius: 6px; min-height: 180px; }
  </style>
</head>
<body>
  <h1>Overlord Combat API</h1>
  <p>Resolve one battle or run a Monte Carlo batch over a scenario.</p>

  <div class="card">
    <strong>Health</strong>
    <div><button id="health-btn">GET /api/health</button></div>
  </div>

  <div class="card">
    <strong>Monte Carlo</strong>
    <label for="attackers">Attackers (comma separated)</label>
    <input id="attackers" value="infantry, infantry, artillery, tank" />
    <label for="defenders">Defenders (comma separated)</label>
    <input id="defenders" value="infantry, infantry, tank" />
    <label for="battle">Battle type</label>
    <select id="battle">
      <option value="land">land</option>
      <option value="naval">naval</option>
      <option value="amphibious">amphibious</option>
    </select>
    <label for="trials">Trials</label>
    <input id="trials" type="number" min="1" max="1000000" value="1000" />
    <div><button id="montecarlo-btn">POST /api/montecarlo</button></div>
  </div>

  <pre id="output">Ready.</pre>

  <script>
    const output = document.getElementById('output');
    const names = (value) => value.split(',').map(s => s.trim()).filter(Boolean);

    async function request(path, options) {
      output.textContent = 'Loading…';
      const response = await fetch(path, options);
      const text = await response.text();
      output.textContent = 'HTTP ' + response.status + '\n' + text;
    }

    document.getElementById('health-btn').addEventListener('click', () => {
      request('/api/health', { method: 'GET' });
    });

    document.getElementById('montecarlo-btn').addEventListener('click', () => {
      const payload = {
        attackers: names(document.getElementById('attackers').value),
        defenders: names(document.getElementById('defenders').value),
        battle_type: document.getElementById('battle').value,
        trials: Math.max(1, Math.min(1000000, Number(document.getElementById('trials').value) || 1000)),
      };
      request('/api/montecarlo', {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify(payload),
      });
    });
  </script>
</body>
</html>
"#
    .to_string()
}
