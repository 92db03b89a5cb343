use crate::classifier::ClassifierError;
use crate::server::api::{self, ApiError};
use crate::server::AppState;
use crate::session::flow::FlowError;
use crate::session::photos::PhotoError;

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

    fn json_ok(body: String) -> Self {
        Self {
            status_code: 200,
            status_text: "OK",
            content_type: "application/json",
            body,
        }
    }
}

pub async fn route_request(state: &AppState, method: &str, path: &str, body: &str) -> HttpResponse {
    let path = path.split('?').next().unwrap_or(path);
    let result = match (method, path) {
        ("GET", "/") => {
            return HttpResponse {
                status_code: 200,
                status_text: "OK",
                content_type: "text/html; charset=utf-8",
                body: index_html(),
            }
        }
        ("GET", "/api/health") => api::health_payload(state),
        ("GET", "/api/catalog") => api::catalog_payload(),
        ("GET", "/api/session") => api::session_payload(state),
        ("POST", "/api/session/reset") => api::session_reset_payload(state),
        ("GET", "/api/profile") => api::profile_get_payload(state),
        ("PUT", "/api/profile") => api::profile_put_payload(state, body),
        ("PUT", "/api/photos") => api::photos_put_payload(state, body),
        ("DELETE", path) if path.starts_with("/api/photos/") => {
            api::photo_delete_payload(state, &path["/api/photos/".len()..])
        }
        ("POST", "/api/analysis") => api::analysis_post_payload(state).await,
        ("GET", "/api/results") => api::results_payload(state),
        ("POST", "/api/estimate") => api::estimate_payload(body),
        ("GET", "/api/assessments") => api::assessments_get_payload(state),
        ("POST", "/api/assessments") => api::assessments_post_payload(state, body),
        ("GET", "/api/education") => api::education_payload(),
        ("GET", path) if path.starts_with("/api/education/") => {
            api::education_topic_payload(&path["/api/education/".len()..])
        }
        _ => return error_response(404, "Not Found", "Route not found"),
    };

    match result {
        Ok(payload) => HttpResponse::json_ok(payload),
        Err(err) => api_error_response(err),
    }
}

pub fn payload_too_large() -> HttpResponse {
    error_response(413, "Payload Too Large", "Request body exceeds 32 MiB")
}

pub fn request_timeout() -> HttpResponse {
    error_response(408, "Request Timeout", "Request was not received in time")
}

fn api_error_response(err: ApiError) -> HttpResponse {
    let message = err.to_string();
    match err {
        ApiError::Parse(_) => error_response(400, "Bad Request", &message),
        ApiError::Validation(validation) => {
            validation_error_response(400, "Bad Request", validation)
        }
        ApiError::NotFound(_) => error_response(404, "Not Found", &message),
        ApiError::Internal(_) => error_response(500, "Internal Server Error", &message),
        ApiError::Flow(flow) => {
            let (status_code, status_text) = flow_status(&flow);
            error_response(status_code, status_text, &message)
        }
    }
}

fn flow_status(err: &FlowError) -> (u16, &'static str) {
    match err {
        FlowError::Profile(_)
        | FlowError::NoPhotos
        | FlowError::Classifier(ClassifierError::NoPhotos) => (400, "Bad Request"),
        FlowError::Photo(PhotoError::NotFound(_)) | FlowError::NoAnalysis => (404, "Not Found"),
        FlowError::Photo(_) => (400, "Bad Request"),
        FlowError::OutOfOrder { .. } | FlowError::StaleAnalysis | FlowError::Cancelled => {
            (409, "Conflict")
        }
        FlowError::Classifier(ClassifierError::Backend(_)) => (502, "Bad Gateway"),
        FlowError::Store(_) => (500, "Internal Server Error"),
    }
}

fn validation_error_response(
    status_code: u16,
    status_text: &'static str,
    payload: api::ValidationErrorResponse,
) -> HttpResponse {
    let fallback =
        "{\n  \"status\": \"error\",\n  \"message\": \"Validation failed\"\n}".to_string();

    HttpResponse {
        status_code,
        status_text,
        content_type: "application/json",
        body: serde_json::to_string_pretty(&payload).unwrap_or(fallback),
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
  <title>Damage Aid</title>
  <style>
    body { font-family: Arial, sans-serif; max-width: 900px; margin: 24px auto; padding: 0 12px; }
    h1 { margin-bottom: 8px; }
    .card { border: 1px solid #ddd; border-radius: 8px; padding: 14px; margin: 14px 0; }
    label { display:block; margin: 8px 0 4px; font-weight: 600; }
    input, select { width: 100%; padding: 8px; box-sizing: border-box; }
    button { margin-top: 12px; padding: 8px 14px; }
    pre { background: #111; color: #aef2ae; padding: 12px; overflow: auto; border-radius: 6px; min-height: 180px; }
  </style>
</head>
<body>
  <h1>Damage Aid</h1>
  <p>Profile, photos, analysis, results. Each step unlocks the next.</p>

  <div class="card">
    <strong>1. Profile</strong>
    <label for="name">Full name</label>
    <input id="name" />
    <label for="address">Property address</label>
    <input id="address" />
    <label for="budget">Budget</label>
    <select id="budget">
      <option>$0 - $5,000</option>
      <option>$5,000 - $10,000</option>
      <option>$10,000 - $50,000</option>
      <option>$50,000+</option>
    </select>
    <label><input id="consent" type="checkbox" style="width:auto" /> I agree to the terms and conditions</label>
    <div><button id="profile-btn">Save profile</button></div>
  </div>

  <div class="card">
    <strong>2. Photos</strong>
    <input id="photos" type="file" accept="image/*" multiple />
    <div><button id="photos-btn">Upload photos</button></div>
  </div>

  <div class="card">
    <strong>3. Analysis</strong>
    <div><button id="analyze-btn">Analyze damage</button></div>
  </div>

  <div class="card">
    <strong>4. Results</strong>
    <div>
      <button id="results-btn">View results</button>
      <button id="session-btn">Session</button>
      <button id="reset-btn">Start over</button>
    </div>
  </div>

  <pre id="output">Ready.</pre>

  <script>
    const output = document.getElementById('output');

    async function request(path, options) {
      output.textContent = 'Loading…';
      const response = await fetch(path, options);
      const text = await response.text();
      output.textContent = 'HTTP ' + response.status + '\n' + text;
    }

    function readAsDataUri(file) {
      return new Promise((resolve, reject) => {
        const reader = new FileReader();
        reader.onload = () => resolve(reader.result);
        reader.onerror = () => reject(reader.error);
        reader.readAsDataURL(file);
      });
    }

    document.getElementById('profile-btn').addEventListener('click', () => {
      const payload = {
        name: document.getElementById('name').value,
        address: document.getElementById('address').value,
        budget: document.getElementById('budget').value,
        consent: document.getElementById('consent').checked,
      };
      request('/api/profile', {
        method: 'PUT',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify(payload),
      });
    });

    document.getElementById('photos-btn').addEventListener('click', async () => {
      const files = Array.from(document.getElementById('photos').files);
      const photos = await Promise.all(files.map(async (file, index) => ({
        index,
        data_uri: await readAsDataUri(file),
      })));
      request('/api/photos', {
        method: 'PUT',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify({ photos }),
      });
    });

    document.getElementById('analyze-btn').addEventListener('click', () => {
      request('/api/analysis', { method: 'POST' });
    });
    document.getElementById('results-btn').addEventListener('click', () => {
      request('/api/results', { method: 'GET' });
    });
    document.getElementById('session-btn').addEventListener('click', () => {
      request('/api/session', { method: 'GET' });
    });
    document.getElementById('reset-btn').addEventListener('click', () => {
      request('/api/session/reset', { method: 'POST' });
    });
  </script>
</body>
</html>
"#
    .to_string()
}
