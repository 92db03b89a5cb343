use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, info, warn};

use crate::classifier::{DamageClassifier, SimulatedClassifier};
use crate::config::AppConfig;
use crate::engine::assessment::AssessmentLog;
use crate::session::flow::{FlowError, Wizard};
use crate::session::store::{JsonFileStore, MemoryStore};

pub mod api;
pub mod routes;

pub const MAX_BODY_BYTES: usize = 32 * 1024 * 1024;
const MAX_HEADER_BYTES: usize = 16_384;
/// How long a client gets to deliver a complete request.
pub const REQUEST_READ_TIMEOUT: Duration = Duration::from_secs(30);

/// Everything a request handler can touch. One wizard per server: the app is
/// a single-user local tool.
pub struct AppState {
    pub wizard: Mutex<Wizard>,
    pub assessments: Mutex<AssessmentLog>,
    pub classifier: Arc<dyn DamageClassifier>,
    pub analysis_delay: Duration,
}

impl AppState {
    pub fn new(
        wizard: Wizard,
        classifier: Arc<dyn DamageClassifier>,
        analysis_delay: Duration,
    ) -> Self {
        Self {
            wizard: Mutex::new(wizard),
            assessments: Mutex::new(AssessmentLog::default()),
            classifier,
            analysis_delay,
        }
    }

    pub fn in_memory(classifier: Arc<dyn DamageClassifier>, analysis_delay: Duration) -> Self {
        Self::new(
            Wizard::new(Box::new(MemoryStore::new())),
            classifier,
            analysis_delay,
        )
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, FlowError> {
        let wizard = match &config.state_path {
            Some(path) => {
                let store = JsonFileStore::open(path)?;
                info!(path = %path.display(), "restoring session from file");
                Wizard::restore(Box::new(store))?
            }
            None => Wizard::new(Box::new(MemoryStore::new())),
        };
        let classifier: Arc<dyn DamageClassifier> = match config.classifier_seed {
            Some(seed) => Arc::new(SimulatedClassifier::seeded(seed)),
            None => Arc::new(SimulatedClassifier::from_entropy()),
        };
        Ok(Self::new(wizard, classifier, config.analysis_delay))
    }

    pub fn wizard(&self) -> MutexGuard<'_, Wizard> {
        self.wizard.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn assessments(&self) -> MutexGuard<'_, AssessmentLog> {
        self.assessments.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

pub async fn run_server(config: AppConfig) -> std::io::Result<()> {
    let state = AppState::from_config(&config)
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err.to_string()))?;
    serve(TcpListener::bind(&config.bind_addr).await?, Arc::new(state)).await
}

/// Accept loop. Each connection gets its own task so a request waiting on the
/// classifier never blocks a re-upload or reset.
pub async fn serve(listener: TcpListener, state: Arc<AppState>) -> std::io::Result<()> {
    info!(addr = %listener.local_addr()?, "damage-aid server listening");
    loop {
        let (mut stream, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(err) => {
                warn!(error = %err, "connection failed");
                continue;
            }
        };
        let state = Arc::clone(&state);
        tokio::spawn(async move {
            if let Err(err) = handle_connection(&mut stream, &state, REQUEST_READ_TIMEOUT).await {
                warn!(%peer, error = %err, "request error");
            }
        });
    }
}

struct RawRequest {
    method: String,
    path: String,
    body: String,
}

enum ReadOutcome {
    Request(RawRequest),
    TooLarge,
    TimedOut,
    Closed,
}

async fn handle_connection(
    stream: &mut TcpStream,
    state: &AppState,
    read_timeout: Duration,
) -> std::io::Result<()> {
    let outcome = match tokio::time::timeout(read_timeout, read_request(stream)).await {
        Ok(outcome) => outcome?,
        Err(_) => {
            debug!(timeout_ms = read_timeout.as_millis() as u64, "request read timed out");
            ReadOutcome::TimedOut
        }
    };
    let response = match outcome {
        ReadOutcome::Closed => return Ok(()),
        ReadOutcome::TimedOut => routes::request_timeout(),
        ReadOutcome::TooLarge => routes::payload_too_large(),
        ReadOutcome::Request(request) => {
            debug!(method = %request.method, path = %request.path, "request");
            routes::route_request(state, &request.method, &request.path, &request.body).await
        }
    };
    stream.write_all(response.to_http_string().as_bytes()).await?;
    stream.flush().await?;
    Ok(())
}

async fn read_request(stream: &mut TcpStream) -> std::io::Result<ReadOutcome> {
    let mut buffer = Vec::with_capacity(4096);
    let mut chunk = [0_u8; 8192];

    let header_end = loop {
        if let Some(end) = find_header_end(&buffer) {
            break end;
        }
        if buffer.len() > MAX_HEADER_BYTES {
            return Ok(ReadOutcome::TooLarge);
        }
        let read = stream.read(&mut chunk).await?;
        if read == 0 {
            if buffer.is_empty() {
                return Ok(ReadOutcome::Closed);
            }
            break buffer.len();
        }
        buffer.extend_from_slice(&chunk[..read]);
    };

    let head = String::from_utf8_lossy(&buffer[..header_end]).into_owned();
    let mut lines = head.lines();
    let request_line = lines.next().unwrap_or_default();
    let mut request_parts = request_line.split_whitespace();
    let method = request_parts.next().unwrap_or("GET").to_string();
    let path = request_parts.next().unwrap_or("/").to_string();

    let content_length = lines
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);
    if content_length > MAX_BODY_BYTES {
        return Ok(ReadOutcome::TooLarge);
    }

    let body_start = (header_end + 4).min(buffer.len());
    let mut body = buffer[body_start..].to_vec();
    while body.len() < content_length {
        let read = stream.read(&mut chunk).await?;
        if read == 0 {
            break;
        }
        body.extend_from_slice(&chunk[..read]);
    }
    body.truncate(content_length);

    Ok(ReadOutcome::Request(RawRequest {
        method,
        path,
        body: String::from_utf8_lossy(&body).into_owned(),
    }))
}

fn find_header_end(buffer: &[u8]) -> Option<usize> {
    buffer.windows(4).position(|window| window == b"\r\n\r\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_end_is_found_after_blank_line() {
        assert_eq!(find_header_end(b"GET / HTTP/1.1\r\nHost: x\r\n\r\nbody"), Some(23));
        assert_eq!(find_header_end(b"GET / HTTP/1.1\r\n"), None);
    }

    #[tokio::test]
    async fn serves_health_over_tcp() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let state = Arc::new(AppState::in_memory(
            Arc::new(SimulatedClassifier::seeded(7)),
            Duration::ZERO,
        ));
        tokio::spawn(serve(listener, state));

        let mut client = TcpStream::connect(addr).await.unwrap();
        client
            .write_all(b"GET /api/health HTTP/1.1\r\nHost: localhost\r\n\r\n")
            .await
            .unwrap();
        let mut response = String::new();
        client.read_to_string(&mut response).await.unwrap();
        assert!(response.starts_with("HTTP/1.1 200 OK"));
        assert!(response.contains("\"status\": \"ok\""));
    }

    #[tokio::test]
    async fn silent_client_gets_request_timeout() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let state = AppState::in_memory(Arc::new(SimulatedClassifier::seeded(7)), Duration::ZERO);

        let mut client = TcpStream::connect(addr).await.unwrap();
        let (mut server_side, _) = listener.accept().await.unwrap();
        handle_connection(&mut server_side, &state, Duration::from_millis(50))
            .await
            .unwrap();
        drop(server_side);

        let mut response = String::new();
        client.read_to_string(&mut response).await.unwrap();
        assert!(response.starts_with("HTTP/1.1 408 Request Timeout"));
    }

    #[tokio::test]
    async fn body_is_read_up_to_content_length() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let state = Arc::new(AppState::in_memory(
            Arc::new(SimulatedClassifier::seeded(7)),
            Duration::ZERO,
        ));
        tokio::spawn(serve(listener, state));

        let body = r#"{"damage_type":"Roof Damage","severity":"Moderate"}"#;
        let request = format!(
            "POST /api/estimate HTTP/1.1\r\nHost: localhost\r\nContent-Length: {}\r\n\r\n",
            body.len()
        );
        let mut client = TcpStream::connect(addr).await.unwrap();
        client.write_all(request.as_bytes()).await.unwrap();
        // Body in a separate write so it lands in a later read.
        client.write_all(body.as_bytes()).await.unwrap();
        let mut response = String::new();
        client.read_to_string(&mut response).await.unwrap();
        assert!(response.starts_with("HTTP/1.1 200 OK"));
        assert!(response.contains("\"estimated_cost\": 12000"));
    }
}
