//! Minimal HTTP/1.1 server for segment download tests.
//!
//! Serves per-path routes (fixed body, body after N empty responses, or a bare
//! status code), counts hits per path, and tracks the peak number of requests
//! being handled at once.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum Route {
    Body(Vec<u8>),
    /// Empty 200 responses for the first N requests, then the body.
    EmptyFirst(u32, Vec<u8>),
    /// Always this status with an empty body.
    Status(u16),
}

#[derive(Default)]
struct State {
    routes: HashMap<String, Route>,
    hits: Mutex<HashMap<String, u32>>,
    targets: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    delay: Duration,
}

pub struct SegmentServer {
    /// Base URL ending in `/`, e.g. `http://127.0.0.1:12345/`.
    pub base_url: String,
    state: Arc<State>,
}

impl SegmentServer {
    /// Starts a server in a background thread. It runs until the process exits.
    pub fn start(routes: Vec<(&str, Route)>, delay: Duration) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().unwrap().port();
        let state = Arc::new(State {
            routes: routes
                .into_iter()
                .map(|(p, r)| (p.to_string(), r))
                .collect(),
            delay,
            ..State::default()
        });
        let server_state = Arc::clone(&state);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let state = Arc::clone(&server_state);
                thread::spawn(move || handle(stream, &state));
            }
        });
        Self {
            base_url: format!("http://127.0.0.1:{}/", port),
            state,
        }
    }

    pub fn hits(&self, path: &str) -> u32 {
        self.state.hits.lock().unwrap().get(path).copied().unwrap_or(0)
    }

    pub fn total_hits(&self) -> u32 {
        self.state.hits.lock().unwrap().values().sum()
    }

    /// Request targets (path + query) in arrival order.
    pub fn targets(&self) -> Vec<String> {
        self.state.targets.lock().unwrap().clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.state.max_in_flight.load(Ordering::SeqCst)
    }
}

fn handle(mut stream: TcpStream, state: &State) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let request = String::from_utf8_lossy(&buf[..n]);
    let target = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();
    let path = target.split('?').next().unwrap_or("/").to_string();

    let now = state.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
    state.max_in_flight.fetch_max(now, Ordering::SeqCst);
    thread::sleep(state.delay);

    let hit = {
        let mut hits = state.hits.lock().unwrap();
        let h = hits.entry(path.clone()).or_insert(0);
        *h += 1;
        *h
    };
    state.targets.lock().unwrap().push(target);

    let empty: &[u8] = &[];
    let (status, body) = match state.routes.get(&path) {
        Some(Route::Body(b)) => (200, b.as_slice()),
        Some(Route::EmptyFirst(n, b)) => (200, if hit <= *n { empty } else { b.as_slice() }),
        Some(Route::Status(code)) => (*code, empty),
        None => (404, empty),
    };
    // Leave the in-flight window before the client can see the response.
    state.in_flight.fetch_sub(1, Ordering::SeqCst);
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        reason(status),
        body.len()
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.write_all(body);
    let _ = stream.flush();
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}
