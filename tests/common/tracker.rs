//! A fake tracker that records the requests it receives.
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use parking_lot::Mutex;
use tokio::task::JoinHandle;

/// Body of the successful announce responses.
pub const ANNOUNCE_RESPONSE_BODY: &str = "d8:intervali1800e5:peers0:e";

/// Body of the `404` responses.
pub const NOT_FOUND_RESPONSE_BODY: &str = "d14:failure reason9:not founde";

/// Path that makes the tracker answer after the given delay.
pub const SLOW_PATH: &str = "/slow";
pub const SLOW_RESPONSE_DELAY: Duration = Duration::from_secs(3);

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
}

#[derive(Default)]
struct Recorder {
    requests: Mutex<Vec<RecordedRequest>>,
}

pub struct FakeTracker {
    pub address: SocketAddr,
    recorder: Arc<Recorder>,
    task: JoinHandle<()>,
}

impl FakeTracker {
    pub async fn start() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("it should bind the fake tracker");

        let address = listener.local_addr().expect("it should have a local address");

        let recorder = Arc::new(Recorder::default());

        let app = Router::new().fallback(handle).with_state(recorder.clone());

        let task = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("the fake tracker should keep running");
        });

        Self { address, recorder, task }
    }

    /// The URL of a path of the tracker.
    pub fn url(&self, path_and_query: &str) -> String {
        format!("http://{}{path_and_query}", self.address)
    }

    pub fn received_requests(&self) -> Vec<RecordedRequest> {
        self.recorder.requests.lock().clone()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.received_requests()
            .pop()
            .expect("the tracker should have received a request")
    }
}

impl Drop for FakeTracker {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn handle(State(recorder): State<Arc<Recorder>>, uri: Uri, headers: HeaderMap) -> Response {
    recorder.requests.lock().push(RecordedRequest {
        path: uri.path().to_owned(),
        query: uri.query().map(ToOwned::to_owned),
        headers,
    });

    match uri.path() {
        "/not-found" => (StatusCode::NOT_FOUND, NOT_FOUND_RESPONSE_BODY).into_response(),
        SLOW_PATH => {
            tokio::time::sleep(SLOW_RESPONSE_DELAY).await;
            (StatusCode::OK, ANNOUNCE_RESPONSE_BODY).into_response()
        }
        _ => (
            StatusCode::OK,
            [("content-type", "text/plain"), ("x-tracker", "fake")],
            ANNOUNCE_RESPONSE_BODY,
        )
            .into_response(),
    }
}
