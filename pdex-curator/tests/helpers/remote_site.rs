//! Local HTTP site for fetch tests
//!
//! Serves a fixed path → resource table on 127.0.0.1 and records every
//! requested path so tests can assert what was (not) downloaded.

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Clone)]
pub enum Resource {
    Html(String),
    Image(Vec<u8>),
    Status(StatusCode),
    /// Responds with the bytes after a delay
    Slow(Duration, Vec<u8>),
}

struct Site {
    resources: HashMap<String, Resource>,
    hits: Mutex<Vec<String>>,
}

pub struct RemoteSite {
    pub base_url: String,
    site: Arc<Site>,
}

impl RemoteSite {
    /// Bind an ephemeral port and serve `resources` (keys are request paths)
    pub async fn start(resources: Vec<(&str, Resource)>) -> Self {
        let site = Arc::new(Site {
            resources: resources
                .into_iter()
                .map(|(path, r)| (path.to_string(), r))
                .collect(),
            hits: Mutex::new(Vec::new()),
        });

        let app = Router::new().fallback(serve).with_state(site.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            site,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Paths requested so far, in order
    pub fn hits(&self) -> Vec<String> {
        self.site.hits.lock().unwrap().clone()
    }
}

async fn serve(State(site): State<Arc<Site>>, uri: Uri) -> Response {
    let path = uri.path().to_string();
    site.hits.lock().unwrap().push(path.clone());

    match site.resources.get(&path).cloned() {
        Some(Resource::Html(html)) => {
            ([(header::CONTENT_TYPE, "text/html; charset=utf-8")], html).into_response()
        }
        Some(Resource::Image(bytes)) => {
            ([(header::CONTENT_TYPE, "application/octet-stream")], Body::from(bytes)).into_response()
        }
        Some(Resource::Status(status)) => status.into_response(),
        Some(Resource::Slow(delay, bytes)) => {
            tokio::time::sleep(delay).await;
            Body::from(bytes).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
