//! A canned-response HTTP server that records what it was sent.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use http::{HeaderMap, Method, StatusCode, Uri};
use http_body_util::{BodyExt as _, Full};
use hyper::body::{Bytes, Incoming};
use tokio::{net::TcpListener, sync::oneshot};

#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl CapturedRequest {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("request body is JSON")
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(|it| it.to_str().expect("ascii header"))
    }
}

#[derive(Clone, Copy)]
struct Reply {
    status: StatusCode,
    body: &'static str,
    delay: Duration,
}

pub struct MockServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
    shutdown: Option<oneshot::Sender<()>>,
}

impl MockServer {
    pub fn start(status: u16, body: &'static str) -> Self {
        Self::start_delayed(status, body, Duration::ZERO)
    }

    /// Wait `delay` before answering each request.
    pub fn start_delayed(status: u16, body: &'static str, delay: Duration) -> Self {
        let reply = Reply {
            status: StatusCode::from_u16(status).expect("valid status"),
            body,
            delay,
        };
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind mock server");
        listener.set_nonblocking(true).expect("nonblocking listener");
        let addr = listener.local_addr().expect("local addr");
        let requests = Arc::<Mutex<Vec<CapturedRequest>>>::default();
        let (shutdown, rx) = oneshot::channel();

        let captured = Arc::clone(&requests);
        thread::spawn(move || {
            tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("mock server runtime")
                .block_on(serve(listener, reply, captured, rx))
        });

        Self {
            addr,
            requests,
            shutdown: Some(shutdown),
        }
    }

    /// `host:port`, without a scheme.
    pub fn host(&self) -> String {
        self.addr.to_string()
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().expect("poisoned").clone()
    }

    pub fn single_request(&self) -> CapturedRequest {
        let mut requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests.remove(0)
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
    }
}

async fn serve(
    listener: std::net::TcpListener,
    reply: Reply,
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
    mut shutdown: oneshot::Receiver<()>,
) {
    let listener = TcpListener::from_std(listener).expect("tokio listener");
    let server = hyper_util::server::conn::auto::Builder::new(hyper_util::rt::TokioExecutor::new());

    loop {
        tokio::select! {
            conn = listener.accept() => {
                let Ok((stream, _)) = conn else { continue };
                let captured = Arc::clone(&captured);
                let conn = server
                    .serve_connection_with_upgrades(
                        hyper_util::rt::TokioIo::new(stream),
                        hyper::service::service_fn(move |it| respond(it, reply, Arc::clone(&captured))),
                    )
                    .into_owned();
                tokio::spawn(async move {
                    let _ = conn.await;
                });
            },
            _ = &mut shutdown => break,
        }
    }
}

async fn respond(
    request: http::Request<Incoming>,
    reply: Reply,
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
) -> Result<http::Response<Full<Bytes>>, hyper::Error> {
    let (parts, body) = request.into_parts();
    let body = body.collect().await?.to_bytes();
    captured.lock().expect("poisoned").push(CapturedRequest {
        method: parts.method,
        uri: parts.uri,
        headers: parts.headers,
        body,
    });

    tokio::time::sleep(reply.delay).await;

    let mut response = http::Response::new(Full::new(Bytes::from_static(reply.body.as_bytes())));
    *response.status_mut() = reply.status;
    Ok(response)
}
