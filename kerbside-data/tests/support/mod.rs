//! Mock upstream servers for the HTTP gateway tests.
//!
//! The gateways block on their own runtime when called outside Tokio, so the
//! mock server is driven by a separate runtime owned by [`MockUpstream`] and
//! the gateways are called from the plain test thread.

#![allow(dead_code, reason = "each test crate uses a subset of the helpers")]

use std::net::TcpListener;

use tokio::runtime::Runtime;
use wiremock::{Mock, MockServer, Request};

/// A running mock server and the runtime driving its setup.
pub struct MockUpstream {
    server: MockServer,
    runtime: Runtime,
}

impl MockUpstream {
    /// Start a fresh mock server.
    pub fn start() -> Self {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => panic!("failed to build test runtime: {err}"),
        };
        let server = runtime.block_on(MockServer::start());
        Self { server, runtime }
    }

    /// Register `mock` on the server.
    pub fn mount(&self, mock: Mock) {
        self.runtime.block_on(mock.mount(&self.server));
    }

    /// Base URI of the server.
    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// Requests received so far.
    pub fn received_requests(&self) -> Vec<Request> {
        self.runtime
            .block_on(self.server.received_requests())
            .unwrap_or_default()
    }
}

/// Base URL of a local port nothing listens on.
pub fn refused_base_url() -> String {
    let listener = match TcpListener::bind("127.0.0.1:0") {
        Ok(listener) => listener,
        Err(err) => panic!("failed to bind probe listener: {err}"),
    };
    let port = match listener.local_addr() {
        Ok(addr) => addr.port(),
        Err(err) => panic!("failed to read probe address: {err}"),
    };
    drop(listener);
    format!("http://127.0.0.1:{port}")
}
