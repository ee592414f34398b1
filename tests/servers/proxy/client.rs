use std::net::SocketAddr;

use reqwest::{Client as ReqwestClient, Response};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

/// A torrent client talking to its trackers through the proxy.
pub struct Client {
    reqwest: ReqwestClient,
}

impl Client {
    pub fn new(proxy: &SocketAddr) -> Self {
        let proxy = reqwest::Proxy::http(format!("http://{proxy}")).expect("it should be a valid proxy url");

        Self {
            reqwest: reqwest::Client::builder()
                .proxy(proxy)
                .build()
                .expect("it should build the http client"),
        }
    }

    pub async fn get(&self, url: &str) -> Response {
        self.reqwest.get(url).send().await.expect("the proxy should answer")
    }

    pub async fn get_with_header(&self, url: &str, key: &'static str, value: &str) -> Response {
        self.reqwest
            .get(url)
            .header(key, value)
            .send()
            .await
            .expect("the proxy should answer")
    }

    pub async fn post(&self, url: &str) -> Response {
        self.reqwest.post(url).send().await.expect("the proxy should answer")
    }
}

/// Sends a `HTTP/1.0` `GET` request to the proxy over a plain TCP stream and
/// returns the whole response as text.
///
/// The request target is written as it is. HTTP client libraries normalize
/// it before sending, so this is the only way to reproduce what some torrent
/// clients put on the wire.
pub async fn raw_get(proxy: &SocketAddr, request_target: &str, host: Option<&str>) -> String {
    let mut stream = TcpStream::connect(proxy).await.expect("it should connect to the proxy");

    let host_header = host.map(|host| format!("Host: {host}\r\n")).unwrap_or_default();

    stream
        .write_all(format!("GET {request_target} HTTP/1.0\r\n{host_header}\r\n").as_bytes())
        .await
        .expect("it should send the request");

    let mut response = Vec::new();
    stream.read_to_end(&mut response).await.expect("the proxy should answer");

    String::from_utf8_lossy(&response).into_owned()
}
