//! In-process HTTP stub used by runner and scenario tests.
use std::future::Future;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;
use tokio::time::Instant;

const HEADER_END: &[u8] = b"\r\n\r\n";
const CHUNKED_END: &[u8] = b"0\r\n\r\n";
const READ_CHUNK: usize = 4096;

pub(crate) fn run_async_test<F>(future: F) -> Result<(), String>
where
    F: Future<Output = Result<(), String>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| format!("Failed to build runtime: {}", err))?;
    runtime.block_on(future)
}

#[derive(Debug, Clone)]
pub(crate) struct StubRequest {
    pub(crate) method: String,
    pub(crate) path: String,
    pub(crate) body_len: usize,
    pub(crate) at: Instant,
}

type Responder = dyn Fn(&str, &str) -> (u16, String) + Send + Sync;

pub(crate) struct StubServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<StubRequest>>>,
    handle: JoinHandle<()>,
}

impl StubServer {
    /// Binds an ephemeral port. `Ok(None)` means the sandbox forbids binding.
    pub(crate) async fn spawn<F>(respond: F) -> Result<Option<Self>, String>
    where
        F: Fn(&str, &str) -> (u16, String) + Send + Sync + 'static,
    {
        let listener = match TcpListener::bind("127.0.0.1:0").await {
            Ok(listener) => listener,
            Err(err) if err.kind() == std::io::ErrorKind::PermissionDenied => return Ok(None),
            Err(err) => return Err(format!("Failed to bind stub server: {}", err)),
        };
        let addr = listener
            .local_addr()
            .map_err(|err| format!("Failed to read stub address: {}", err))?;
        let requests = Arc::new(Mutex::new(Vec::new()));
        let responder: Arc<Responder> = Arc::new(respond);

        let recorded = Arc::clone(&requests);
        let handle = tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let recorded = Arc::clone(&recorded);
                let responder = Arc::clone(&responder);
                tokio::spawn(async move {
                    drop(serve_connection(stream, &recorded, responder.as_ref()).await);
                });
            }
        });

        Ok(Some(Self {
            addr,
            requests,
            handle,
        }))
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub(crate) fn requests(&self) -> Vec<StubRequest> {
        self.requests
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn serve_connection(
    mut stream: TcpStream,
    recorded: &Mutex<Vec<StubRequest>>,
    respond: &Responder,
) -> std::io::Result<()> {
    let Some((method, path, body_len)) = read_request(&mut stream).await? else {
        return Ok(());
    };
    if let Ok(mut guard) = recorded.lock() {
        guard.push(StubRequest {
            method: method.clone(),
            path: path.clone(),
            body_len,
            at: Instant::now(),
        });
    }
    let (status, body) = respond(&method, &path);
    let response = format!(
        "HTTP/1.1 {} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );
    stream.write_all(response.as_bytes()).await?;
    stream.shutdown().await
}

async fn read_request(stream: &mut TcpStream) -> std::io::Result<Option<(String, String, usize)>> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; READ_CHUNK];
    let header_end = loop {
        if let Some(pos) = find(&buf, HEADER_END) {
            break pos.saturating_add(HEADER_END.len());
        }
        let read = stream.read(&mut chunk).await?;
        if read == 0 {
            return Ok(None);
        }
        buf.extend_from_slice(chunk.get(..read).unwrap_or_default());
    };

    let head = String::from_utf8_lossy(buf.get(..header_end).unwrap_or_default()).into_owned();
    let mut lines = head.lines();
    let mut request_line = lines.next().unwrap_or_default().split_whitespace();
    let method = request_line.next().unwrap_or_default().to_owned();
    let path = request_line.next().unwrap_or_default().to_owned();

    let mut content_length = 0usize;
    let mut chunked = false;
    for line in lines {
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        let name = name.trim().to_ascii_lowercase();
        if name == "content-length" {
            content_length = value.trim().parse().unwrap_or(0);
        } else if name == "transfer-encoding" && value.to_ascii_lowercase().contains("chunked") {
            chunked = true;
        }
    }

    loop {
        let body = buf.get(header_end..).unwrap_or_default();
        let complete = if chunked {
            body.ends_with(CHUNKED_END)
        } else {
            body.len() >= content_length
        };
        if complete {
            return Ok(Some((method, path, body.len())));
        }
        let read = stream.read(&mut chunk).await?;
        if read == 0 {
            return Ok(Some((method, path, body.len())));
        }
        buf.extend_from_slice(chunk.get(..read).unwrap_or_default());
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
