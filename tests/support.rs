use std::ffi::OsStr;
use std::io::{Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::process::{Command, Output};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

const HEADER_END: &[u8] = b"\r\n\r\n";

pub struct ServerHandle {
    shutdown: mpsc::Sender<()>,
    thread: Option<thread::JoinHandle<()>>,
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        let _send_result = self.shutdown.send(());
        if let Some(handle) = self.thread.take() {
            drop(handle.join());
        }
    }
}

/// Spawn a lightweight HTTP server answering every request with `status`.
///
/// # Errors
///
/// Returns an error if the listener cannot be created or configured.
pub fn spawn_http_server(status: u16) -> Result<(String, ServerHandle), String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("bind test server failed: {}", err))?;
    let addr = listener
        .local_addr()
        .map_err(|err| format!("server addr failed: {}", err))?;
    listener
        .set_nonblocking(true)
        .map_err(|err| format!("set_nonblocking failed: {}", err))?;

    let (shutdown_tx, shutdown_rx) = mpsc::channel();

    let handle = thread::spawn(move || {
        loop {
            if shutdown_rx.try_recv().is_ok() {
                break;
            }

            match listener.accept() {
                Ok((stream, _)) => {
                    thread::spawn(move || handle_client(stream, status));
                }
                Err(err) if err.kind() == std::io::ErrorKind::WouldBlock => {
                    thread::sleep(Duration::from_millis(10));
                }
                Err(_) => break,
            }
        }
    });

    Ok((
        format!("http://{}", addr),
        ServerHandle {
            shutdown: shutdown_tx,
            thread: Some(handle),
        },
    ))
}

/// Like [`spawn_http_server`], but skips when the sandbox forbids binding.
///
/// # Errors
///
/// Returns an error for any other bind failure.
pub fn spawn_http_server_or_skip(status: u16) -> Result<Option<(String, ServerHandle)>, String> {
    match spawn_http_server(status) {
        Ok(result) => Ok(Some(result)),
        Err(err) if err.contains("Operation not permitted") || err.contains("Permission denied") => {
            eprintln!("Skipping e2e test: {}", err);
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

fn handle_client(mut stream: TcpStream, status: u16) {
    if stream.set_nonblocking(false).is_err() {
        return;
    }
    if read_request(&mut stream).is_err() {
        return;
    }
    let response = format!(
        "HTTP/1.1 {} Stub\r\nContent-Length: 2\r\nConnection: close\r\n\r\nOK",
        status
    );
    if stream.write_all(response.as_bytes()).is_err() {
        return;
    }
    if stream.flush().is_err() {
        return;
    }
    drop(stream.shutdown(Shutdown::Both));
}

fn read_request(stream: &mut TcpStream) -> std::io::Result<()> {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let read = stream.read(&mut chunk)?;
        if read == 0 {
            return Ok(());
        }
        buffer.extend_from_slice(chunk.get(..read).unwrap_or_default());
        let Some(pos) = buffer
            .windows(HEADER_END.len())
            .position(|window| window == HEADER_END)
        else {
            continue;
        };
        let header_end = pos.saturating_add(HEADER_END.len());
        let head = String::from_utf8_lossy(buffer.get(..header_end).unwrap_or_default());
        let content_length = head
            .lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
            .and_then(|(_, value)| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        let chunked = head.to_ascii_lowercase().contains("transfer-encoding: chunked");
        if chunked {
            if buffer.ends_with(b"0\r\n\r\n") {
                return Ok(());
            }
            continue;
        }
        if buffer.len().saturating_sub(header_end) >= content_length {
            return Ok(());
        }
    }
}

/// Run the `ocrbench` binary and capture output.
///
/// # Errors
///
/// Returns an error if the binary cannot be executed.
pub fn run_ocrbench<I, S>(args: I) -> Result<Output, String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let bin = ocrbench_bin()?;
    Command::new(bin)
        .args(args)
        .env("OCRBENCH_LOG", "error")
        .env_remove("OCRBENCH_VUS")
        .env_remove("OCRBENCH_DURATION")
        .env_remove("OCRBENCH_CONFIG")
        .output()
        .map_err(|err| format!("run ocrbench failed: {}", err))
}

fn ocrbench_bin() -> Result<String, String> {
    option_env!("CARGO_BIN_EXE_ocrbench").map_or_else(
        || Err("CARGO_BIN_EXE_ocrbench missing at compile time.".to_owned()),
        |path| Ok(path.to_owned()),
    )
}

#[must_use]
pub fn describe(output: &Output) -> String {
    format!(
        "status: {:?}\nstdout: {}\nstderr: {}",
        output.status.code(),
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    )
}
