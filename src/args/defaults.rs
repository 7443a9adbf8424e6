use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = concat!("ocrbench/", env!("CARGO_PKG_VERSION"));

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_UPLOAD_URL: &str = "http://localhost:8080/upload";
pub const DEFAULT_TRANSLATE_URL: &str = "http://localhost:8080/api/v1/app/translate";

pub const DEFAULT_SAMPLE_FILE: &str = "../data/sample.png";
pub const DEFAULT_SAMPLES_DIR: &str = "./images";
pub const DEFAULT_FORM_FIELD: &str = "file";
pub const DEFAULT_POLL_FORM: &str = "name=John Doe";
pub const DEFAULT_EXPECTED_STATUS: u16 = 200;

pub const DEFAULT_UPLOAD_VUS: usize = 1;
pub const DEFAULT_TRANSLATE_VUS: usize = 5;

pub const DEFAULT_DURATION: Duration = Duration::from_secs(30);
pub const DEFAULT_GRACEFUL_STOP: Duration = Duration::from_secs(30);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
pub const DEFAULT_THINK_TIME: Duration = Duration::from_secs(1);
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);
pub const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_secs(300);
pub const DEFAULT_WAIT_MIN: Duration = Duration::from_secs(1);
pub const DEFAULT_WAIT_MAX: Duration = Duration::from_secs(5);
