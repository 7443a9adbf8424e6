use super::*;
use crate::args::FormField;
use crate::checks::CheckResult;
use crate::http::{ClientOptions, build_client};
use crate::test_support::{StubServer, run_async_test};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::{TempDir, tempdir};

const POLL_INTERVAL: Duration = Duration::from_millis(20);

struct Iteration {
    checks: Vec<CheckResult>,
    metrics: Vec<Metrics>,
}

fn samples() -> Result<(TempDir, PathBuf), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("M-page.png");
    std::fs::write(&path, b"png").map_err(|err| format!("write failed: {}", err))?;
    Ok((dir, path))
}

fn upload_poll(base_url: String, file: PathBuf, poll_timeout: Duration) -> UploadPollSettings {
    UploadPollSettings {
        base_url,
        samples: SampleSource::Files(vec![file]),
        field: "file".to_owned(),
        form: vec![FormField {
            name: "name".to_owned(),
            value: "John Doe".to_owned(),
        }],
        poll_interval: POLL_INTERVAL,
        poll_timeout,
        wait_min: Duration::from_millis(1),
        wait_max: Duration::from_millis(2),
    }
}

async fn run_once(scenario: &dyn Scenario) -> Result<Iteration, String> {
    let client = build_client(ClientOptions {
        request_timeout: Duration::from_secs(2),
    })
    .map_err(|err| err.to_string())?;
    let checks = CheckRegistry::new(scenario.check_names());
    let (metrics_tx, mut metrics_rx) = mpsc::channel::<Metrics>(64);
    let ctx = IterationContext {
        client: &client,
        checks: &checks,
        metrics_tx: &metrics_tx,
    };
    scenario.iteration(&ctx).await;
    drop(metrics_tx);

    let mut metrics = Vec::new();
    while let Some(metric) = metrics_rx.recv().await {
        metrics.push(metric);
    }
    Ok(Iteration {
        checks: checks.snapshot(),
        metrics,
    })
}

fn check(iteration: &Iteration, name: &str) -> Result<(u64, u64), String> {
    iteration
        .checks
        .iter()
        .find(|check| check.name == name)
        .map(|check| (check.passes, check.fails))
        .ok_or_else(|| format!("Missing check '{}'", name))
}

fn metric_names(iteration: &Iteration) -> Vec<&'static str> {
    iteration.metrics.iter().map(|metric| metric.name).collect()
}

#[test]
fn upload_poll_completes_job() -> Result<(), String> {
    run_async_test(async {
        let polls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&polls);
        let Some(server) = StubServer::spawn(move |method, path| match (method, path) {
            ("POST", "/upload") => (200, r#"{"jobID": "job-1"}"#.to_owned()),
            ("GET", "/status/job-1") => {
                if seen.fetch_add(1, Ordering::SeqCst) == 0 {
                    (200, r#"{"status": "processing"}"#.to_owned())
                } else {
                    (200, r#"{"status": "completed"}"#.to_owned())
                }
            }
            _ => (404, String::new()),
        })
        .await?
        else {
            return Ok(());
        };
        let (_dir, file) = samples()?;
        let scenario = UploadPollScenario::new(upload_poll(
            server.url(""),
            file,
            Duration::from_secs(5),
        ))
        .map_err(|err| err.to_string())?;

        let iteration = run_once(&scenario).await?;
        for name in ["upload status is 200", "response has jobID", "job completed"] {
            if check(&iteration, name)? != (1, 0) {
                return Err(format!("Expected '{}' to pass once", name));
            }
        }
        let names = metric_names(&iteration);
        if names != ["upload", "status", "status", COMPLETE_TASK_METRIC] {
            return Err(format!("Unexpected metrics: {:?}", names));
        }
        let upload_body = server
            .requests()
            .first()
            .map(|request| request.body_len)
            .unwrap_or_default();
        if upload_body == 0 {
            return Err("Expected a multipart upload body".to_owned());
        }
        Ok(())
    })
}

#[test]
fn upload_poll_escapes_job_id_in_status_path() -> Result<(), String> {
    run_async_test(async {
        let Some(server) = StubServer::spawn(|method, path| match (method, path) {
            ("POST", "/upload") => (200, r#"{"jobID": "a/b?c#d"}"#.to_owned()),
            ("GET", "/status/a%2Fb%3Fc%23d") => (200, r#"{"status": "completed"}"#.to_owned()),
            _ => (404, String::new()),
        })
        .await?
        else {
            return Ok(());
        };
        let (_dir, file) = samples()?;
        let scenario = UploadPollScenario::new(upload_poll(
            server.url(""),
            file,
            Duration::from_secs(1),
        ))
        .map_err(|err| err.to_string())?;

        let iteration = run_once(&scenario).await?;
        if check(&iteration, "job completed")? != (1, 0) {
            return Err(format!("Unexpected requests: {:?}", server.requests()));
        }
        let polled: Vec<String> = server
            .requests()
            .into_iter()
            .filter(|request| request.method == "GET")
            .map(|request| request.path)
            .collect();
        if polled != ["/status/a%2Fb%3Fc%23d"] {
            return Err(format!("Unexpected status paths: {:?}", polled));
        }
        Ok(())
    })
}

#[test]
fn upload_poll_without_job_id_skips_polling() -> Result<(), String> {
    run_async_test(async {
        let Some(server) = StubServer::spawn(|_, _| (200, r#"{"id": 1}"#.to_owned())).await?
        else {
            return Ok(());
        };
        let (_dir, file) = samples()?;
        let scenario =
            UploadPollScenario::new(upload_poll(server.url(""), file, Duration::from_secs(5)))
                .map_err(|err| err.to_string())?;

        let iteration = run_once(&scenario).await?;
        if check(&iteration, "upload status is 200")? != (1, 0) {
            return Err("Upload should pass".to_owned());
        }
        if check(&iteration, "response has jobID")? != (0, 1) {
            return Err("Missing jobID should fail its check".to_owned());
        }
        if check(&iteration, "job completed")? != (0, 0) {
            return Err("Completion must not be evaluated".to_owned());
        }
        if server.requests().len() != 1 {
            return Err("Expected no status polls".to_owned());
        }
        Ok(())
    })
}

#[test]
fn upload_poll_failed_upload_ends_iteration() -> Result<(), String> {
    run_async_test(async {
        let Some(server) = StubServer::spawn(|_, _| (503, String::new())).await? else {
            return Ok(());
        };
        let (_dir, file) = samples()?;
        let scenario =
            UploadPollScenario::new(upload_poll(server.url(""), file, Duration::from_secs(5)))
                .map_err(|err| err.to_string())?;

        let iteration = run_once(&scenario).await?;
        if check(&iteration, "upload status is 200")? != (0, 1) {
            return Err("Upload check should fail".to_owned());
        }
        if check(&iteration, "response has jobID")? != (0, 0) {
            return Err("jobID must not be evaluated".to_owned());
        }
        if metric_names(&iteration) != ["upload"] {
            return Err("Expected only the upload metric".to_owned());
        }
        Ok(())
    })
}

#[test]
fn upload_poll_gives_up_after_poll_timeout() -> Result<(), String> {
    run_async_test(async {
        let Some(server) = StubServer::spawn(|method, _| match method {
            "POST" => (200, r#"{"jobID": 7}"#.to_owned()),
            _ => (200, r#"{"status": "processing"}"#.to_owned()),
        })
        .await?
        else {
            return Ok(());
        };
        let (_dir, file) = samples()?;
        let scenario = UploadPollScenario::new(upload_poll(
            server.url(""),
            file,
            Duration::from_millis(100),
        ))
        .map_err(|err| err.to_string())?;

        let iteration = run_once(&scenario).await?;
        if check(&iteration, "job completed")? != (0, 1) {
            return Err("Expected completion check to fail".to_owned());
        }
        let names = metric_names(&iteration);
        if names.contains(&COMPLETE_TASK_METRIC) {
            return Err("Timed-out job must not record the task metric".to_owned());
        }
        if server
            .requests()
            .iter()
            .any(|request| request.method == "GET" && request.path != "/status/7")
        {
            return Err("Unexpected status path".to_owned());
        }
        Ok(())
    })
}

#[test]
fn upload_fails_fast_when_sample_is_missing() -> Result<(), String> {
    run_async_test(async {
        let Some(server) = StubServer::spawn(|_, _| (200, String::new())).await? else {
            return Ok(());
        };
        let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
        let settings = ScenarioSettings::Upload(UploadSettings {
            url: server.url("/upload"),
            file: dir.path().join("missing.png"),
            field: "file".to_owned(),
            form: Vec::new(),
            expected_status: 200,
        });
        if settings.build().is_ok() {
            return Err("Expected missing sample to fail".to_owned());
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
        if !server.requests().is_empty() {
            return Err("No request may be sent before the sample loads".to_owned());
        }
        Ok(())
    })
}

#[test]
fn upload_poll_rejects_inverted_wait_range() -> Result<(), String> {
    let (_dir, file) = samples()?;
    let mut settings = upload_poll("http://localhost:8080".to_owned(), file, Duration::from_secs(1));
    settings.wait_min = Duration::from_secs(5);
    settings.wait_max = Duration::from_secs(1);
    match ScenarioSettings::UploadPoll(settings).build() {
        Err(crate::error::AppError::Validation(
            crate::error::ValidationError::WaitRangeInverted,
        )) => Ok(()),
        Err(err) => Err(format!("Unexpected error: {}", err)),
        Ok(_) => Err("Expected inverted range to fail".to_owned()),
    }
}

#[test]
fn pause_samples_stay_in_range() -> Result<(), String> {
    if Pause::None.sample().is_some() {
        return Err("None should not pause".to_owned());
    }
    let fixed = Duration::from_millis(250);
    if Pause::Fixed(fixed).sample() != Some(fixed) {
        return Err("Fixed should return its duration".to_owned());
    }
    let min = Duration::from_secs(1);
    let max = Duration::from_secs(5);
    for _ in 0..100 {
        let sampled = Pause::Uniform { min, max }
            .sample()
            .ok_or_else(|| "Uniform should pause".to_owned())?;
        if sampled < min || sampled > max {
            return Err(format!("Sample {:?} out of range", sampled));
        }
    }
    Ok(())
}
