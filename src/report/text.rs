use crate::checks::totals;
use crate::metrics::RequestStats;
use crate::runner::RunReport;

pub struct SummaryStats {
    pub iterations_per_sec_x100: u64,
    pub requests_per_sec_x100: u64,
    pub check_pass_rate_x100: u64,
}

#[must_use]
pub fn compute_summary_stats(report: &RunReport) -> SummaryStats {
    let elapsed_ms = report.elapsed.as_millis().max(1);
    let per_sec_x100 = |count: u64| {
        let scaled = u128::from(count)
            .saturating_mul(100_000)
            .checked_div(elapsed_ms)
            .unwrap_or(0);
        u64::try_from(scaled).map_or(u64::MAX, |value| value)
    };

    let (passes, fails) = totals(&report.checks);
    let checks_total = passes.saturating_add(fails);
    let check_pass_rate_x100 = if checks_total > 0 {
        let scaled = u128::from(passes)
            .saturating_mul(10_000)
            .checked_div(u128::from(checks_total))
            .unwrap_or(0);
        u64::try_from(scaled).map_or(u64::MAX, |value| value)
    } else {
        0
    };

    SummaryStats {
        iterations_per_sec_x100: per_sec_x100(report.iterations),
        requests_per_sec_x100: per_sec_x100(report.metrics.total_requests),
        check_pass_rate_x100,
    }
}

pub fn print_summary(report: &RunReport, stats: &SummaryStats) {
    println!("Scenario: {}", report.scenario);
    println!("VUs: {}", report.vus);
    println!(
        "Duration: {}ms (planned {}s)",
        report.elapsed.as_millis(),
        report.planned_duration.as_secs()
    );
    if report.stopped_by_signal {
        println!("Stopped: by signal");
    }
    println!("Iterations: {}", report.iterations);
    println!("Interrupted Iterations: {}", report.interrupted_iterations);
    println!(
        "Iterations/s: {}.{:02}",
        stats.iterations_per_sec_x100 / 100,
        stats.iterations_per_sec_x100 % 100
    );
    println!("Total Requests: {}", report.metrics.total_requests);
    println!(
        "Requests/s: {}.{:02}",
        stats.requests_per_sec_x100 / 100,
        stats.requests_per_sec_x100 % 100
    );

    for request in &report.metrics.requests {
        print_request(request);
    }

    if report.checks.is_empty() {
        println!("Checks: none");
        return;
    }
    println!(
        "Checks: {}.{:02}% passed",
        stats.check_pass_rate_x100 / 100,
        stats.check_pass_rate_x100 % 100
    );
    for check in &report.checks {
        let rate = check.pass_rate_x100();
        println!(
            "  {}: {} passed / {} failed ({}.{:02}%)",
            check.name,
            check.passes,
            check.fails,
            rate / 100,
            rate % 100
        );
    }
}

fn print_request(request: &RequestStats) {
    println!("Request '{}': {}", request.name, request.total_requests);
    let statuses: Vec<String> = request
        .status_counts
        .iter()
        .map(|(status, count)| format!("{}={}", status, count))
        .collect();
    if statuses.is_empty() {
        println!("  Statuses: none");
    } else {
        println!("  Statuses: {}", statuses.join(" "));
    }
    println!("  Timeouts: {}", request.timeouts);
    println!("  Transport Errors: {}", request.transport_errors);
    println!("  Received: {} bytes", request.response_bytes);
    println!(
        "  Min/Avg/Max Latency: {}ms / {}ms / {}ms",
        request.min_latency_ms, request.avg_latency_ms, request.max_latency_ms
    );
    println!(
        "  P50/P90/P99 Latency: {}ms / {}ms / {}ms",
        request.p50_latency_ms, request.p90_latency_ms, request.p99_latency_ms
    );
}
