//! End-to-end sampling against the in-memory scheduler.

use std::sync::Arc;
use std::time::Duration;
use taskload_core::sampler::IntervalWait;
use taskload_core::{
    CancelToken, CancellableWait, ExErrorKind, InMemoryScheduler, Result, Sampler,
    SamplerConfig, TaskHandle,
};
use taskload_core_types::RequestContext;

/// Wait that runs a closure instead of sleeping, so the test decides what
/// the scheduler does during the window
struct Scripted<F: Fn() -> Result<()>>(F);

impl<F: Fn() -> Result<()>> IntervalWait for Scripted<F> {
    fn wait(&self, _window: Duration) -> Result<()> {
        (self.0)()
    }
}

fn sampler() -> Sampler {
    Sampler::new(SamplerConfig {
        window_ms: 10,
        ..SamplerConfig::default()
    })
    .unwrap()
}

#[test]
fn test_sample_reports_matched_deleted_created() {
    let sched = Arc::new(InMemoryScheduler::new(1));
    let idle = sched.spawn("idle").unwrap();
    let worker = sched.spawn("worker").unwrap();
    let doomed = sched.spawn("doomed").unwrap();

    let driver = Arc::clone(&sched);
    let wait = Scripted(move || {
        driver.run(idle, 300)?;
        driver.run(worker, 700)?;
        driver.kill(doomed)?;
        driver.spawn("fresh")?;
        driver.advance(1000)
    });

    let ctx = RequestContext::new("sim");
    let report = sampler().sample(&*sched, &wait, &ctx).unwrap();

    assert_eq!(report.request_id, ctx.request_id);
    assert_eq!(report.elapsed, 1000);
    assert_eq!(report.find_matched(idle).unwrap().percent, 30);
    assert_eq!(report.find_matched(worker).unwrap().percent, 70);
    assert_eq!(report.deleted.len(), 1);
    assert_eq!(report.deleted[0].handle, doomed);
    assert_eq!(report.created.len(), 1);
    assert_eq!(report.created[0].name, "fresh");
    assert_eq!(report.total_percent(), 100);
}

#[test]
fn test_sample_with_idle_clock_is_degenerate() {
    let sched = InMemoryScheduler::new(1);
    sched.spawn("idle").unwrap();
    let wait = Scripted(|| Ok(()));

    let ctx = RequestContext::new("sim");
    let err = sampler().sample(&sched, &wait, &ctx).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::DegenerateInterval);
    assert_eq!(err.request_id(), Some(&ctx.request_id));
}

#[test]
fn test_config_units_override_scheduler() {
    let sched = Arc::new(InMemoryScheduler::new(4));
    let t = sched.spawn("t").unwrap();
    let driver = Arc::clone(&sched);
    let wait = Scripted(move || {
        driver.run(t, 100)?;
        driver.advance(100)
    });

    let sampler = Sampler::new(SamplerConfig {
        window_ms: 1,
        execution_units: Some(1),
        ..SamplerConfig::default()
    })
    .unwrap();
    let report = sampler
        .sample(&*sched, &wait, &RequestContext::new("sim"))
        .unwrap();

    assert_eq!(report.execution_units, 1);
    assert_eq!(report.matched[0].percent, 100);
}

#[test]
fn test_scheduler_units_used_by_default() {
    let sched = Arc::new(InMemoryScheduler::new(2));
    let t = sched.spawn("t").unwrap();
    let driver = Arc::clone(&sched);
    let wait = Scripted(move || {
        driver.run(t, 100)?;
        driver.advance(100)
    });

    let report = sampler()
        .sample(&*sched, &wait, &RequestContext::new("sim"))
        .unwrap();

    assert_eq!(report.execution_units, 2);
    assert_eq!(report.matched[0].percent, 50);
}

#[test]
fn test_recycled_handle_during_window() {
    let sched = Arc::new(InMemoryScheduler::new(1));
    let t = sched.spawn("first").unwrap();
    sched.run(t, 500).unwrap();
    sched.advance(500).unwrap();

    let driver = Arc::clone(&sched);
    let wait = Scripted(move || {
        driver.kill(t)?;
        driver.recycle(t, "second")?;
        driver.run(t, 10)?;
        driver.advance(100)
    });

    let report = sampler()
        .sample(&*sched, &wait, &RequestContext::new("sim"))
        .unwrap();

    assert!(report.matched.is_empty());
    assert_eq!(report.reused_handles, vec![t]);
    assert_eq!(report.deleted[0].name, "first");
    assert_eq!(report.created[0].name, "second");
}

#[test]
fn test_cancel_before_sampling() {
    let sched = InMemoryScheduler::new(1);
    sched.spawn("idle").unwrap();
    let token = CancelToken::new();
    token.cancel();

    let err = sampler()
        .sample(&sched, &CancellableWait::new(token), &RequestContext::new("sim"))
        .unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::Cancelled);
}

#[test]
fn test_cancel_during_window() {
    let sched = InMemoryScheduler::new(1);
    sched.spawn("idle").unwrap();
    let token = CancelToken::new();
    let wait = CancellableWait::new(token.clone());

    let long = Sampler::new(SamplerConfig {
        window_ms: 60_000,
        ..SamplerConfig::default()
    })
    .unwrap();

    let canceller = std::thread::spawn(move || {
        std::thread::sleep(Duration::from_millis(20));
        token.cancel();
    });
    let err = long
        .sample(&sched, &wait, &RequestContext::new("sim"))
        .unwrap_err();
    canceller.join().unwrap();

    assert_eq!(err.kind(), ExErrorKind::Cancelled);
    assert_ne!(err.kind(), ExErrorKind::DegenerateInterval);
}

#[test]
fn test_sampler_rejects_invalid_config() {
    let err = Sampler::new(SamplerConfig {
        window_ms: 0,
        ..SamplerConfig::default()
    })
    .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidConfig);
}

#[test]
fn test_handle_type_is_shared_with_reports() {
    let sched = InMemoryScheduler::new(1);
    let h = sched.spawn("x").unwrap();
    assert_eq!(h, TaskHandle::new(1));
}
