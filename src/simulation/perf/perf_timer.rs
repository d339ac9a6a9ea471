//! Wall-clock timing for perf metrics
//!
//! `Instant` is unavailable on wasm32, so the browser clock is read there.

#[derive(Clone, Copy)]
pub(crate) struct PerfTimer {
    start_ms: f64,
}

#[cfg(target_arch = "wasm32")]
fn now_ms() -> f64 {
    js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
fn now_ms() -> f64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static EPOCH: OnceLock<Instant> = OnceLock::new();
    EPOCH.get_or_init(Instant::now).elapsed().as_secs_f64() * 1000.0
}

impl PerfTimer {
    pub(crate) fn start() -> Self {
        PerfTimer { start_ms: now_ms() }
    }

    pub(crate) fn elapsed_ms(&self) -> f64 {
        (now_ms() - self.start_ms).max(0.0)
    }
}

/// Runs `phase`, storing its duration in `slot` when `enabled`.
#[inline]
pub(crate) fn timed<T>(enabled: bool, slot: &mut f64, phase: impl FnOnce() -> T) -> T {
    if !enabled {
        return phase();
    }
    let t0 = PerfTimer::start();
    let out = phase();
    *slot = t0.elapsed_ms();
    out
}
