//! Query-compilation traces.
//!
//! `compile` and `get_sort_definitions` each emit one JSON line per call, e.g.
//! `{"op":"compile_filter","length":31}` or `{"op":"compile_sort","keys":2}`. The lines go to the
//! `docfilter::trace` log target, which `logger::configure_logging` routes to `trace.log` only
//! when traces are enabled (`DOCFILTER_DEV6=1`), and are off otherwise.
//!
//! Tests read the lines back from a per-thread buffer, so parallel tests never see each other's
//! compiles.

use std::cell::RefCell;

#[doc(hidden)]
pub use log;

/// Log target of the compile/sort trace lines.
pub const TRACE_TARGET: &str = "docfilter::trace";

thread_local! {
    static CAPTURE: RefCell<Option<Vec<String>>> = const { RefCell::new(None) };
}

/// Turns the current thread's buffer off again when dropped.
pub struct CaptureGuard;

impl Drop for CaptureGuard {
    fn drop(&mut self) {
        CAPTURE.with(|c| *c.borrow_mut() = None);
    }
}

/// Buffers every trace line this thread emits until the guard drops.
#[must_use]
pub fn enable_thread_sink() -> CaptureGuard {
    CAPTURE.with(|c| *c.borrow_mut() = Some(Vec::new()));
    CaptureGuard
}

pub fn record(line: &str) {
    CAPTURE.with(|c| {
        if let Some(buf) = c.borrow_mut().as_mut() {
            buf.push(line.to_owned());
        }
    });
}

/// Trace lines buffered on this thread since the last call, oldest first.
pub fn drain() -> Vec<String> {
    CAPTURE.with(|c| c.borrow_mut().as_mut().map(std::mem::take).unwrap_or_default())
}

/// Emits one trace line at TRACE on [`TRACE_TARGET`] and buffers it for the current thread.
#[macro_export]
macro_rules! dev6 {
    ($($arg:tt)*) => {{
        let __line = format!($($arg)*);
        $crate::utils::devlog::record(&__line);
        $crate::utils::devlog::log::log!(
            target: $crate::utils::devlog::TRACE_TARGET,
            $crate::utils::devlog::log::Level::Trace,
            "{}",
            __line
        );
    }};
}
