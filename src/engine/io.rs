//! Host output callbacks.

/// Sink for engine output. `log_info` carries diagnostics, `send_line`
/// carries user-visible text such as the per-iteration PV trace. Neither
/// call may block for more than a few milliseconds; the engine invokes them
/// from inside the search loop.
pub trait EngineIo {
    fn log_info(&self, msg: &str);
    fn send_line(&self, msg: &str);
}

/// Default sink: diagnostics go to the `log` facade (silent unless the host
/// installs a logger), PV traces go to stdout.
pub struct StdoutIo;

impl EngineIo for StdoutIo {
    fn log_info(&self, msg: &str) {
        log::info!("{msg}");
    }

    fn send_line(&self, msg: &str) {
        println!("{msg}");
    }
}

/// Sink that drops everything; handy for embedding and tests.
pub struct NullIo;

impl EngineIo for NullIo {
    fn log_info(&self, _msg: &str) {}

    fn send_line(&self, _msg: &str) {}
}
