//! Opt-in diagnostic traces, switched on by environment variable.

use std::sync::OnceLock;

/// `HOST_LINK_TRACE`: one line per dispatched or ignored frame.
pub(crate) fn frames_enabled() -> bool {
    static ENABLED: OnceLock<bool> = OnceLock::new();
    *ENABLED.get_or_init(|| std::env::var_os("HOST_LINK_TRACE").is_some())
}

/// `HOST_LINK_TRACE_RX`: one line per receive phase transition.
pub(crate) fn rx_enabled() -> bool {
    static ENABLED: OnceLock<bool> = OnceLock::new();
    *ENABLED.get_or_init(|| std::env::var_os("HOST_LINK_TRACE_RX").is_some())
}
