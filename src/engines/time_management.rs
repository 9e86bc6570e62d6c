//! Maps the caller's time budget onto a search depth.

use crate::engines::engine_trait::GoParams;

/// Plies searched below each root move for a given timeout in seconds.
#[inline]
pub const fn depth_for_timeout(timeout: u64) -> u8 {
    if timeout <= 1 {
        1
    } else {
        2
    }
}

/// Explicit depth first, then the timeout, then `default_depth`.
pub fn resolve_depth(params: &GoParams, default_depth: u8) -> u8 {
    params
        .depth
        .or_else(|| params.timeout.map(depth_for_timeout))
        .unwrap_or(default_depth)
}
