//! Bounded polling for hardware handshakes

/// Drive a non-blocking `poll` until it completes or `attempts` polls have
/// returned `WouldBlock`. `backoff` runs between polls, never after the last.
/// At least one poll is made, even with `attempts` of zero.
///
/// Exhaustion is reported as `nb::Error::WouldBlock`; the caller decides
/// which fault that is.
pub fn retry<T, E>(
    attempts: u16,
    mut poll: impl FnMut() -> nb::Result<T, E>,
    mut backoff: impl FnMut(),
) -> nb::Result<T, E> {
    let attempts = attempts.max(1);
    for attempt in 0..attempts {
        match poll() {
            Err(nb::Error::WouldBlock) => {
                if attempt + 1 < attempts {
                    backoff();
                }
            }
            done => return done,
        }
    }
    Err(nb::Error::WouldBlock)
}
