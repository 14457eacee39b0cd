//! SIGINT/SIGTERM handling for the duration of a generation run.
//!
//! The handler only records the signal number; the lifecycle polls it
//! between events and performs cleanup on the main thread.

use std::sync::atomic::{AtomicI32, Ordering};

use eyre::Result;

/// Source of pending interruptions, polled by the lifecycle.
pub trait Interruption {
    /// The signal received since the run started, if any.
    fn pending(&self) -> Option<i32>;
}

static PENDING: AtomicI32 = AtomicI32::new(0);

/// Serializes tests that install process-wide handlers.
#[cfg(test)]
pub(crate) static TEST_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

fn recorded() -> Option<i32> {
    match PENDING.load(Ordering::SeqCst) {
        0 => None,
        signal => Some(signal),
    }
}

#[cfg(unix)]
mod imp {
    use std::{ffi::c_int, sync::atomic::Ordering};

    use eyre::{Context, Result};
    use nix::sys::signal::{self, SaFlags, SigAction, SigHandler, SigSet, Signal};

    use super::PENDING;

    extern "C" fn record(signal: c_int) {
        PENDING.store(signal, Ordering::SeqCst);
    }

    /// Installed handlers; the previous dispositions are restored on drop.
    pub struct SignalGuard {
        previous: Vec<(Signal, SigAction)>,
    }

    impl SignalGuard {
        pub fn install() -> Result<Self> {
            PENDING.store(0, Ordering::SeqCst);

            let action = SigAction::new(
                SigHandler::Handler(record),
                SaFlags::SA_RESTART,
                SigSet::empty(),
            );
            let mut guard = Self {
                previous: Vec::with_capacity(2),
            };
            for sig in [Signal::SIGINT, Signal::SIGTERM] {
                // SAFETY: `record` only performs an atomic store, which is
                // async-signal-safe.
                let old = unsafe { signal::sigaction(sig, &action) }
                    .wrap_err_with(|| format!("failed to install {} handler", sig))?;
                guard.previous.push((sig, old));
            }
            tracing::debug!("signal handlers installed");
            Ok(guard)
        }
    }

    impl Drop for SignalGuard {
        fn drop(&mut self) {
            for (sig, old) in self.previous.drain(..).rev() {
                // SAFETY: restores a disposition previously returned by sigaction.
                if let Err(e) = unsafe { signal::sigaction(sig, &old) } {
                    tracing::warn!(signal = %sig, error = %e, "failed to restore signal handler");
                }
            }
        }
    }
}

#[cfg(not(unix))]
mod imp {
    use eyre::Result;

    pub struct SignalGuard;

    impl SignalGuard {
        pub fn install() -> Result<Self> {
            Ok(Self)
        }
    }
}

/// Scoped SIGINT/SIGTERM handlers.
pub struct SignalGuard {
    _handlers: imp::SignalGuard,
}

impl SignalGuard {
    pub fn install() -> Result<Self> {
        Ok(Self {
            _handlers: imp::SignalGuard::install()?,
        })
    }
}

impl Interruption for SignalGuard {
    fn pending(&self) -> Option<i32> {
        recorded()
    }
}
