use std::{
    sync::{Arc, Condvar, Mutex},
    time::{Duration, Instant},
};

/// a cloneable stop flag. waiting on it returns early once any clone calls [`StopSignal::stop`].
#[derive(Clone, Default)]
pub struct StopSignal {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl StopSignal {
    pub fn new() -> StopSignal {
        StopSignal::default()
    }

    pub fn stop(&self) {
        let (lock, cvar) = &*self.inner;
        let mut stopped = match lock.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *stopped = true;
        cvar.notify_all();
    }

    pub fn is_stopped(&self) -> bool {
        let (lock, _) = &*self.inner;
        match lock.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    /// blocks for up to `timeout`. returns true if the signal was stopped
    /// before or during the wait. a timeout past the clock's range waits until stopped.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let (lock, cvar) = &*self.inner;
        let deadline = Instant::now().checked_add(timeout);
        let mut stopped = match lock.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        while !*stopped {
            stopped = match deadline {
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        break;
                    }
                    match cvar.wait_timeout(stopped, deadline - now) {
                        Ok((guard, _)) => guard,
                        Err(poisoned) => poisoned.into_inner().0,
                    }
                }
                None => match cvar.wait(stopped) {
                    Ok(guard) => guard,
                    Err(poisoned) => poisoned.into_inner(),
                },
            };
        }
        *stopped
    }

    /// stops this signal when the process receives Ctrl-C. the listener runs on
    /// its own thread with a single-threaded tokio runtime.
    pub fn stop_on_ctrl_c(&self) -> std::io::Result<()> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let signal = self.clone();
        std::thread::Builder::new()
            .name(String::from("ctrl-c-listener"))
            .spawn(move || match runtime.block_on(tokio::signal::ctrl_c()) {
                Ok(()) => {
                    log::info!("received Ctrl-C, stopping after the current sample");
                    signal.stop();
                }
                Err(e) => log::warn!("unable to listen for Ctrl-C: {e}"),
            })?;
        Ok(())
    }
}
