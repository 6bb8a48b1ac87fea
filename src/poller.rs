use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use chrono::{DateTime, Local};
use log::{debug, info, warn};

use crate::config::{MAX_DRAIN_PER_CYCLE, POLL_IDLE_INTERVAL};
use crate::hexdump::DumpBuffer;
use crate::radio::{RadioDevice, RadioError};
use crate::session::RadioConfig;

/// The steady-state polling loop.
///
/// Each cycle drains every payload the radio currently has ready (bounded
/// by the drain cap), renders each one into the reusable dump buffer and
/// logs it, then idles for a fixed interval. The loop runs until the
/// shared stop flag clears or the device faults.
pub struct Poller<D: RadioDevice> {
    device: D,
    session: RadioConfig,
    dump: DumpBuffer,
    running: Arc<AtomicBool>,
    idle_interval: Duration,
    drain_limit: usize,
    payloads_received: u64,
    started_at: DateTime<Local>,
}

impl<D: RadioDevice> Poller<D> {
    pub fn new(device: D, session: RadioConfig, running: Arc<AtomicBool>) -> Self {
        Self {
            device,
            session,
            dump: DumpBuffer::new(),
            running,
            idle_interval: POLL_IDLE_INTERVAL,
            drain_limit: MAX_DRAIN_PER_CYCLE,
            payloads_received: 0,
            started_at: Local::now(),
        }
    }

    /// Replace the idle delay between polling cycles.
    pub fn idle_interval(mut self, interval: Duration) -> Self {
        self.idle_interval = interval;
        self
    }

    /// Replace the per-cycle drain cap.
    pub fn drain_limit(mut self, limit: usize) -> Self {
        self.drain_limit = limit;
        self
    }

    pub fn session(&self) -> &RadioConfig {
        &self.session
    }

    /// Bring the radio up with the validated session.
    pub fn open(&mut self) -> Result<(), RadioError> {
        self.device.open(&self.session)
    }

    /// Read, render and log every payload currently ready, in arrival
    /// order, up to the drain cap. Returns how many payloads were consumed.
    pub fn drain(&mut self) -> Result<usize, RadioError> {
        let mut drained = 0;
        while drained < self.drain_limit && self.device.is_data_ready()? {
            debug!("radio has received data...");
            let payload = self.device.read_payload()?;
            if self.dump.render(&payload) > 0 {
                debug!("{}", self.dump.as_str());
            }
            drained += 1;
        }

        if drained > 0 && drained == self.drain_limit {
            warn!(
                "drain cap of {} payloads reached, yielding to the idle step",
                self.drain_limit
            );
        }

        self.payloads_received += drained as u64;
        Ok(drained)
    }

    /// Poll until the stop flag clears. A device fault propagates out and
    /// ends the loop; there is no in-loop recovery.
    pub fn run(&mut self) -> Result<(), RadioError> {
        info!(
            "polling channel {} every {:?}",
            self.session.channel, self.idle_interval
        );

        while self.running.load(Ordering::SeqCst) {
            self.drain()?;
            thread::sleep(self.idle_interval);
        }

        info!(
            "stopped; {} payloads received since {}",
            self.payloads_received,
            self.started_at.format("%Y-%m-%d %H:%M:%S")
        );
        Ok(())
    }
}
