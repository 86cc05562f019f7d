//! Scripted in-memory workload behind `--simulate`
//!
//! The wait sleeps through the window and then charges one tick per
//! millisecond on every execution unit: half to `idle`, 30% to `shell`,
//! 15% to `logger`, 5% to a `worker` spawned mid-window. `net` exits
//! during the window.

use std::time::Duration;
use taskload_core::{InMemoryScheduler, IntervalWait, Result, TaskHandle, TaskScheduler};

/// Units used when neither `--units` nor the config file sets one
pub const DEFAULT_UNITS: u32 = 2;

pub struct Simulation {
    scheduler: InMemoryScheduler,
    idle: TaskHandle,
    shell: TaskHandle,
    logger: TaskHandle,
    net: TaskHandle,
}

impl Simulation {
    /// Boot a scheduler that has already been running for a while
    pub fn boot(execution_units: u32) -> Result<Self> {
        let scheduler = InMemoryScheduler::new(execution_units);
        let idle = scheduler.spawn("idle")?;
        let shell = scheduler.spawn("shell")?;
        let logger = scheduler.spawn("logger")?;
        let net = scheduler.spawn("net")?;

        let units = u64::from(execution_units);
        scheduler.advance(1000)?;
        scheduler.run(idle, 600 * units)?;
        scheduler.run(shell, 250 * units)?;
        scheduler.run(logger, 100 * units)?;
        scheduler.run(net, 50 * units)?;

        Ok(Self {
            scheduler,
            idle,
            shell,
            logger,
            net,
        })
    }

    pub fn scheduler(&self) -> &InMemoryScheduler {
        &self.scheduler
    }

    /// Charge one window's worth of ticks
    fn play(&self, window: Duration) -> Result<()> {
        let ticks = u64::try_from(window.as_millis()).unwrap_or(u64::MAX);
        let capacity = ticks.saturating_mul(u64::from(self.scheduler.execution_units()));

        let share = |pct: u64| capacity.saturating_mul(pct) / 100;
        let shell = share(30);
        let logger = share(15);
        let worker = share(5);
        let idle = capacity - shell - logger - worker;

        self.scheduler.kill(self.net)?;
        let spawned = self.scheduler.spawn("worker")?;
        self.scheduler.run(spawned, worker)?;
        self.scheduler.run(self.idle, idle)?;
        self.scheduler.run(self.shell, shell)?;
        self.scheduler.run(self.logger, logger)?;
        self.scheduler.advance(ticks)
    }
}

impl IntervalWait for Simulation {
    fn wait(&self, window: Duration) -> Result<()> {
        std::thread::sleep(window);
        self.play(window)
    }
}
