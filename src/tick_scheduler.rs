//! Tick scheduling and timing utilities.
//!
//! Provides portable effect pacing without async/await or platform-specific
//! timers. The caller is responsible for sleeping/waiting between ticks.

use embassy_time::{Duration, Instant};

use crate::{EffectEngine, OutputDriver};

/// Default tick rate (50 ticks per second).
pub const DEFAULT_TICK_RATE_HZ: u32 = 50;

/// Default tick duration based on the target rate.
pub const DEFAULT_TICK_DURATION: Duration =
    Duration::from_millis(1000 / DEFAULT_TICK_RATE_HZ as u64);

/// Largest backlog folded into effect drift, in ticks.
///
/// Falling behind by more than this resets the timeline instead of
/// fast-forwarding the effects.
pub const MAX_TICK_BACKLOG: u64 = 8;

/// Result of a scheduler tick.
#[derive(Debug, Clone, Copy)]
pub struct TickResult {
    /// The deadline for the next tick.
    pub next_deadline: Instant,
    /// How long to wait until the next tick (may be zero if behind schedule).
    pub sleep_duration: Duration,
}

/// Portable tick scheduler that manages timing without async.
///
/// This scheduler:
/// - Tracks tick timing and folds small backlogs into zone drift
/// - Runs the engine and hands the frame to the output driver
/// - Returns timing info so the caller can sleep appropriately
///
/// # Usage
///
/// ```ignore
/// let mut scheduler = TickScheduler::new(engine, driver);
///
/// loop {
///     let now = get_current_time_ms();
///     let result = scheduler.tick(Instant::from_millis(now));
///
///     // Platform-specific sleep
///     sleep_ms(result.sleep_duration.as_millis() as u64);
/// }
/// ```
pub struct TickScheduler<'a, O: OutputDriver, const MAX_ZONES: usize, const CHANNEL_SIZE: usize> {
    output: O,
    engine: EffectEngine<'a, MAX_ZONES, CHANNEL_SIZE>,
    next_tick: Instant,
    tick_duration: Duration,
}

impl<'a, O: OutputDriver, const MAX_ZONES: usize, const CHANNEL_SIZE: usize>
    TickScheduler<'a, O, MAX_ZONES, CHANNEL_SIZE>
{
    /// Create a new tick scheduler.
    ///
    /// Uses `DEFAULT_TICK_DURATION` (50 Hz) for tick timing.
    pub fn new(engine: EffectEngine<'a, MAX_ZONES, CHANNEL_SIZE>, driver: O) -> Self {
        Self::with_tick_duration(engine, driver, DEFAULT_TICK_DURATION)
    }

    /// Create a new tick scheduler with a custom tick duration.
    ///
    /// Pacing is millisecond-grained; durations under one millisecond are
    /// raised to one millisecond.
    pub fn with_tick_duration(
        engine: EffectEngine<'a, MAX_ZONES, CHANNEL_SIZE>,
        driver: O,
        tick_duration: Duration,
    ) -> Self {
        let tick_duration = if tick_duration < Duration::from_millis(1) {
            Duration::from_millis(1)
        } else {
            tick_duration
        };
        Self {
            output: driver,
            engine,
            next_tick: Instant::from_millis(0),
            tick_duration,
        }
    }

    /// Process one tick and return timing information.
    ///
    /// This method:
    /// 1. Folds missed ticks into the zones' drift counters, or resets the
    ///    timeline after a stall longer than `MAX_TICK_BACKLOG` ticks
    /// 2. Runs the engine tick
    /// 3. Writes the frame to the output driver
    /// 4. Returns the deadline for the next tick
    ///
    /// The caller is responsible for waiting until `next_deadline` before
    /// calling `tick` again.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn tick(&mut self, now: Instant) -> TickResult {
        // Catch-up handling: small backlogs become drift so effects keep
        // their place in the cycle; long stalls reset the timeline
        if now.as_millis() > self.next_tick.as_millis() {
            let behind =
                (now.as_millis() - self.next_tick.as_millis()) / self.tick_duration.as_millis();
            if behind > MAX_TICK_BACKLOG {
                self.next_tick = now;
            } else if behind > 0 {
                self.engine.add_drift(behind as i16);
                self.next_tick += Duration::from_millis(behind * self.tick_duration.as_millis());
            }
        }

        // Advance and output
        let frame = self.engine.tick();
        self.output.write(frame);

        // Calculate next tick deadline
        self.next_tick += self.tick_duration;

        // Calculate sleep duration (may be zero if we're behind)
        let sleep_duration = if self.next_tick.as_millis() > now.as_millis() {
            Duration::from_millis(self.next_tick.as_millis() - now.as_millis())
        } else {
            Duration::from_millis(0)
        };

        TickResult {
            next_deadline: self.next_tick,
            sleep_duration,
        }
    }

    /// Get a reference to the engine.
    pub fn engine(&self) -> &EffectEngine<'a, MAX_ZONES, CHANNEL_SIZE> {
        &self.engine
    }

    /// Get a mutable reference to the engine.
    pub fn engine_mut(&mut self) -> &mut EffectEngine<'a, MAX_ZONES, CHANNEL_SIZE> {
        &mut self.engine
    }
}
