//! # Viewer
//!
//! eframe application that polls every slot once per frame and shows the
//! pressed buttons on a [`GamepadWidget`].
//!
//! Each tick follows the same order: poll all four slots, turn every
//! indicator off, then light every button pressed on any slot. Press and
//! release edges are logged per slot.

pub mod gamepad_widget;

use crate::config::Config;
use crate::controller::{Bound, ButtonSet, Combination, PollingSession, Slot, XUSER_MAX_COUNT};
use chrono::{DateTime, Duration as ChronoDuration, Local};
use eframe::egui;
use gamepad_widget::{GamepadWidget, IndicatorBoard};
use std::time::Duration;
use tracing::{debug, info};

/// Counts ticks and reports the rate once per interval
#[derive(Debug, Clone)]
pub struct TickStats {
    ticks: u64,
    since: DateTime<Local>,
    interval: ChronoDuration,
}

impl TickStats {
    pub fn new(now: DateTime<Local>, interval: ChronoDuration) -> Self {
        Self {
            ticks: 0,
            since: now,
            interval,
        }
    }

    /// Records one tick. Returns `(ticks, ticks per second)` when an
    /// interval elapsed, and starts the next interval.
    pub fn record(&mut self, now: DateTime<Local>) -> Option<(u64, f64)> {
        self.ticks += 1;

        let elapsed = now - self.since;
        if elapsed <= self.interval {
            return None;
        }

        let seconds = elapsed.num_milliseconds() as f64 / 1000.0;
        let report = (self.ticks, self.ticks as f64 / seconds);
        self.ticks = 0;
        self.since = now;
        Some(report)
    }
}

pub struct PadViewerUI {
    session: PollingSession<Bound>,
    widget: GamepadWidget,
    board: IndicatorBoard,
    combinations: Vec<Combination>,
    tick_interval: Duration,
    current: [ButtonSet; XUSER_MAX_COUNT],
    stats: TickStats,
}

impl PadViewerUI {
    pub fn new(session: PollingSession<Bound>, config: &Config) -> Self {
        info!(
            "Starting viewer on backend {} with tick interval {:?}",
            session.backend_name(),
            config.polling.tick_interval()
        );

        Self {
            session,
            widget: GamepadWidget::new(&config.viewer),
            board: IndicatorBoard::new(),
            combinations: config.combinations.clone(),
            tick_interval: config.polling.tick_interval(),
            current: Default::default(),
            stats: TickStats::new(Local::now(), ChronoDuration::seconds(10)),
        }
    }

    /// Polls all slots and refreshes the indicator board
    pub fn tick(&mut self) {
        let polled = self.session.poll_all();

        let slots = Slot::ALL.iter().zip(polled.iter().zip(self.current.iter()));
        for (slot, (latest, before)) in slots {
            let delta = latest.diff(before);
            for button in &delta.pressed {
                info!("{} pressed {}", slot, button);
            }
            for button in &delta.released {
                info!("{} released {}", slot, button);
            }
        }

        self.board.reset();
        for pressed in &polled {
            self.board.light(pressed);
        }
        self.current = polled;

        if let Some((ticks, rate)) = self.stats.record(Local::now()) {
            debug!("Viewer polled {} ticks ({:.1}/sec)", ticks, rate);
        }
    }

    pub fn board(&self) -> &IndicatorBoard {
        &self.board
    }

    pub fn pressed(&self) -> &[ButtonSet; XUSER_MAX_COUNT] {
        &self.current
    }

    /// Names of the configured combinations held on any slot
    pub fn active_combinations(&self) -> Vec<&str> {
        self.combinations
            .iter()
            .filter(|combination| combination.any_slot(&self.current).is_some())
            .map(|combination| combination.name.as_str())
            .collect()
    }
}

impl eframe::App for PadViewerUI {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.tick();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    for (slot, pressed) in Slot::ALL.iter().zip(self.current.iter()) {
                        if pressed.is_empty() {
                            ui.label(format!("{}: -", slot));
                        } else {
                            ui.label(format!("{}: {}", slot, pressed));
                        }
                    }

                    let active = self.active_combinations();
                    if !active.is_empty() {
                        ui.separator();
                        ui.label(format!("Combinations: {}", active.join(", ")));
                    }
                });

                self.widget.show(ui, &self.board);
            });
        });

        ctx.request_repaint_after(self.tick_interval);
    }
}
