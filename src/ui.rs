//! UI layer
//! -----------------------
//! Central panel, top to bottom:
//!   • Sun/moon icon for the current phase
//!   • One rounded card per animal (name + Sleeping/Awake, gray/green tint)
//!
//! Bottom bar:
//!   • Stats window toggle
//!
//! Floating stats window (monospace, fixed-width columns):
//!   • Phase, flip count, cycle period, countdown to the next flip
//!
//! Everything re-renders from a `ZooSnapshot` each frame. A clock
//! subscription requests a repaint whenever the state flips, and the
//! day/night colors fade over a short animation window.

use std::time::Duration;

use eframe::egui;
use egui::{Color32, Context, Id, Margin, RichText, Rounding};

use crate::config::ZooConfig;
use crate::zoo::{AnimalState, DayPhase, ZooClock};

/// Seconds the day/night (and card tint) fade takes.
const PHASE_FADE_SECONDS: f32 = 0.8;

// Day / night theme.
const DAY_BACKGROUND: Color32 = Color32::from_rgb(248, 246, 238);
const DAY_FOREGROUND: Color32 = Color32::from_rgb(25, 25, 30);
const NIGHT_BACKGROUND: Color32 = Color32::from_rgb(18, 22, 32);
const NIGHT_FOREGROUND: Color32 = Color32::from_rgb(235, 235, 240);

// Animal card tints.
const SLEEPING_TINT: Color32 = Color32::GRAY;
const AWAKE_TINT: Color32 = Color32::from_rgb(50, 200, 50);
const CARD_TEXT: Color32 = Color32::from_rgb(20, 20, 20);

/// Linear blend between two opaque colors, `t` clamped to 0..=1.
fn mix_color(a: Color32, b: Color32, t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let ch = |x: u8, y: u8| (f32::from(x) + (f32::from(y) - f32::from(x)) * t).round() as u8;
    Color32::from_rgb(ch(a.r(), b.r()), ch(a.g(), b.g()), ch(a.b(), b.b()))
}

/// Main egui app.
pub struct ZooApp {
    clock: ZooClock,
    show_stats_window: bool,
}

impl ZooApp {
    /// Constructor used by `main.rs`: takes the already-running clock and
    /// wires its change notifications to egui repaints.
    pub fn new(cc: &eframe::CreationContext<'_>, clock: ZooClock, config: &ZooConfig) -> Self {
        let repaint_ctx = cc.egui_ctx.clone();
        clock.subscribe(move |_snapshot| repaint_ctx.request_repaint());

        Self {
            clock,
            show_stats_window: config.hud.show_stats,
        }
    }

    /// Background/foreground pair, faded across the day/night flip.
    fn phase_colors(&self, ctx: &Context, is_daytime: bool) -> (Color32, Color32) {
        // 1.0 = full day, 0.0 = full night.
        let t = ctx.animate_bool_with_time(Id::new("phase-fade"), is_daytime, PHASE_FADE_SECONDS);
        (
            mix_color(NIGHT_BACKGROUND, DAY_BACKGROUND, t),
            mix_color(NIGHT_FOREGROUND, DAY_FOREGROUND, t),
        )
    }

    /// One rounded card: bold name over the sleep state, tinted by it.
    fn animal_card(&self, ctx: &Context, ui: &mut egui::Ui, animal: &AnimalState) {
        let awake = !animal.is_sleeping();
        let t = ctx.animate_bool_with_time(Id::new(animal.name().to_owned()), awake, PHASE_FADE_SECONDS);
        let fill = mix_color(SLEEPING_TINT, AWAKE_TINT, t);

        egui::Frame::none()
            .fill(fill)
            .rounding(Rounding::same(10.0))
            .inner_margin(Margin::symmetric(24.0, 12.0))
            .show(ui, |ui| {
                ui.set_min_width(200.0);
                ui.vertical_centered(|ui| {
                    ui.label(
                        RichText::new(animal.name())
                            .heading()
                            .strong()
                            .color(CARD_TEXT),
                    );
                    ui.label(
                        RichText::new(if animal.is_sleeping() { "Sleeping" } else { "Awake" })
                            .color(CARD_TEXT),
                    );
                });
            });
    }

    /// Content for the floating stats window.
    fn stats_window_content(&self, ui: &mut egui::Ui) {
        let snapshot = self.clock.snapshot();

        ui.style_mut().override_text_style = Some(egui::TextStyle::Monospace);

        let phase = DayPhase::from_daytime(snapshot.is_daytime);
        ui.label(format!("Phase:     {:>8}", phase.label()));
        ui.label(format!("Flips:     {:>8}", snapshot.generation));
        ui.label(format!(
            "Cycle:     {:>7.1}s",
            self.clock.cycle_period().as_secs_f32()
        ));
        ui.label(format!(
            "Next flip: {:>7.1}s",
            snapshot.time_to_flip.as_secs_f32()
        ));

        ui.add_space(8.0);
        ui.separator();
        ui.add_space(8.0);

        for animal in snapshot.animals() {
            let state = if animal.is_sleeping() { "sleeping" } else { "awake" };
            ui.label(format!("{:<8} {:>8}", animal.name(), state));
        }
    }
}

impl eframe::App for ZooApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let snapshot = self.clock.snapshot();
        let (background, foreground) = self.phase_colors(ctx, snapshot.is_daytime);

        // ---------- Bottom bar ----------
        egui::TopBottomPanel::bottom("status_bar")
            .frame(
                egui::Frame::none()
                    .fill(background)
                    .inner_margin(Margin::symmetric(8.0, 4.0)),
            )
            .show(ctx, |ui| {
                ui.visuals_mut().override_text_color = Some(foreground);
                ui.checkbox(&mut self.show_stats_window, "📊 Show Stats");
            });

        // ---------- Central panel ----------
        egui::CentralPanel::default()
            .frame(
                egui::Frame::none()
                    .fill(background)
                    .inner_margin(Margin::same(16.0)),
            )
            .show(ctx, |ui| {
                ui.visuals_mut().override_text_color = Some(foreground);

                ui.vertical_centered(|ui| {
                    ui.add_space(24.0);
                    let icon = if snapshot.is_daytime { "☀" } else { "🌙" };
                    ui.label(RichText::new(icon).size(56.0));
                    ui.add_space(24.0);

                    for animal in snapshot.animals() {
                        self.animal_card(ctx, ui, animal);
                        ui.add_space(12.0);
                    }
                });
            });

        // ---------- Floating stats window ----------
        if self.show_stats_window {
            egui::Window::new("📊 Statistics")
                .default_pos([10.0, 10.0])
                .resizable(false)
                .collapsible(true)
                .show(ctx, |ui| {
                    self.stats_window_content(ui);
                });
        }

        // Keep the countdown and fades moving between change notifications.
        ctx.request_repaint_after(Duration::from_millis(100));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mix_color_endpoints_midpoint_and_clamping() {
        let a = Color32::from_rgb(0, 0, 0);
        let b = Color32::from_rgb(200, 100, 50);
        assert_eq!(mix_color(a, b, 0.0), a);
        assert_eq!(mix_color(a, b, 1.0), b);
        assert_eq!(mix_color(a, b, 0.5), Color32::from_rgb(100, 50, 25));
        assert_eq!(mix_color(a, b, -1.0), a);
        assert_eq!(mix_color(a, b, 2.0), b);
    }
}
