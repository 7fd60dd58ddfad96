// ui.rs - Window: board rendering, controls and keyboard input
// The board is read through Controller::view, so a frame never shows half a generation.

use std::path::PathBuf;

use conway::{Command, CommandOutcome, Controller, PATTERNS, Simulation};
use eframe::egui;
use egui::{Color32, Pos2, Rect, Stroke, Vec2};
use tokio::runtime::Runtime;
use tokio::task::JoinHandle;
use tracing::warn;

use crate::config::AppConfig;
use crate::input;
use crate::ticker::spawn_ticker;

const BOX_SIZE: f32 = 15.0;
const SPACING: f32 = 0.5;

pub struct LifeApp {
    controller: Controller,
    runtime: Runtime,
    ticker: JoinHandle<()>,

    pub save_file: String,
    pub status: String,
    pub live_color: Color32,
    pub dead_color: Color32,
    pub marker_color: Color32,
    pub selected_pattern: usize,
    random_seed: u64,
}

impl LifeApp {
    pub fn new(cc: &eframe::CreationContext<'_>, controller: Controller, runtime: Runtime, config: &AppConfig) -> Self {
        let ctx = cc.egui_ctx.clone();
        let ticker = spawn_ticker(runtime.handle(), controller.clone(), move || ctx.request_repaint());

        Self {
            controller,
            runtime,
            ticker,
            save_file: config.save_file.display().to_string(),
            status: String::new(),
            live_color: Color32::from_rgb(0, 200, 0),
            dead_color: Color32::from_rgb(40, 40, 40),
            marker_color: Color32::from_rgb(230, 200, 40),
            selected_pattern: 0,
            random_seed: 0,
        }
    }

    fn run(&mut self, command: Command) {
        let label = match &command {
            Command::Save(_) => "Saved",
            Command::Load(_) => "Loaded",
            _ => "",
        };
        match self.controller.execute(command) {
            Ok(CommandOutcome::Applied) if !label.is_empty() => {
                self.status = format!("{label} {}", self.save_file);
            }
            Ok(_) => {}
            Err(err) => {
                warn!(error = %err, "command failed");
                self.status = err.to_string();
            }
        }
    }

    fn handle_keys(&mut self, ctx: &egui::Context) {
        // Typing a file name must not move the marker.
        if ctx.wants_keyboard_input() {
            return;
        }
        let pressed: Vec<_> = ctx.input(|i| {
            i.events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::Key { key, pressed: true, .. } => input::action_for_key(*key),
                    _ => None,
                })
                .collect()
        });
        let file = PathBuf::from(&self.save_file);
        for action in pressed {
            for command in action.commands(&file) {
                self.run(command);
            }
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        let paused = self.controller.is_paused();

        ui.horizontal(|ui| {
            let button_text = if paused { "▶ Start" } else { "⏸ Pause" };
            if ui.button(button_text).clicked() {
                self.controller.pause_toggle();
            }

            if ui.button("⏹ Clear").clicked() {
                self.controller.set_paused(true);
                self.controller.clear();
            }

            if ui.button("🎲 Random").clicked() {
                self.controller.set_paused(true);
                self.random_seed = self.random_seed.wrapping_add(1);
                self.controller.randomize(self.random_seed);
            }

            ui.separator();

            // Pattern dropdown
            ui.label("Pattern:");
            egui::ComboBox::from_id_source("pattern_selector")
                .selected_text(PATTERNS[self.selected_pattern].name)
                .show_ui(ui, |ui| {
                    for (i, pattern) in PATTERNS.iter().enumerate() {
                        ui.selectable_value(&mut self.selected_pattern, i, pattern.name);
                    }
                });

            if ui.button("Apply Pattern").clicked() {
                self.controller.set_paused(true);
                self.controller.apply_pattern(&PATTERNS[self.selected_pattern]);
            }

            ui.separator();

            ui.label(format!("Generation: {}", self.controller.generation()));
        });

        ui.separator();

        ui.horizontal(|ui| {
            ui.label("Speed:");
            if ui.button("Slower").clicked() {
                self.controller.slow_down();
            }
            if ui.button("Faster").clicked() {
                self.controller.speed_up();
            }

            ui.separator();

            ui.label("Live:");
            ui.color_edit_button_srgba(&mut self.live_color);
            ui.label("Dead:");
            ui.color_edit_button_srgba(&mut self.dead_color);
            ui.label("Marker:");
            ui.color_edit_button_srgba(&mut self.marker_color);
        });

        ui.horizontal(|ui| {
            ui.label("File:");
            ui.text_edit_singleline(&mut self.save_file);
            let file = PathBuf::from(&self.save_file);
            if ui.button("Save").clicked() {
                self.run(Command::SetPaused(true));
                self.run(Command::Save(file.clone()));
            }
            if ui.button("Load").clicked() {
                self.run(Command::SetPaused(true));
                self.run(Command::Load(file));
            }
            ui.label(self.status.as_str());
        });
    }

    /// Paint the board and return the cell that was clicked, if any.
    fn board(&self, ui: &mut egui::Ui, sim: &Simulation) -> Option<(usize, usize)> {
        let grid = sim.grid();
        let (width, height) = (grid.width(), grid.height());

        let start_pos = ui.cursor().min;
        let total_size = Vec2::new(
            (BOX_SIZE + SPACING) * width as f32 - SPACING,
            (BOX_SIZE + SPACING) * height as f32 - SPACING,
        );
        let (response, painter) = ui.allocate_painter(total_size, egui::Sense::click());

        // Fill background
        painter.rect_filled(Rect::from_min_size(start_pos, total_size), 0.0, Color32::BLACK);

        let marker = sim.is_paused().then(|| sim.cursor_cell());
        for (y, row) in grid.rows().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let rect = cell_rect(start_pos, x, y);
                let cell_color = if cell.is_alive() { self.live_color } else { self.dead_color };
                painter.rect_filled(rect, 1.0, cell_color);

                if marker == Some((x, y)) {
                    painter.rect_stroke(rect, 1.0, Stroke::new(2.0, self.marker_color));
                } else {
                    painter.rect_stroke(rect, 1.0, Stroke::new(0.2, Color32::from_gray(60)));
                }
            }
        }

        // Clicks only edit the board while paused.
        if !response.clicked() || !sim.is_paused() {
            return None;
        }
        let pos = response.interact_pointer_pos()?;
        let x = ((pos.x - start_pos.x) / (BOX_SIZE + SPACING)).floor();
        let y = ((pos.y - start_pos.y) / (BOX_SIZE + SPACING)).floor();
        if x < 0.0 || y < 0.0 || x >= width as f32 || y >= height as f32 {
            return None;
        }
        Some((x as usize, y as usize))
    }

    fn status_line(sim: &Simulation) -> String {
        let (x, y) = sim.cursor().position();
        let state = if sim.is_paused() { "Paused" } else { "Running" };
        format!(
            "State: {state}    Marker pos: ({x}, {y})    Update period(ms): {}ms    Workers: {}",
            sim.interval_ms(),
            sim.workers()
        )
    }
}

fn cell_rect(start_pos: Pos2, x: usize, y: usize) -> Rect {
    let left = start_pos.x + x as f32 * (BOX_SIZE + SPACING);
    let top = start_pos.y + y as f32 * (BOX_SIZE + SPACING);
    Rect::from_min_size(egui::pos2(left, top), Vec2::splat(BOX_SIZE))
}

impl eframe::App for LifeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_keys(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Conway's Game of Life (toroidal)");

            self.controls(ui);

            ui.separator();
            ui.label(input::HELP);
            ui.label("Click a cell while paused to toggle it.");
            ui.separator();

            // Draw under the controller lock, apply the click after releasing it.
            let controller = self.controller.clone();
            let (clicked, status, live) = controller.view(|sim| {
                (self.board(ui, sim), Self::status_line(sim), sim.grid().population())
            });
            if let Some((x, y)) = clicked {
                self.controller.toggle_cell_at(x, y);
            }

            ui.separator();
            ui.label(status);

            let total = self.controller.view(|sim| sim.grid().cells().len());
            ui.horizontal(|ui| {
                ui.label(format!("Live cells: {live}"));
                ui.label(format!("Dead cells: {}", total - live));
                ui.label(format!("Population: {:.1}%", (live as f32 / total as f32) * 100.0));
            });
        });

        // Repaint at least once per period while running; the ticker wakes us too.
        if !self.controller.is_paused() {
            ctx.request_repaint_after(self.controller.interval());
        }
    }
}

impl Drop for LifeApp {
    fn drop(&mut self) {
        self.ticker.abort();
        // Wait for the cancelled task so no advance is left holding the lock.
        let _ = self.runtime.block_on(&mut self.ticker);
    }
}
