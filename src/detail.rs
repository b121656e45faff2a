//! Detail view shown when a tile is clicked.
//!
//! The gallery only reads `is_open`; the overlay itself lives in egui and
//! closes when the dimmed backdrop (or the close button) is clicked.

use crate::constants::*;
use egui::{Align2, Color32, Id, Order, RichText, Sense};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DetailView {
    open: bool,
    tile: Option<usize>,
}

impl DetailView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Tile that opened the view, while it is open
    pub fn tile(&self) -> Option<usize> {
        self.tile.filter(|_| self.open)
    }

    pub fn open(&mut self, tile: usize) {
        if self.open {
            return;
        }
        self.open = true;
        self.tile = Some(tile);
    }

    pub fn close(&mut self) {
        if !self.open {
            return;
        }
        self.open = false;
        self.tile = None;
    }
}

/// What the panel shows for the selected tile
pub struct DetailContent {
    pub label: String,
    pub texture: Option<egui::TextureId>,
    /// Natural image size, once loaded
    pub image_size: Option<egui::Vec2>,
}

/// Draw the overlay and panel. Closes `view` on a backdrop or button click.
pub fn draw_detail_view(ctx: &egui::Context, view: &mut DetailView, content: &DetailContent) {
    if !view.is_open() {
        return;
    }

    let screen = ctx.screen_rect();
    let backdrop = egui::Area::new(Id::new("detail_backdrop"))
        .order(Order::Middle)
        .fixed_pos(screen.min)
        .show(ctx, |ui| {
            let response = ui.allocate_rect(screen, Sense::click());
            ui.painter()
                .rect_filled(screen, 0.0, Color32::from_black_alpha(DETAIL_OVERLAY_ALPHA));
            response
        })
        .inner;

    let mut close_clicked = false;
    egui::Area::new(Id::new("detail_panel"))
        .order(Order::Foreground)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            egui::Frame::window(ui.style()).show(ui, |ui| {
                ui.heading(RichText::new(&content.label).color(Color32::from_rgb(40, 36, 30)));
                ui.add_space(8.0);

                match (content.texture, content.image_size) {
                    (Some(texture), Some(size)) => {
                        let scale = (DETAIL_PREVIEW_MAX / size.x.max(size.y)).min(1.0);
                        ui.add(egui::Image::new(egui::load::SizedTexture::new(
                            texture,
                            size * scale,
                        )));
                    }
                    _ => {
                        ui.label(RichText::new("Loading...").italics());
                    }
                }

                ui.add_space(8.0);
                if ui.button("Close").clicked() {
                    close_clicked = true;
                }
            });
        });

    if backdrop.clicked() || close_clicked {
        tracing::debug!("detail view closed");
        view.close();
    }
}
