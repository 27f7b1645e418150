use common::games::puzzle2048::{Direction, TileView};
use eframe::egui;

const GAP: f32 = 6.0;

/// Paints the board. Fresh and merged tiles grow in with `progress`
/// (0.0 right after the move, 1.0 at rest).
pub fn render_board(
    ui: &mut egui::Ui,
    size: usize,
    tiles: &[TileView],
    tile_size: f32,
    progress: f32,
    hint: Option<Direction>,
) {
    let side = size as f32 * (tile_size + GAP) + GAP;
    let (board_rect, _) = ui.allocate_exact_size(egui::vec2(side, side), egui::Sense::hover());
    let painter = ui.painter_at(board_rect);

    painter.rect_filled(board_rect, 8.0, egui::Color32::from_rgb(187, 173, 160));

    let cell_rect = |row: usize, col: usize| {
        let min = board_rect.min
            + egui::vec2(
                GAP + col as f32 * (tile_size + GAP),
                GAP + row as f32 * (tile_size + GAP),
            );
        egui::Rect::from_min_size(min, egui::vec2(tile_size, tile_size))
    };

    for row in 0..size {
        for col in 0..size {
            painter.rect_filled(cell_rect(row, col), 6.0, tile_colors(0).0);
        }
    }

    for view in tiles {
        let tile = view.tile;
        let scale = if view.is_new {
            progress
        } else if view.is_merged {
            1.0 + 0.15 * (1.0 - (2.0 * progress - 1.0).abs())
        } else {
            1.0
        };
        if scale <= 0.0 {
            continue;
        }

        let rect = match view.moved_from {
            Some(from) if progress < 1.0 => {
                let start = cell_rect(from.row, from.col).center();
                let end = cell_rect(tile.row, tile.col).center();
                egui::Rect::from_center_size(
                    start.lerp(end, progress),
                    egui::vec2(tile_size, tile_size),
                )
            }
            _ => cell_rect(tile.row, tile.col),
        };
        let rect = egui::Rect::from_center_size(rect.center(), rect.size() * scale);

        let (bg, text_color) = tile_colors(tile.value);
        painter.rect_filled(rect, 6.0, bg);
        painter.text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            tile.value.to_string(),
            egui::FontId::proportional(font_size(tile.value, rect.width())),
            text_color,
        );
    }

    if let Some(direction) = hint {
        let (dr, dc) = direction.delta();
        let center = board_rect.center();
        let tip = center + egui::vec2(dc as f32, dr as f32) * side * 0.3;
        painter.arrow(
            center,
            tip - center,
            egui::Stroke::new(4.0, egui::Color32::from_rgba_unmultiplied(60, 58, 50, 160)),
        );
    }
}

fn font_size(value: u32, width: f32) -> f32 {
    if value >= 1000 {
        width * 0.25
    } else if value >= 100 {
        width * 0.3
    } else {
        width * 0.4
    }
}

fn tile_colors(value: u32) -> (egui::Color32, egui::Color32) {
    let dark_text = egui::Color32::from_rgb(119, 110, 101);
    let light_text = egui::Color32::from_rgb(249, 246, 242);

    match value {
        0 => (egui::Color32::from_rgb(205, 193, 180), egui::Color32::TRANSPARENT),
        2 => (egui::Color32::from_rgb(238, 228, 218), dark_text),
        4 => (egui::Color32::from_rgb(237, 224, 200), dark_text),
        8 => (egui::Color32::from_rgb(242, 177, 121), light_text),
        16 => (egui::Color32::from_rgb(245, 149, 99), light_text),
        32 => (egui::Color32::from_rgb(246, 124, 95), light_text),
        64 => (egui::Color32::from_rgb(246, 94, 59), light_text),
        128 => (egui::Color32::from_rgb(237, 207, 114), light_text),
        256 => (egui::Color32::from_rgb(237, 204, 97), light_text),
        512 => (egui::Color32::from_rgb(237, 200, 80), light_text),
        1024 => (egui::Color32::from_rgb(237, 197, 63), light_text),
        2048 => (egui::Color32::from_rgb(237, 194, 46), light_text),
        _ => (egui::Color32::from_rgb(60, 58, 50), light_text),
    }
}
