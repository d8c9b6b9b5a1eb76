// src/bin/gui.rs
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]
use covid19_analyzer::{
    config::consts::{WINDOW_H, WINDOW_W},
    gui,
    log::{self, LogTarget},
};
use eframe::egui::{IconData, ViewportBuilder};

/// 32x32 icon: a rising curve on a dark tile, drawn in code so the binary
/// needs no image assets.
fn app_icon() -> IconData {
    const N: u32 = 32;
    let mut rgba = Vec::with_capacity((N * N * 4) as usize);
    for y in 0..N {
        for x in 0..N {
            // logistic curve in icon space, y grows downward
            let t = (x as f32 - 16.0) / 4.0;
            let curve = N as f32 - 4.0 - 24.0 / (1.0 + (-t).exp());
            let on_curve = (y as f32 - curve).abs() < 1.6;
            let px = if on_curve { [214, 39, 40, 255] } else { [28, 32, 40, 255] };
            rgba.extend_from_slice(&px);
        }
    }
    IconData { rgba, width: N, height: N }
}

fn main() {
    log::init(LogTarget::File, false);

    let options = eframe::NativeOptions {
        viewport: ViewportBuilder::default()
            .with_inner_size([WINDOW_W, WINDOW_H])
            .with_icon(app_icon()),
        ..Default::default()
    };

    if let Err(e) = gui::run(options) {
        eprintln!("GUI failed: {e}");
        std::process::exit(1);
    }
}
