// src/main.rs
//
// Nombre symbolique : point d’entrée natif (feature `gui`)
// ------------------------------------------------------
// Journal : RUST_LOG=debug pour voir chaque conversion,
// RUST_LOG=nombre_symbolique=trace pour les reconnaisseurs.

use eframe::egui;
use env_logger::Env;
use log::info;

mod app;

use app::AppSymbolique;

const TITRE_APP: &str = "Nombre symbolique";

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    info!("démarrage de {TITRE_APP}");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(TITRE_APP)
            .with_inner_size([560.0, 740.0])
            .with_min_inner_size([420.0, 620.0]),
        ..Default::default()
    };

    eframe::run_native(
        TITRE_APP,
        options,
        Box::new(|_cc| Ok(Box::<AppSymbolique>::default())),
    )
}
