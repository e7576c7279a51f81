use eframe::egui;
use tracing_subscriber::EnvFilter;

mod animation;
mod config;
mod panels;
mod particles;
mod sphere;
mod state;
mod widgets;

use state::AppState;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let (settings, first_run) = config::load_settings_or_default();
    if first_run {
        config::save_settings(&settings);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Portfolio Lab")
            .with_inner_size([1320.0, 860.0])
            .with_min_inner_size([960.0, 600.0]),
        vsync: true,
        ..Default::default()
    };
    eframe::run_native(
        "Portfolio Lab",
        options,
        Box::new(move |cc| {
            let mut state = AppState::new(settings);
            state.attach_context(cc.egui_ctx.clone());
            Box::new(PortfolioApp { state })
        }),
    )
}

struct PortfolioApp {
    state: AppState,
}

impl eframe::App for PortfolioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let s = &mut self.state;

        // Poll for the chat reply (non-blocking)
        s.poll_chat_reply();
        if s.session.is_pending() {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }

        ctx.set_visuals(if s.settings.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        });

        panels::show(s, ctx);
    }
}
