use color_eyre::{eyre::eyre, Result};
use eframe::egui;
use padwatch::config::{config_path, Config};
use padwatch::controller::PollingSession;
use padwatch::ui::PadViewerUI;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    setup()?;

    let path = config_path()?;
    let config = Config::load_or_create(&path)
        .map_err(|e| eyre!("Failed to load config from {}: {}", path.display(), e))?;
    info!("Loaded config from {}", path.display());

    // Binding failure is fatal, there is no degraded mode
    let session = PollingSession::open(Some(config.polling.session_settings()))
        .map_err(|e| eyre!("Failed to open polling session: {}", e))?;

    info!("Starting viewer");
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(config.viewer.title.clone())
            .with_inner_size([config.viewer.width, config.viewer.height]),
        ..Default::default()
    };

    let title = config.viewer.title.clone();
    eframe::run_native(
        &title,
        native_options,
        Box::new(move |_cc| Ok(Box::new(PadViewerUI::new(session, &config)))),
    )
    .map_err(|e| eyre!("Viewer terminated with error: {}", e))?;

    Ok(())
}

fn setup() -> Result<()> {
    if std::env::var("RUST_LIB_BACKTRACE").is_err() {
        std::env::set_var("RUST_LIB_BACKTRACE", "0")
    }
    color_eyre::install()?;
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info")
    }
    setup_logging_env();
    Ok(())
}

fn setup_logging_env() {
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .pretty()
        .init();
}
