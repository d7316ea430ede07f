mod app;
mod config;
mod downsample;
mod logger;
mod metrics;
mod net;
mod store;
mod types;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use dotenv::dotenv;
use eframe::egui;
use log::{error, info, warn};

use app::DashboardApp;
use config::AppConfig;
use store::SeriesStore;
use types::LinkEvent;

const CONFIG_PATH: &str = "stridehub.toml";

fn main() {
    logger::init_logger();
    info!("Application starting");

    dotenv().ok(); // 加载 .env 文件

    let config = match AppConfig::load_or_default(CONFIG_PATH) {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };
    info!(
        "Sensor gateway: {}:{} (device {})",
        config.connection.host, config.connection.port, config.connection.device_id
    );

    let store = SeriesStore::new();
    let (link_sender, link_receiver) =
        crossbeam_channel::bounded(config.channels.link_event_capacity);
    let shutdown_signal = Arc::new(AtomicBool::new(false));

    let ingest_store = store.clone();
    let ingest_config = config.connection.clone();
    let ingest_shutdown = Arc::clone(&shutdown_signal);
    let ingest_handle = thread::spawn(move || {
        let events = link_sender.clone();
        if let Err(e) = net::run_sensor_client(&ingest_config, ingest_store, events, ingest_shutdown)
        {
            error!("Ingestion thread failed: {}", e);
            let _ = link_sender.try_send(LinkEvent::Fatal(e.to_string()));
        }
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height])
            .with_resizable(config.window.resizable),
        ..Default::default()
    };

    let window_title = config.window.title.clone();
    if let Err(e) = eframe::run_native(
        &window_title,
        options,
        Box::new(move |_cc| Ok(Box::new(DashboardApp::new(store, link_receiver, config)))),
    ) {
        error!("GUI failed: {}", e);
        std::process::exit(1);
    }

    // GUI 关闭后，发送关闭信号给采集线程
    info!("GUI closed, signaling ingestion thread to shutdown");
    shutdown_signal.store(true, Ordering::Relaxed);

    // 等待采集线程优雅退出
    let join_result = thread::spawn(move || ingest_handle.join());

    match join_result.join() {
        Ok(Ok(())) => info!("Ingestion thread shut down gracefully"),
        Ok(Err(e)) => error!("Ingestion thread panicked: {:?}", e),
        Err(_) => {
            warn!("Ingestion thread did not shut down within timeout");
        }
    }
}
