use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;
use tokio::sync::mpsc;
use tracing::{error, info, warn};
mod assets;
mod catalog;
mod config;
mod controller;
mod error;
mod events;
mod layout;
mod mappings;
mod ranking;
mod services;
mod tracker;
mod utils;

use catalog::LinkCatalog;
use config::Config;
use controller::{Flow, PickerController};
use services::{
    create_event_sources, create_notifier, create_paster, virtual_device::VIRTUAL_DEVICE_NAME,
    TerminalPresenter, VirtualDevice,
};
use tracker::UsageTracker;

#[derive(Parser, Debug)]
#[command(name = "pingmote")]
#[command(about = "Глобальный пикер эмоутов: ссылка на выбранную картинку вставляется в активное окно")]
struct Args {
    /// Путь к файлу конфигурации
    #[arg(short, long, default_value = "pingmote.toml")]
    config: String,

    /// Режим сухого запуска (без перехвата клавиатуры и вставки)
    #[arg(long)]
    dry_run: bool,

    /// Уровень логирования (по умолчанию из конфигурации)
    #[arg(long)]
    log_level: Option<String>,

    /// Каталог ассетов (links.txt, frequencies.json, resized/)
    #[arg(long)]
    assets: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Загрузка конфигурации
    let mut config = Config::load(&args.config)?;
    if let Some(assets) = &args.assets {
        config = config.with_assets_dir(assets);
    }
    let config = Arc::new(config);

    // Инициализация системы логирования
    init_tracing(args.log_level.as_deref().unwrap_or(&config.logging.level))?;

    info!("Запуск pingmote v{}", env!("CARGO_PKG_VERSION"));
    info!("Конфигурация загружена из: {}", args.config);

    if args.dry_run {
        warn!("Режим сухого запуска - реальные действия отключены");
    } else {
        // Проверка прав доступа
        utils::permissions::check_permissions()?;
    }

    // Ассеты: отсутствие каталога или повреждённый JSON - фатальные ошибки старта
    let image_dir = config.paths.image_dir();
    let images = assets::scan_images(&image_dir)
        .with_context(|| format!("Каталог картинок недоступен: {:?}", image_dir))?;
    let tracker = Arc::new(
        UsageTracker::reconcile(config.paths.frequencies_file(), &assets::present_names(&images))
            .with_context(|| format!("Не удалось загрузить {:?}", config.paths.frequencies_file()))?,
    );
    let (catalog, _warnings) = LinkCatalog::load(&config.paths.links_file())
        .with_context(|| format!("Не удалось загрузить {:?}", config.paths.links_file()))?;

    // Инициализация компонентов
    let virtual_device = Arc::new(VirtualDevice::new(VIRTUAL_DEVICE_NAME, args.dry_run)?);
    let paster = create_paster(config.clone(), virtual_device.clone(), args.dry_run)?;
    let notifier = create_notifier(args.dry_run).await;
    let sources = create_event_sources(config.clone(), args.dry_run)?;

    let mut controller = PickerController::new(
        config.clone(),
        catalog,
        tracker,
        paster,
        Box::new(TerminalPresenter::stdout()),
        images,
    )?;

    info!("Все компоненты инициализированы");

    // Все источники пишут в один канал, цикл событий читает его по одному
    let (events_tx, mut events_rx) = mpsc::unbounded_channel();
    let mut handles = Vec::new();
    for source in sources {
        let name = source.name();
        let events_tx = events_tx.clone();
        handles.push(tokio::spawn(async move {
            if let Err(e) = source.run(events_tx).await {
                error!("Ошибка в {}: {}", name, e);
            }
        }));
    }
    drop(events_tx);

    notifier.notify("Ready", "Пикер создан и скрыт").await;
    info!(
        "Показать/скрыть: {}, аварийный выход: {}",
        config.hotkeys.activate, config.hotkeys.kill
    );

    // Ожидание событий или сигнала завершения
    let flow = tokio::select! {
        result = controller.run(&mut events_rx) => result,
        signal_result = signal::ctrl_c() => {
            match signal_result {
                Ok(()) => info!("Получен сигнал завершения (Ctrl+C)"),
                Err(err) => error!("Ошибка при ожидании сигнала завершения: {}", err),
            }
            Ok(Flow::Exit)
        }
    };

    let flow = match flow {
        Ok(flow) => flow,
        Err(e) => {
            error!("Ошибка в цикле событий: {}", e);
            notifier.notify("Pingmote - ошибка в цикле событий", &e.to_string()).await;
            Flow::Exit
        }
    };

    info!("Завершение работы...");

    controller.shutdown();
    for handle in handles {
        handle.abort();
    }

    if flow == Flow::Kill {
        warn!("Аварийное завершение");
        std::process::exit(1);
    }

    info!("pingmote завершил работу");
    Ok(())
}

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
        .init();

    Ok(())
}
