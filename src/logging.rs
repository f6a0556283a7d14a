//! Logger setup: `android_logger` on device, a `tracing-subscriber` fmt layer
//! on the host. Handlers log through the `log` facade with a `target:` naming
//! the subsystem ("PDFView", "Signature"); that name is carried into each line.

use log::LevelFilter;

const DEFAULT_TAG: &str = "DynamicSign";

fn default_level() -> LevelFilter {
    if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Module paths make poor channel names; explicit `target:` values are kept.
#[cfg(any(target_os = "android", test))]
fn tag_for(target: &str) -> &str {
    if target.contains("::") || target == env!("CARGO_CRATE_NAME") {
        DEFAULT_TAG
    } else {
        target
    }
}

#[cfg(target_os = "android")]
pub fn init() {
    // init_once ignores every call after the first.
    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(default_level())
            .with_tag(DEFAULT_TAG)
            .format(|out, record| {
                let tag = tag_for(record.target());
                if tag == DEFAULT_TAG {
                    write!(out, "{}", record.args())
                } else {
                    write!(out, "[{tag}] {}", record.args())
                }
            }),
    );
}

#[cfg(not(target_os = "android"))]
pub fn init() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level().as_str().to_ascii_lowercase()));

    // try_init also bridges `log` records; it fails harmlessly when a
    // subscriber is already installed (second call, test harness).
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_ansi(false))
        .try_init();
}
