// SPDX-License-Identifier: MPL-2.0
use iced_notify::app::{self, Flags};
use tracing_subscriber::EnvFilter;

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = pico_args::Arguments::from_env();

    let config_dir = args
        .opt_value_from_str("--config-dir")
        .unwrap_or_else(|err| {
            tracing::warn!(error = %err, "ignoring invalid --config-dir");
            None
        });
    let duration_ms = args
        .opt_value_from_str("--duration-ms")
        .unwrap_or_else(|err| {
            tracing::warn!(error = %err, "ignoring invalid --duration-ms");
            None
        });

    let leftover = args.finish();
    if !leftover.is_empty() {
        tracing::warn!(?leftover, "unused command line arguments");
    }

    tracing::info!("Starting IcedNotify");

    app::run(Flags {
        config_dir,
        duration_ms,
    })
}
