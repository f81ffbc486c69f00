use std::sync::Once;

static INIT: Once = Once::new();

/// Installs a stderr subscriber filtered by `RUST_LOG` (default `warn`).
/// Stdout stays free for command output and the bridge protocol.
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .init();
    });
}
