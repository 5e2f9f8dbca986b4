use std::sync::Once;

static INIT: Once = Once::new();

/// Installs a test subscriber once per binary. `RUST_LOG` overrides the
/// default `warn,plangeo=debug` filter.
pub fn init_tracing() {
    INIT.call_once(|| {
        let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn,plangeo=debug"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_test_writer()
            .try_init();
    });
}
