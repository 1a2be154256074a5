use std::sync::Arc;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::AppState;
use ward_core::{
    WardConfig,
    config::{disposition_types_from_env_value, page_size_from_env_value},
};

/// Crates whose events are shown at `info` unless `RUST_LOG` says otherwise.
const DEFAULT_DIRECTIVES: [&str; 4] = [
    "ward_run=info",
    "api_rest=info",
    "ward_core=info",
    "ward_openmrs=info",
];

/// Main entry point for the ward view server
///
/// Resolves configuration once at startup and serves the REST API.
///
/// # Environment Variables
/// - `WARD_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `WARD_PAGE_SIZE`: admissions page size advertised to clients (default: 50, max 1000)
/// - `WARD_DISPOSITION_TYPES`: comma-separated request types shown as pending
///   (default: "ADMIT,TRANSFER")
/// - `RUST_LOG`: extra tracing directives layered over the defaults
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - configuration values are invalid,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(with_default_directives(EnvFilter::from_default_env())?)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("WARD_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let cfg = Arc::new(config_from_env_values(
        std::env::var("WARD_PAGE_SIZE").ok(),
        std::env::var("WARD_DISPOSITION_TYPES").ok(),
    )?);

    tracing::info!(
        page_size = cfg.page_size(),
        disposition_types = ?cfg.disposition_types(),
        "++ Starting ward REST on {}",
        rest_addr
    );

    let app = api_rest::router(AppState::new(cfg));

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn with_default_directives(mut filter: EnvFilter) -> anyhow::Result<EnvFilter> {
    for directive in DEFAULT_DIRECTIVES {
        filter = filter.add_directive(directive.parse()?);
    }
    Ok(filter)
}

fn config_from_env_values(
    page_size: Option<String>,
    disposition_types: Option<String>,
) -> anyhow::Result<WardConfig> {
    let page_size = page_size_from_env_value(page_size)?;
    let disposition_types = disposition_types_from_env_value(disposition_types)?;
    Ok(WardConfig::new(page_size, disposition_types)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;
    use ward_core::{DispositionType, constants::DEFAULT_PAGE_SIZE};

    fn enabled_with_defaults(target_check: impl FnOnce() -> bool) -> bool {
        let filter = with_default_directives(EnvFilter::new("")).unwrap();
        let subscriber = tracing_subscriber::registry().with(filter);
        tracing::subscriber::with_default(subscriber, target_check)
    }

    #[test]
    fn library_warnings_pass_the_default_filter() {
        assert!(enabled_with_defaults(
            || tracing::enabled!(target: "ward_core::reconcile", Level::WARN)
        ));
        assert!(enabled_with_defaults(
            || tracing::enabled!(target: "ward_core::session", Level::INFO)
        ));
        assert!(enabled_with_defaults(
            || tracing::enabled!(target: "ward_openmrs::wire", Level::WARN)
        ));
    }

    #[test]
    fn debug_events_stay_off_by_default() {
        assert!(!enabled_with_defaults(
            || tracing::enabled!(target: "ward_core::reconcile", Level::DEBUG)
        ));
    }

    #[test]
    fn config_reads_page_size_and_types() {
        let cfg = config_from_env_values(Some("25".into()), Some("discharge".into())).unwrap();
        assert_eq!(cfg.page_size(), 25);
        assert_eq!(cfg.disposition_types(), &[DispositionType::Discharge]);
    }

    #[test]
    fn config_defaults_when_unset() {
        let cfg = config_from_env_values(None, None).unwrap();
        assert_eq!(cfg.page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(
            cfg.disposition_types(),
            &[DispositionType::Admit, DispositionType::Transfer]
        );
    }

    #[test]
    fn config_rejects_out_of_range_page_size() {
        assert!(config_from_env_values(Some("0".into()), None).is_err());
        assert!(config_from_env_values(Some("5000".into()), None).is_err());
    }
}
