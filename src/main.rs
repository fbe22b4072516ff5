use clap::Parser;
use miette::{IntoDiagnostic, Result};
use policy_pay::application::payments::PaymentService;
use policy_pay::config::Cli;
use policy_pay::domain::ports::{IdGeneratorBox, TransactionStoreBox};
use policy_pay::infrastructure::id::TimestampIdGenerator;
use policy_pay::infrastructure::in_memory::InMemoryTransactionStore;
use policy_pay::interfaces::http::{AppState, app};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if cli.log_json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let fees = cli.fee_schedule().into_diagnostic()?;

    let store: TransactionStoreBox = Box::new(InMemoryTransactionStore::new());
    let ids: IdGeneratorBox = Box::new(TimestampIdGenerator::new());
    let state = AppState::new(PaymentService::new(store, ids, fees));

    let listener = tokio::net::TcpListener::bind(cli.bind).await.into_diagnostic()?;
    tracing::info!(
        addr = %cli.bind,
        minimum_fee = %fees.minimum_fee,
        fee_rate = %fees.fee_rate,
        tax_rate = %fees.tax_rate,
        "payment backend listening"
    );

    axum::serve(listener, app(state)).await.into_diagnostic()?;
    Ok(())
}
