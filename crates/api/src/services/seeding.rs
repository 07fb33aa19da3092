//! Seeds every default batch and records the outcome metrics.

use domain::services::SeedReport;
use domain::DomainResult;

use crate::app::AppState;
use crate::middleware::metrics::record_seed_report;

pub async fn run_seeding(state: &AppState) -> DomainResult<SeedReport> {
    let report = state.seeder().run().await?;
    record_seed_report(&report);
    Ok(report)
}
