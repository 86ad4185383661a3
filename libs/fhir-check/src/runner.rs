//! Sequential execution of every check case.

use sonde_client::FhirClient;

use crate::cases;
use crate::report::CheckReport;

/// Run every check case against the target server, strictly one at a time,
/// and collect the per-case outcomes.
pub async fn run_all(client: &FhirClient) -> CheckReport {
    let mut report = CheckReport::default();

    report.record(
        "metadata_is_available",
        cases::metadata_is_available(client).await,
    );

    report.record(
        "device_create_and_delete",
        cases::device::create_and_delete(client).await,
    );
    report.record(
        "device_duplicate_is_rejected",
        cases::device::duplicate_is_rejected(client).await,
    );
    report.record(
        "device_created_resource_is_readable",
        cases::device::created_resource_is_readable(client).await,
    );
    report.record(
        "device_delete_missing_returns_not_found",
        cases::device::delete_missing_returns_not_found(client).await,
    );

    report.record(
        "patient_create_and_delete",
        cases::patient::create_and_delete(client).await,
    );
    report.record(
        "patient_created_resource_is_readable",
        cases::patient::created_resource_is_readable(client).await,
    );
    report.record(
        "patient_search_by_identifier",
        cases::patient::search_by_identifier(client).await,
    );
    report.record(
        "patient_delete_missing_returns_not_found",
        cases::patient::delete_missing_returns_not_found(client).await,
    );

    report.record(
        "group_create_and_delete",
        cases::group::create_and_delete(client).await,
    );
    report.record(
        "group_created_resource_is_readable",
        cases::group::created_resource_is_readable(client).await,
    );
    report.record(
        "group_delete_missing_returns_not_found",
        cases::group::delete_missing_returns_not_found(client).await,
    );

    report.record(
        "observation_insert_and_delete",
        cases::observation::insert_and_delete(client).await,
    );
    report.record(
        "observation_filtered_search_returns_single_match",
        cases::observation::filtered_search_returns_single_match(client).await,
    );

    report.record(
        "bundle_batch_reports_created_entries",
        cases::bundle::batch_reports_created_entries(client).await,
    );

    report
}
