//! Shared fixtures for the example verification tests.
//!
//! Each test scripts a full provisioning lifecycle through the mock
//! executor: init, first apply, idempotent re-apply, output read, destroy.

#![allow(dead_code)]

use std::sync::Arc;

use serde_json::json;

use tfverify_runner::{MockExecutor, MockResponse};
use tfverify_terraform::Terraform;

pub const INIT_OK: &str = "Terraform has been successfully initialized!\n";

pub const INSTANCE_ID: &str = "92f0b9c6-51a7-4f3e-8c1d-6a2b41e09d37";

pub fn apply_ok(added: u32) -> String {
    format!("Apply complete! Resources: {added} added, 0 changed, 0 destroyed.\n")
}

pub fn apply_noop() -> String {
    "No changes. Your infrastructure matches the configuration.\n\n\
     Apply complete! Resources: 0 added, 0 changed, 0 destroyed.\n"
        .to_string()
}

pub fn destroy_ok(destroyed: u32) -> String {
    format!("Destroy complete! Resources: {destroyed} destroyed.\n")
}

/// Mock executor scripted for one successful lifecycle around the given
/// outputs payload.
pub fn scripted_lifecycle(outputs_json: String, resources: u32) -> MockExecutor {
    MockExecutor::new().with_responses(vec![
        MockResponse::success(INIT_OK),
        MockResponse::success(apply_ok(resources)),
        MockResponse::success(apply_noop()),
        MockResponse::success(outputs_json),
        MockResponse::success(destroy_ok(resources)),
    ])
}

pub fn driver(executor: &MockExecutor) -> Terraform {
    Terraform::new(Arc::new(executor.clone()))
}

/// The cleanup-always property: destroy must run exactly once per test.
pub fn assert_destroy_ran_once(executor: &MockExecutor) {
    assert_eq!(
        executor.get_operation_calls("destroy").len(),
        1,
        "destroy must run exactly once"
    );
}

/// Instance output block shared by the examples.
pub fn instance_json(alias: &str) -> serde_json::Value {
    json!({
        "id": INSTANCE_ID,
        "arn": format!("arn:aws:connect:eu-central-1:123456789012:instance/{INSTANCE_ID}"),
        "identity_management_type": "CONNECT_MANAGED",
        "inbound_calls_enabled": true,
        "outbound_calls_enabled": true,
        "instance_alias": alias,
        "service_role": "arn:aws:iam::123456789012:role/aws-service-role/connect.amazonaws.com/AWSServiceRoleForAmazonConnect_fo3k",
        "status": "ACTIVE",
    })
}

fn hoop_slot(day: &str, start: (u8, u8), end: (u8, u8)) -> serde_json::Value {
    json!({
        "day": day,
        "start_time": [{ "hours": start.0, "minutes": start.1 }],
        "end_time": [{ "hours": end.0, "minutes": end.1 }],
    })
}

/// Hours-of-operation output block: one weekday set and one weekend set
/// split around a lunch break.
pub fn hours_of_operations_json() -> serde_json::Value {
    json!({
        "weekday": {
            "hours_of_operations_id": "0aa563a0-47ab-4bbb-8c10-719df3764b21",
            "name": "weekday",
            "description": "HOOP for weekdays",
            "time_zone": "EST",
            "config": [
                hoop_slot("MONDAY", (9, 0), (17, 0)),
                hoop_slot("TUESDAY", (9, 0), (17, 0)),
                hoop_slot("WEDNESDAY", (9, 0), (17, 0)),
                hoop_slot("THURSDAY", (9, 0), (17, 0)),
                hoop_slot("FRIDAY", (9, 0), (17, 0)),
            ],
        },
        "weekend_with_lunch_break": {
            "hours_of_operations_id": "77e26bcd-7e71-4c79-9bbc-c16b03d17bb2",
            "name": "weekend_with_lunch_break",
            "description": "HOOP for weekends with a lunch break",
            "time_zone": "EST",
            "config": [
                hoop_slot("SATURDAY", (9, 0), (12, 0)),
                hoop_slot("SATURDAY", (13, 0), (17, 0)),
                hoop_slot("SUNDAY", (9, 0), (12, 0)),
                hoop_slot("SUNDAY", (13, 0), (17, 0)),
            ],
        },
    })
}
