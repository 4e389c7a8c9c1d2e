//! Properties of the harness lifecycle itself: cleanup on every exit
//! path, idempotency enforcement, and transient-error retries.

mod common;

use std::time::Duration;

use serde_json::json;

use tfverify_harness::{check, init_test_logging, ExampleTest, HarnessError};
use tfverify_runner::{MockExecutor, MockResponse};
use tfverify_terraform::{RetryPolicy, TerraformError, TerraformOptions};

fn passing_outputs() -> String {
    json!({ "instance": { "id": "i-123" } }).to_string()
}

fn example() -> ExampleTest {
    ExampleTest::with_options(
        TerraformOptions::new("../examples/simple"),
        "amazon_connect",
    )
}

/// Assertions that accept any outputs.
fn accept_all(
) -> impl FnOnce(&tfverify_terraform::OutputMap) -> tfverify_harness::HarnessResult<()> {
    |_outputs| Ok(())
}

#[tokio::test]
async fn test_lifecycle_order_on_success() {
    init_test_logging();
    let executor = common::scripted_lifecycle(passing_outputs(), 1);
    let tf = common::driver(&executor);

    example().run(&tf, accept_all()).await.unwrap();

    let operations: Vec<String> = executor
        .get_calls()
        .iter()
        .map(|c| c.operation().to_string())
        .collect();
    assert_eq!(operations, ["init", "apply", "apply", "output", "destroy"]);
}

#[tokio::test]
async fn test_commands_run_in_the_example_directory() {
    init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let executor = common::scripted_lifecycle(passing_outputs(), 1);
    let tf = common::driver(&executor);

    let example = ExampleTest::with_options(TerraformOptions::new(dir.path()), "amazon_connect");
    example.run(&tf, accept_all()).await.unwrap();

    for call in executor.get_calls() {
        assert_eq!(call.working_dir, dir.path());
    }
}

#[tokio::test]
async fn test_destroy_runs_when_init_fails() {
    init_test_logging();
    let executor = MockExecutor::new().with_responses(vec![
        MockResponse::failure(1, "Error: Failed to query available provider packages"),
        MockResponse::success(common::destroy_ok(0)),
    ]);
    let tf = common::driver(&executor);

    let err = example().run(&tf, accept_all()).await.unwrap_err();

    assert!(matches!(
        err,
        HarnessError::Terraform(TerraformError::InitFailed(_))
    ));
    common::assert_destroy_ran_once(&executor);
}

#[tokio::test]
async fn test_destroy_runs_when_apply_fails() {
    init_test_logging();
    let executor = MockExecutor::new().with_responses(vec![
        MockResponse::success(common::INIT_OK),
        MockResponse::failure(1, "Error: creating Connect Instance: AccessDeniedException"),
        MockResponse::success(common::destroy_ok(0)),
    ]);
    let tf = common::driver(&executor);

    let err = example().run(&tf, accept_all()).await.unwrap_err();

    assert!(matches!(
        err,
        HarnessError::Terraform(TerraformError::ApplyFailed(_))
    ));
    common::assert_destroy_ran_once(&executor);
}

#[tokio::test]
async fn test_destroy_runs_when_second_apply_is_not_idempotent() {
    init_test_logging();
    let executor = MockExecutor::new().with_responses(vec![
        MockResponse::success(common::INIT_OK),
        MockResponse::success(common::apply_ok(3)),
        // second apply keeps changing a resource
        MockResponse::success("Apply complete! Resources: 0 added, 1 changed, 0 destroyed.\n"),
        MockResponse::success(common::destroy_ok(3)),
    ]);
    let tf = common::driver(&executor);

    let err = example().run(&tf, accept_all()).await.unwrap_err();

    match err {
        HarnessError::Terraform(TerraformError::NonIdempotent { counts }) => {
            assert_eq!(counts.changed, 1);
        }
        other => panic!("unexpected error: {other}"),
    }
    common::assert_destroy_ran_once(&executor);
}

#[tokio::test]
async fn test_destroy_runs_when_assertion_fails() {
    init_test_logging();
    let executor = common::scripted_lifecycle(passing_outputs(), 1);
    let tf = common::driver(&executor);

    let err = example()
        .run(&tf, |outputs| {
            let id = outputs.field("instance")?.field("id")?;
            check::expect_eq(id.path(), id.as_str()?, "different-id")?;
            Ok(())
        })
        .await
        .unwrap_err();

    match err {
        HarnessError::Assertion { field, .. } => {
            assert_eq!(field, "amazon_connect.instance.id");
        }
        other => panic!("unexpected error: {other}"),
    }
    common::assert_destroy_ran_once(&executor);
}

#[tokio::test]
async fn test_destroy_runs_on_output_shape_error() {
    init_test_logging();
    let executor = common::scripted_lifecycle(passing_outputs(), 1);
    let tf = common::driver(&executor);

    let err = example()
        .run(&tf, |outputs| {
            outputs.field("hours_of_operations")?;
            Ok(())
        })
        .await
        .unwrap_err();

    match err {
        HarnessError::Shape(shape) => {
            assert!(shape.to_string().contains("amazon_connect.hours_of_operations"));
        }
        other => panic!("unexpected error: {other}"),
    }
    common::assert_destroy_ran_once(&executor);
}

#[tokio::test]
async fn test_destroy_failure_after_success_is_cleanup_failed() {
    init_test_logging();
    let executor = MockExecutor::new().with_responses(vec![
        MockResponse::success(common::INIT_OK),
        MockResponse::success(common::apply_ok(1)),
        MockResponse::success(common::apply_noop()),
        MockResponse::success(passing_outputs()),
        MockResponse::failure(1, "Error: DependencyViolation while deleting"),
    ]);
    let tf = common::driver(&executor);

    let err = example().run(&tf, accept_all()).await.unwrap_err();

    assert!(matches!(err, HarnessError::CleanupFailed { .. }));
}

#[tokio::test]
async fn test_destroy_failure_never_masks_the_primary_error() {
    init_test_logging();
    let executor = MockExecutor::new().with_responses(vec![
        MockResponse::success(common::INIT_OK),
        MockResponse::failure(1, "Error: creating Connect Instance: AccessDeniedException"),
        MockResponse::failure(1, "Error: nothing to destroy"),
    ]);
    let tf = common::driver(&executor);

    let err = example().run(&tf, accept_all()).await.unwrap_err();

    // the apply failure wins; the destroy failure is only logged
    assert!(matches!(
        err,
        HarnessError::Terraform(TerraformError::ApplyFailed(_))
    ));
    common::assert_destroy_ran_once(&executor);
}

#[tokio::test]
async fn test_transient_apply_error_is_retried() {
    init_test_logging();
    let executor = MockExecutor::new().with_responses(vec![
        MockResponse::success(common::INIT_OK),
        MockResponse::failure(1, "Error: ThrottlingException: Rate exceeded"),
        MockResponse::success(common::apply_ok(1)),
        MockResponse::success(common::apply_noop()),
        MockResponse::success(passing_outputs()),
        MockResponse::success(common::destroy_ok(1)),
    ]);
    let tf = common::driver(&executor);

    let options = TerraformOptions::new("../examples/simple")
        .retry(RetryPolicy::default_transient().wait_between(Duration::ZERO));
    let example = ExampleTest::with_options(options, "amazon_connect");

    example.run(&tf, accept_all()).await.unwrap();

    // initial apply attempt, throttled retry, then the idempotency re-apply
    assert_eq!(executor.get_operation_calls("apply").len(), 3);
    common::assert_destroy_ran_once(&executor);
}
