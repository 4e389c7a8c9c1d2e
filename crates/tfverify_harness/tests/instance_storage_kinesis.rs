//! Verification of the Kinesis instance-storage example: media streams
//! on an encrypted video stream.

mod common;

use serde_json::json;

use tfverify_harness::{check, init_test_logging, unique_alias, ExampleTest};
use tfverify_terraform::TerraformOptions;

#[tokio::test]
async fn test_instance_storage_kinesis_example() {
    init_test_logging();

    // sut
    let alias = unique_alias();
    let outputs = json!({
        "instance": common::instance_json(&alias),
        "instance_storage_configs": {
            "MEDIA_STREAMS": {
                "association_id": "5b0cb6e14c094e77a2f7a54d63c1f2a9",
                "resource_type": "MEDIA_STREAMS",
                "storage_config": [
                    {
                        "storage_type": "KINESIS_VIDEO_STREAM",
                        "kinesis_video_stream_config": [
                            {
                                "prefix": "media",
                                "retention_period_hours": 24,
                                "encryption_config": [
                                    {
                                        "encryption_type": "KMS",
                                        "key_id": "arn:aws:kms:eu-central-1:123456789012:key/4f1c7e09-2d5a-4b6e-9a53-8de0c1b7f6a2",
                                    }
                                ],
                            }
                        ],
                    }
                ],
            }
        },
    })
    .to_string();
    let executor = common::scripted_lifecycle(outputs, 5);
    let tf = common::driver(&executor);

    let options = TerraformOptions::with_default_retryable_errors(
        "../examples/instance-storage-config-kinesis",
    )
    .var("instance_alias", alias.as_str());
    let example = ExampleTest::with_options(options, "amazon_connect");

    // assertions
    example
        .run(&tf, |outputs| {
            let storage_configs = outputs.field("instance_storage_configs")?;
            let media_streams = storage_configs.field("MEDIA_STREAMS")?;
            let storage_config = media_streams.field("storage_config")?.index(0)?;
            let stream_config = storage_config.field("kinesis_video_stream_config")?.index(0)?;
            let encryption_config = stream_config.field("encryption_config")?.index(0)?;

            let association_id = media_streams.field("association_id")?;
            check::expect_non_empty(association_id.path(), association_id.as_str()?)?;

            let storage_type = storage_config.field("storage_type")?;
            check::expect_eq(storage_type.path(), storage_type.as_str()?, "KINESIS_VIDEO_STREAM")?;

            let encryption_type = encryption_config.field("encryption_type")?;
            check::expect_eq(encryption_type.path(), encryption_type.as_str()?, "KMS")?;

            let key_id = encryption_config.field("key_id")?;
            check::expect_non_empty(key_id.path(), key_id.as_str()?)?;

            Ok(())
        })
        .await
        .unwrap();

    common::assert_destroy_ran_once(&executor);
}
