//! Fixtures for queue, stream, notification and scheduled events.
//!
//! Each factory takes the ARNs the event should carry and fills the rest with
//! the sample values from the AWS documentation.

use serde_json::{json, Value};

/// Suffix appended to table ARNs to form a DynamoDB stream ARN.
pub const DYNAMODB_STREAM_LABEL: &str = "/stream/2022-02-24T22:37:34.890";

/// An SQS batch with one record per queue ARN.
#[must_use]
pub fn sqs_event(queue_arns: &[&str]) -> Value {
    let records: Vec<Value> = queue_arns
        .iter()
        .enumerate()
        .map(|(i, arn)| {
            json!({
                "messageId": format!("059f36b4-87a3-44ab-83d2-66190958424{i}"),
                "receiptHandle": "AQEBwJnKyrHigUMZj6rYigCgxlaS3SLy0a",
                "body": "Test message.",
                "attributes": {
                    "ApproximateReceiveCount": "1",
                    "SentTimestamp": "1545082649183",
                    "SenderId": "AIDAIENQZJOLO23YVJ4VO",
                    "ApproximateFirstReceiveTimestamp": "1545082649185",
                },
                "messageAttributes": {},
                "md5OfBody": "e4e68fb7bd0e697a0ae8f1bb342846b3",
                "eventSource": "aws:sqs",
                "eventSourceARN": arn,
                "awsRegion": "us-east-2",
            })
        })
        .collect();
    json!({ "Records": records })
}

/// An SNS batch with one record per topic ARN.
#[must_use]
pub fn sns_event(topic_arns: &[&str]) -> Value {
    let records: Vec<Value> = topic_arns
        .iter()
        .map(|arn| {
            json!({
                "EventVersion": "1.0",
                "EventSubscriptionArn": format!("{arn}:21be56ed-a058-49f5-8c98-aedd2564c486"),
                "EventSource": "aws:sns",
                "Sns": {
                    "SignatureVersion": "1",
                    "Timestamp": "2019-01-02T12:45:07.000Z",
                    "MessageId": "95df01b4-ee98-5cb9-9903-4c221d41eb5e",
                    "Message": "Hello from SNS!",
                    "MessageAttributes": {},
                    "Type": "Notification",
                    "TopicArn": arn,
                    "Subject": "TestInvoke",
                },
            })
        })
        .collect();
    json!({ "Records": records })
}

/// A scheduled (EventBridge rule) event listing `rule_arns` as resources.
#[must_use]
pub fn scheduled_event(rule_arns: &[&str]) -> Value {
    json!({
        "version": "0",
        "id": "cdc73f9d-aea9-11e3-9d5a-835b769c0d9c",
        "detail-type": "Scheduled Event",
        "source": "aws.events",
        "account": "123456789012",
        "time": "2019-03-01T01:23:45Z",
        "region": "us-east-2",
        "resources": rule_arns,
        "detail": {},
    })
}

/// A DynamoDB stream batch with one record per table ARN.
///
/// The record's `eventSourceARN` is the stream ARN, i.e. the table ARN
/// followed by [`DYNAMODB_STREAM_LABEL`].
#[must_use]
pub fn dynamodb_stream_event(table_arns: &[&str]) -> Value {
    let records: Vec<Value> = table_arns
        .iter()
        .map(|arn| {
            json!({
                "eventID": "a61438b745710c58893214a3ce02ced7",
                "eventName": "INSERT",
                "eventVersion": "1.1",
                "eventSource": "aws:dynamodb",
                "awsRegion": "us-west-2",
                "dynamodb": {
                    "ApproximateCreationDateTime": 1_645_747_230,
                    "Keys": { "hk": { "S": "test" } },
                    "NewImage": { "test": { "S": "test" } },
                    "SequenceNumber": "516800000000013117674582",
                    "SizeBytes": 559,
                    "StreamViewType": "NEW_IMAGE",
                },
                "eventSourceARN": format!("{arn}{DYNAMODB_STREAM_LABEL}"),
            })
        })
        .collect();
    json!({ "Records": records })
}

/// A Kinesis batch with one record per stream ARN.
#[must_use]
pub fn kinesis_stream_event(stream_arns: &[&str]) -> Value {
    let records: Vec<Value> = stream_arns
        .iter()
        .map(|arn| {
            json!({
                "kinesis": {
                    "partitionKey": "partitionKey-03",
                    "kinesisSchemaVersion": "1.0",
                    "data": "SGVsbG8sIHRoaXMgaXMgYSB0ZXN0IDEyMy4=",
                    "sequenceNumber": "49545115243490985018280067714973144582180062593244200961",
                    "approximateArrivalTimestamp": 1_428_537_600,
                },
                "eventSource": "aws:kinesis",
                "eventID": "shardId-000000000000:49545115243490985018280067714973144582180062593244200961",
                "invokeIdentityArn": "arn:aws:iam::EXAMPLE",
                "eventVersion": "1.0",
                "eventName": "aws:kinesis:record",
                "eventSourceARN": arn,
                "awsRegion": "us-east-1",
            })
        })
        .collect();
    json!({ "Records": records })
}

/// An EventBridge event with the given `source` and `detail-type`.
#[must_use]
pub fn event_bridge_event(source: &str, detail_type: &str) -> Value {
    json!({
        "version": "0",
        "id": "fe8d3c65-xmpl-c5c3-2c87-81584709a377",
        "detail-type": detail_type,
        "source": source,
        "account": "123456789012",
        "time": "2020-04-28T07:20:20Z",
        "region": "us-east-2",
        "resources": ["arn:aws:rds:us-east-2:123456789012:db:rdz6xmpliljlb1"],
        "detail": {
            "EventCategories": ["backup"],
            "SourceType": "DB_INSTANCE",
            "Message": "Finished DB Instance backup",
        },
    })
}

/// An S3 notification for an object created in `bucket_arn`.
#[must_use]
pub fn s3_event(bucket_arn: &str) -> Value {
    json!({
        "Records": [{
            "eventVersion": "2.1",
            "eventSource": "aws:s3",
            "awsRegion": "us-east-2",
            "eventTime": "2019-09-03T19:37:27.192Z",
            "eventName": "ObjectCreated:Put",
            "userIdentity": { "principalId": "AWS:AIDAINPONIXQXHT3IKHL2" },
            "s3": {
                "s3SchemaVersion": "1.0",
                "configurationId": "828aa6fc-f7b5-4305-8584-487c791949c1",
                "bucket": {
                    "name": "DOC-EXAMPLE-BUCKET",
                    "ownerIdentity": { "principalId": "A3I5XTEXAMAI3E" },
                    "arn": bucket_arn,
                },
                "object": {
                    "key": "b21b84d653bb07b05b1e6b33684dc11b",
                    "size": 1_305_107,
                    "eTag": "b21b84d653bb07b05b1e6b33684dc11b",
                    "sequencer": "0C0F6F405D6ED209E1",
                },
            },
        }],
    })
}
