//! End-to-end resolution against the static catalog provider.

use metricvar_core::{
    DataQueryRequest, VariableQueryDescriptor, VariableQueryType, migrate_legacy_query,
};
use metricvar_provider::{StaticCatalog, StaticMetricsProvider};
use metricvar_resolver::VariableQueryResolver;

const CATALOG: &str = r#"
regions = ["us-east-1", "eu-west-1"]
namespaces = ["AWS/EC2", "AWS/EBS", "AWS/ELB"]

[[metrics]]
namespace = "AWS/EC2"
names = ["CPUUtilization", "NetworkIn", "NetworkOut"]
dimension_keys = ["InstanceId", "AutoScalingGroupName"]

[[metrics]]
namespace = "AWS/EBS"
names = ["VolumeReadOps", "VolumeWriteOps"]
dimension_keys = ["VolumeId"]

[[dimension_values]]
namespace = "AWS/EC2"
metric = "CPUUtilization"
key = "InstanceId"
values = ["i-web-1", "i-web-2"]
dimensions = { AutoScalingGroupName = "web" }

[[dimension_values]]
namespace = "AWS/EC2"
metric = "CPUUtilization"
key = "InstanceId"
values = ["i-batch-1"]
dimensions = { AutoScalingGroupName = "batch" }

[[ebs_volumes]]
instance_id = "i-web-1"
volume_ids = ["vol-0aa", "vol-0bb"]

[[instances]]
instance_id = "i-web-1"
region = "us-east-1"
attributes = { InstanceType = "m5.large", PrivateIpAddress = "10.0.0.11" }
tags = { Name = "web-1", Env = "prod" }

[[instances]]
instance_id = "i-web-2"
region = "us-east-1"
attributes = { InstanceType = "m5.large", PrivateIpAddress = "10.0.0.12" }
tags = { Name = "web-2", Env = "staging" }

[[resources]]
arn = "arn:aws:elasticloadbalancing:us-east-1:123456789012:loadbalancer/app/web/1"
resource_type = "elasticloadbalancing:loadbalancer"
region = "us-east-1"
tags = { Env = "prod" }

[[resources]]
arn = "arn:aws:elasticloadbalancing:us-east-1:123456789012:loadbalancer/app/admin/2"
resource_type = "elasticloadbalancing:loadbalancer"
region = "us-east-1"
tags = { Env = "staging" }
"#;

fn resolver() -> VariableQueryResolver {
    let catalog: StaticCatalog = toml::from_str(CATALOG).unwrap();
    VariableQueryResolver::from_provider(StaticMetricsProvider::new("catalog", catalog))
}

async fn values_of(resolver: &VariableQueryResolver, descriptor: &VariableQueryDescriptor) -> Vec<String> {
    resolver
        .resolve_descriptor(descriptor)
        .await
        .into_iter()
        .map(|o| {
            assert!(o.expandable);
            o.value
        })
        .collect()
}

async fn legacy(resolver: &VariableQueryResolver, text: &str) -> Vec<String> {
    values_of(resolver, &migrate_legacy_query(text).unwrap()).await
}

#[tokio::test]
async fn top_level_listings() {
    let r = resolver();
    assert_eq!(legacy(&r, "regions()").await, vec!["us-east-1", "eu-west-1"]);
    assert_eq!(
        legacy(&r, "namespaces()").await,
        vec!["AWS/EC2", "AWS/EBS", "AWS/ELB"]
    );
    assert_eq!(
        legacy(&r, "statistics()").await,
        vec!["Average", "Maximum", "Minimum", "Sum", "SampleCount"]
    );
}

#[tokio::test]
async fn metrics_and_dimension_keys() {
    let r = resolver();
    assert_eq!(
        legacy(&r, "metrics(AWS/EBS, us-east-1)").await,
        vec!["VolumeReadOps", "VolumeWriteOps"]
    );
    assert_eq!(
        legacy(&r, "dimension_keys(AWS/EC2)").await,
        vec!["InstanceId", "AutoScalingGroupName"]
    );
}

#[tokio::test]
async fn dimension_values_with_and_without_filters() {
    let r = resolver();
    assert_eq!(
        legacy(
            &r,
            "dimension_values(us-east-1, AWS/EC2, CPUUtilization, InstanceId)"
        )
        .await,
        vec!["i-web-1", "i-web-2", "i-batch-1"]
    );
    assert_eq!(
        legacy(
            &r,
            r#"dimension_values(us-east-1, AWS/EC2, CPUUtilization, InstanceId, {"AutoScalingGroupName": "batch"})"#
        )
        .await,
        vec!["i-batch-1"]
    );
}

#[tokio::test]
async fn instance_scoped_lookups() {
    let r = resolver();
    assert_eq!(
        legacy(&r, "ebs_volume_ids(us-east-1, i-web-1)").await,
        vec!["vol-0aa", "vol-0bb"]
    );
    assert_eq!(
        legacy(
            &r,
            r#"ec2_instance_attribute(us-east-1, PrivateIpAddress, {"tag:Env": ["staging"]})"#
        )
        .await,
        vec!["10.0.0.12"]
    );
    assert_eq!(
        legacy(&r, r#"ec2_instance_attribute(us-east-1, InstanceType, {})"#).await,
        vec!["m5.large"]
    );
}

#[tokio::test]
async fn resource_arns_by_tag() {
    let r = resolver();
    assert_eq!(
        legacy(
            &r,
            r#"resource_arns(us-east-1, elasticloadbalancing:loadbalancer, {"Env": ["prod"]})"#
        )
        .await,
        vec!["arn:aws:elasticloadbalancing:us-east-1:123456789012:loadbalancer/app/web/1"]
    );
}

#[tokio::test]
async fn malformed_filter_text_yields_nothing() {
    let r = resolver();
    let descriptor = VariableQueryDescriptor::new(VariableQueryType::Ec2InstanceAttributes)
        .with_region("us-east-1")
        .with_attribute_name("InstanceType")
        .with_ec2_filters("{invalid");
    assert!(values_of(&r, &descriptor).await.is_empty());
}

#[tokio::test]
async fn batch_request_from_wire_json() {
    let request: DataQueryRequest = serde_json::from_value(serde_json::json!({
        "requestId": "refresh-42",
        "targets": [
            {"refId": "A", "queryType": "ebsVolumeIds", "region": "us-east-1", "instanceID": "i-web-1"},
            {"refId": "B", "queryType": "regions"}
        ]
    }))
    .unwrap();

    let response = resolver().query(&request).await;
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "data": [
                {"text": "vol-0aa", "value": "vol-0aa", "expandable": true},
                {"text": "vol-0bb", "value": "vol-0bb", "expandable": true}
            ]
        })
    );
}
