use super::*;
use aws_sdk_ecs::types::{
    CapacityProviderStrategyItem, Compatibility, FirelensConfiguration,
    FirelensConfigurationType, KeyValuePair, LogConfiguration, LogDriver, NetworkMode,
    PortMapping, TransportProtocol,
};

fn sample_task_definition() -> TaskDefinition {
    TaskDefinition::builder()
        .task_definition_arn("arn:aws:ecs:us-east-1:123456789012:task-definition/web:12")
        .execution_role_arn("arn:aws:iam::123456789012:role/exec")
        .task_role_arn("arn:aws:iam::123456789012:role/task")
        .family("web")
        .network_mode(NetworkMode::Awsvpc)
        .cpu("256")
        .memory("512")
        .compatibilities(Compatibility::Ec2)
        .compatibilities(Compatibility::Fargate)
        .container_definitions(
            ContainerDefinition::builder()
                .name("app")
                .image("123456789012.dkr.ecr.us-east-1.amazonaws.com/web:abc123")
                .essential(true)
                .cpu(128)
                .memory(256)
                .port_mappings(
                    PortMapping::builder()
                        .container_port(8080)
                        .host_port(8080)
                        .protocol(TransportProtocol::Tcp)
                        .build(),
                )
                .environment(KeyValuePair::builder().name("PORT").value("8080").build())
                .log_configuration(
                    LogConfiguration::builder()
                        .log_driver(LogDriver::Awsfirelens)
                        .options("Name", "datadog")
                        .build()
                        .unwrap(),
                )
                .build(),
        )
        .container_definitions(
            ContainerDefinition::builder()
                .name("log_router")
                .image("amazon/aws-for-fluent-bit:stable")
                .essential(true)
                .memory_reservation(50)
                .firelens_configuration(
                    FirelensConfiguration::builder()
                        .r#type(FirelensConfigurationType::Fluentbit)
                        .options("enable-ecs-log-metadata", "true")
                        .build()
                        .unwrap(),
                )
                .build(),
        )
        .build()
}

#[test]
fn template_from_sdk_copies_top_level_fields() {
    let template = template_from_sdk(&sample_task_definition());

    assert_eq!(
        template.task_definition_arn,
        "arn:aws:ecs:us-east-1:123456789012:task-definition/web:12"
    );
    assert_eq!(template.execution_role_arn, "arn:aws:iam::123456789012:role/exec");
    assert_eq!(template.task_role_arn, "arn:aws:iam::123456789012:role/task");
    assert_eq!(template.family, "web");
    assert_eq!(template.network_mode, "awsvpc");
    assert_eq!(template.cpu, "256");
    assert_eq!(template.memory, "512");
    assert_eq!(template.compatibilities, vec!["EC2", "FARGATE"]);
    assert_eq!(template.pid_mode, "");
    assert_eq!(template.container_definitions.len(), 2);
}

#[test]
fn template_from_sdk_copies_containers() {
    let template = template_from_sdk(&sample_task_definition());
    let app = &template.container_definitions[0];

    assert_eq!(app.name, "app");
    assert!(app.essential);
    assert_eq!(app.cpu, 128);
    assert_eq!(app.memory, 256);
    assert_eq!(app.memory_reservation, 0);
    assert_eq!(
        app.port_mappings,
        vec![PortMappingTemplate {
            host_port: 8080,
            protocol: "tcp".to_string(),
            container_port: 8080,
        }]
    );
    assert_eq!(app.environment[0].name, "PORT");
    assert_eq!(app.environment[0].value, "8080");

    let log = app.log_configuration.as_ref().unwrap();
    assert_eq!(log.log_driver, "awsfirelens");
    assert_eq!(log.options.get("Name").map(String::as_str), Some("datadog"));
    assert!(app.firelens_configuration.is_none());

    let router = &template.container_definitions[1];
    assert_eq!(router.memory_reservation, 50);
    assert!(router.log_configuration.is_none());
    let firelens = router.firelens_configuration.as_ref().unwrap();
    assert_eq!(firelens.kind, "fluentbit");
}

#[test]
fn template_from_empty_sdk_definition() {
    let template = template_from_sdk(&TaskDefinition::builder().build());
    assert_eq!(template, TaskDefinitionTemplate::default());
}

#[test]
fn service_info_copies_strategy_in_order() {
    let service = Service::builder()
        .service_name("web")
        .capacity_provider_strategy(
            CapacityProviderStrategyItem::builder()
                .capacity_provider("FARGATE")
                .base(1)
                .weight(1)
                .build()
                .unwrap(),
        )
        .capacity_provider_strategy(
            CapacityProviderStrategyItem::builder()
                .capacity_provider("FARGATE_SPOT")
                .weight(3)
                .build()
                .unwrap(),
        )
        .build();

    let info = service_info(&service);
    assert_eq!(info.name, "web");
    assert_eq!(
        info.capacity_provider_strategy,
        vec![
            StrategyItem {
                capacity_provider: "FARGATE".to_string(),
                base: 1,
                weight: 1,
            },
            StrategyItem {
                capacity_provider: "FARGATE_SPOT".to_string(),
                base: 0,
                weight: 3,
            },
        ]
    );
}

#[test]
fn non_negative_clamps() {
    assert_eq!(non_negative(-1), 0);
    assert_eq!(non_negative(0), 0);
    assert_eq!(non_negative(512), 512);
}
