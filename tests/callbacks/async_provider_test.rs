use callfake::FakeBuilder;
use tracing_test::traced_test;

use crate::common::*;

fn arg(name: &str) -> String {
    name.to_string()
}

#[tokio::test]
#[traced_test]
async fn method_call_with_result_and_no_parameters_returns_items() {
    let builder = WarehouseProviderBuilder::create_builder().with_warehouse_items(&TOP_ITEMS);
    let provider = builder.build().unwrap();

    let items = provider.get_warehouse_items().await.unwrap();

    assert_eq!(items, *TOP_ITEMS);
}

#[tokio::test]
async fn method_call_with_result_and_one_parameter_returns_items() {
    let builder = WarehouseProviderBuilder::create_builder().with_warehouse_items(&TOP_ITEMS);
    let provider = builder.build().unwrap();

    let items = provider
        .get_warehouse_items_with_one_parameter(arg("firstParameter"))
        .await
        .unwrap();

    assert_eq!(items, *TOP_ITEMS);
}

#[tokio::test]
async fn method_call_with_result_and_two_parameters_returns_items() {
    let builder = WarehouseProviderBuilder::create_builder().with_warehouse_items(&TOP_ITEMS);
    let provider = builder.build().unwrap();

    let items = provider
        .get_warehouse_items_with_two_parameters(arg("firstParameter"), arg("secondParameter"))
        .await
        .unwrap();

    assert_eq!(items, *TOP_ITEMS);
}

#[tokio::test]
async fn method_call_with_result_and_three_parameters_returns_items() {
    let builder = WarehouseProviderBuilder::create_builder().with_warehouse_items(&TOP_ITEMS);
    let provider = builder.build().unwrap();

    let items = provider
        .get_warehouse_items_with_three_parameters(
            arg("firstParameter"),
            arg("secondParameter"),
            arg("thirdParameter"),
        )
        .await
        .unwrap();

    assert_eq!(items, *TOP_ITEMS);
}

#[tokio::test]
async fn method_call_with_result_and_four_parameters_returns_items() {
    let builder = WarehouseProviderBuilder::create_builder().with_warehouse_items(&TOP_ITEMS);
    let provider = builder.build().unwrap();

    let items = provider
        .get_warehouse_items_with_four_parameters(
            arg("firstParameter"),
            arg("secondParameter"),
            arg("thirdParameter"),
            arg("fourthParameter"),
        )
        .await
        .unwrap();

    assert_eq!(items, *TOP_ITEMS);
}

#[tokio::test]
async fn method_call_with_result_and_five_parameters_returns_items() {
    let builder = WarehouseProviderBuilder::create_builder().with_warehouse_items(&TOP_ITEMS);
    let provider = builder.build().unwrap();

    let items = provider
        .get_warehouse_items_with_five_parameters(
            arg("firstParameter"),
            arg("secondParameter"),
            arg("thirdParameter"),
            arg("fourthParameter"),
            arg("fifthParameter"),
        )
        .await
        .unwrap();

    assert_eq!(items, *TOP_ITEMS);
}

#[tokio::test]
async fn method_call_without_result_and_no_parameters_completes() {
    let builder = LoginProviderBuilder::create_builder();
    let provider = builder.build().unwrap();
    assert!(!provider.is_logged_in().unwrap());

    provider.login().await.unwrap();

    assert!(provider.is_logged_in().unwrap());
}

#[tokio::test]
async fn method_call_without_result_and_one_parameter_completes() {
    let provider = LoginProviderBuilder::create_builder().build().unwrap();

    provider.login_with_one_parameter(arg("parameter")).await.unwrap();

    assert!(provider.is_logged_in().unwrap());
}

#[tokio::test]
async fn method_call_without_result_and_two_parameters_completes() {
    let provider = LoginProviderBuilder::create_builder().build().unwrap();

    provider
        .login_with_two_parameters(arg("firstParameter"), arg("secondParameter"))
        .await
        .unwrap();

    assert!(provider.is_logged_in().unwrap());
}

#[tokio::test]
async fn method_call_without_result_and_three_parameters_completes() {
    let provider = LoginProviderBuilder::create_builder().build().unwrap();

    provider
        .login_with_three_parameters(
            arg("firstParameter"),
            arg("secondParameter"),
            arg("thirdParameter"),
        )
        .await
        .unwrap();

    assert!(provider.is_logged_in().unwrap());
}

#[tokio::test]
async fn method_call_without_result_and_four_parameters_completes() {
    let provider = LoginProviderBuilder::create_builder().build().unwrap();

    provider
        .login_with_four_parameters(
            arg("firstParameter"),
            arg("secondParameter"),
            arg("thirdParameter"),
            arg("fourthParameter"),
        )
        .await
        .unwrap();

    assert!(provider.is_logged_in().unwrap());
}

#[tokio::test]
async fn method_call_without_result_and_five_parameters_completes() {
    let provider = LoginProviderBuilder::create_builder().build().unwrap();

    provider
        .login_with_five_parameters(
            arg("firstParameter"),
            arg("secondParameter"),
            arg("thirdParameter"),
            arg("fourthParameter"),
            arg("fifthParameter"),
        )
        .await
        .unwrap();

    assert!(provider.is_logged_in().unwrap());
}

#[tokio::test]
async fn login_calls_are_counted() {
    let builder = LoginProviderBuilder::create_builder();
    let provider = builder.build().unwrap();

    builder.verify_no_call(&login_method(2)).unwrap();
    provider
        .login_with_two_parameters(arg("a"), arg("b"))
        .await
        .unwrap();

    builder.verify_single_call(&login_method(2)).unwrap();
    builder.verify_no_call(&login_method(0)).unwrap();
}
