use std::sync::Arc;

use callfake::BuilderRegistry;
use callfake::BuilderRegistryContext;
use callfake::FakeSettings;
use callfake::MemorySnapshotStorage;
use callfake::PersistentBuilder;
use callfake::Scenario;
use callfake::StorageBackend;
use tempfile::tempdir;

use crate::common::*;

fn item(kind: &str) -> WarehouseItem {
    WarehouseItem {
        kind: kind.to_string(),
        price: 1,
        quantity: 1,
    }
}

fn kinds_of(context: &BuilderRegistryContext) -> Vec<String> {
    context
        .get_builders_of_kind(WarehouseProviderBuilder::KIND)
        .iter()
        .filter_map(|entry| entry.downcast::<WarehouseProviderBuilder>())
        .map(|builder| builder.items[0].kind.clone())
        .collect()
}

#[tokio::test]
async fn serialize_reset_deserialize_keeps_builder_order() {
    let mut context = BuilderRegistryContext::new(Arc::new(MemorySnapshotStorage::new()), converter());
    context.add_builder(WarehouseProviderBuilder::create_builder().with_warehouse_items(&[item("A")]));
    context.add_builder(WarehouseProviderBuilder::create_builder().with_warehouse_items(&[item("B")]));

    context.serialize_builders(Some("round_trip")).unwrap();
    context.reset(BuilderRegistry::new());
    assert!(context.get_all_builders().is_empty());
    context.deserialize_builders(Some("round_trip")).unwrap();

    assert_eq!(kinds_of(&context), vec!["A", "B"]);

    let providers = context.get_builders::<dyn WarehouseProvider>();
    let first = providers[0].build().unwrap();
    assert_eq!(first.get_warehouse_items().await.unwrap(), vec![item("A")]);
}

#[tokio::test]
async fn registry_written_by_one_run_is_replayed_by_the_next() {
    let dir = tempdir().unwrap();
    let mut settings = FakeSettings::default();
    settings.storage.backend = StorageBackend::Sled;
    settings.storage.db_root_dir = dir.path().to_path_buf();
    let settings = settings.validate().unwrap();

    {
        let mut first_run = Scenario::new(BuilderRegistryContext::from_settings(&settings, converter()).unwrap());
        first_run.setup().unwrap();
        first_run
            .context_mut()
            .add_builder(WarehouseProviderBuilder::create_builder().with_warehouse_items(&TOP_ITEMS));
        first_run.context_mut().add_builder(LoginProviderBuilder::create_builder());
        first_run.context().serialize_builders(None).unwrap();
        first_run.teardown().unwrap();
    }

    let mut second_run =
        Scenario::new(BuilderRegistryContext::from_settings(&settings, converter()).unwrap()).restoring();
    second_run.setup().unwrap();

    let warehouse = second_run.context().get_builders::<dyn WarehouseProvider>()[0]
        .build()
        .unwrap();
    assert_eq!(
        warehouse
            .get_warehouse_items_with_two_parameters("a".into(), "b".into())
            .await
            .unwrap(),
        *TOP_ITEMS
    );

    let login = second_run.context().get_builders::<dyn LoginProvider>()[0]
        .build()
        .unwrap();
    login.login().await.unwrap();
    assert!(login.is_logged_in().unwrap());

    second_run.teardown().unwrap();
}
