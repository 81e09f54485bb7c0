//! Provider contracts and builders shared by the integration tests.

use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use callfake::ActionWrapper;
use callfake::BuilderConverter;
use callfake::CallArgs;
use callfake::CallError;
use callfake::Fake;
use callfake::FakeAdapter;
use callfake::FakeBuilder;
use callfake::MethodCall;
use callfake::MethodCallback;
use callfake::MethodHandle;
use callfake::PersistentBuilder;
use callfake::Result;
use futures::future::BoxFuture;
use once_cell::sync::Lazy;
use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarehouseItem {
    pub kind: String,
    pub price: u32,
    pub quantity: u32,
}

pub static TOP_ITEMS: Lazy<Vec<WarehouseItem>> = Lazy::new(|| {
    vec![WarehouseItem {
        kind: "Top".to_string(),
        price: 5,
        quantity: 1,
    }]
});

pub type Reply<T> = BoxFuture<'static, std::result::Result<T, CallError>>;

//-----------------------------------------------------------
// Warehouse

pub trait WarehouseProvider: Send + Sync {
    fn get_warehouse_items(&self) -> Reply<Vec<WarehouseItem>>;

    fn get_warehouse_items_with_one_parameter(
        &self,
        placeholder: String,
    ) -> Reply<Vec<WarehouseItem>>;

    fn get_warehouse_items_with_two_parameters(
        &self,
        first: String,
        second: String,
    ) -> Reply<Vec<WarehouseItem>>;

    fn get_warehouse_items_with_three_parameters(
        &self,
        first: String,
        second: String,
        third: String,
    ) -> Reply<Vec<WarehouseItem>>;

    fn get_warehouse_items_with_four_parameters(
        &self,
        first: String,
        second: String,
        third: String,
        fourth: String,
    ) -> Reply<Vec<WarehouseItem>>;

    fn get_warehouse_items_with_five_parameters(
        &self,
        first: String,
        second: String,
        third: String,
        fourth: String,
        fifth: String,
    ) -> Reply<Vec<WarehouseItem>>;
}

pub const WAREHOUSE_METHODS: [&str; 6] = [
    "get_warehouse_items",
    "get_warehouse_items_with_one_parameter",
    "get_warehouse_items_with_two_parameters",
    "get_warehouse_items_with_three_parameters",
    "get_warehouse_items_with_four_parameters",
    "get_warehouse_items_with_five_parameters",
];

/// Handle of the warehouse method taking `arity` parameters.
pub fn warehouse_method(arity: usize) -> MethodHandle {
    MethodHandle::of::<dyn WarehouseProvider>(WAREHOUSE_METHODS[arity])
}

#[derive(Clone, Default)]
pub struct FakeWarehouseProvider {
    pub fake: Fake<dyn WarehouseProvider>,
}

impl WarehouseProvider for FakeWarehouseProvider {
    fn get_warehouse_items(&self) -> Reply<Vec<WarehouseItem>> {
        self.fake.invoke_async(&warehouse_method(0), ())
    }

    fn get_warehouse_items_with_one_parameter(
        &self,
        placeholder: String,
    ) -> Reply<Vec<WarehouseItem>> {
        self.fake.invoke_async(&warehouse_method(1), (placeholder,))
    }

    fn get_warehouse_items_with_two_parameters(
        &self,
        first: String,
        second: String,
    ) -> Reply<Vec<WarehouseItem>> {
        self.fake.invoke_async(&warehouse_method(2), (first, second))
    }

    fn get_warehouse_items_with_three_parameters(
        &self,
        first: String,
        second: String,
        third: String,
    ) -> Reply<Vec<WarehouseItem>> {
        self.fake.invoke_async(&warehouse_method(3), (first, second, third))
    }

    fn get_warehouse_items_with_four_parameters(
        &self,
        first: String,
        second: String,
        third: String,
        fourth: String,
    ) -> Reply<Vec<WarehouseItem>> {
        self.fake
            .invoke_async(&warehouse_method(4), (first, second, third, fourth))
    }

    fn get_warehouse_items_with_five_parameters(
        &self,
        first: String,
        second: String,
        third: String,
        fourth: String,
        fifth: String,
    ) -> Reply<Vec<WarehouseItem>> {
        self.fake
            .invoke_async(&warehouse_method(5), (first, second, third, fourth, fifth))
    }
}

/// Every warehouse method resolves to `items`.
#[derive(Serialize, Deserialize, Default)]
pub struct WarehouseProviderBuilder {
    pub items: Vec<WarehouseItem>,
    #[serde(skip)]
    fake: Fake<dyn WarehouseProvider>,
}

impl WarehouseProviderBuilder {
    pub fn create_builder() -> Self {
        Self::default()
    }

    pub fn with_warehouse_items(
        mut self,
        items: &[WarehouseItem],
    ) -> Self {
        self.items = items.to_vec();
        self
    }

    fn returning_items<A: CallArgs>(
        &self,
        arity: usize,
    ) -> Result<()> {
        let items = self.items.clone();
        self.fake.setup(
            &MethodCall::<A, Vec<WarehouseItem>>::async_with_result(warehouse_method(arity))
                .build_callbacks(move |c| c.returns(items))?,
        )
    }
}

impl FakeBuilder for WarehouseProviderBuilder {
    type Service = dyn WarehouseProvider;

    fn fake(&self) -> &Fake<dyn WarehouseProvider> {
        &self.fake
    }

    fn setup_fake(&self) -> Result<()> {
        self.returning_items::<()>(0)?;
        self.returning_items::<(String,)>(1)?;
        self.returning_items::<(String, String)>(2)?;
        self.returning_items::<(String, String, String)>(3)?;
        self.returning_items::<(String, String, String, String)>(4)?;
        self.returning_items::<(String, String, String, String, String)>(5)
    }

    fn service(&self) -> Arc<dyn WarehouseProvider> {
        Arc::new(FakeWarehouseProvider {
            fake: self.fake.clone(),
        })
    }
}

impl PersistentBuilder for WarehouseProviderBuilder {
    const KIND: &'static str = "warehouse_provider";
}

//-----------------------------------------------------------
// Login

pub trait LoginProvider: Send + Sync {
    fn is_logged_in(&self) -> std::result::Result<bool, CallError>;

    fn login(&self) -> Reply<()>;

    fn login_with_one_parameter(
        &self,
        parameter: String,
    ) -> Reply<()>;

    fn login_with_two_parameters(
        &self,
        first: String,
        second: String,
    ) -> Reply<()>;

    fn login_with_three_parameters(
        &self,
        first: String,
        second: String,
        third: String,
    ) -> Reply<()>;

    fn login_with_four_parameters(
        &self,
        first: String,
        second: String,
        third: String,
        fourth: String,
    ) -> Reply<()>;

    fn login_with_five_parameters(
        &self,
        first: String,
        second: String,
        third: String,
        fourth: String,
        fifth: String,
    ) -> Reply<()>;
}

pub const LOGIN_METHODS: [&str; 6] = [
    "login",
    "login_with_one_parameter",
    "login_with_two_parameters",
    "login_with_three_parameters",
    "login_with_four_parameters",
    "login_with_five_parameters",
];

pub fn login_method(arity: usize) -> MethodHandle {
    MethodHandle::of::<dyn LoginProvider>(LOGIN_METHODS[arity])
}

pub fn is_logged_in_method() -> MethodHandle {
    MethodHandle::of::<dyn LoginProvider>("is_logged_in")
}

#[derive(Clone, Default)]
pub struct FakeLoginProvider {
    pub fake: Fake<dyn LoginProvider>,
}

impl LoginProvider for FakeLoginProvider {
    fn is_logged_in(&self) -> std::result::Result<bool, CallError> {
        self.fake.invoke(&is_logged_in_method(), ())
    }

    fn login(&self) -> Reply<()> {
        self.fake.invoke_async(&login_method(0), ())
    }

    fn login_with_one_parameter(
        &self,
        parameter: String,
    ) -> Reply<()> {
        self.fake.invoke_async(&login_method(1), (parameter,))
    }

    fn login_with_two_parameters(
        &self,
        first: String,
        second: String,
    ) -> Reply<()> {
        self.fake.invoke_async(&login_method(2), (first, second))
    }

    fn login_with_three_parameters(
        &self,
        first: String,
        second: String,
        third: String,
    ) -> Reply<()> {
        self.fake.invoke_async(&login_method(3), (first, second, third))
    }

    fn login_with_four_parameters(
        &self,
        first: String,
        second: String,
        third: String,
        fourth: String,
    ) -> Reply<()> {
        self.fake
            .invoke_async(&login_method(4), (first, second, third, fourth))
    }

    fn login_with_five_parameters(
        &self,
        first: String,
        second: String,
        third: String,
        fourth: String,
        fifth: String,
    ) -> Reply<()> {
        self.fake
            .invoke_async(&login_method(5), (first, second, third, fourth, fifth))
    }
}

/// Any login completes and flips `is_logged_in` to true.
#[derive(Serialize, Deserialize, Default)]
pub struct LoginProviderBuilder {
    #[serde(skip)]
    logged_in: Arc<AtomicBool>,
    #[serde(skip)]
    fake: Fake<dyn LoginProvider>,
}

impl LoginProviderBuilder {
    pub fn create_builder() -> Self {
        Self::default()
    }

    fn logging_in<A: CallArgs>(
        &self,
        arity: usize,
    ) -> Result<()> {
        let logged_in = self.logged_in.clone();
        let on_complete = ActionWrapper::from_tuple_fn(move |_: A| {
            logged_in.store(true, Ordering::SeqCst);
        });
        self.fake.setup(
            &MethodCall::<A>::async_void(login_method(arity))
                .build_callbacks(|c| c.add_callback(MethodCallback::complete_with(on_complete)))?,
        )
    }
}

impl FakeBuilder for LoginProviderBuilder {
    type Service = dyn LoginProvider;

    fn fake(&self) -> &Fake<dyn LoginProvider> {
        &self.fake
    }

    fn setup_fake(&self) -> Result<()> {
        let logged_in = self.logged_in.clone();
        self.fake.setup(
            &MethodCall::<(), bool>::sync_with_result(is_logged_in_method()).build_callbacks(
                move |c| c.returns_with(move || logged_in.load(Ordering::SeqCst)),
            )?,
        )?;
        self.logging_in::<()>(0)?;
        self.logging_in::<(String,)>(1)?;
        self.logging_in::<(String, String)>(2)?;
        self.logging_in::<(String, String, String)>(3)?;
        self.logging_in::<(String, String, String, String)>(4)?;
        self.logging_in::<(String, String, String, String, String)>(5)
    }

    fn service(&self) -> Arc<dyn LoginProvider> {
        Arc::new(FakeLoginProvider {
            fake: self.fake.clone(),
        })
    }
}

impl PersistentBuilder for LoginProviderBuilder {
    const KIND: &'static str = "login_provider";
}

//-----------------------------------------------------------
// Echo

pub trait EchoProvider: Send + Sync {
    fn echo(
        &self,
        value: String,
    ) -> Reply<String>;
}

pub fn echo_method() -> MethodHandle {
    MethodHandle::of::<dyn EchoProvider>("echo")
}

#[derive(Clone, Default)]
pub struct FakeEchoProvider {
    pub fake: Fake<dyn EchoProvider>,
}

impl EchoProvider for FakeEchoProvider {
    fn echo(
        &self,
        value: String,
    ) -> Reply<String> {
        self.fake.invoke_async(&echo_method(), (value,))
    }
}

pub fn converter() -> BuilderConverter {
    BuilderConverter::new()
        .register::<WarehouseProviderBuilder>()
        .register::<LoginProviderBuilder>()
}
