mod async_provider_test;
