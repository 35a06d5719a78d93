mod in_memory_subscription_store_test;
mod token_service_test;
