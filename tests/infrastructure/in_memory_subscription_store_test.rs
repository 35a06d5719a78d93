use factura::application::ports::SubscriptionStore;
use factura::infrastructure::persistence::InMemorySubscriptionStore;

#[tokio::test]
async fn given_new_url_when_added_then_appears_in_list() {
    let store = InMemorySubscriptionStore::new();

    let current = store.add("http://localhost:9000/hook").await.unwrap();

    assert_eq!(current, vec!["http://localhost:9000/hook".to_string()]);
    assert_eq!(store.list().await.unwrap(), current);
}

#[tokio::test]
async fn given_duplicate_url_when_added_then_set_is_unchanged() {
    let store = InMemorySubscriptionStore::new();

    store.add("http://localhost:9000/hook").await.unwrap();
    let current = store.add("http://localhost:9000/hook").await.unwrap();

    assert_eq!(current.len(), 1);
}

#[tokio::test]
async fn given_multiple_urls_when_listed_then_subscription_order_is_kept() {
    let store = InMemorySubscriptionStore::new();

    store.add("http://a").await.unwrap();
    store.add("http://b").await.unwrap();
    store.add("http://a").await.unwrap();

    assert_eq!(
        store.list().await.unwrap(),
        vec!["http://a".to_string(), "http://b".to_string()]
    );
}
