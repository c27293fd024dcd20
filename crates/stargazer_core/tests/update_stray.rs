use stargazer_core::{update, FeedAdapter, FeedKind, Msg};

#[test]
fn stray_resolution_on_idle_adapter_is_ignored() {
    let adapter = FeedAdapter::new(FeedKind::MarsPhotos);
    let (next, effects) = update(
        adapter.clone(),
        Msg::Resolved {
            tag: 42,
            result: Err("nope".into()),
        },
    );

    assert_eq!(adapter, next);
    assert!(effects.is_empty());
}

