use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use parking_lot::Mutex;
use proptest::prelude::*;
use serde_json::json;
use store::{
    Action, MiddlewareEntry, MiddlewareId, Priority, SliceDescriptor, SliceHandle, Store,
    StoreError,
};

#[derive(Debug, Clone, Default, PartialEq)]
struct Cart {
    items: Vec<String>,
}

fn cart_r1(state: &mut Cart, action: &Action) {
    match action.kind.as_str() {
        "cart/add" => {
            if let Some(sku) = action.payload_as::<String>() {
                state.items.push(sku);
            }
        }
        "cart/clear" => state.items.clear(),
        _ => {}
    }
}

fn cart_r2(state: &mut Cart, action: &Action) {
    if action.is("cart/add") {
        state.items.push("tampered".to_string());
    }
}

fn add(sku: &str) -> Action {
    Action::with_payload("cart/add", json!(sku))
}

#[test]
fn cart_registration_scenario() {
    let store = Store::new();
    let handle = store
        .register_slice(SliceDescriptor::new("cart", Cart::default(), cart_r1))
        .unwrap();

    // Identical reducer: no conflict, selectors keep working.
    let again = store
        .register_slice(SliceDescriptor::new("cart", Cart::default(), cart_r1))
        .unwrap();
    store.dispatch(add("plot-1"));
    assert_eq!(handle.select(&store, |c| c.items.len()), Some(1));
    assert_eq!(again.state(&store).unwrap().items, vec!["plot-1"]);

    // Different reducer: conflict reported, R1 stays active.
    let err = store
        .register_slice(SliceDescriptor::new("cart", Cart::default(), cart_r2))
        .unwrap_err();
    let StoreError::Conflict { name, .. } = err;
    assert_eq!(name, "cart");
    store.dispatch(add("plot-2"));
    assert_eq!(
        handle.state(&store).unwrap().items,
        vec!["plot-1".to_string(), "plot-2".to_string()]
    );
}

#[test]
fn duplicate_registration_does_not_reset_state() {
    let store = Store::new();
    store
        .register_slice(SliceDescriptor::new("cart", Cart::default(), cart_r1))
        .unwrap();
    store.dispatch(add("a"));
    store
        .register_slice(SliceDescriptor::new(
            "cart",
            Cart {
                items: vec!["seed".into()],
            },
            cart_r1,
        ))
        .unwrap();
    assert_eq!(store.state_of::<Cart>("cart").unwrap().items, vec!["a"]);
}

#[test]
fn fn_pointer_reducers_compare_by_address() {
    let store = Store::new();
    let r1: fn(&mut Cart, &Action) = cart_r1;
    let r2: fn(&mut Cart, &Action) = cart_r2;
    store
        .register_slice(SliceDescriptor::new("cart", Cart::default(), r1))
        .unwrap();
    store
        .register_slice(SliceDescriptor::new("cart", Cart::default(), r1))
        .unwrap();
    assert!(matches!(
        store.register_slice(SliceDescriptor::new("cart", Cart::default(), r2)),
        Err(StoreError::Conflict { .. })
    ));
    store.dispatch(add("plot-1"));
    assert_eq!(store.state_of::<Cart>("cart").unwrap().items, vec!["plot-1"]);
}

#[test]
fn boxed_reducers_never_match() {
    type Boxed = Box<dyn Fn(&mut Cart, &Action) + Send + Sync>;
    let store = Store::new();
    let r1: Boxed = Box::new(cart_r1);
    let r2: Boxed = Box::new(cart_r2);
    store
        .register_slice(SliceDescriptor::new("cart", Cart::default(), r1))
        .unwrap();
    assert!(matches!(
        store.register_slice(SliceDescriptor::new("cart", Cart::default(), r2)),
        Err(StoreError::Conflict { .. })
    ));
    store.dispatch(add("plot-1"));
    assert_eq!(store.state_of::<Cart>("cart").unwrap().items, vec!["plot-1"]);
}

#[test]
fn static_reducer_refs_compare_by_referent() {
    let limit = 2usize;
    let capped = move |state: &mut Cart, action: &Action| {
        if state.items.len() < limit {
            cart_r1(state, action);
        }
    };
    let r1: &'static (dyn Fn(&mut Cart, &Action) + Send + Sync) = Box::leak(Box::new(capped));
    let r2: &'static (dyn Fn(&mut Cart, &Action) + Send + Sync) = Box::leak(Box::new(capped));
    let store = Store::new();
    store
        .register_slice(SliceDescriptor::new("cart", Cart::default(), r1))
        .unwrap();
    store
        .register_slice(SliceDescriptor::new("cart", Cart::default(), r1))
        .unwrap();
    assert!(matches!(
        store.register_slice(SliceDescriptor::new("cart", Cart::default(), r2)),
        Err(StoreError::Conflict { .. })
    ));
}

#[test]
fn selectors_before_registration_yield_none() {
    let store = Store::new();
    let count = store.select_from_slice("cart", |c: &Cart| c.items.len());
    let handle: SliceHandle<Cart> = SliceHandle::new("cart");
    store.register_selector("cart", "count", |c: &Cart| c.items.len());

    assert_eq!(count.get(), None);
    assert_eq!(handle.state(&store), None);
    assert_eq!(store.select_named::<usize>("cart", "count"), None);

    store
        .register_slice(SliceDescriptor::new("cart", Cart::default(), cart_r1))
        .unwrap();
    store.dispatch(add("x"));

    assert_eq!(count.get(), Some(1));
    assert_eq!(store.select_named::<usize>("cart", "count"), Some(1));
}

#[test]
fn selector_metadata_is_last_write_wins() {
    let store = Store::new();
    let handle = store
        .register_slice(SliceDescriptor::new("cart", Cart::default(), cart_r1))
        .unwrap();
    handle.selector(&store, "label", |c: &Cart| format!("{} items", c.items.len()));
    handle.selector(&store, "label", |c: &Cart| format!("{} lots", c.items.len()));
    assert_eq!(
        store.select_named::<String>("cart", "label").as_deref(),
        Some("0 lots")
    );
}

#[test]
fn unknown_middleware_removal_leaves_chain_intact() {
    let store = Store::new();
    store.register_middleware(MiddlewareEntry::new("audit", |_ctx, a, next| next.run(a)));
    store.register_middleware(
        MiddlewareEntry::new("guard", |_ctx, a, next| next.run(a)).priority(Priority::High),
    );
    let before = store.middleware_ids();
    assert!(!store.unregister_middleware(&MiddlewareId::new("never-registered")));
    assert_eq!(store.middleware_ids(), before);
    assert_eq!(before[0].as_str(), "guard");
}

#[test]
fn middleware_can_swallow_and_transform() {
    let store = Store::new();
    store
        .register_slice(SliceDescriptor::new("cart", Cart::default(), cart_r1))
        .unwrap();
    store.register_middleware(MiddlewareEntry::new("block-clear", |_ctx, a, next| {
        if !a.is("cart/clear") {
            next.run(a);
        }
    }));
    store.register_middleware(MiddlewareEntry::new("upper", |_ctx, mut a, next| {
        if let Some(s) = a.payload.as_str() {
            a.payload = json!(s.to_uppercase());
        }
        next.run(a);
    }));
    store.dispatch(add("lot"));
    store.dispatch(Action::new("cart/clear"));
    assert_eq!(store.state_of::<Cart>("cart").unwrap().items, vec!["LOT"]);
}

#[test]
fn chain_changes_apply_from_next_dispatch() {
    let store = Store::new();
    let late_hits = Arc::new(AtomicUsize::new(0));
    let installed = Arc::new(AtomicUsize::new(0));

    let hits = late_hits.clone();
    let inst = installed.clone();
    store.register_middleware(MiddlewareEntry::new("installer", move |ctx, a, next| {
        if inst.fetch_add(1, Ordering::SeqCst) == 0 {
            let hits = hits.clone();
            ctx.store()
                .register_middleware(MiddlewareEntry::new("late", move |_ctx, a, next| {
                    hits.fetch_add(1, Ordering::SeqCst);
                    next.run(a);
                }));
            ctx.store()
                .unregister_middleware(&MiddlewareId::new("installer"));
        }
        next.run(a);
    }));

    let reached = Arc::new(AtomicUsize::new(0));
    let r = reached.clone();
    store.subscribe(move |_| {
        r.fetch_add(1, Ordering::SeqCst);
    });

    store.dispatch(Action::new("first"));
    // The in-flight action neither hit the new entry nor was dropped.
    assert_eq!(late_hits.load(Ordering::SeqCst), 0);
    assert_eq!(reached.load(Ordering::SeqCst), 1);

    store.dispatch(Action::new("second"));
    assert_eq!(late_hits.load(Ordering::SeqCst), 1);
    assert_eq!(installed.load(Ordering::SeqCst), 1);
    assert_eq!(reached.load(Ordering::SeqCst), 2);
}

#[test]
fn middleware_may_dispatch_follow_ups() {
    let store = Store::new();
    store
        .register_slice(SliceDescriptor::new("cart", Cart::default(), cart_r1))
        .unwrap();
    store.register_middleware(MiddlewareEntry::new("checkout", |ctx, a, next| {
        let checkout = a.is("cart/checkout");
        next.run(a);
        if checkout {
            ctx.store().dispatch(Action::new("cart/clear"));
        }
    }));
    store.dispatch(add("a"));
    store.dispatch(Action::new("cart/checkout"));
    assert!(store.state_of::<Cart>("cart").unwrap().items.is_empty());
}

#[test]
fn execution_order_follows_tiers() {
    let store = Store::new();
    let log = Arc::new(Mutex::new(Vec::new()));
    for (id, prio) in [
        ("n1", Priority::Normal),
        ("low", Priority::Low),
        ("n2", Priority::Normal),
        ("high", Priority::High),
    ] {
        let log = log.clone();
        store.register_middleware(
            MiddlewareEntry::new(id, move |_ctx, a, next| {
                log.lock().push(id);
                next.run(a);
            })
            .priority(prio),
        );
    }
    store.dispatch(Action::new("x"));
    assert_eq!(*log.lock(), vec!["high", "n1", "n2", "low"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_out_of_order_registration() {
    let store = Store::new();
    let mut tasks = Vec::new();
    for i in 0..16 {
        let store = store.clone();
        tasks.push(tokio::spawn(async move {
            if i % 2 == 0 {
                store
                    .register_slice(SliceDescriptor::new("cart", Cart::default(), cart_r1))
                    .map(|_| ())
            } else {
                store
                    .register_slice(SliceDescriptor::new("cart", Cart::default(), cart_r2))
                    .map(|_| ())
            }
        }));
    }
    let mut ok = 0;
    let mut conflicts = 0;
    for t in tasks {
        match t.await.unwrap() {
            Ok(()) => ok += 1,
            Err(StoreError::Conflict { .. }) => conflicts += 1,
        }
    }
    // Whichever reducer won, exactly its eight registrations succeed.
    assert_eq!(ok, 8);
    assert_eq!(conflicts, 8);
    assert_eq!(store.slice_names(), vec!["cart".to_string()]);
}

proptest! {
    #[test]
    fn identical_reregistration_preserves_dispatch(
        skus in proptest::collection::vec("[a-z]{1,6}", 0..12),
        repeat_at in 0usize..12,
    ) {
        let plain = Store::new();
        plain.register_slice(SliceDescriptor::new("cart", Cart::default(), cart_r1)).unwrap();
        let remounted = Store::new();
        remounted.register_slice(SliceDescriptor::new("cart", Cart::default(), cart_r1)).unwrap();

        for (i, sku) in skus.iter().enumerate() {
            if i == repeat_at {
                remounted
                    .register_slice(SliceDescriptor::new("cart", Cart::default(), cart_r1))
                    .unwrap();
            }
            plain.dispatch(add(sku));
            remounted.dispatch(add(sku));
        }
        prop_assert_eq!(plain.state_of::<Cart>("cart"), remounted.state_of::<Cart>("cart"));
    }
}
