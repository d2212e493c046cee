use common::{CartId, ItemId, UserId};
use criterion::{Criterion, criterion_group, criterion_main};
use domain::{Cart, Item, Money, Order};

fn widget(id: i64) -> Item {
    Item::new(ItemId::new(id), "Benchmark Widget", Money::from_cents(1099), "")
}

fn bench_add_items(c: &mut Criterion) {
    let item = widget(1);

    c.bench_function("cart/add_100", |b| {
        b.iter(|| {
            let mut cart = Cart::new(CartId::new(1), UserId::new(1));
            cart.add_item(&item, 100);
            cart
        });
    });
}

fn bench_remove_items(c: &mut Criterion) {
    let round = widget(1);
    let square = widget(2);
    let mut full = Cart::new(CartId::new(1), UserId::new(1));
    full.add_item(&round, 50);
    full.add_item(&square, 50);

    c.bench_function("cart/remove_50_of_100", |b| {
        b.iter(|| {
            let mut cart = full.clone();
            cart.remove_item(&square, 50);
            cart
        });
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let mut cart = Cart::new(CartId::new(1), UserId::new(1));
    cart.add_item(&widget(1), 100);

    c.bench_function("order/snapshot_100", |b| {
        b.iter(|| Order::snapshot(&cart));
    });
}

criterion_group!(benches, bench_add_items, bench_remove_items, bench_snapshot);
criterion_main!(benches);
