use std::sync::Arc;

use tokio::sync::RwLock;

use digit_radar::broadcast::{Broadcaster, InitSnapshot, StreamMessage};
use digit_radar::model::tick::Tick;
use digit_radar::pipeline::TickPipeline;
use digit_radar::signal::RiseFall;
use digit_radar::store::MarketStore;

fn new_store(markets: &[&str], capacity: usize) -> Arc<RwLock<MarketStore>> {
    let markets: Vec<String> = markets.iter().map(|s| s.to_string()).collect();
    Arc::new(RwLock::new(MarketStore::new(&markets, capacity)))
}

fn tick(i: i64) -> Tick {
    Tick {
        price: 100.0 + i as f64 * 0.01,
        digit: (i % 10) as u8,
        epoch: 1_700_000_000 + i,
    }
}

#[tokio::test]
async fn process_appends_computes_and_publishes() {
    let store = new_store(&["R_75"], 100);
    let broadcaster = Arc::new(Broadcaster::new(64));
    let pipeline = TickPipeline::new(store.clone(), broadcaster.clone());

    let (_id, mut rx) = broadcaster
        .subscribe(InitSnapshot::from_store(&*store.read().await))
        .await;
    assert!(matches!(rx.recv().await.unwrap(), StreamMessage::Init(_)));

    for i in 0..25 {
        pipeline.process("R_75", tick(i)).await;
    }

    {
        let store = store.read().await;
        assert_eq!(store.len("R_75"), 25);
        let snapshot = store.snapshot("R_75").unwrap();
        assert!((snapshot.tick.price - tick(24).price).abs() < f64::EPSILON);
        assert!((0.0..=100.0).contains(&snapshot.indicators.rsi));
        // 25 strictly rising prices: never SCANNING anymore
        assert_ne!(snapshot.signals.rise_fall, RiseFall::Scanning);
        assert!((store.prices()["R_75"] - tick(24).price).abs() < f64::EPSILON);
    }

    for i in 0..25 {
        match rx.recv().await.unwrap() {
            StreamMessage::Tick(update) => {
                assert_eq!(update.market, "R_75");
                assert_eq!(update.epoch, tick(i).epoch);
                assert_eq!(update.digit, tick(i).digit);
            }
            StreamMessage::Init(_) => panic!("unexpected second init"),
        }
    }
}

#[tokio::test]
async fn published_state_matches_the_cached_snapshot() {
    let store = new_store(&["R_50"], 100);
    let broadcaster = Arc::new(Broadcaster::new(64));
    let pipeline = TickPipeline::new(store.clone(), broadcaster.clone());

    for i in 0..30 {
        pipeline.process("R_50", tick(i)).await;
    }
    let (_id, mut rx) = broadcaster
        .subscribe(InitSnapshot::from_store(&*store.read().await))
        .await;
    pipeline.process("R_50", tick(30)).await;

    assert!(matches!(rx.recv().await.unwrap(), StreamMessage::Init(_)));
    let update = match rx.recv().await.unwrap() {
        StreamMessage::Tick(update) => update,
        StreamMessage::Init(_) => panic!("expected tick"),
    };
    let store = store.read().await;
    let snapshot = store.snapshot("R_50").unwrap();
    assert_eq!(update.indicators, snapshot.indicators);
    assert_eq!(update.signals, snapshot.signals);
}

#[tokio::test]
async fn unknown_market_is_discarded_not_published() {
    let store = new_store(&["R_75"], 100);
    let broadcaster = Arc::new(Broadcaster::new(8));
    let pipeline = TickPipeline::new(store.clone(), broadcaster.clone());

    let (_id, mut rx) = broadcaster
        .subscribe(InitSnapshot::from_store(&*store.read().await))
        .await;
    pipeline.process("R_99", tick(0)).await;

    assert_eq!(pipeline.discarded(), 1);
    assert_eq!(store.read().await.len("R_75"), 0);
    assert!(matches!(rx.recv().await.unwrap(), StreamMessage::Init(_)));
    assert!(rx.try_recv().is_err(), "nothing must be published");
}

#[tokio::test]
async fn late_subscriber_gets_current_state_in_its_init() {
    let store = new_store(&["R_75", "R_100"], 100);
    let broadcaster = Arc::new(Broadcaster::new(8));
    let pipeline = TickPipeline::new(store.clone(), broadcaster.clone());

    for i in 0..22 {
        pipeline.process("R_75", tick(i)).await;
        pipeline.process("R_100", tick(i)).await;
    }

    let (_id, mut rx) = broadcaster
        .subscribe(InitSnapshot::from_store(&*store.read().await))
        .await;
    match rx.recv().await.unwrap() {
        StreamMessage::Init(snapshot) => {
            assert!((snapshot.prices["R_75"] - tick(21).price).abs() < f64::EPSILON);
            assert!(snapshot.signals.contains_key("R_75"));
            assert!(snapshot.signals.contains_key("R_100"));
            assert!(snapshot.indicators.contains_key("R_100"));
        }
        StreamMessage::Tick(_) => panic!("init must come first"),
    }
}

#[tokio::test]
async fn windows_stay_bounded_under_load() {
    let store = new_store(&["R_10"], 50);
    let broadcaster = Arc::new(Broadcaster::new(8));
    let pipeline = TickPipeline::new(store.clone(), broadcaster);

    for i in 0..180 {
        pipeline.process("R_10", tick(i)).await;
        assert!(store.read().await.len("R_10") <= 50);
    }
    let store = store.read().await;
    let retained = store.recent("R_10", 50);
    assert_eq!(retained.len(), 50);
    assert_eq!(retained[0].epoch, tick(130).epoch);
    assert_eq!(retained[49].epoch, tick(179).epoch);
}
