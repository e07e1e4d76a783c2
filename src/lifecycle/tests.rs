use std::sync::{Arc, Mutex};
use std::time::Duration;

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;
use rand::{SeedableRng, rngs::StdRng};

use super::LifecyclePlugin;
use super::components::{CollectFlight, CollectionPhase, EjectionPhase, PendingCommits, ThrowFlight};
use crate::core::{FrameSet, config::LifecycleConfig, configure_frame_sets, states::AppState};
use crate::display::{
    DisplayPlugin,
    components::{FloatingMessage, InventoryView, SlotAnchors},
};
use crate::inventory::{
    InventoryPlugin,
    components::{ItemKind, NO_TINT, PickupDescriptor},
    events::{InventoryNotice, InventoryRequest},
    store::SlotStore,
};
use crate::motion::{ArcTweenFinished, MotionPlugin, components::ArcTween};
use crate::world::{
    WorldPlugin,
    components::{Collectible, Collector, ITEM_Z, Player, Solid},
    placement::PlacementRng,
};

type Recorder = Arc<Mutex<Vec<InventoryNotice>>>;

fn test_app(slot_count: usize) -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin))
        .insert_state(AppState::InGame)
        .insert_resource(LifecycleConfig {
            slot_count,
            ..default()
        })
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(50)))
        .insert_resource(PlacementRng(StdRng::seed_from_u64(9)));
    configure_frame_sets(&mut app);
    app.add_plugins((
        InventoryPlugin,
        MotionPlugin,
        WorldPlugin,
        LifecyclePlugin,
        DisplayPlugin,
    ));
    app
}

fn record(app: &mut App) -> Recorder {
    let seen: Recorder = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    app.world_mut()
        .resource_mut::<SlotStore>()
        .subscribe(move |n| sink.lock().unwrap().push(n.clone()));
    seen
}

/// 动画走完那一帧、提交销毁之前的落点
#[derive(Resource, Default)]
struct Landings(Vec<(Entity, Vec2)>);

fn record_landings(
    mut finished: EventReader<ArcTweenFinished>,
    transforms: Query<&Transform>,
    mut landings: ResMut<Landings>,
) {
    for ev in finished.read() {
        if let Ok(tf) = transforms.get(ev.entity) {
            landings.0.push((ev.entity, tf.translation.truncate()));
        }
    }
}

fn coin() -> PickupDescriptor {
    PickupDescriptor::new(ItemKind::GoldCoin, "Gold Coin", "", [1.0, 0.84, 0.0, 1.0], false, 1)
}

fn kitten() -> PickupDescriptor {
    PickupDescriptor::new(ItemKind::Kitten, "Kitten", "", NO_TINT, false, 1)
}

fn spawn_collector(app: &mut App, pos: Vec2, player: bool) -> Entity {
    let mut entity = app.world_mut().spawn((
        Collector { radius: 1.0 },
        Transform::from_translation(pos.extend(10.0)),
    ));
    if player {
        entity.insert(Player);
    }
    entity.id()
}

fn spawn_item(app: &mut App, descriptor: PickupDescriptor, pos: Vec2) -> Entity {
    app.world_mut()
        .spawn((
            Collectible::new(descriptor, 0.5),
            Transform::from_translation(pos.extend(ITEM_Z)),
        ))
        .id()
}

fn spawn_floor(app: &mut App) {
    app.world_mut().spawn((
        Solid {
            half_extents: Vec2::new(20.0, 0.5),
        },
        Transform::from_xyz(0.0, -1.5, 0.0),
    ));
}

fn store(app: &App) -> &SlotStore {
    app.world().resource::<SlotStore>()
}

fn view(app: &App) -> &InventoryView {
    app.world().resource::<InventoryView>()
}

#[test]
fn collection_commits_only_when_flight_lands() {
    let mut app = test_app(3);
    let seen = record(&mut app);
    spawn_collector(&mut app, Vec2::ZERO, true);
    let item = spawn_item(&mut app, coin(), Vec2::new(0.5, 0.0));

    app.update();

    // 背包已写入，但通知未发、界面未变
    assert_eq!(store(&app).get(0).unwrap().kind, ItemKind::GoldCoin);
    assert_eq!(
        app.world().get::<CollectionPhase>(item),
        Some(&CollectionPhase::Reserved)
    );
    assert!(app.world().get::<Collectible>(item).unwrap().is_collected());
    assert_eq!(app.world().get::<CollectFlight>(item).map(|f| f.slot), Some(0));
    assert!(app.world().get::<ArcTween>(item).is_none());
    assert_eq!(app.world().resource::<PendingCommits>().slot_of(item), Some(0));
    assert!(seen.lock().unwrap().is_empty());

    app.update();
    assert_eq!(
        app.world().get::<CollectionPhase>(item),
        Some(&CollectionPhase::Animating)
    );
    assert!(app.world().get::<ArcTween>(item).is_some());

    let mut frames = 0;
    while app.world().get_entity(item).is_ok() {
        assert!(seen.lock().unwrap().is_empty());
        assert!(view(&app).get(0).is_none());
        app.update();
        frames += 1;
        assert!(frames < 100, "flight never landed");
    }

    assert_eq!(
        *seen.lock().unwrap(),
        vec![InventoryNotice::ItemAdded {
            name: "Gold Coin".into(),
            slot: 0
        }]
    );
    assert_eq!(view(&app).get(0).unwrap().quantity, 1);
    assert!(app.world().resource::<PendingCommits>().is_empty());
}

#[test]
fn full_inventory_leaves_item_and_signals_once() {
    let mut app = test_app(1);
    let seen = record(&mut app);
    app.world_mut().resource_mut::<SlotStore>().add(&kitten()).unwrap();
    let collector_at = Vec2::new(1.0, 2.0);
    spawn_collector(&mut app, collector_at, true);
    let item = spawn_item(&mut app, coin(), collector_at + Vec2::new(0.3, 0.0));
    let before = store(&app).slots().to_vec();

    app.update();

    // 提示出现在收集者的位置
    let mut messages = app.world_mut().query::<(&FloatingMessage, &Transform)>();
    let spawned: Vec<Vec2> = messages
        .iter(app.world())
        .map(|(_, tf)| tf.translation.truncate())
        .collect();
    assert_eq!(spawned, vec![collector_at]);

    app.update();
    app.update();

    let collectible = app.world().get::<Collectible>(item).unwrap();
    assert!(collectible.is_collectible());
    assert_eq!(
        app.world().get::<CollectionPhase>(item),
        Some(&CollectionPhase::Idle)
    );
    assert!(app.world().get::<ArcTween>(item).is_none());
    assert_eq!(store(&app).slots(), before.as_slice());
    assert!(seen.lock().unwrap().is_empty());

    // 持续重叠只算一次接触
    let mut messages = app.world_mut().query::<&FloatingMessage>();
    assert_eq!(messages.iter(app.world()).count(), 1);
}

#[test]
fn overlapping_collectors_reserve_only_once() {
    let mut app = test_app(3);
    spawn_collector(&mut app, Vec2::new(-0.5, 0.0), true);
    spawn_collector(&mut app, Vec2::new(0.5, 0.0), false);
    spawn_item(&mut app, coin(), Vec2::ZERO);

    app.update();

    assert_eq!(store(&app).occupied(), 1);
    assert_eq!(app.world().resource::<PendingCommits>().len(), 1);
}

#[test]
fn ejection_clears_slot_at_once_and_item_lands() {
    let mut app = test_app(3);
    let seen = record(&mut app);
    {
        let mut store = app.world_mut().resource_mut::<SlotStore>();
        store.add(&kitten()).unwrap();
        store.add(&coin()).unwrap();
    }
    spawn_collector(&mut app, Vec2::ZERO, true);
    spawn_floor(&mut app);

    app.world_mut().send_event(InventoryRequest::Eject { slot: 1 });
    app.update();

    assert!(store(&app).get(1).unwrap().is_empty());
    assert_eq!(store(&app).get(0).unwrap().kind, ItemKind::Kitten);
    assert_eq!(
        *seen.lock().unwrap(),
        vec![InventoryNotice::ItemRemoved { slot: 1 }]
    );

    let mut flights = app.world_mut().query::<(Entity, &ThrowFlight)>();
    let thrown: Vec<(Entity, ThrowFlight)> = flights
        .iter(app.world())
        .map(|(e, f)| (e, *f))
        .collect();
    assert_eq!(thrown.len(), 1);
    let (entity, flight) = thrown[0];

    assert_eq!(flight.landing.x.abs(), 2.0);
    assert!((flight.landing.y - (-1.0 + 0.1)).abs() < 1e-5);
    assert_eq!(
        app.world().get::<EjectionPhase>(entity),
        Some(&EjectionPhase::Released)
    );
    assert!(app.world().get::<ArcTween>(entity).is_none());
    assert!(!app.world().get::<Collectible>(entity).unwrap().is_collectible());

    app.update();
    assert_eq!(
        app.world().get::<EjectionPhase>(entity),
        Some(&EjectionPhase::Animating)
    );
    assert!(app.world().get::<ArcTween>(entity).is_some());

    let mut frames = 0;
    while app.world().get::<EjectionPhase>(entity) != Some(&EjectionPhase::Spawned) {
        app.update();
        frames += 1;
        assert!(frames < 100, "throw never landed");
    }

    let transform = app.world().get::<Transform>(entity).unwrap();
    assert_eq!(transform.translation.truncate(), flight.landing);
    assert_eq!(transform.scale, Vec3::ONE);
    assert!(app.world().get::<ArcTween>(entity).is_none());
    assert!(app.world().get::<ThrowFlight>(entity).is_none());
    assert!(app.world().get::<Collectible>(entity).unwrap().is_collectible());

    // 落地本身不产生任何新通知，物品也没被原地捡回
    assert_eq!(seen.lock().unwrap().len(), 1);
    assert_eq!(store(&app).occupied(), 1);
}

#[test]
fn ejecting_empty_or_missing_slot_is_a_no_op() {
    let mut app = test_app(2);
    let seen = record(&mut app);
    spawn_collector(&mut app, Vec2::ZERO, true);

    app.world_mut().send_event(InventoryRequest::Eject { slot: 0 });
    app.world_mut().send_event(InventoryRequest::Eject { slot: 7 });
    app.update();

    assert!(seen.lock().unwrap().is_empty());
    let mut items = app.world_mut().query::<&Collectible>();
    assert_eq!(items.iter(app.world()).count(), 0);
}

#[test]
fn move_swaps_and_notifies_immediately() {
    let mut app = test_app(3);
    let seen = record(&mut app);
    {
        let mut store = app.world_mut().resource_mut::<SlotStore>();
        store.add(&kitten()).unwrap();
        store.add(&coin()).unwrap();
    }

    app.world_mut().send_event(InventoryRequest::Move { from: 0, to: 2 });
    app.world_mut().send_event(InventoryRequest::Move { from: 1, to: 9 });
    app.update();

    assert!(store(&app).get(0).unwrap().is_empty());
    assert_eq!(store(&app).get(1).unwrap().kind, ItemKind::GoldCoin);
    assert_eq!(store(&app).get(2).unwrap().kind, ItemKind::Kitten);
    assert_eq!(
        *seen.lock().unwrap(),
        vec![InventoryNotice::ItemMoved { from: 0, to: 2 }]
    );
    assert_eq!(view(&app).get(2).unwrap().name, "Kitten");
}

#[test]
fn requests_apply_in_the_order_they_were_made() {
    let mut app = test_app(3);
    app.world_mut().resource_mut::<SlotStore>().add(&kitten()).unwrap();
    spawn_collector(&mut app, Vec2::ZERO, true);
    let item = spawn_item(&mut app, coin(), Vec2::new(0.2, 0.0));

    // 交换先于本帧的接触检测入队，拾取应看到交换后的空位
    app.world_mut().send_event(InventoryRequest::Move { from: 0, to: 2 });
    app.update();

    assert_eq!(store(&app).get(0).unwrap().kind, ItemKind::GoldCoin);
    assert_eq!(store(&app).get(2).unwrap().kind, ItemKind::Kitten);
    assert_eq!(app.world().resource::<PendingCommits>().slot_of(item), Some(0));
}

#[test]
fn destroyed_flight_keeps_slot_without_notifying() {
    let mut app = test_app(3);
    let seen = record(&mut app);
    spawn_collector(&mut app, Vec2::ZERO, true);
    let item = spawn_item(&mut app, coin(), Vec2::new(0.5, 0.0));

    app.update();
    assert_eq!(app.world().resource::<PendingCommits>().len(), 1);

    app.world_mut().despawn(item);
    for _ in 0..20 {
        app.update();
    }

    assert!(app.world().resource::<PendingCommits>().is_empty());
    assert!(seen.lock().unwrap().is_empty());
    assert_eq!(store(&app).get(0).unwrap().kind, ItemKind::GoldCoin);
    assert!(view(&app).get(0).is_none());
}

#[test]
fn stackable_pickups_share_a_slot() {
    let mut app = test_app(3);
    let seen = record(&mut app);
    let gem = PickupDescriptor::new(ItemKind::Custom, "Gem", "", NO_TINT, true, 5);
    spawn_collector(&mut app, Vec2::ZERO, true);
    spawn_item(&mut app, gem.clone(), Vec2::new(0.2, 0.0));
    spawn_item(&mut app, gem, Vec2::new(-0.2, 0.0));

    for _ in 0..40 {
        app.update();
    }

    assert_eq!(store(&app).get(0).unwrap().quantity, 2);
    assert!(store(&app).get(1).unwrap().is_empty());
    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            InventoryNotice::ItemAdded { name: "Gem".into(), slot: 0 },
            InventoryNotice::ItemAdded { name: "Gem".into(), slot: 0 },
        ]
    );
    assert_eq!(view(&app).get(0).unwrap().quantity, 2);
}

#[test]
fn thrown_item_cannot_be_collected_until_it_lands() {
    let mut app = test_app(3);
    app.world_mut().resource_mut::<SlotStore>().add(&kitten()).unwrap();
    let player = spawn_collector(&mut app, Vec2::ZERO, true);
    spawn_floor(&mut app);

    app.world_mut().send_event(InventoryRequest::Eject { slot: 0 });
    app.update();

    let mut flights = app.world_mut().query_filtered::<Entity, With<ThrowFlight>>();
    let thrown = flights.single(app.world()).unwrap();

    // 免疫（0.3s）先于抛物动画（0.5s）结束
    let mut frames = 0;
    while !app.world().get::<Collectible>(thrown).unwrap().is_collectible() {
        app.update();
        frames += 1;
        assert!(frames < 100, "immunity never expired");
    }
    assert!(app.world().get::<ArcTween>(thrown).is_some());

    app.world_mut().send_event(InventoryRequest::Collect {
        item: thrown,
        collector: player,
    });
    app.update();

    assert!(store(&app).get(0).unwrap().is_empty());
    assert!(app.world().resource::<PendingCommits>().is_empty());
    assert_eq!(
        app.world().get::<CollectionPhase>(thrown),
        Some(&CollectionPhase::Idle)
    );
    assert!(app.world().get::<CollectFlight>(thrown).is_none());
    assert_eq!(
        app.world().get::<EjectionPhase>(thrown),
        Some(&EjectionPhase::Animating)
    );

    // 落地后同样的请求才会被接受
    while app.world().get::<EjectionPhase>(thrown) != Some(&EjectionPhase::Spawned) {
        app.update();
        frames += 1;
        assert!(frames < 200, "throw never landed");
    }
    app.world_mut().send_event(InventoryRequest::Collect {
        item: thrown,
        collector: player,
    });
    app.update();
    assert_eq!(store(&app).get(0).unwrap().kind, ItemKind::Kitten);
    assert_eq!(app.world().resource::<PendingCommits>().slot_of(thrown), Some(0));
}

#[test]
fn collected_item_lands_on_the_slot_after_the_player_moves() {
    let mut app = test_app(3);
    app.init_resource::<Landings>().add_systems(
        Update,
        record_landings
            .after(FrameSet::Motion)
            .before(FrameSet::Commit),
    );
    let player = spawn_collector(&mut app, Vec2::ZERO, true);
    let item = spawn_item(&mut app, coin(), Vec2::new(0.5, 0.0));

    app.update();
    app.update();
    assert!(app.world().get::<ArcTween>(item).is_some());
    let before = app.world().resource::<SlotAnchors>().position(0).unwrap();

    // 飞行途中玩家（以及跟随的 HUD）移走
    let mut player_tf = app.world_mut().get_mut::<Transform>(player).unwrap();
    player_tf.translation = Vec3::new(5.0, 3.0, 10.0);

    let mut frames = 0;
    while app.world().get_entity(item).is_ok() {
        app.update();
        frames += 1;
        assert!(frames < 100, "flight never landed");
    }

    let after = app.world().resource::<SlotAnchors>().position(0).unwrap();
    assert_ne!(before, after);
    assert_eq!(app.world().resource::<Landings>().0, vec![(item, after)]);
}
