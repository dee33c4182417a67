//! Registry-level scenarios: a host driving tweens through `tick` once per frame.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec3;

use zap_tween::{
    ease, EaseCurve, LoopType, Node, NodeHandle, PropertyKind, RegistryConfig, TargetId, TweenDesc,
    TweenError, TweenEventKind, TweenRegistry, TweenValue,
};

const EPSILON: f32 = 1e-4;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn spawn(id: u32) -> NodeHandle {
    NodeHandle::new(Node::new(TargetId(id)))
}

fn x(node: &NodeHandle) -> f32 {
    node.borrow().pos.x
}

#[test]
fn every_curve_hits_both_endpoints() {
    for curve in EaseCurve::ALL {
        assert_eq!(ease(curve, 0.0, 3.0, 7.0, 2.0), 3.0, "{:?}", curve);
        assert_eq!(ease(curve, 2.0, 3.0, 7.0, 2.0), 10.0, "{:?}", curve);
    }
}

#[test]
fn linear_move_runs_to_completion_and_is_reclaimed() {
    init_logger();
    let mut tweens = TweenRegistry::new();
    let node = spawn(1);
    let id = tweens
        .create(node.bind(PropertyKind::Move), Vec3::new(10.0, 0.0, 0.0).into(), 1.0)
        .unwrap();

    tweens.tick(0.0);
    tweens.tick(0.5);
    let mid = x(&node);
    assert!(mid > 0.0 && mid < 10.0, "mid = {}", mid);

    assert_eq!(tweens.tick(0.5), 1);
    assert_eq!(x(&node), 10.0);
    assert!(tweens.get(id).is_none());
    assert_eq!(tweens.get_all().count(), 0);
}

#[test]
fn delay_holds_then_starts_with_overshoot() {
    init_logger();
    let mut tweens = TweenRegistry::new();
    let node = spawn(1);
    let started = Rc::new(RefCell::new(0));
    let s = started.clone();

    let mut tween = node.move_to(Vec3::new(10.0, 0.0, 0.0), 1.0).unwrap().with_delay(1.0);
    tween.on_start(move || *s.borrow_mut() += 1);
    tweens.add(tween);

    tweens.tick(0.0);
    tweens.tick(0.5);
    assert_eq!(x(&node), 0.0);
    assert_eq!(*started.borrow(), 0);

    tweens.tick(0.6);
    assert_eq!(*started.borrow(), 1);
    assert!(approx_eq(x(&node), 1.0), "x = {}", x(&node));

    tweens.tick(0.1);
    assert_eq!(*started.borrow(), 1);
}

#[test]
fn restart_loops_report_each_cycle() {
    init_logger();
    let mut tweens = TweenRegistry::new();
    let node = spawn(1);
    let loops = Rc::new(RefCell::new(Vec::new()));
    let l = loops.clone();

    let mut tween = node
        .move_to(Vec3::new(10.0, 0.0, 0.0), 0.5)
        .unwrap()
        .with_loop(Some(3), LoopType::Restart);
    tween.on_loop(move |n| l.borrow_mut().push(n));
    let id = tweens.add(tween);

    tweens.tick(0.0);
    for _ in 0..3 {
        tweens.tick(0.5);
    }
    assert_eq!(*loops.borrow(), vec![1, 2, 3]);
    assert!(tweens.get(id).is_none());
    assert_eq!(x(&node), 10.0);
}

#[test]
fn oscillate_goes_out_and_back() {
    let mut tweens = TweenRegistry::new();
    let node = spawn(1);
    let tween = node
        .move_to(Vec3::new(10.0, 0.0, 0.0), 1.0)
        .unwrap()
        .with_loop(None, LoopType::Oscillate);
    let id = tweens.add(tween);

    tweens.tick(0.0);
    tweens.tick(1.0);
    assert_eq!(x(&node), 10.0);
    tweens.tick(1.0);
    assert_eq!(x(&node), 0.0);

    let tween = tweens.get(id).unwrap();
    assert_eq!(tween.passed_loops(), 2);
    assert!(tween.is_incrementing());
}

#[test]
fn cancel_restores_and_stop_freezes() {
    let mut tweens = TweenRegistry::new();
    let a = spawn(1);
    let b = spawn(2);
    let completed = Rc::new(RefCell::new(false));
    let c = completed.clone();

    let mut cancelled = a.move_to(Vec3::new(10.0, 0.0, 0.0), 1.0).unwrap();
    cancelled.on_complete(move || *c.borrow_mut() = true);
    let cancel_id = tweens.add(cancelled);
    let stop_id = tweens
        .create(b.bind(PropertyKind::Move), Vec3::new(10.0, 0.0, 0.0).into(), 1.0)
        .unwrap();

    tweens.tick(0.0);
    tweens.tick(0.5);
    let b_mid = x(&b);

    tweens.cancel(cancel_id);
    tweens.stop(stop_id);
    assert_eq!(x(&a), 0.0);
    assert_eq!(x(&b), b_mid);
    assert!(!*completed.borrow());

    assert_eq!(tweens.tick(0.5), 2);
    assert_eq!(x(&b), b_mid);
}

#[test]
fn finished_tween_stays_when_kill_on_end_is_off() {
    let mut tweens = TweenRegistry::new();
    let node = spawn(1);
    let keep = tweens.add(node.fade_out(0.5).unwrap().with_kill_on_end(false));
    let drop_me = tweens.add(node.scale_to(Vec3::splat(2.0), 0.5).unwrap());

    tweens.tick(0.0);
    tweens.tick(0.5);

    assert_eq!(tweens.len(), 1);
    let kept = tweens.get(keep).unwrap();
    assert!(kept.is_alive() && kept.is_completed() && !kept.is_running());
    assert!(tweens.get(drop_me).is_none());
    assert_eq!(node.borrow().alpha, 0.0);

    tweens.reset(keep, true);
    assert_eq!(node.borrow().alpha, 1.0);
    tweens.kill(keep);
    tweens.tick(0.0);
    assert!(tweens.is_empty());
    assert!(!tweens.is_active());
}

#[test]
fn loop_counts_at_or_below_zero_mean_forever() {
    let node = spawn(1);
    for count in [Some(0), Some(-2), None] {
        let mut tween = node.move_to(Vec3::X, 1.0).unwrap();
        tween.set_loop(count, LoopType::Restart);
        assert_eq!(tween.loops_count(), -1, "{:?}", count);
        assert!(tween.life_time().is_infinite());
    }
}

#[test]
fn pause_and_play_through_the_registry() {
    let mut tweens = TweenRegistry::new();
    let node = spawn(1);
    let id = tweens.create(node.bind(PropertyKind::Move), Vec3::X.into(), 1.0).unwrap();

    tweens.pause(id);
    tweens.pause(id);
    assert!(!tweens.get(id).unwrap().is_running());
    tweens.tick(0.0);
    tweens.tick(0.5);
    assert_eq!(x(&node), 0.0);

    tweens.play(id);
    tweens.play(id);
    assert!(tweens.get(id).unwrap().is_running());
}

#[test]
fn destroyed_node_takes_its_tweens_with_it() {
    init_logger();
    let mut tweens = TweenRegistry::new();
    let keep = spawn(1);
    let doomed = spawn(2);
    let weak = doomed.downgrade();
    tweens.create(doomed.bind(PropertyKind::Move), Vec3::X.into(), 1.0).unwrap();
    tweens.create(doomed.bind(PropertyKind::Fade), TweenValue::Scalar(0.0), 1.0).unwrap();
    tweens.create(keep.bind(PropertyKind::Rotate), Vec3::Z.into(), 1.0).unwrap();

    tweens.tick(0.0);
    drop(doomed);

    assert!(matches!(tweens.pause_target(&weak), Err(TweenError::InvalidTarget)));
    assert_eq!(tweens.tick(0.1), 2);
    assert_eq!(tweens.get_by_target(&keep).unwrap().len(), 1);
}

#[test]
fn tweens_load_from_json_descriptions() {
    init_logger();
    let config = RegistryConfig::from_json(r#"{ "record_events": true }"#).unwrap();
    let mut tweens = TweenRegistry::with_config(config);
    let node = spawn(1);
    let desc = TweenDesc::from_json(
        r#"{ "kind": "fade", "from": 0.0, "to": 1.0, "duration": 0.5, "curve": "QuadIn" }"#,
    )
    .unwrap();
    let id = tweens.create_from_desc(&desc, &node).unwrap();
    assert_eq!(tweens.get(id).unwrap().curve(), EaseCurve::QuadIn);

    tweens.tick(0.0);
    tweens.tick(0.25);
    assert!(approx_eq(node.borrow().alpha, 0.25));
    tweens.tick(0.25);
    assert_eq!(node.borrow().alpha, 1.0);

    let kinds: Vec<_> = tweens.drain_events().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![TweenEventKind::Started, TweenEventKind::Completed, TweenEventKind::Killed]
    );
}
