//! End-to-end tests for the edit session against a recording fake host.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use mapdraw::draw::{EditSession, Feature, ModeKind, SessionEvent};
use mapdraw::geom::Geometry;
use mapdraw::host::{
    CursorIcon, HitFeature, LayerSpec, LngLat, MapHost, PointerEvent, ScreenPoint,
};

#[derive(Default)]
struct FakeHost {
    ready: bool,
    sources: HashMap<String, Vec<Feature>>,
    layers: Vec<(String, String)>,
    cursor: Option<CursorIcon>,
    next_hit: Option<HitFeature>,
}

impl FakeHost {
    fn ready() -> Rc<RefCell<FakeHost>> {
        Rc::new(RefCell::new(FakeHost {
            ready: true,
            ..FakeHost::default()
        }))
    }

    fn source_features(&self, source_id: &str) -> Vec<Feature> {
        self.sources.get(source_id).cloned().unwrap_or_default()
    }
}

impl MapHost for FakeHost {
    fn style_ready(&self) -> bool {
        self.ready
    }

    fn add_source(&mut self, source_id: &str, features: &[Feature]) {
        self.sources.insert(source_id.to_string(), features.to_vec());
    }

    fn set_source_data(&mut self, source_id: &str, features: &[Feature]) {
        self.sources.insert(source_id.to_string(), features.to_vec());
    }

    fn remove_source(&mut self, source_id: &str) {
        self.sources.remove(source_id);
    }

    fn add_layer(&mut self, source_id: &str, layer: &LayerSpec) {
        self.layers.push((layer.id.clone(), source_id.to_string()));
    }

    fn remove_layer(&mut self, layer_id: &str) {
        self.layers.retain(|(id, _)| id != layer_id);
    }

    fn query_hit(&self, _point: ScreenPoint) -> Option<HitFeature> {
        self.next_hit.clone()
    }

    fn set_cursor(&mut self, icon: Option<CursorIcon>) {
        self.cursor = icon;
    }
}

fn shared(host: &Rc<RefCell<FakeHost>>) -> Rc<RefCell<dyn MapHost>> {
    host.clone()
}

fn pev(timestamp_ms: u64, lng: f64, lat: f64) -> PointerEvent {
    // screen coordinates track the geographic ones closely enough for the
    // pixel-distance thresholds in these scenarios
    PointerEvent::new(
        timestamp_ms,
        ScreenPoint { x: lng, y: lat },
        LngLat { lng, lat },
    )
}

/// A quick press-and-release at one spot: classifies as a click (or a
/// double-click when it lands within the double window of the previous tap).
fn tap(session: &mut EditSession, timestamp_ms: u64, lng: f64, lat: f64) {
    session.on_pointer_down(&mut pev(timestamp_ms, lng, lat));
    session.on_pointer_up(&mut pev(timestamp_ms + 50, lng, lat));
}

fn recording_listener(session: &mut EditSession) -> Rc<RefCell<Vec<SessionEvent>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = log.clone();
    session.set_listener(move |event| sink.borrow_mut().push(event.clone()));
    log
}

#[test]
fn attach_installs_source_and_layers_once_ready() {
    let host = FakeHost::ready();
    let mut session = EditSession::new();
    session.attach(&shared(&host));

    let host_ref = host.borrow();
    assert!(host_ref.sources.contains_key(session.source_id()));
    assert_eq!(host_ref.layers.len(), 3);
    assert!(
        host_ref
            .layers
            .iter()
            .all(|(_, source)| source == session.source_id())
    );
}

#[test]
fn attach_defers_setup_until_the_style_ready_signal() {
    let host = Rc::new(RefCell::new(FakeHost::default()));
    let mut session = EditSession::new();
    session.attach(&shared(&host));
    assert!(host.borrow().sources.is_empty());

    host.borrow_mut().ready = true;
    session.on_style_ready();
    assert!(host.borrow().sources.contains_key(session.source_id()));
    assert_eq!(host.borrow().layers.len(), 3);
}

#[test]
fn attach_twice_with_the_same_host_is_idempotent() {
    let host = FakeHost::ready();
    let mut session = EditSession::new();
    let dyn_host = shared(&host);
    session.attach(&dyn_host);

    let sources_before = host.borrow().sources.len();
    let layers_before = host.borrow().layers.len();
    session.attach(&dyn_host);
    assert_eq!(host.borrow().sources.len(), sources_before);
    assert_eq!(host.borrow().layers.len(), layers_before);
}

#[test]
fn detach_removes_everything_and_is_repeatable() {
    let host = FakeHost::ready();
    let mut session = EditSession::new();
    session.attach(&shared(&host));

    session.detach();
    assert!(host.borrow().sources.is_empty());
    assert!(host.borrow().layers.is_empty());

    session.detach();
    assert!(host.borrow().sources.is_empty());
}

#[test]
fn detach_flushes_the_in_flight_preview() {
    let first = FakeHost::ready();
    let mut session = EditSession::new();
    session.attach(&shared(&first));
    session.switch_mode(ModeKind::DrawLine);

    tap(&mut session, 0, 1.0, 1.0);
    assert_eq!(first.borrow().source_features(session.source_id()).len(), 1);

    session.detach();

    let second = FakeHost::ready();
    session.attach(&shared(&second));
    assert!(
        second
            .borrow()
            .source_features(session.source_id())
            .is_empty()
    );

    // the dropped vertex never leaks into a later commit
    tap(&mut session, 5000, 2.0, 2.0);
    tap(&mut session, 6000, 3.0, 3.0);
    tap(&mut session, 6200, 3.0, 3.0);
    let added = session.store().iter().next().expect("line committed").1;
    assert_eq!(
        added,
        &Geometry::LineString(vec![[2.0, 2.0], [3.0, 3.0]])
    );
}

#[test]
fn attaching_a_second_host_detaches_the_first() {
    let first = FakeHost::ready();
    let second = FakeHost::ready();
    let mut session = EditSession::new();

    session.attach(&shared(&first));
    session.attach(&shared(&second));

    assert!(first.borrow().sources.is_empty());
    assert!(second.borrow().sources.contains_key(session.source_id()));
}

#[test]
fn pointer_events_without_a_host_are_tolerated() {
    let mut session = EditSession::new();
    session.switch_mode(ModeKind::DrawPoint);
    tap(&mut session, 0, 1.0, 1.0);
    session.on_pointer_move(&mut pev(100, 2.0, 2.0));
    assert!(session.store().is_empty());
}

#[test]
fn a_tap_commits_a_point_in_draw_point_mode() {
    let host = FakeHost::ready();
    let mut session = EditSession::new();
    session.attach(&shared(&host));
    session.switch_mode(ModeKind::DrawPoint);

    tap(&mut session, 0, 12.5, 42.0);

    assert_eq!(session.store().len(), 1);
    let features = host.borrow().source_features(session.source_id());
    assert_eq!(features.len(), 1);
    assert_eq!(features[0].geometry, Geometry::Point([12.5, 42.0]));
    assert!(features[0].id.is_some());
    assert!(!features[0].active);
}

#[test]
fn a_slow_or_long_drag_is_not_a_click() {
    let host = FakeHost::ready();
    let mut session = EditSession::new();
    session.attach(&shared(&host));
    session.switch_mode(ModeKind::DrawPoint);

    // moved 100 px between down and up
    session.on_pointer_down(&mut pev(0, 0.0, 0.0));
    session.on_pointer_up(&mut pev(50, 100.0, 100.0));

    // held for a second without moving
    session.on_pointer_down(&mut pev(2000, 0.0, 0.0));
    session.on_pointer_up(&mut pev(3000, 0.0, 0.0));

    assert!(session.store().is_empty());
}

#[test]
fn pointer_up_without_a_down_sample_is_skipped() {
    let host = FakeHost::ready();
    let mut session = EditSession::new();
    session.attach(&shared(&host));
    session.switch_mode(ModeKind::DrawPoint);

    session.on_pointer_up(&mut pev(10, 0.0, 0.0));
    assert!(session.store().is_empty());
}

#[test]
fn double_click_finalizes_a_line_through_the_committed_vertices() {
    let host = FakeHost::ready();
    let mut session = EditSession::new();
    session.attach(&shared(&host));
    let log = recording_listener(&mut session);
    session.switch_mode(ModeKind::DrawLine);

    // three independent clicks, then a double-click on the last vertex
    tap(&mut session, 0, 0.0, 0.0);
    tap(&mut session, 1000, 1.0, 1.0);
    tap(&mut session, 2000, 2.0, 2.0);
    tap(&mut session, 2200, 2.0, 2.0);

    let log = log.borrow();
    assert_eq!(log.len(), 1);
    let SessionEvent::Added { geometry, .. } = &log[0] else {
        panic!("expected an Added event, got {:?}", log[0]);
    };
    assert_eq!(
        geometry,
        &Geometry::LineString(vec![[0.0, 0.0], [1.0, 1.0], [2.0, 2.0]])
    );

    // committed feature rendered, preview flushed
    let features = host.borrow().source_features(session.source_id());
    assert_eq!(features.len(), 1);
    assert!(!features[0].active);
}

#[test]
fn triple_click_does_not_read_as_two_double_clicks() {
    let host = FakeHost::ready();
    let mut session = EditSession::new();
    session.attach(&shared(&host));
    session.switch_mode(ModeKind::DrawPoint);

    // DrawPoint commits per click and ignores double-clicks: a triple click
    // must land as click, double, click: two commits, not one
    tap(&mut session, 0, 5.0, 5.0);
    tap(&mut session, 200, 5.0, 5.0);
    tap(&mut session, 400, 5.0, 5.0);

    assert_eq!(session.store().len(), 2);
}

#[test]
fn line_preview_is_rendered_as_active_features() {
    let host = FakeHost::ready();
    let mut session = EditSession::new();
    session.attach(&shared(&host));
    session.switch_mode(ModeKind::DrawLine);

    tap(&mut session, 0, 0.0, 0.0);
    session.on_pointer_move(&mut pev(1500, 3.0, 3.0));

    let features = host.borrow().source_features(session.source_id());
    assert_eq!(features.len(), 2);
    assert!(features.iter().all(|f| f.active));
    assert!(
        features
            .iter()
            .any(|f| f.geometry == Geometry::LineString(vec![[0.0, 0.0], [3.0, 3.0]]))
    );
}

#[test]
fn switching_modes_flushes_the_outgoing_preview() {
    let host = FakeHost::ready();
    let mut session = EditSession::new();
    session.attach(&shared(&host));
    session.switch_mode(ModeKind::DrawLine);

    tap(&mut session, 0, 0.0, 0.0);
    assert_eq!(
        host.borrow().source_features(session.source_id()).len(),
        1
    );

    session.switch_mode(ModeKind::Select);
    assert!(
        host.borrow()
            .source_features(session.source_id())
            .is_empty()
    );
    assert_eq!(session.mode_kind(), ModeKind::Select);
}

#[test]
fn switching_to_the_same_mode_is_a_no_op() {
    let host = FakeHost::ready();
    let mut session = EditSession::new();
    session.attach(&shared(&host));
    session.switch_mode(ModeKind::DrawLine);

    // a vertex is in flight; re-requesting the mode must not reset it
    tap(&mut session, 0, 0.0, 0.0);
    session.switch_mode(ModeKind::DrawLine);

    tap(&mut session, 1000, 1.0, 1.0);
    tap(&mut session, 2000, 1.0, 1.0);
    tap(&mut session, 2200, 1.0, 1.0);
    assert_eq!(session.store().len(), 1);
}

#[test]
fn switching_modes_applies_the_resting_cursor() {
    let host = FakeHost::ready();
    let mut session = EditSession::new();
    session.attach(&shared(&host));

    session.switch_mode(ModeKind::DrawPolygon);
    assert_eq!(host.borrow().cursor, Some(CursorIcon::Crosshair));

    session.switch_mode(ModeKind::Idle);
    assert_eq!(host.borrow().cursor, None);
}

#[test]
fn select_mode_announces_toggles_for_hit_features() {
    let host = FakeHost::ready();
    let mut session = EditSession::new();
    session.attach(&shared(&host));
    let log = recording_listener(&mut session);
    session.switch_mode(ModeKind::DrawPoint);

    tap(&mut session, 0, 7.0, 7.0);
    let id = session.store().iter().next().unwrap().0.clone();

    session.switch_mode(ModeKind::Select);
    host.borrow_mut().next_hit = Some(HitFeature {
        id: id.clone(),
        source_id: session.source_id().to_string(),
        layer_id: "mapdraw-tool-point".to_string(),
    });

    tap(&mut session, 5000, 7.0, 7.0);
    tap(&mut session, 6000, 7.0, 7.0);
    session.switch_mode(ModeKind::Idle);

    let log = log.borrow();
    assert!(log.contains(&SessionEvent::Selected { id: id.clone() }));
    assert!(log.contains(&SessionEvent::Unselected { id: id.clone() }));
    assert_eq!(log.last(), Some(&SessionEvent::SelectionCleared));
}

#[test]
fn move_mode_replaces_the_committed_geometry_on_release() {
    let host = FakeHost::ready();
    let mut session = EditSession::new();
    session.attach(&shared(&host));
    let log = recording_listener(&mut session);

    session
        .load_geojson(
            r#"{
                "type": "FeatureCollection",
                "features": [
                    { "type": "Feature", "id": "target", "properties": {},
                      "geometry": { "type": "Point", "coordinates": [10.0, 20.0] } }
                ]
            }"#,
        )
        .unwrap();

    session.switch_mode(ModeKind::Move);
    host.borrow_mut().next_hit = Some(HitFeature {
        id: "target".to_string(),
        source_id: session.source_id().to_string(),
        layer_id: "mapdraw-tool-point".to_string(),
    });

    // a real drag: down, long move, release beyond the click thresholds
    session.on_pointer_down(&mut pev(0, 5.0, 5.0));
    session.on_pointer_move(&mut pev(300, 6.0, 4.0));
    session.on_pointer_up(&mut pev(600, 6.0, 4.0));

    assert_eq!(
        session.store().get("target"),
        Some(&Geometry::Point([11.0, 19.0]))
    );

    let log = log.borrow();
    assert_eq!(
        log.first(),
        Some(&SessionEvent::MoveStarted {
            id: "target".to_string()
        })
    );
    assert!(log.contains(&SessionEvent::Moved {
        id: "target".to_string(),
        geometry: Geometry::Point([11.0, 19.0]),
    }));
    assert_eq!(
        log.last(),
        Some(&SessionEvent::MoveEnded {
            id: "target".to_string(),
            geometry: Geometry::Point([11.0, 19.0]),
        })
    );
}

#[test]
fn in_flight_move_renders_the_translated_copy_without_touching_the_store() {
    let host = FakeHost::ready();
    let mut session = EditSession::new();
    session.attach(&shared(&host));

    session
        .load_geojson(
            r#"{
                "type": "FeatureCollection",
                "features": [
                    { "type": "Feature", "id": "target", "properties": {},
                      "geometry": { "type": "Point", "coordinates": [10.0, 20.0] } }
                ]
            }"#,
        )
        .unwrap();

    session.switch_mode(ModeKind::Move);
    host.borrow_mut().next_hit = Some(HitFeature {
        id: "target".to_string(),
        source_id: session.source_id().to_string(),
        layer_id: "mapdraw-tool-point".to_string(),
    });

    session.on_pointer_down(&mut pev(0, 0.0, 0.0));
    session.on_pointer_move(&mut pev(300, 2.0, 2.0));

    // store untouched while the drag is in flight
    assert_eq!(
        session.store().get("target"),
        Some(&Geometry::Point([10.0, 20.0]))
    );
    let features = host.borrow().source_features(session.source_id());
    assert_eq!(features.len(), 1);
    assert_eq!(features[0].geometry, Geometry::Point([12.0, 22.0]));
}

#[test]
fn native_double_click_is_suppressed_by_drawing_modes() {
    let host = FakeHost::ready();
    let mut session = EditSession::new();
    session.attach(&shared(&host));
    session.switch_mode(ModeKind::DrawPolygon);

    let mut ev = pev(0, 0.0, 0.0);
    session.on_native_dblclick(&mut ev);
    assert!(ev.default_prevented());

    session.switch_mode(ModeKind::Select);
    let mut ev = pev(100, 0.0, 0.0);
    session.on_native_dblclick(&mut ev);
    assert!(!ev.default_prevented());
}

#[test]
fn loaded_features_are_resynced_to_the_host() {
    let host = FakeHost::ready();
    let mut session = EditSession::new();
    session.attach(&shared(&host));

    let loaded = session
        .load_geojson(
            r#"{
                "type": "FeatureCollection",
                "features": [
                    { "type": "Feature", "id": "a", "properties": {},
                      "geometry": { "type": "Point", "coordinates": [1.0, 1.0] } },
                    { "type": "Feature", "properties": {},
                      "geometry": { "type": "Bogus", "coordinates": [] } }
                ]
            }"#,
        )
        .unwrap();

    assert_eq!(loaded, 1);
    let features = host.borrow().source_features(session.source_id());
    assert_eq!(features.len(), 1);
    assert_eq!(features[0].id.as_deref(), Some("a"));
}
