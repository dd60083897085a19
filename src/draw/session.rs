//! Draw tool orchestration.
//!
//! [`EditSession`] owns the active mode and the committed feature store. It
//! translates raw host pointer events into classified gestures, routes them
//! to the active mode, and materializes the mode's output into the store and
//! the host's render source. All work runs synchronously in host delivery
//! order; a `Render` emitted by a mode is visible before the next pointer
//! event is processed.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info, warn};
use uuid::Uuid;

use crate::config::DrawConfig;
use crate::draw::event::{ModeEvent, SessionEvent};
use crate::draw::layers::default_layers;
use crate::draw::mode::{IdleMode, Mode, ModeCx, ModeKind, create_mode};
use crate::draw::store::{DataError, Feature, FeatureId, FeatureStore};
use crate::geom::Geometry;
use crate::gesture::{GestureSample, is_click, is_double_click};
use crate::host::{HitFeature, LayerSpec, MapHost, PointerEvent};

type SharedHost = Rc<RefCell<dyn MapHost>>;
type Listener = Box<dyn FnMut(&SessionEvent)>;

/// The interactive editing session.
///
/// At most one mode is active at any time; transitions destroy the previous
/// mode fully (flushing its preview) before constructing the next. Every
/// operation is a tolerant no-op while no host is attached; a single failed
/// gesture never tears down the session.
pub struct EditSession {
    host: Option<SharedHost>,
    source_id: String,
    layers: Vec<LayerSpec>,
    config: DrawConfig,
    mode: Box<dyn Mode>,
    store: FeatureStore,
    preview: Vec<Geometry>,
    /// In-flight move rendering: (id, translated copy). The store keeps the
    /// committed geometry until `MoveEnd`.
    moving: Option<(FeatureId, Geometry)>,
    down_sample: Option<GestureSample>,
    last_click: Option<GestureSample>,
    installed: bool,
    listener: Option<Listener>,
}

impl EditSession {
    pub fn new() -> Self {
        Self::with_config(DrawConfig::default())
    }

    pub fn with_config(mut config: DrawConfig) -> Self {
        config.validate_and_clamp();
        let layers = config.layers.clone().unwrap_or_else(default_layers);
        Self {
            host: None,
            source_id: format!("mapdraw-tool-{}", Uuid::new_v4().simple()),
            layers,
            config,
            mode: Box::new(IdleMode),
            store: FeatureStore::new(),
            preview: Vec::new(),
            moving: None,
            down_sample: None,
            last_click: None,
            installed: false,
            listener: None,
        }
    }

    /// The committed feature collection.
    pub fn store(&self) -> &FeatureStore {
        &self.store
    }

    /// Identifier of the render source owned by this session.
    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    /// Kind of the currently active mode.
    pub fn mode_kind(&self) -> ModeKind {
        self.mode.kind()
    }

    /// Registers the outward event listener, replacing any previous one.
    pub fn set_listener(&mut self, listener: impl FnMut(&SessionEvent) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    /// Attaches the session to a host map.
    ///
    /// Idempotent for the host it is already attached to; otherwise any prior
    /// host is detached first. Source and layer creation is deferred until
    /// the host reports its style ready (see [`EditSession::on_style_ready`]).
    pub fn attach(&mut self, host: &SharedHost) {
        if let Some(current) = &self.host
            && Rc::ptr_eq(current, host)
        {
            return;
        }
        self.detach();
        self.host = Some(Rc::clone(host));
        self.install_source_and_layers();
        info!("draw session attached (source {})", self.source_id);
    }

    /// Detaches from the current host, removing the render source and layers.
    /// Safe to call when not attached.
    ///
    /// Detach is a cancellation point: the active mode is destroyed, which
    /// flushes any in-flight preview and selection synchronously, so a later
    /// attach starts from a clean slate.
    pub fn detach(&mut self) {
        let mut events = Vec::new();
        {
            let mut cx = ModeCx {
                store: &self.store,
                events: &mut events,
            };
            self.mode.destroy(&mut cx);
        }
        self.process_events(events);
        self.moving = None;

        if let Some(host) = self.host.take() {
            if self.installed {
                let mut host = host.borrow_mut();
                for layer in &self.layers {
                    host.remove_layer(&layer.id);
                }
                host.remove_source(&self.source_id);
            }
            info!("draw session detached");
        }
        self.installed = false;
        self.down_sample = None;
        self.last_click = None;
    }

    /// Host signal that its rendering style finished loading; retries any
    /// deferred source/layer creation.
    pub fn on_style_ready(&mut self) {
        if !self.installed {
            self.install_source_and_layers();
        }
    }

    /// Switches the active editing mode.
    ///
    /// A no-op when the requested kind equals the current one. Otherwise the
    /// outgoing mode is destroyed first (flushing its preview to empty and
    /// clearing its selection), and only then is the incoming mode
    /// constructed and its cursor applied.
    pub fn switch_mode(&mut self, kind: ModeKind) {
        if kind == self.mode.kind() {
            return;
        }

        let mut events = Vec::new();
        {
            let mut cx = ModeCx {
                store: &self.store,
                events: &mut events,
            };
            self.mode.destroy(&mut cx);
        }
        self.process_events(events);

        self.mode = create_mode(kind, &self.config);
        if let Some(host) = &self.host {
            host.borrow_mut().set_cursor(self.mode.cursor());
        }
        self.resync();
        info!("switched draw mode to {kind:?}");
    }

    /// Pointer-down entry point: records the gesture sample and forwards to
    /// the active mode.
    pub fn on_pointer_down(&mut self, ev: &mut PointerEvent) {
        if self.host.is_none() {
            return;
        }
        self.down_sample = Some(GestureSample {
            timestamp_ms: ev.timestamp_ms,
            point: ev.point,
        });
        self.dispatch(ev, |mode, ev, hit, cx| mode.on_mousedown(ev, hit, cx));
    }

    /// Pointer-up entry point: classifies the gesture and forwards as click,
    /// double-click, or plain mouse-up.
    pub fn on_pointer_up(&mut self, ev: &mut PointerEvent) {
        if self.host.is_none() {
            return;
        }
        let Some(down) = self.down_sample.take() else {
            // up without a down sample; classification cannot proceed
            debug!("pointer-up without a down sample, skipping");
            return;
        };
        let up = GestureSample {
            timestamp_ms: ev.timestamp_ms,
            point: ev.point,
        };

        if is_click(&down, &up, &self.config.click) {
            if is_double_click(&up, self.last_click.as_ref(), &self.config.double_click) {
                // forget the click so a triple click cannot read as two doubles
                self.last_click = None;
                self.dispatch(ev, |mode, ev, hit, cx| mode.on_dblclick(ev, hit, cx));
            } else {
                self.last_click = Some(up);
                self.dispatch(ev, |mode, ev, hit, cx| mode.on_click(ev, hit, cx));
            }
        } else {
            self.dispatch(ev, |mode, ev, hit, cx| mode.on_mouseup(ev, hit, cx));
        }
    }

    /// Pointer-move entry point; forwarded unconditionally.
    pub fn on_pointer_move(&mut self, ev: &mut PointerEvent) {
        if self.host.is_none() {
            return;
        }
        self.dispatch(ev, |mode, ev, hit, cx| mode.on_mousemove(ev, hit, cx));
    }

    /// Host drag event; forwarded to the active mode's drag handler.
    pub fn on_pointer_drag(&mut self, ev: &mut PointerEvent) {
        if self.host.is_none() {
            return;
        }
        self.dispatch(ev, |mode, ev, hit, cx| mode.on_drag(ev, hit, cx));
    }

    /// The host's native double-click, delivered separately so the active
    /// mode can suppress the default zoom via `prevent_default`.
    pub fn on_native_dblclick(&mut self, ev: &mut PointerEvent) {
        if self.host.is_none() {
            return;
        }
        self.mode.on_origin_dblclick(ev);
    }

    /// Loads features from a GeoJSON FeatureCollection into the committed
    /// store and resyncs the render source. Malformed geometries are skipped
    /// with a warning; see [`FeatureStore::load_geojson`].
    pub fn load_geojson(&mut self, data: &str) -> Result<usize, DataError> {
        let loaded = self.store.load_geojson(data)?;
        self.resync();
        Ok(loaded)
    }

    fn dispatch<F>(&mut self, ev: &mut PointerEvent, handler: F)
    where
        F: FnOnce(&mut dyn Mode, &mut PointerEvent, Option<&HitFeature>, &mut ModeCx<'_>),
    {
        let hit = match &self.host {
            Some(host) => host.borrow().query_hit(ev.point),
            None => return,
        };

        let mut events = Vec::new();
        {
            let mut cx = ModeCx {
                store: &self.store,
                events: &mut events,
            };
            handler(self.mode.as_mut(), ev, hit.as_ref(), &mut cx);
        }
        self.process_events(events);
    }

    /// Materializes mode output, strictly in emission order.
    fn process_events(&mut self, events: Vec<ModeEvent>) {
        for event in events {
            match event {
                ModeEvent::Render { features } => {
                    self.preview = features;
                    self.resync();
                }
                ModeEvent::Add { geometry } => {
                    let id: FeatureId = Uuid::new_v4().to_string();
                    self.store.insert(id.clone(), geometry.clone());
                    self.notify(SessionEvent::Added { id, geometry });
                    self.resync();
                }
                ModeEvent::MoveStart { id } => {
                    self.notify(SessionEvent::MoveStarted { id });
                }
                ModeEvent::Move { id, geometry } => {
                    self.moving = Some((id.clone(), geometry.clone()));
                    self.notify(SessionEvent::Moved { id, geometry });
                    self.resync();
                }
                ModeEvent::MoveEnd { id, geometry } => {
                    self.moving = None;
                    if self.store.replace(&id, geometry.clone()) {
                        self.notify(SessionEvent::MoveEnded { id, geometry });
                    } else {
                        // deleted mid-gesture; abandon without a commit
                        warn!("move-end for unknown feature {id}, dropping");
                    }
                    self.resync();
                }
                ModeEvent::Select { id } => {
                    self.notify(SessionEvent::Selected { id });
                }
                ModeEvent::Unselect { id } => {
                    self.notify(SessionEvent::Unselected { id });
                }
                ModeEvent::ClearSelect => {
                    self.notify(SessionEvent::SelectionCleared);
                }
                ModeEvent::Cursor { icon } => {
                    if let Some(host) = &self.host {
                        host.borrow_mut().set_cursor(icon);
                    }
                }
            }
        }
    }

    fn notify(&mut self, event: SessionEvent) {
        if let Some(listener) = &mut self.listener {
            listener(&event);
        }
    }

    fn install_source_and_layers(&mut self) {
        let ready = match &self.host {
            Some(host) => host.borrow().style_ready(),
            None => return,
        };
        if !ready {
            debug!("host style not ready, deferring source setup");
            return;
        }

        let features = self.render_features();
        if let Some(host) = &self.host {
            let mut host = host.borrow_mut();
            host.add_source(&self.source_id, &features);
            for layer in &self.layers {
                host.add_layer(&self.source_id, layer);
            }
        }
        self.installed = true;
    }

    /// Pushes the union of the committed store and the live preview to the
    /// host render source. During a move, the in-flight translated copy is
    /// rendered in place of the committed geometry.
    fn resync(&mut self) {
        if !self.installed {
            return;
        }
        let Some(host) = &self.host else { return };
        let features = self.render_features();
        host.borrow_mut()
            .set_source_data(&self.source_id, &features);
    }

    fn render_features(&self) -> Vec<Feature> {
        let mut features: Vec<Feature> = self
            .store
            .iter()
            .map(|(id, geometry)| {
                let geometry = match &self.moving {
                    Some((moving_id, moved)) if moving_id == id => moved.clone(),
                    _ => geometry.clone(),
                };
                Feature::committed(id.clone(), geometry)
            })
            .collect();
        features.extend(self.preview.iter().cloned().map(Feature::preview));
        features
    }
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new()
    }
}
