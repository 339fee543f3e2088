//! Viewer session
//!
//! A session owns one catalog and everything derived from the currently
//! loaded asset: the live materials, the scene graph, the camera and the
//! highlight state. It is driven from a single frame thread; the only work
//! done elsewhere is the asset load itself.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::assets::{load_async, AssetLoader, AssetScene, LoadError, PendingLoad};
use crate::binder::{bind_scene, BindReport};
use crate::camera::{frame_camera, normalize_scene, Camera, FramingError};
use crate::catalog::{Catalog, RecordId};
use crate::config::ViewerConfig;
use crate::foundation::math::Vec3;
use crate::highlight::{HoverEvent, Highlighter};
use crate::render::MaterialStore;
use crate::scene::SceneGraph;
use crate::ui::{build_panels, PanelSink, PanelView, TitleSink};

/// Session errors
#[derive(Error, Debug)]
pub enum SessionError {
    /// A load was requested while another one is in flight
    #[error("Already loading {0}")]
    AlreadyLoading(PathBuf),

    /// The asset could not be loaded
    #[error("Load failed: {0}")]
    Load(#[from] LoadError),

    /// The loaded model could not be framed
    #[error("Framing failed: {0}")]
    Framing(#[from] FramingError),
}

/// Lifecycle of the current asset load
#[derive(Debug, Default)]
pub enum LoadState {
    /// No load has been started
    #[default]
    Idle,
    /// A load is in flight
    Loading(PendingLoad),
    /// The scene is loaded, bound and framed
    Ready,
    /// The last load failed; the message is the reported error
    Failed(String),
}

impl LoadState {
    /// Whether a scene is ready for interaction
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }

    /// Whether a load is in flight
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading(_))
    }

    /// Error message of a failed load
    pub fn failure(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// One model, its passports and the interaction state around them
#[derive(Debug)]
pub struct ViewerSession {
    config: ViewerConfig,
    catalog: Catalog,
    materials: MaterialStore,
    scene: Option<SceneGraph>,
    camera: Camera,
    highlighter: Highlighter,
    state: LoadState,
    last_report: Option<BindReport>,
}

impl ViewerSession {
    /// Create a session and show the model name on `title`
    pub fn new(catalog: Catalog, config: ViewerConfig, title: &mut dyn TitleSink) -> Self {
        log::info!(
            "Creating viewer session for '{}' ({} passport(s))",
            catalog.model_name(),
            catalog.len()
        );
        title.set_title(catalog.model_name());

        Self {
            camera: Camera::from_config(&config.camera),
            highlighter: Highlighter::new(config.highlight.intensity),
            config,
            catalog,
            materials: MaterialStore::new(),
            scene: None,
            state: LoadState::Idle,
            last_report: None,
        }
    }

    /// Start loading an asset on a worker thread
    ///
    /// Any previously loaded scene is discarded first: the highlight is
    /// cleared, every binding is reset and all live materials are dropped.
    pub fn begin_load(
        &mut self,
        loader: Arc<dyn AssetLoader>,
        path: impl Into<PathBuf>,
    ) -> Result<(), SessionError> {
        self.track_load_with(|path| load_async(loader, path), path.into())
    }

    /// Track a load started elsewhere
    pub fn track_load(&mut self, pending: PendingLoad) -> Result<(), SessionError> {
        let path = pending.path().to_path_buf();
        self.track_load_with(|_| pending, path)
    }

    fn track_load_with(
        &mut self,
        start: impl FnOnce(PathBuf) -> PendingLoad,
        path: PathBuf,
    ) -> Result<(), SessionError> {
        if let LoadState::Loading(pending) = &self.state {
            return Err(SessionError::AlreadyLoading(pending.path().to_path_buf()));
        }

        self.unload();
        log::info!("Loading model from {}", path.display());
        self.state = LoadState::Loading(start(path));
        Ok(())
    }

    /// Poll the in-flight load without blocking
    ///
    /// Returns `true` if the load finished during this call.
    pub fn update(&mut self) -> bool {
        let LoadState::Loading(pending) = &mut self.state else {
            return false;
        };
        let Some(result) = pending.try_complete() else {
            return false;
        };
        self.finish_load(result);
        true
    }

    /// Block until the in-flight load finishes
    pub fn wait_for_load(&mut self) {
        if let LoadState::Loading(pending) = std::mem::take(&mut self.state) {
            let result = pollster::block_on(pending);
            self.finish_load(result);
        }
    }

    fn finish_load(&mut self, result: Result<AssetScene, LoadError>) {
        let outcome = result
            .map_err(SessionError::from)
            .and_then(|asset| self.on_load_complete(asset));

        match outcome {
            Ok(report) => {
                log::info!(
                    "Model '{}' ready: {} renderable(s), {} passport(s) bound",
                    self.catalog.model_name(),
                    report.visited,
                    self.catalog.bound_count()
                );
                self.last_report = Some(report);
                self.state = LoadState::Ready;
            }
            Err(e) => {
                log::error!("Error loading model '{}': {}", self.catalog.model_name(), e);
                self.unload();
                self.state = LoadState::Failed(e.to_string());
            }
        }
    }

    /// Continuation run exactly once per successful load
    fn on_load_complete(&mut self, asset: AssetScene) -> Result<BindReport, SessionError> {
        let mut scene = SceneGraph::instantiate(asset, &mut self.materials);
        let bounds = normalize_scene(&mut scene)?;

        let report = bind_scene(
            &scene,
            &mut self.catalog,
            &mut self.materials,
            Vec3::from(self.config.highlight.color),
        );
        frame_camera(&mut self.camera, &bounds);

        self.scene = Some(scene);
        Ok(report)
    }

    fn unload(&mut self) {
        self.highlighter.clear(&mut self.materials);
        self.catalog.reset_bindings();
        self.materials.clear();
        self.scene = None;
        self.last_report = None;
    }

    /// Feed a hover event from the panel layer
    ///
    /// Before a scene is ready this is a no-op. Returns `true` if the
    /// emphasized material changed.
    pub fn hover(&mut self, event: &HoverEvent) -> bool {
        if !self.state.is_ready() {
            log::trace!("Ignoring {:?} before the model is ready", event);
            return false;
        }
        self.highlighter
            .handle(event, &self.catalog, &mut self.materials)
    }

    /// Pointer entered the panel of `id`
    pub fn hover_enter(&mut self, id: RecordId) -> bool {
        self.hover(&HoverEvent::Enter(id))
    }

    /// Pointer left the panel of `id`
    pub fn hover_leave(&mut self, id: RecordId) -> bool {
        self.hover(&HoverEvent::Leave(id))
    }

    /// Current panel models
    pub fn panels(&self) -> Vec<PanelView> {
        build_panels(&self.catalog, self.highlighter.active())
    }

    /// Push the current panel models to a front-end
    pub fn render_panels(&self, sink: &mut dyn PanelSink) -> Result<(), Box<dyn std::error::Error>> {
        sink.render_panels(&self.panels())
    }

    /// Viewport size changed
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.camera.set_viewport(width, height);
    }

    /// Load lifecycle state
    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// Whether a scene is ready for interaction
    pub fn is_ready(&self) -> bool {
        self.state.is_ready()
    }

    /// The passport catalog
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Live materials of the loaded scene
    pub fn materials(&self) -> &MaterialStore {
        &self.materials
    }

    /// The loaded scene, once ready
    pub fn scene(&self) -> Option<&SceneGraph> {
        self.scene.as_ref()
    }

    /// The viewer camera
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// The highlight state
    pub fn highlighter(&self) -> &Highlighter {
        &self.highlighter
    }

    /// Binding summary of the last successful load
    pub fn last_report(&self) -> Option<&BindReport> {
        self.last_report.as_ref()
    }

    /// Session settings
    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }
}
