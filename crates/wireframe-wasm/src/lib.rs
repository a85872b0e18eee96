use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wireframe_core::driver::{Driver, TimerHost};
use wireframe_core::render::{FrameBuffer, GpuLine, GpuPoint};
use wireframe_core::{
    Animator, BrainConfig, BrainLoader, DriverConfig, LoaderConfig, PolyhedronLoader, TreeConfig,
    TreeLoader,
};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // A second init (e.g. hot reload) fails harmlessly.
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Browser timers on `window`.
pub struct WindowTimers {
    window: web_sys::Window,
}

impl WindowTimers {
    pub fn new() -> Result<Self, JsError> {
        let window = web_sys::window().ok_or_else(|| JsError::new("no global window"))?;
        Ok(Self { window })
    }
}

/// A scheduled browser timer. Holds the closure so it outlives the JS timer.
pub struct WindowTimer {
    id: Option<i32>,
    repeating: bool,
    _closure: Closure<dyn FnMut()>,
}

impl TimerHost for WindowTimers {
    type Handle = WindowTimer;

    fn set_interval(&self, period_ms: u32, callback: Box<dyn FnMut()>) -> WindowTimer {
        let closure = Closure::wrap(callback);
        let id = self
            .window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                period_ms as i32,
            )
            .map_err(|e| log::error!("setInterval failed: {e:?}"))
            .ok();
        WindowTimer {
            id,
            repeating: true,
            _closure: closure,
        }
    }

    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> WindowTimer {
        let closure = Closure::once(move || callback());
        let id = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                delay_ms as i32,
            )
            .map_err(|e| log::error!("setTimeout failed: {e:?}"))
            .ok();
        WindowTimer {
            id,
            repeating: false,
            _closure: closure,
        }
    }

    fn cancel(&self, handle: WindowTimer) {
        if let Some(id) = handle.id {
            if handle.repeating {
                self.window.clear_interval_with_handle(id);
            } else {
                self.window.clear_timeout_with_handle(id);
            }
        }
        // `handle` drops here, after the JS side can no longer call it.
    }
}

/// Which loader to build, as named from JS.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Kind {
    Polyhedron,
    Brain,
    Tree,
}

impl Kind {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "polyhedron" => Some(Kind::Polyhedron),
            "brain" => Some(Kind::Brain),
            "tree" => Some(Kind::Tree),
            _ => None,
        }
    }
}

/// Build a loader from a kind name and JSON overrides (`""` for defaults).
fn build(
    kind: &str,
    json: &str,
    seed: u64,
) -> Result<(Box<dyn Animator>, DriverConfig), Box<dyn std::error::Error>> {
    let kind = Kind::parse(kind).ok_or_else(|| format!("unknown loader kind `{kind}`"))?;
    let json = if json.trim().is_empty() { "{}" } else { json };
    let driver = DriverConfig::default();
    let built: (Box<dyn Animator>, DriverConfig) = match kind {
        Kind::Polyhedron => {
            let config: LoaderConfig = serde_json::from_str(json)?;
            (Box::new(PolyhedronLoader::new(config)?), driver)
        }
        Kind::Brain => {
            let config: BrainConfig = serde_json::from_str(json)?;
            let entry = (config.entry_duration > 0)
                .then(|| u32::try_from(config.entry_duration).unwrap_or(u32::MAX));
            let mut rng = StdRng::seed_from_u64(seed);
            let loader = BrainLoader::new(config, &mut rng)?;
            (
                Box::new(loader),
                DriverConfig {
                    entry_duration_ms: entry,
                    ..driver
                },
            )
        }
        Kind::Tree => {
            let config: TreeConfig = serde_json::from_str(json)?;
            (Box::new(TreeLoader::new(config)?), driver)
        }
    };
    Ok(built)
}

/// A loader plus its clock, exported to JS.
///
/// JS calls `mount(cb)`; `cb(clock)` fires once per tick, after which JS
/// calls `render()` and reads the line/point buffers straight out of wasm
/// memory.
#[wasm_bindgen]
pub struct LoaderView {
    animator: Box<dyn Animator>,
    driver_config: DriverConfig,
    driver: Option<Driver<WindowTimers>>,
    frame: FrameBuffer,
    gpu_lines: Vec<GpuLine>,
    gpu_points: Vec<GpuPoint>,
}

#[wasm_bindgen]
impl LoaderView {
    #[wasm_bindgen(js_name = withConfigJson)]
    pub fn with_config_json(kind: &str, json: &str) -> Result<LoaderView, JsError> {
        let seed = (js_sys::Math::random() * u32::MAX as f64) as u64;
        Self::build(kind, json, seed)
    }

    pub fn polyhedron() -> Result<LoaderView, JsError> {
        Self::build("polyhedron", "", 0)
    }

    /// Ellipsoid cloud loader; the same `seed` always yields the same cloud.
    pub fn brain(seed: u32) -> Result<LoaderView, JsError> {
        Self::build("brain", "", seed as u64)
    }

    pub fn tree() -> Result<LoaderView, JsError> {
        Self::build("tree", "", 0)
    }

    /// Start the clock. Calling it again remounts from clock 0.
    pub fn mount(&mut self, on_tick: js_sys::Function) -> Result<(), JsError> {
        self.teardown();
        let driver = Driver::mount(WindowTimers::new()?, self.driver_config, move |tick| {
            if let Err(e) = on_tick.call1(&JsValue::NULL, &JsValue::from_f64(tick.clock as f64)) {
                log::error!("tick callback threw: {e:?}");
            }
        })?;
        self.driver = Some(driver);
        Ok(())
    }

    /// Cancel all timers; safe to call more than once.
    pub fn teardown(&mut self) {
        if let Some(mut driver) = self.driver.take() {
            driver.teardown();
        }
    }

    #[wasm_bindgen(getter)]
    pub fn mounted(&self) -> bool {
        self.driver.as_ref().is_some_and(|d| d.is_mounted())
    }

    #[wasm_bindgen(getter)]
    pub fn clock(&self) -> f64 {
        self.driver.as_ref().map_or(0.0, |d| d.clock() as f64)
    }

    /// Draw the current tick into the export buffers; returns the line count.
    pub fn render(&mut self) -> usize {
        let tick = self.driver.as_ref().map(|d| d.tick()).unwrap_or_default();
        self.frame.clear();
        self.animator.draw(tick, &mut self.frame);
        self.gpu_lines = self.frame.gpu_lines();
        self.gpu_points = self.frame.gpu_points();
        self.gpu_lines.len()
    }

    pub fn line_buffer_ptr(&self) -> *const f32 {
        self.gpu_lines.as_ptr() as *const f32
    }

    pub fn line_buffer_byte_length(&self) -> usize {
        std::mem::size_of_val(self.gpu_lines.as_slice())
    }

    pub fn point_buffer_ptr(&self) -> *const f32 {
        self.gpu_points.as_ptr() as *const f32
    }

    pub fn point_buffer_byte_length(&self) -> usize {
        std::mem::size_of_val(self.gpu_points.as_slice())
    }

    pub fn point_count(&self) -> usize {
        self.gpu_points.len()
    }
}

impl LoaderView {
    fn build(kind: &str, json: &str, seed: u64) -> Result<LoaderView, JsError> {
        let (animator, driver_config) = build(kind, json, seed).map_err(|e| JsError::new(&e.to_string()))?;
        log::info!("{kind} loader created");
        Ok(LoaderView {
            animator,
            driver_config,
            driver: None,
            frame: FrameBuffer::default(),
            gpu_lines: Vec::new(),
            gpu_points: Vec::new(),
        })
    }
}

impl Drop for LoaderView {
    fn drop(&mut self) {
        self.teardown();
    }
}
