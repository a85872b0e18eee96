//! Renders a single loader frame as SVG on stdout.
//!
//! ```text
//! cargo run -p wireframe-core --example svg_frame -- polyhedron 2400 > frame.svg
//! cargo run -p wireframe-core --example svg_frame -- tree 4500 > tree.svg
//! ```
//!
//! Run with `RUST_LOG=debug` to see the loader set-up messages.

use std::cell::RefCell;
use std::fmt::Write as _;
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use wireframe_core::driver::{Driver, ManualTimers};
use wireframe_core::render::{LinePrimitive, PointPrimitive, RenderSurface};
use wireframe_core::{
    Animator, BrainConfig, BrainLoader, DriverConfig, LoaderConfig, PolyhedronLoader, Tick,
    TreeConfig, TreeLoader,
};

/// Writes primitives as SVG elements, origin at the viewport centre for the
/// projected loaders.
struct SvgSurface {
    body: String,
    offset: (f32, f32),
}

impl RenderSurface for SvgSurface {
    fn line(&mut self, line: &LinePrimitive) {
        let _ = writeln!(
            self.body,
            r#"  <line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-opacity="{:.3}" stroke-width="{}"/>"#,
            line.from.x + self.offset.0,
            line.from.y + self.offset.1,
            line.to.x + self.offset.0,
            line.to.y + self.offset.1,
            line.color.to_hex(),
            line.opacity,
            line.width,
        );
    }

    fn point(&mut self, point: &PointPrimitive) {
        let _ = writeln!(
            self.body,
            r#"  <circle cx="{:.2}" cy="{:.2}" r="{}" fill="{}" fill-opacity="{:.3}"/>"#,
            point.center.x + self.offset.0,
            point.center.y + self.offset.1,
            point.radius,
            point.color.to_hex(),
            point.opacity,
        );
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let kind = args.next().unwrap_or_else(|| "polyhedron".to_string());
    let clock: u64 = args.next().map(|s| s.parse()).transpose()?.unwrap_or(0);

    let (loader, offset, entry): (Box<dyn Animator>, _, _) = match kind.as_str() {
        "polyhedron" => (
            Box::new(PolyhedronLoader::new(LoaderConfig::default())?),
            (200.0, 150.0),
            None,
        ),
        "brain" => {
            let config = BrainConfig::default();
            let entry = config.entry_duration as u32;
            let loader = BrainLoader::new(config, &mut StdRng::seed_from_u64(clock))?;
            (Box::new(loader), (200.0, 150.0), Some(entry))
        }
        "tree" => (
            Box::new(TreeLoader::new(TreeConfig::default())?),
            (0.0, 0.0),
            None,
        ),
        other => return Err(format!("unknown loader kind `{other}`").into()),
    };

    // Drive virtual time up to the requested clock so the entry phase
    // resolves the same way it would in a browser.
    let timers = ManualTimers::new();
    let last = Rc::new(RefCell::new(Tick::default()));
    let seen = Rc::clone(&last);
    let config = DriverConfig {
        entry_duration_ms: entry,
        ..DriverConfig::default()
    };
    let mut driver = Driver::mount(timers.clone(), config, move |tick| *seen.borrow_mut() = tick)?;
    timers.advance(clock / config.tick_step * u64::from(config.tick_interval_ms));
    driver.teardown();
    let tick = *last.borrow();
    log::info!("rendering {kind} at clock {} (entering: {})", tick.clock, tick.entering);

    let mut surface = SvgSurface {
        body: String::new(),
        offset,
    };
    loader.draw(tick, &mut surface);
    println!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="400" height="300" style="background:#0b0b12">"#
    );
    print!("{}", surface.body);
    println!("</svg>");
    Ok(())
}
