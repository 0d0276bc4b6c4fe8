use anyhow::Context;
use museum_core::{AppPhase, KeyCode, LoadingSequencer, Museum};
use std::time::Instant;
use winit::{
    event::*,
    event_loop::EventLoop,
    keyboard::{KeyCode as WinitKey, PhysicalKey},
    window::WindowBuilder,
};

mod gpu;
mod scene;
mod settings;

const WINDOW_TITLE: &str = "Museum Walk";
// Largest frame delta handed to the core (seconds)
const MAX_FRAME_DT: f32 = 0.1;

fn map_key(key: WinitKey) -> Option<KeyCode> {
    Some(match key {
        WinitKey::ArrowUp => KeyCode::ArrowUp,
        WinitKey::ArrowDown => KeyCode::ArrowDown,
        WinitKey::ArrowLeft => KeyCode::ArrowLeft,
        WinitKey::ArrowRight => KeyCode::ArrowRight,
        WinitKey::KeyW => KeyCode::KeyW,
        WinitKey::KeyA => KeyCode::KeyA,
        WinitKey::KeyS => KeyCode::KeyS,
        WinitKey::KeyD => KeyCode::KeyD,
        WinitKey::Escape => KeyCode::Escape,
        WinitKey::KeyM => KeyCode::KeyM,
        _ => return None,
    })
}

fn handle_key(museum: &mut Museum, event: &KeyEvent) {
    let PhysicalKey::Code(code) = event.physical_key else {
        return;
    };
    let Some(key) = map_key(code) else {
        return;
    };
    match event.state {
        ElementState::Pressed if !event.repeat => museum.key_down(key),
        ElementState::Pressed => {}
        ElementState::Released => museum.key_up(key),
    }
}

/// Frame-side state that lives alongside the renderer.
struct Driver {
    museum: Museum,
    loading: LoadingSequencer,
    last_frame: Instant,
    last_progress: Option<u8>,
}

impl Driver {
    fn frame(&mut self, window: &winit::window::Window) {
        let now = Instant::now();
        let dt = now - self.last_frame;
        self.last_frame = now;

        if self.museum.phase() == AppPhase::Loading {
            let phase = self.loading.advance(dt);
            let view = self.loading.view();
            if self.last_progress != Some(view.progress) {
                window.set_title(&format!("{WINDOW_TITLE} (loading {}%)", view.progress));
                self.last_progress = Some(view.progress);
            }
            if phase == AppPhase::Museum {
                window.set_title(WINDOW_TITLE);
                self.museum.set_phase(phase);
            }
        }
        self.museum.tick(dt.as_secs_f32().min(MAX_FRAME_DT));
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let settings = settings::load_default().context("load museum settings")?;
    let museum = Museum::new(settings.config, settings.catalog).context("build museum")?;
    let mut driver = Driver {
        museum,
        loading: LoadingSequencer::new(),
        last_frame: Instant::now(),
        last_progress: None,
    };

    let event_loop = EventLoop::new().context("event loop")?;
    let window = WindowBuilder::new()
        .with_title(WINDOW_TITLE)
        .build(&event_loop)
        .context("window")?;

    let mut state = pollster::block_on(gpu::GpuState::new(&window)).context("gpu")?;

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent {
            event: WindowEvent::Resized(size),
            ..
        } => state.resize(size),
        Event::WindowEvent {
            event: WindowEvent::CloseRequested,
            ..
        } => elwt.exit(),
        Event::WindowEvent {
            event: WindowEvent::KeyboardInput { event, .. },
            ..
        } => handle_key(&mut driver.museum, &event),
        Event::WindowEvent {
            event: WindowEvent::Focused(false),
            ..
        } => {
            // Keys released while unfocused never arrive.
            for key in museum_core::input::MOVEMENT_KEYS {
                driver.museum.key_up(key);
            }
        }
        Event::AboutToWait => {
            driver.frame(state.window);
            match state.render(&driver.museum) {
                Ok(_) => state.window.request_redraw(),
                Err(wgpu::SurfaceError::Lost) => state.resize(state.window.inner_size()),
                Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                Err(e) => log::warn!("[render] {e:?}"),
            }
        }
        _ => {}
    })?;
    Ok(())
}
