//! Interactive input-remapping demo
//!
//! Opens a window and routes its input through two swappable contexts: on
//! foot, Space jumps and Shift sprints; press E to enter the vehicle, where
//! the same keys honk and brake instead. Everything the callbacks observe is
//! logged, so run with `RUST_LOG=debug` to watch classification happen.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::KeyCode;
use winit::window::{Window, WindowId};

use remapper::collector::{InputCollector, key_code};
use remapper::events::{AXIS_CURSOR_X, AXIS_CURSOR_Y};
use remapper::{Context, Mapper, MapperProfile, RangeConverter};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
enum Action {
    #[default]
    Jump,
    Honk,
    EnterVehicle,
    ExitVehicle,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
enum State {
    #[default]
    Sprint,
    Brake,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
enum Axis {
    #[default]
    LookX,
    LookY,
}

const ON_FOOT: &str = "on_foot";
const VEHICLE: &str = "vehicle";

const WINDOW_WIDTH: f64 = 800.0;
const WINDOW_HEIGHT: f64 = 600.0;

fn key(code: KeyCode) -> u32 {
    key_code(code).expect("demo keys are in the key table")
}

/// Cursor position normalized against the window size
fn look_converter() -> RangeConverter<Axis> {
    let mut converter = RangeConverter::new();
    converter.register(Axis::LookX, [0.0, WINDOW_WIDTH as f32], [0.0, 1.0]);
    converter.register(Axis::LookY, [0.0, WINDOW_HEIGHT as f32], [0.0, 1.0]);
    converter
}

fn built_in_mapper() -> Mapper<Action, State, Axis> {
    let mut on_foot = Context::new();
    on_foot.bind_action(key(KeyCode::Space), Action::Jump);
    on_foot.bind_action(key(KeyCode::KeyE), Action::EnterVehicle);
    on_foot.bind_state(key(KeyCode::ShiftLeft), State::Sprint);
    on_foot.bind_range(AXIS_CURSOR_X, Axis::LookX);
    on_foot.bind_range(AXIS_CURSOR_Y, Axis::LookY);
    on_foot.set_converter(look_converter());

    let mut vehicle = Context::new();
    vehicle.bind_action(key(KeyCode::Space), Action::Honk);
    vehicle.bind_action(key(KeyCode::KeyE), Action::ExitVehicle);
    vehicle.bind_state(key(KeyCode::ShiftLeft), State::Brake);
    vehicle.bind_range(AXIS_CURSOR_X, Axis::LookX);
    vehicle.bind_range(AXIS_CURSOR_Y, Axis::LookY);
    vehicle.set_converter(look_converter());

    let mut mapper = Mapper::new();
    mapper.register_context(ON_FOOT, on_foot);
    mapper.register_context(VEHICLE, vehicle);
    mapper
}

fn register_callbacks(
    mapper: &mut Mapper<Action, State, Axis>,
    pending_switch: &Rc<RefCell<Option<&'static str>>>,
) {
    // Priority 0 handles context switches and consumes what it handles, so
    // the logging callback below never sees those entries
    let switch = Rc::clone(pending_switch);
    mapper.register_callback(0, move |input| {
        if input.actions.contains(&Action::EnterVehicle) {
            input.consume_action(Action::EnterVehicle);
            *switch.borrow_mut() = Some(VEHICLE);
        }
        if input.actions.contains(&Action::ExitVehicle) {
            input.consume_action(Action::ExitVehicle);
            *switch.borrow_mut() = Some(ON_FOOT);
        }
        if input.actions.contains(&Action::Jump) {
            info!("jump, handled at priority 0");
            input.consume_action(Action::Jump);
        }
    });

    mapper.register_callback(1, move |input| {
        for action in &input.actions {
            info!(?action, "action reached priority 1");
        }
        for state in &input.states {
            info!(?state, "state held");
        }
        for (axis, value) in &input.ranges {
            info!(?axis, value = *value, "range sample");
        }
    });
}

struct DemoApp {
    window: Option<Window>,
    collector: InputCollector,
    mapper: Mapper<Action, State, Axis>,
    /// Context switch requested by a callback, applied after dispatch
    pending_switch: Rc<RefCell<Option<&'static str>>>,
}

impl DemoApp {
    fn new() -> Self {
        let mut mapper = match MapperProfile::<Action, State, Axis>::load_from_env() {
            Ok(profile) if !profile.contexts.is_empty() => profile.build(),
            Ok(_) => built_in_mapper(),
            Err(e) => {
                warn!(error = %e, "Failed to load binding profile, using built-in bindings");
                built_in_mapper()
            }
        };

        if mapper.active_count() == 0 {
            mapper.push_context(ON_FOOT);
        }

        let pending_switch = Rc::new(RefCell::new(None));
        register_callbacks(&mut mapper, &pending_switch);

        info!(
            contexts = mapper.context_count(),
            callbacks = mapper.callback_count(),
            "Input mapper ready"
        );

        Self {
            window: None,
            collector: InputCollector::new(),
            mapper,
            pending_switch,
        }
    }
}

impl ApplicationHandler for DemoApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let window_attributes = Window::default_attributes()
                .with_title("Input remapping demo")
                .with_inner_size(winit::dpi::LogicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT));

            match event_loop.create_window(window_attributes) {
                Ok(window) => {
                    self.window = Some(window);
                }
                Err(e) => {
                    eprintln!("Failed to create window: {}", e);
                }
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        // One tick: classify everything delivered since the last tick, then
        // dispatch once and reset
        self.collector.flush_into(&mut self.mapper);
        self.mapper.dispatch();

        if let Some(name) = self.pending_switch.borrow_mut().take() {
            self.mapper.pop_context();
            self.mapper.push_context(name);
            info!(context = name, "switched context");
        }

        self.mapper.tick_reset();

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        self.collector.handle_window_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, exiting");
                event_loop.exit();
            }
            _ => {}
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = DemoApp::new();

    event_loop
        .run_app(&mut app)
        .expect("Failed to run event loop");
}
