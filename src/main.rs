use anyhow::Result;
use log::info;
use winit::{
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    window::WindowBuilder,
};

mod core;
mod engine;
mod game;

use engine::game_loop::GameLoop;
use engine::input::InputManager;
use game::{Flow, Game};

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Rusted Platformer...");

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Rusted Platformer")
        .with_inner_size(winit::dpi::LogicalSize::new(1280, 720))
        .with_resizable(true)
        .build(&event_loop)?;

    info!("Window created successfully");

    let mut input = InputManager::new();
    let mut game_loop = GameLoop::new();
    let mut game = Game::new();
    let mut title = String::new();

    // Main event loop
    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!("Close requested, shutting down...");
                elwt.exit();
            }
            Event::WindowEvent {
                event: WindowEvent::KeyboardInput { event, .. },
                ..
            } => input.process_keyboard_event(&event),
            Event::WindowEvent {
                event: WindowEvent::MouseInput { state, button, .. },
                ..
            } => input.process_mouse_button(button, state),
            Event::WindowEvent {
                event: WindowEvent::RedrawRequested,
                ..
            } => {
                let steps = game_loop.begin_frame();
                let dt = game_loop.fixed_timestep();
                // sim_time already includes this frame's steps
                let frame_start = game_loop.sim_time() - steps as f64 * dt as f64;
                for i in 1..=steps {
                    let time = frame_start + i as f64 * dt as f64;
                    let flow = game.fixed_update(input.player_mut(), dt, time);
                    if flow == Flow::Exit {
                        info!("Exit requested, shutting down...");
                        elwt.exit();
                        return;
                    }
                }
                input.update();
                input.set_context(game.input_context());

                let next_title = game.title();
                if next_title != title {
                    window.set_title(&next_title);
                    title = next_title;
                }
            }
            Event::AboutToWait => {
                // Request redraw on next frame
                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
