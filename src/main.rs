use anyhow::Result;
use arcade_input::config::{config_path, AppConfig};
use arcade_input::engine::game_loop::FrameClock;
use arcade_input::engine::input::{context, AdapterProfile, FrameworkAdapter, InputUnifier};
use arcade_input::engine::renderer::{draw_touch_controls, QuadBatch, Renderer};
use arcade_input::menu::{Menu, MenuEvent};
use glam::Vec2;
use log::{error, info, warn};
use std::sync::Arc;
use winit::{
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    window::WindowBuilder,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    info!("Starting arcade menu...");

    let config = AppConfig::load_or_default(&config_path());
    let profile = AdapterProfile::by_name(&config.adapter.profile).unwrap_or_else(|e| {
        warn!("{}, falling back to the menu profile", e);
        AdapterProfile::menu()
    });

    context::install(InputUnifier::with_default_backend(config.input.clone()))?;
    let mut adapter = FrameworkAdapter::new(profile, &config.input);
    let mut menu = Menu::from_config(&config.menu);
    let mut clock = FrameClock::new();
    let mut batch = QuadBatch::new();
    let mut title = String::new();

    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("Arcade")
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720))
            .with_resizable(true)
            .build(&event_loop)?,
    );

    let mut renderer = pollster::block_on(Renderer::new(window.clone()))?;
    let size = window.inner_size();
    context::with_input(|input| input.resize(size.width as f32, size.height as f32));

    info!("Window created successfully");

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    info!("Close requested, shutting down...");
                    context::uninstall();
                    elwt.exit();
                }
                WindowEvent::Resized(physical_size) => {
                    renderer.resize(physical_size);
                    context::with_input(|input| {
                        input.resize(physical_size.width as f32, physical_size.height as f32)
                    });
                }
                WindowEvent::KeyboardInput { event, .. } => {
                    adapter.process_keyboard_event(&event);
                }
                WindowEvent::Touch(touch) => {
                    let position = Vec2::new(touch.location.x as f32, touch.location.y as f32);
                    context::with_input(|input| {
                        input.handle_touch(touch.id, touch.phase, position)
                    });
                }
                WindowEvent::Focused(false) => adapter.release_keys(),
                WindowEvent::Occluded(hidden) => {
                    if hidden {
                        context::with_input(|input| input.hide());
                        clock.pause();
                    } else {
                        context::with_input(|input| input.show());
                        clock.resume();
                    }
                }
                WindowEvent::RedrawRequested => {
                    let dt = clock.begin_frame();
                    context::with_input(|input| {
                        input.tick();
                        adapter.update(input);
                    });
                    menu.poll_deployments();

                    if let Some(MenuEvent::Navigate { id, url }) = menu.update(&adapter, dt) {
                        info!("Leaving menu for '{}' at {}", id, url);
                        context::uninstall();
                        elwt.exit();
                        return;
                    }

                    if let Some(card) = menu.selected_card() {
                        let next = format!("{} - {}", card.title, card.label);
                        if next != title {
                            window.set_title(&next);
                            title = next;
                        }
                    }

                    batch.clear();
                    menu.draw(&mut batch, renderer.viewport());
                    context::with_input(|input| draw_touch_controls(&mut batch, input.touch()));
                    if let Err(e) = renderer.render(&batch) {
                        error!("Render failed: {}", e);
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                // Input is polled per frame, so keep frames coming
                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
