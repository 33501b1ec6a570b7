use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use log::info;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use chippy_core::{Chip8, Config, TIMER_HZ};
use chippy_renderer::Renderer;

use crate::keymap::keymap;

/// Everything the host loop needs to know, gathered from the command line
pub struct Settings {
    pub rom: PathBuf,
    pub config: Config,
    pub clock_hz: u32,
    pub scale: u32,
}

pub fn run(settings: Settings) -> Result<()> {
    let mut chip8 = Chip8::with_config(settings.config);

    // Load ROM; nothing runs unless the whole image fits
    let image = fs::read(&settings.rom)
        .with_context(|| format!("unable to read {}", settings.rom.display()))?;
    chip8
        .load_rom(&image)
        .with_context(|| format!("unable to load {}", settings.rom.display()))?;
    info!("loaded {} ({} bytes)", settings.rom.display(), image.len());

    // Get SDL2 context
    let sdl = sdl2::init().map_err(|e| anyhow!(e))?;
    let mut renderer = Renderer::new(&sdl, settings.scale).map_err(|e| anyhow!(e))?;
    let mut events = sdl.event_pump().map_err(|e| anyhow!(e))?;

    // Set initial timing
    let cycle_time = Duration::from_secs(1) / settings.clock_hz;
    let timer_period = Duration::from_secs(1) / TIMER_HZ;
    let mut last_cycle = Instant::now();
    let mut last_tick = Instant::now();

    // Whether or not the clock speed should be respected
    let mut fast_forward = false;

    'event: loop {
        // If the draw flag is set, render the current frame and hand it back
        if let Some(frame) = chip8.get_frame() {
            renderer.render(frame).map_err(|e| anyhow!(e))?;
            chip8.acknowledge_frame();
        }

        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'event,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(pad)) => chip8.key_press(pad),
                    (Keycode::Space, _) => fast_forward = true,
                    _ => continue,
                },
                Event::KeyUp {
                    keycode: Some(key), ..
                } => match (key, keymap(key)) {
                    (_, Some(pad)) => chip8.key_release(pad),
                    (Keycode::Space, _) => fast_forward = false,
                    _ => continue,
                },
                _ => continue,
            };
        }

        // Update state
        chip8
            .step()
            .with_context(|| format!("cycle at {:#06X} failed", chip8.cpu().pc()))?;
        while last_tick.elapsed() >= timer_period {
            chip8.tick_timers();
            last_tick += timer_period;
        }

        // Handle timing
        let current_time = Instant::now();
        let elapsed_cycle_time = current_time - last_cycle;
        if !fast_forward && cycle_time > elapsed_cycle_time {
            std::thread::sleep(cycle_time - elapsed_cycle_time);
        }
        last_cycle = Instant::now();
    }

    info!("window closed, shutting down");
    Ok(())
}
