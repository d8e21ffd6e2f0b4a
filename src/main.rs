use anyhow::Context;
use fps_walker::engine::{self, Engine};
use fps_walker::input::{InputFrame, ScriptedInput};
use fps_walker::scene::SceneData;
use fps_walker::WalkerConfig;
use glam::Vec2;

const CONFIG_PATH: &str = "config/walker.json";
const SCENE_PATH: &str = "config/scene.json";

/// A short walk: forward, turn, jump, strafe into the wall.
fn demo_input() -> ScriptedInput {
    let mut input = ScriptedInput::new();
    input
        .hold(InputFrame::walk(Vec2::new(0.0, 1.0)), 60)
        .hold(InputFrame::look(Vec2::new(15.0, -2.0)), 30)
        .push(InputFrame::jump())
        .hold(InputFrame::walk(Vec2::new(1.0, 1.0)), 90)
        .hold(InputFrame::default(), 30)
        .hold(InputFrame::walk(Vec2::new(-1.0, 0.0)), 120);
    input
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let seconds: f32 = match args.next() {
        Some(arg) => arg
            .parse::<f32>()
            .with_context(|| format!("run length {arg:?} is not a number"))?,
        None => 6.0,
    };
    let ticks = engine::ticks_for(seconds)?;
    let events_path = args.next();

    println!("=== fps-walker starting ===");
    let config = WalkerConfig::load_or_default(CONFIG_PATH)?;
    let scene = SceneData::load_or_default(SCENE_PATH)?;

    println!("Running {ticks} ticks at {} Hz", engine::TICK_HZ);
    let mut engine = Engine::new(&config, &scene, demo_input())?;
    let summary = engine.run(seconds)?;

    println!(
        "Ran {} ticks: feet at {:?}, eye at {:?}, yaw {:.1}, pitch {:.1}, {:?}",
        summary.ticks,
        summary.pose.position,
        summary.eye,
        summary.pose.yaw(),
        summary.pose.pitch(),
        summary.motion.ground,
    );

    if let Some(path) = events_path {
        engine.controller().events().save_to_file(&path)?;
        println!("Event log written to {path}");
    }

    println!("Shutdown complete.");
    Ok(())
}
