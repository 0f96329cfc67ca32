use std::env;
use std::process::ExitCode;

use mc_tracer::config::{self, RenderConfig};
use mc_tracer::{render, scenes};

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();

    let config = match RenderConfig::from_args(&args) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{e}");
            eprintln!("{}", config::USAGE);
            return ExitCode::FAILURE;
        }
    };

    println!(
        "Rendering {}x{} (scene {}, effort {}, {} threads)...",
        config.x_res, config.y_res, config.scene_id, config.effort, config.threads
    );

    let scene = scenes::build_scene(config.scene_id, &config.mesh_path);
    let image = render::render(&config, scene.as_ref());

    if let Err(e) = image.save_png(&config.output_path) {
        eprintln!("{e}");
        return ExitCode::FAILURE;
    }

    println!("Saved -> {}", config.output_path.display());
    ExitCode::SUCCESS
}
