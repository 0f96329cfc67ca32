//! The pixel driver: spreads rows of the image across a scoped rayon
//! thread pool, averaging `effort` camera samples per pixel.

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use crate::camera::Camera;
use crate::color::Color;
use crate::config::RenderConfig;
use crate::image_io::Image;
use crate::integrator::trace_color;
use crate::rng::rng_for_row;
use crate::surface::Surface;

pub fn render(config: &RenderConfig, scene: &dyn Surface) -> Image {
    let camera = Camera::new(config.x_res, config.y_res);
    let progress = ProgressBar::new(config.y_res as u64);
    if let Ok(style) = ProgressStyle::with_template("{bar:40} {pos}/{len} rows") {
        progress.set_style(style);
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()
        .expect("failed to build render thread pool");

    let rows: Vec<Vec<Color>> = pool.install(|| {
        (0..config.y_res)
            .into_par_iter()
            .map(|row| {
                let mut rng = rng_for_row(config.base_seed, row);
                let mut pixels = Vec::with_capacity(config.x_res as usize);
                for col in 0..config.x_res {
                    let mut accum = Color::default();
                    for _ in 0..config.effort {
                        let ray = camera.ray_for_pixel(col, row, &mut rng);
                        accum = accum
                            + trace_color(&ray, scene, 0, 1.0, false, config.fast_diffuse, &mut rng);
                    }
                    pixels.push((accum * (1.0 / config.effort as f32)).clamp());
                }
                progress.inc(1);
                pixels
            })
            .collect()
    });

    progress.finish_and_clear();

    let mut image = Image::new(config.x_res, config.y_res);
    for (row, pixels) in rows.into_iter().enumerate() {
        for (col, color) in pixels.into_iter().enumerate() {
            image.set(col as u32, row as u32, color);
        }
    }
    image
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::Group;

    fn tiny_config() -> RenderConfig {
        RenderConfig {
            output_path: "test.png".into(),
            x_res: 4,
            y_res: 4,
            scene_id: 1,
            effort: 2,
            fast_diffuse: true,
            threads: 2,
            mesh_path: "unused.obj".into(),
            base_seed: 7,
        }
    }

    #[test]
    fn empty_scene_renders_all_black() {
        let scene = Group::new(vec![]);
        let config = tiny_config();
        let image = render(&config, &scene);
        assert!(image.is_all_black());
    }

    #[test]
    fn same_seed_and_threads_reproduce_byte_identical_output() {
        let scene = Group::new(vec![]);
        let config = tiny_config();
        let a = render(&config, &scene);
        let b = render(&config, &scene);
        for y in 0..config.y_res as i64 {
            for x in 0..config.x_res as i64 {
                assert_eq!(a.get(x, y), b.get(x, y));
            }
        }
    }
}
