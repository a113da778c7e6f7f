//! Night sky renderer

#[macro_use]
extern crate log;

mod options;
mod render;
mod scene;

use clap::Parser;
use knight_core::film::RadianceFilm;
use knight_core::image_io::write_image;
use knight_tonemap::{apply_bloom, tone_map};
use options::Options;
use render::{Backend, Cpu};
use scene::Scene;
use std::process::exit;

fn main() {
    // Initialize `env_logger`.
    env_logger::init();

    let opts = Options::parse();
    if let Err(e) = run(&opts) {
        error!("{}", e);
        exit(1);
    }
}

fn run(opts: &Options) -> Result<(), String> {
    info!(
        "Rendering {}x{} at lat {:.2}, lon {:.2}, {} {:.2} UTC",
        opts.width, opts.height, opts.lat, opts.lon, opts.date, opts.time
    );

    let scene = Scene::build(opts)?;
    let backend = Cpu::new(opts.threads());
    let film = RadianceFilm::new(opts.width, opts.height);

    info!("Rendering atmosphere");
    backend.render_sky(&scene, &film);

    info!("Rendering {} point sources", scene.sources.len());
    backend.render_sources(&scene, opts.aperture, &film);

    let mut pixels = film.into_pixels();
    if !opts.no_bloom {
        info!("Applying bloom");
        let fov = if opts.panorama { 360.0 } else { opts.fov };
        apply_bloom(&mut pixels, opts.width, opts.height, opts.bloom_size, fov);
    }

    info!("Tone mapping");
    let rgb = tone_map(&pixels, opts.exposure);

    write_image(&opts.image_file, &rgb, opts.width, opts.height)?;
    info!("Wrote '{}'", opts.image_file);
    Ok(())
}
