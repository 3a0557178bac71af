#[macro_use]
extern crate log;

use bumpalo::Bump;
use clap::{Parser, Subcommand};
use scatter_core::geometry::*;
use scatter_core::light::*;
use scatter_core::light_distrib::*;
use scatter_core::material::TransportMode;
use scatter_core::medium::*;
use scatter_core::microfacet::*;
use scatter_core::primitives::*;
use scatter_core::reflection::*;
use scatter_core::rng::RNG;
use scatter_core::sampler::*;
use scatter_core::sampling::*;
use scatter_core::scene::*;
use scatter_core::shapes::Disk;
use scatter_core::spectrum::*;
use scatter_core::stats::*;
use scatter_lights::*;
use std::sync::Arc;

/// Command line options.
#[derive(Parser, Clone)]
#[clap(author, version, about, long_about = None)]
struct Options {
    /// Light sampling strategy used by the `lights` command.
    #[clap(
        long = "light-strategy",
        value_name = "NAME",
        default_value = "spatial",
        global = true,
        help = "Light sample distribution: uniform, power or spatial."
    )]
    light_strategy: String,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Clone)]
enum Command {
    /// Load a Fourier BSDF table and estimate its reflectance.
    Fourier {
        #[clap(value_name = "FILE", help = "Path to the .bsdf file")]
        path: String,

        #[clap(long, short = 's', value_name = "NUM", default_value_t = 1024)]
        samples: usize,
    },

    /// Check Henyey-Greenstein sampling against its density.
    Phase {
        #[clap(long, value_name = "FLOAT", allow_negative_numbers = true)]
        g: Float,

        #[clap(long, short = 's', value_name = "NUM", default_value_t = 100_000)]
        samples: usize,
    },

    /// Estimate the directional reflectance of the built-in lobes.
    Lobes {
        #[clap(long, short = 's', value_name = "NUM", default_value_t = 4096)]
        samples: usize,
    },

    /// Build a small lit scene and print light selection probabilities.
    Lights,
}

fn main() {
    // Initialize `env_logger`.
    env_logger::init();

    let options = Options::parse();
    if let Err(e) = run(&options) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run(options: &Options) -> Result<(), String> {
    match &options.command {
        Command::Fourier { path, samples } => fourier(path, *samples),
        Command::Phase { g, samples } => phase(*g, *samples),
        Command::Lobes { samples } => lobes(*samples),
        Command::Lights => lights(LightSampleStrategy::from(options.light_strategy.as_str())),
    }
}

/// Returns jittered stratified samples covering roughly `n` points.
fn stratified(rng: &mut RNG, n: usize) -> Vec<Point2f> {
    let side = max(1, (n as Float).sqrt().ceil() as usize);
    stratified_sample_2d(rng, side, side, true)
}

/// Returns an outgoing direction in the x-z plane with the given cosine.
fn direction(cos_theta: Float) -> Vector3f {
    let sin_theta = max(0.0, 1.0 - cos_theta * cos_theta).sqrt();
    Vector3f::new(sin_theta, 0.0, cos_theta)
}

fn fourier(path: &str, samples: usize) -> Result<(), String> {
    let table = FourierBSDFTable::from_file(path).map_err(|e| format!("{path}: {e}"))?;
    println!("Fourier BSDF table {path}");
    println!("  eta         {}", table.eta);
    println!("  m_max       {}", table.m_max);
    println!("  channels    {}", table.n_channels);
    println!("  zenith knots {}", table.n_mu());

    let arena = Bump::new();
    let bxdf = FourierBSDF::alloc(&arena, &table, TransportMode::Radiance);
    let mut rng = RNG::default();
    let u = stratified(&mut rng, samples);
    for cos_theta in [1.0, 0.8, 0.5, 0.2] {
        let rho = bxdf.rho_hd(&direction(cos_theta), &u);
        println!("  rho_hd(cos {cos_theta:.1}) = {rho}");
    }
    Ok(())
}

fn phase(g: Float, samples: usize) -> Result<(), String> {
    if !(g > -1.0 && g < 1.0) {
        return Err(format!("asymmetry parameter {g} must be in (-1, 1)"));
    }
    if samples == 0 {
        return Err("need at least one sample".to_string());
    }

    let hg = HenyeyGreenstein::new(g);
    let wo = Vector3f::new(0.0, 0.0, 1.0);
    let mut rng = RNG::default();
    let mut sum_cos = 0.0_f64;
    let mut max_error: Float = 0.0;
    for _ in 0..samples {
        let (p, wi) = hg.sample_p(&wo, &rng.get_2d());
        // Forward scattering continues along -wo.
        sum_cos += -wo.dot(&wi) as f64;
        max_error = max(max_error, (p - hg.p(&wo, &wi)).abs() / p);
    }

    println!("Henyey-Greenstein g = {g}");
    println!("  mean cosine       {:.4}", sum_cos / samples as f64);
    println!("  max p mismatch    {max_error:.3e}");
    Ok(())
}

fn lobes(samples: usize) -> Result<(), String> {
    let arena = Bump::new();
    let albedo = Spectrum::rgb(0.8, 0.5, 0.2);
    let alpha = TrowbridgeReitzDistribution::roughness_to_alpha(0.3);
    let distribution: &TrowbridgeReitzDistribution =
        arena.alloc(TrowbridgeReitzDistribution::new(alpha, alpha, true));
    let diffuse = LambertianReflection::alloc(&arena, albedo);

    let bxdfs = [
        diffuse,
        LambertianTransmission::alloc(&arena, albedo),
        MicrofacetReflection::alloc(
            &arena,
            Spectrum::ONE,
            distribution,
            FresnelDielectric::new(1.0, 1.5),
        ),
        ScaledBxDF::alloc(&arena, diffuse, Spectrum::new(0.5)),
        SeparableBSSRDFAdapter::alloc(
            &arena,
            SeparableBSSRDF::new(1.33, TransportMode::Radiance),
        ),
        SpecularReflection::alloc(&arena, Spectrum::ONE, FresnelDielectric::new(1.0, 1.5)),
        SpecularTransmission::alloc(&arena, Spectrum::ONE, 1.0, 1.5, TransportMode::Radiance),
    ];

    let mut rng = RNG::default();
    let u = stratified(&mut rng, samples);
    let wo = direction(0.7);
    for bxdf in bxdfs.iter() {
        let rho = bxdf.rho_hd(&wo, &u);
        println!("{:?}", bxdf.get_type());
        println!("  {bxdf}");
        println!("  rho_hd = {rho}");
    }
    Ok(())
}

fn lights(strategy: LightSampleStrategy) -> Result<(), String> {
    let stats = StatsRegistry::new();
    let mut primitives: Vec<ArcPrimitive> = vec![Arc::new(GeometricPrimitive::new(
        Arc::new(Disk::new(Point3f::new(0.0, 0.0, 0.0), 10.0, false)),
        None,
        None,
        MediumInterface::vacuum(),
    ))];
    let mut lights: Vec<ArcLight> = vec![];

    for (x, l) in [(-8.0, 4.0), (8.0, 1.0)] {
        let shape: ArcShape = Arc::new(Disk::new(Point3f::new(x, 0.0, 2.0), 1.0, true));
        let light = Arc::new(DiffuseAreaLight::new(
            MediumInterface::vacuum(),
            Spectrum::new(l),
            1,
            Arc::clone(&shape),
            false,
            &stats,
        ));
        let area_light: ArcAreaLight = light.clone();
        primitives.push(Arc::new(GeometricPrimitive::new(
            shape,
            None,
            Some(area_light),
            MediumInterface::vacuum(),
        )));
        lights.push(light);
    }
    lights.push(Arc::new(PointLight::new(
        Point3f::new(0.0, 0.0, 5.0),
        MediumInterface::vacuum(),
        Spectrum::new(10.0),
    )));

    let scene = Scene::new(Arc::new(PrimitiveList::new(primitives)), lights);
    let distribution = create_light_sample_distribution(strategy, &scene);

    println!("Light strategy: {strategy}");
    for x in [-8.0, -4.0, 0.0, 4.0, 8.0] {
        let p = Point3f::new(x, 0.0, 0.0);
        let d = distribution
            .lookup(&p)
            .ok_or_else(|| "scene has no lights".to_string())?;
        let pdfs: Vec<String> = (0..d.count())
            .map(|i| format!("{:.3}", d.discrete_pdf(i)))
            .collect();
        println!("  x = {x:5.1}: [{}]", pdfs.join(", "));
    }

    println!("{}", stats.report());
    stats.log_report();
    Ok(())
}
