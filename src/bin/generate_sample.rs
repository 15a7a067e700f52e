use std::f64::consts::TAU;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue, Value};
use serde_json::json;

/// Metres per degree of latitude.
const METRES_PER_DEGREE: f64 = 111_320.0;

/// Walking pace used to turn distance into a walk-time bucket.
const METRES_PER_MINUTE: f64 = 80.0;

#[derive(Parser)]
#[command(name = "generate_sample", about = "Write a sample walk-time data folder")]
struct Cli {
    /// Output folder
    #[arg(long, default_value = "data")]
    out_dir: PathBuf,

    /// Number of coffee shops
    #[arg(long, default_value_t = 40)]
    shops: usize,

    /// PRNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

struct Origin {
    lon: f64,
    lat: f64,
}

impl Origin {
    /// Point `metres` away from the origin at `bearing` radians.
    fn offset(&self, metres: f64, bearing: f64) -> Vec<f64> {
        let dlat = metres * bearing.cos() / METRES_PER_DEGREE;
        let dlon = metres * bearing.sin() / (METRES_PER_DEGREE * self.lat.to_radians().cos());
        vec![self.lon + dlon, self.lat + dlat]
    }
}

fn feature(geometry: Value, properties: JsonObject) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(geometry)),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

fn properties(value: JsonValue) -> JsonObject {
    match value {
        JsonValue::Object(map) => map,
        _ => JsonObject::new(),
    }
}

/// Slightly irregular ring so the three isochrones don't look like circles.
fn isochrone(origin: &Origin, minutes: f64, rng: &mut SimpleRng) -> FeatureCollection {
    let radius = minutes * METRES_PER_MINUTE;
    let steps = 48;
    let mut ring: Vec<Vec<f64>> = (0..steps)
        .map(|i| {
            let bearing = TAU * i as f64 / steps as f64;
            origin.offset(radius * rng.range(0.85, 1.1), bearing)
        })
        .collect();
    ring.push(ring[0].clone());

    FeatureCollection {
        bbox: None,
        features: vec![feature(
            Value::Polygon(vec![ring]),
            properties(json!({ "WALKTIME": minutes })),
        )],
        foreign_members: None,
    }
}

fn shops(origin: &Origin, count: usize, rng: &mut SimpleRng) -> FeatureCollection {
    let chains = ["Tim Hortons", "Starbucks", "Second Cup", "Balzac's"];
    let independents = [
        "Pilot Coffee", "Sam James", "Dineen", "Neo Coffee Bar", "Jimmy's", "Rooster",
        "Hailed", "Quantum", "Boxcar Social", "Fahrenheit", "Pâtisserie 46", "Versus",
    ];

    let features = (0..count)
        .map(|i| {
            let distance = rng.range(40.0, 15.0 * METRES_PER_MINUTE);
            let position = origin.offset(distance, rng.range(0.0, TAU));
            let walk_time = match distance / METRES_PER_MINUTE {
                m if m <= 5.0 => 5,
                m if m <= 10.0 => 10,
                _ => 15,
            };

            let (name, chain) = if rng.next_f64() < 0.55 {
                let c = *rng.pick(&chains);
                (c.to_string(), c)
            } else {
                (rng.pick(&independents).to_string(), "Independent")
            };

            let customers = rng.range(20.0, 400.0).round();
            let mut props = properties(json!({
                "NAME": name,
                "CHAIN_NAME": chain,
                "REVENUE": (customers * rng.range(4.0, 9.0)).round(),
                "DISTANCE": distance.round(),
                "CUSTOMERS": customers,
                "DONUTS_SOLD": (customers * rng.range(0.1, 0.8)).round(),
                "RATING": (rng.range(2.5, 5.0) * 10.0).round() / 10.0,
                "WALKTIME": walk_time,
            }));
            // A few unreadable values, as real exports have.
            if i % 13 == 7 {
                props.insert("REVENUE".to_string(), json!("N/A"));
            }
            if i % 17 == 3 {
                props.insert("RATING".to_string(), JsonValue::Null);
            }
            feature(Value::Point(position), props)
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

fn write(path: &Path, collection: &FeatureCollection) -> Result<()> {
    let text = serde_json::to_string_pretty(collection).context("serializing GeoJSON")?;
    std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
    log::info!("Wrote {}", path.display());
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let mut rng = SimpleRng::new(cli.seed);

    let origin = Origin {
        lon: -79.38679602617921,
        lat: 43.65569205940113,
    };

    std::fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("creating {}", cli.out_dir.display()))?;

    for minutes in [5.0, 10.0, 15.0] {
        let path = cli.out_dir.join(format!("{minutes}min-walk.geojson"));
        write(&path, &isochrone(&origin, minutes, &mut rng))?;
    }

    write(
        &cli.out_dir.join("cafe-locations.geojson"),
        &shops(&origin, cli.shops, &mut rng),
    )?;

    let office = FeatureCollection {
        bbox: None,
        features: vec![feature(
            Value::Point(vec![origin.lon, origin.lat]),
            properties(json!({ "NAME": "Arima Office" })),
        )],
        foreign_members: None,
    };
    write(&cli.out_dir.join("arima-office.geojson"), &office)?;

    println!(
        "Wrote {} coffee shops and 3 isochrones to {}",
        cli.shops,
        cli.out_dir.display()
    );
    Ok(())
}
