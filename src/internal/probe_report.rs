#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::indexing_slicing)]
#![allow(clippy::pedantic)]
#![allow(warnings)]

use std::{collections::HashSet, error::Error};

use log::info;
use plotters::prelude::*;
use primemap::{ChainingMap, HashFunction, OpenAddressingMap, hash_function_1, hash_function_2};
use rand::Rng;

// Number of keys inserted for each measurement
const KEY_COUNTS: [usize; 8] = [100, 250, 500, 1_000, 2_500, 5_000, 10_000, 20_000];
// Both maps start small so every measurement includes several resizes
const INITIAL_CAPACITY: usize = 53;
const KEY_LENGTH: usize = 8;

const HASH_FUNCTIONS: [(&str, HashFunction); 2] =
    [("hash_function_1", hash_function_1), ("hash_function_2", hash_function_2)];

const COLORS: [RGBColor; 2] = [
    RGBColor(220, 50, 50), // Bright red
    RGBColor(50, 90, 220), // Bright blue
];
const FONT_FAMILY: &str = "sans-serif";
const LINE_WIDTH: u32 = 2;
const MARKER_SIZE: i32 = 4;

// Lowercase ASCII key of fixed length
fn random_key(rng: &mut impl Rng) -> String {
    (0..KEY_LENGTH).map(|_| char::from(rng.random_range(b'a'..=b'z'))).collect()
}

// Distinct random keys, so every insert grows the maps
fn distinct_keys(count: usize) -> Vec<String> {
    let mut rng = rand::rng();
    let mut seen = HashSet::with_capacity(count);
    let mut keys = Vec::with_capacity(count);

    while keys.len() < count {
        let key = random_key(&mut rng);
        if seen.insert(key.clone()) {
            keys.push(key);
        }
    }

    keys
}

// One line per hash function against the number of keys inserted
fn plot(path: &str, caption: &str, y_desc: &str, series: &[Vec<f64>]) -> Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(path, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let max_y = series
        .iter()
        .flat_map(|v| v.iter())
        .fold(1.0, |max: f64, &y| max.max(y)) *
        1.1; // Add 10% margin

    let mut chart = ChartBuilder::on(&root)
        .caption(caption, (FONT_FAMILY, 35))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d(0..KEY_COUNTS.len(), 0.0..max_y)?;

    chart
        .configure_mesh()
        .x_labels(KEY_COUNTS.len())
        .x_label_formatter(&|x| KEY_COUNTS.get(*x).map_or_else(String::new, ToString::to_string))
        .x_desc("Number of Keys Inserted")
        .y_desc(y_desc)
        .axis_desc_style((FONT_FAMILY, 16))
        .draw()?;

    for (index, values) in series.iter().enumerate() {
        let color = COLORS[index % COLORS.len()];
        let line_style = ShapeStyle::from(&color).stroke_width(LINE_WIDTH);

        chart
            .draw_series(LineSeries::new(values.iter().copied().enumerate(), line_style))?
            .label(HASH_FUNCTIONS[index].0)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));

        chart.draw_series(
            values
                .iter()
                .copied()
                .enumerate()
                .map(|point| Circle::new(point, MARKER_SIZE, color.filled())),
        )?;
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    root.present()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let max_keys = KEY_COUNTS.iter().copied().max().unwrap_or(0);
    let keys = distinct_keys(max_keys);
    info!("generated {} distinct keys", keys.len());

    // Results storage, one row per hash function
    let mut average_probes: Vec<Vec<f64>> = vec![Vec::new(); HASH_FUNCTIONS.len()];
    let mut worst_probes: Vec<Vec<f64>> = vec![Vec::new(); HASH_FUNCTIONS.len()];
    let mut longest_chains: Vec<Vec<f64>> = vec![Vec::new(); HASH_FUNCTIONS.len()];

    for &count in &KEY_COUNTS {
        println!("Testing with {} keys", count);

        for (index, &(name, hash_function)) in HASH_FUNCTIONS.iter().enumerate() {
            let mut open = OpenAddressingMap::new(INITIAL_CAPACITY, hash_function);
            let mut chained = ChainingMap::new(INITIAL_CAPACITY, hash_function);

            for (value, key) in keys.iter().take(count).enumerate() {
                open.put(key.as_str(), value);
                chained.put(key.as_str(), value);
            }

            let probes: Vec<usize> =
                keys.iter().take(count).filter_map(|key| open.probe_length(key)).collect();
            let average = probes.iter().sum::<usize>() as f64 / probes.len().max(1) as f64;
            let worst = probes.iter().copied().max().unwrap_or(0);

            average_probes[index].push(average);
            worst_probes[index].push(worst as f64);
            longest_chains[index].push(chained.longest_chain() as f64);

            println!(
                "  {}: open addressing capacity = {}, avg probes = {:.2}, worst = {}, empty = {}; \
                 chaining capacity = {}, longest chain = {}, empty = {}",
                name,
                open.get_capacity(),
                average,
                worst,
                open.empty_buckets(),
                chained.get_capacity(),
                chained.longest_chain(),
                chained.empty_buckets()
            );
        }
    }

    plot(
        "average_probe_length.png",
        "Open Addressing: Average Probe Length",
        "Average Probes per Lookup",
        &average_probes,
    )?;
    plot(
        "worst_case_probes.png",
        "Open Addressing: Worst-Case Probe Length",
        "Worst-Case Probes",
        &worst_probes,
    )?;
    plot("longest_chain.png", "Chaining: Longest Chain", "Nodes in Longest Chain", &longest_chains)?;

    println!(
        "Generated plot images: average_probe_length.png, worst_case_probes.png, longest_chain.png"
    );

    Ok(())
}
