use std::fmt::Write as _;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

const TYPES: [&str; 18] = [
    "Normal", "Fire", "Water", "Grass", "Electric", "Ice", "Fighting", "Poison", "Ground",
    "Flying", "Psychic", "Bug", "Rock", "Ghost", "Dragon", "Dark", "Steel", "Fairy",
];

const SYLLABLES: [&str; 16] = [
    "pi", "ka", "chu", "bul", "ba", "saur", "char", "man", "der", "squir", "tle", "gya", "ra",
    "dos", "mew", "eon",
];

/// Build a plausible-looking name from 2–3 syllables.
fn random_name(rng: &mut StdRng) -> String {
    let n = rng.gen_range(2..=3);
    let raw: String = (0..n)
        .map(|_| *SYLLABLES.choose(rng).unwrap_or(&"mon"))
        .collect();
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => raw,
    }
}

fn random_category(rng: &mut StdRng) -> String {
    let first = TYPES.choose(rng).unwrap_or(&"Normal");
    if rng.gen_bool(0.4) {
        let second = TYPES.choose(rng).unwrap_or(&"Flying");
        if second != first {
            return format!("{first}-{second}");
        }
    }
    first.to_string()
}

fn valid_line(rng: &mut StdRng) -> String {
    format!(
        "{},{:.1}kg,{:.1}m,{:.2},{:.2},{:.2},{}",
        random_name(rng),
        rng.gen_range(0.1..400.0),
        rng.gen_range(0.1..8.0),
        rng.gen_range(0.1..1.0),
        rng.gen_range(0.1..1.0),
        rng.gen_range(0.1..1.0),
        random_category(rng)
    )
}

/// Corrupt a valid line in one of the ways the loader has to reject.
fn malformed_line(rng: &mut StdRng) -> String {
    let line = valid_line(rng);
    let fields: Vec<&str> = line.split(',').collect();
    match rng.gen_range(0..6) {
        0 => String::new(),
        1 => fields[..5].join(","),
        2 => format!("{line},Extra"),
        3 => line.replacen("kg", "", 1),
        4 => format!(",{}", fields[1..].join(",")),
        _ => {
            let mut out = fields[..3].join(",");
            out.push_str(",strong,0.5,0.5,Normal");
            out
        }
    }
}

/// Share of malformed lines, a number in [0, 1].
fn parse_share(arg: &str) -> Result<f64> {
    let share: f64 = arg
        .parse()
        .with_context(|| format!("invalid malformed share {arg:?}"))?;
    anyhow::ensure!(
        (0.0..=1.0).contains(&share),
        "malformed share must be between 0 and 1, got {arg:?}"
    );
    Ok(share)
}

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let output_path = args.next().unwrap_or_else(|| "sample_pokemon.csv".to_string());
    let count: usize = match args.next() {
        Some(n) => n.parse().with_context(|| format!("invalid record count {n:?}"))?,
        None => 50,
    };
    let malformed_share = match args.next() {
        Some(p) => parse_share(&p)?,
        None => 0.1,
    };

    let mut rng = StdRng::seed_from_u64(42);
    let mut out = String::new();
    let mut malformed = 0;

    for _ in 0..count {
        let line = if rng.gen_bool(malformed_share) {
            malformed += 1;
            malformed_line(&mut rng)
        } else {
            valid_line(&mut rng)
        };
        writeln!(out, "{line}")?;
    }

    std::fs::write(&output_path, out).with_context(|| format!("writing {output_path}"))?;

    println!("Wrote {count} lines ({malformed} malformed) to {output_path}");
    Ok(())
}
