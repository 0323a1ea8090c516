/// Hopfield associative memory demo.
///
/// Imprints two 5x5 letter bitmaps, corrupts a few pixels of each, and lets
/// the network recall the clean originals.
///
/// Run with:
///   cargo run --example hopfield

use neurolab::HopfieldNetwork;

const GRID: usize = 5;

fn pattern_from_art(art: &[&str]) -> Vec<i8> {
    art.iter()
        .flat_map(|row| row.chars().map(|c| if c == '#' { 1 } else { -1 }))
        .collect()
}

fn print_pattern(label: &str, cells: &[i8]) {
    println!("{label}:");
    for row in cells.chunks(GRID) {
        let line: String = row.iter().map(|&c| if c == 1 { '#' } else { '.' }).collect();
        println!("  {line}");
    }
}

fn main() {
    let letter_t = pattern_from_art(&[
        "#####",
        "..#..",
        "..#..",
        "..#..",
        "..#..",
    ]);
    let letter_l = pattern_from_art(&[
        "#....",
        "#....",
        "#....",
        "#....",
        "#####",
    ]);

    let mut net = HopfieldNetwork::new(GRID * GRID);
    net.imprint(&letter_t);
    net.imprint(&letter_l);
    println!("Imprinted 2 patterns into a {n}-unit network.\n", n = GRID * GRID);

    for (name, clean) in [("T", &letter_t), ("L", &letter_l)] {
        let mut noisy = clean.clone();
        // Flip three pixels.
        for idx in [0, 7, 18] {
            noisy[idx] = -noisy[idx];
        }

        print_pattern(&format!("Noisy probe for '{name}'"), &noisy);
        let recalled = net.recall(&noisy);
        print_pattern("Recalled", &recalled);
        println!(
            "  exact match: {}\n",
            if recalled == *clean { "yes" } else { "no" }
        );
    }
}
