use std::env;

use cmsolve::{compare, generate, Difficulty, Grid};

const SAMPLE: &str = "
    0 1 0 0 0
    0 1 0 1 0
    0 0 0 1 0
    1 1 1 1 0
    0 0 0 0 0
";

fn main() {
    let mut args = env::args().skip(1);

    let grid: Grid = match args.next() {
        Some(size) => {
            let size = size.parse().expect("Expected maze size");
            let difficulty = args
                .next()
                .map(|d| Difficulty::from_name(&d))
                .unwrap_or_default();
            generate(size, size, difficulty).expect("Invalid maze size")
        }
        None => SAMPLE.parse().expect("sample maze should be valid"),
    };

    print!("{}", grid);
    println!();
    print!("{}", compare(&grid, grid.start(), grid.end()).unwrap());
}
