use cmsolve::{
    generator::{Difficulty, Generator, GeneratorConfig},
    solver::{AStar, BreadthFirstSearch, DepthFirstSearch, ExpansionCounting, Solver},
    Grid,
};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const SIZE: usize = 100;

fn maze() -> Grid {
    Generator::new(GeneratorConfig {
        seed: Some(0xC0FFEE),
        ..Default::default()
    })
    .generate(SIZE, SIZE, Difficulty::Medium)
    .unwrap()
}

fn bench_solver(c: &mut Criterion, name: &str, solver: &dyn Solver) {
    let grid = maze();
    c.bench_function(name, |b| {
        b.iter(|| {
            solver
                .solve(black_box(&grid), grid.start(), grid.end())
                .unwrap()
        })
    });
}

pub fn bfs(c: &mut Criterion) {
    bench_solver(c, "bfs", &BreadthFirstSearch);
}

pub fn dfs(c: &mut Criterion) {
    bench_solver(c, "dfs", &DepthFirstSearch);
}

pub fn astar(c: &mut Criterion) {
    bench_solver(c, "astar", &AStar::new(ExpansionCounting::Unique));
}

pub fn generate(c: &mut Criterion) {
    let generator = Generator::default();
    c.bench_function("generate_medium", |b| {
        b.iter(|| {
            generator
                .generate(black_box(SIZE), black_box(SIZE), Difficulty::Medium)
                .unwrap()
        })
    });
}

criterion_group! {name = benches; config = Criterion::default().sample_size(20); targets = bfs, dfs, astar, generate}
criterion_main!(benches);
