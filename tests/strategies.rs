extern crate newton;
extern crate num;
extern crate rand;

use newton::scheduler::{render_with, BatchedPartitioner, FlatPartitioner, SerialPartitioner};
use newton::viewport::Pixel;
use newton::{render, PixelResult, RootSet, Strategy, Viewport};
use num::Complex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn window(width: usize, height: usize, extent: f64) -> Viewport {
    Viewport::new(
        width,
        height,
        Complex::new(-extent, -extent),
        Complex::new(extent, extent),
    )
    .unwrap()
}

fn all_strategies() -> Vec<Strategy> {
    vec![
        Strategy::Serial,
        Strategy::DataParallelFlat { lanes: 1 },
        Strategy::DataParallelFlat { lanes: 4 },
        Strategy::DataParallelFlat { lanes: 7 },
        Strategy::DataParallelBatched {
            workers: 4,
            rows_per_task: 1,
        },
        Strategy::DataParallelBatched {
            workers: 3,
            rows_per_task: 5,
        },
        Strategy::DataParallelBatched {
            workers: 16,
            rows_per_task: 64,
        },
    ]
}

#[test]
fn every_strategy_renders_the_same_image() {
    let vp = window(96, 80, 2.5);
    for n in &[1, 3, 5, 8] {
        let roots = RootSet::new(*n).unwrap();
        let reference = render(&vp, 64, &roots, Strategy::Serial).unwrap();
        for strategy in all_strategies() {
            let out = render(&vp, 64, &roots, strategy).unwrap();
            assert!(out == reference, "{} differs for n = {}", strategy, n);
        }
    }
}

#[test]
fn partitioners_can_be_injected_directly() {
    let vp = window(40, 33, 1.75);
    let roots = RootSet::new(4).unwrap();
    let serial = render_with(&vp, 32, &roots, &SerialPartitioner).unwrap();
    let flat = render_with(&vp, 32, &roots, &FlatPartitioner { lanes: 5 }).unwrap();
    let batched = render_with(
        &vp,
        32,
        &roots,
        &BatchedPartitioner {
            workers: 2,
            rows_per_task: 3,
        },
    )
    .unwrap();
    assert_eq!(serial, flat);
    assert_eq!(serial, batched);
}

#[test]
fn rendering_twice_gives_the_same_image() {
    let vp = window(64, 64, 2.0);
    let roots = RootSet::new(3).unwrap();
    let strategy = Strategy::DataParallelBatched {
        workers: 4,
        rows_per_task: 2,
    };
    let first = render(&vp, 64, &roots, strategy).unwrap();
    let second = render(&vp, 64, &roots, strategy).unwrap();
    assert_eq!(first, second);
}

#[test]
fn buffers_match_the_kernel_pixel_by_pixel() {
    let vp = Viewport::new(17, 9, Complex::new(-2.0, -1.0), Complex::new(1.5, 2.0)).unwrap();
    let roots = RootSet::new(5).unwrap();
    let out = render(&vp, 48, &roots, Strategy::DataParallelFlat { lanes: 3 }).unwrap();
    assert_eq!(out.len(), 17 * 9);
    for row in 0..9 {
        for column in 0..17 {
            let pixel = Pixel(column, row);
            let expected = newton::kernel::iterate(vp.pixel_to_point(&pixel), &roots, 48);
            assert_eq!(out.get(vp.offset(&pixel)), expected);
        }
    }
}

#[test]
fn centre_of_the_cubic_never_converges() {
    let vp = window(8, 8, 2.0);
    let roots = RootSet::new(3).unwrap();
    for strategy in all_strategies() {
        let out = render(&vp, 64, &roots, strategy).unwrap();
        let centre = out.get(vp.offset(&Pixel(4, 4)));
        assert_eq!(centre, PixelResult { iterations: 0, root: 3 });
    }
}

#[test]
fn one_on_the_real_axis_is_root_zero() {
    let vp = window(8, 8, 2.0);
    let roots = RootSet::new(4).unwrap();
    let out = render(&vp, 64, &roots, Strategy::Serial).unwrap();
    assert_eq!(out.get(vp.offset(&Pixel(6, 4))), PixelResult { iterations: 0, root: 0 });
}

#[test]
fn roots_and_counts_stay_in_range() {
    let vp = window(50, 50, 2.5);
    let roots = RootSet::new(6).unwrap();
    let out = render(&vp, 40, &roots, Strategy::Serial).unwrap();
    assert!(out.roots.iter().all(|&r| r <= 6));
    assert!(out.iterations.iter().all(|&i| i < 40));
    for offset in 0..out.len() {
        if out.roots[offset] == 6 {
            assert_eq!(out.iterations[offset], 0);
        }
    }
}

#[test]
fn degree_one_converges_from_random_starts() {
    let roots = RootSet::new(1).unwrap();
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..1000 {
        let start = Complex::new(rng.gen_range(-10.0, 10.0), rng.gen_range(-10.0, 10.0));
        let result = newton::kernel::iterate(start, &roots, 8);
        assert_eq!(result.root, 0, "start {}", start);
        assert!(result.iterations <= 1, "start {}", start);
    }
}

#[test]
fn roots_converge_on_the_first_check_for_any_degree() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..50 {
        let n = rng.gen_range(1, 24);
        let roots = RootSet::new(n).unwrap();
        for k in 0..n {
            let result = newton::kernel::iterate(roots.at(k), &roots, 64);
            assert_eq!(result, PixelResult { iterations: 0, root: k });
        }
    }
}
