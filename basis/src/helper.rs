use nalgebra::Vector3;
use rayon::prelude::*;

/// Double factorial n!! = n * (n-2) * (n-4) * ... down to 1 or 2.
///
/// Every non-positive argument yields the empty product, so `fact2(-1) == 1`
/// as the THO normalization of s-type functions requires.
pub fn fact2(n: i32) -> f64 {
    (1..=n).rev().step_by(2).fold(1.0, |acc, x| acc * x as f64)
}

/// Squared Euclidean norm of a 3-vector.
pub fn norm2(v: &Vector3<f64>) -> f64 {
    v.x * v.x + v.y * v.y + v.z * v.z
}

// Simpson's weight for index i out of n (n even)
fn simpson_weight(i: usize, n: usize) -> f64 {
    if i == 0 || i == n {
        1.0
    } else if i % 2 == 1 {
        4.0
    } else {
        2.0
    }
}

/// Parallel Simpson's rule integration in 3D.
///
/// Integrates f(x,y,z) over the box defined by [a.x,b.x] x [a.y,b.y] x [a.z,b.z].
/// Uses Simpson's rule with nx, ny, nz subdivisions (adjusted up if not even).
pub fn simpson_integration_3d<F>(
    f: F,
    a: Vector3<f64>,
    b: Vector3<f64>,
    nx: usize,
    ny: usize,
    nz: usize,
) -> f64
where
    F: Fn(f64, f64, f64) -> f64 + Sync,
{
    let nx = nx + nx % 2;
    let ny = ny + ny % 2;
    let nz = nz + nz % 2;

    let hx = (b.x - a.x) / nx as f64;
    let hy = (b.y - a.y) / ny as f64;
    let hz = (b.z - a.z) / nz as f64;

    let y_coords: Vec<(f64, f64)> = (0..=ny)
        .map(|j| (a.y + j as f64 * hy, simpson_weight(j, ny)))
        .collect();
    let z_coords: Vec<(f64, f64)> = (0..=nz)
        .map(|k| (a.z + k as f64 * hz, simpson_weight(k, nz)))
        .collect();

    // parallel over x planes, serial inside each plane
    let sum: f64 = (0..=nx)
        .into_par_iter()
        .map(|i| {
            let x = a.x + i as f64 * hx;
            let wx = simpson_weight(i, nx);
            y_coords
                .iter()
                .map(|&(y, wy)| {
                    z_coords
                        .iter()
                        .map(|&(z, wz)| wy * wz * f(x, y, z))
                        .sum::<f64>()
                })
                .sum::<f64>()
                * wx
        })
        .sum();

    // (hx/3) * (hy/3) * (hz/3)
    sum * (hx * hy * hz) / 27.0
}
