use rand::{Rng, SeedableRng, rngs::SmallRng};

/// Two well-separated triangles of three points each.
#[must_use]
pub fn two_triangles() -> Vec<Vec<f32>> {
    vec![
        vec![0.0, 0.0],
        vec![0.0, 1.0],
        vec![1.0, 0.0],
        vec![10.0, 10.0],
        vec![10.0, 11.0],
        vec![11.0, 10.0],
    ]
}

/// Points scattered uniformly inside squares of side `spread` around each
/// centre, `per_centre` points each, followed by the centres' labels.
#[must_use]
pub fn jittered_blobs(
    centres: &[[f32; 2]],
    per_centre: usize,
    spread: f32,
    seed: u64,
) -> (Vec<Vec<f32>>, Vec<i32>) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut rows = Vec::with_capacity(centres.len() * per_centre);
    let mut labels = Vec::with_capacity(centres.len() * per_centre);
    for (label, centre) in (0_i32..).zip(centres) {
        for _ in 0..per_centre {
            rows.push(vec![
                centre[0] + rng.gen_range(-spread..spread) / 2.0,
                centre[1] + rng.gen_range(-spread..spread) / 2.0,
            ]);
            labels.push(label);
        }
    }
    (rows, labels)
}
