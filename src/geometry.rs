//! Vertex data for the decorative background meshes.

use std::collections::{BTreeSet, HashMap};

use glam::Vec3;

/// Icosahedron with every face split into four, projected onto a sphere.
#[derive(Clone, Debug)]
pub struct WireSphere {
    pub vertices: Vec<Vec3>,
    /// Unique undirected edges as index pairs (lower index first).
    pub edges: Vec<[u16; 2]>,
}

impl WireSphere {
    pub fn new(radius: f32) -> Self {
        let t = (1.0 + 5f32.sqrt()) / 2.0;
        let mut vertices: Vec<Vec3> = [
            (-1.0, t, 0.0),
            (1.0, t, 0.0),
            (-1.0, -t, 0.0),
            (1.0, -t, 0.0),
            (0.0, -1.0, t),
            (0.0, 1.0, t),
            (0.0, -1.0, -t),
            (0.0, 1.0, -t),
            (t, 0.0, -1.0),
            (t, 0.0, 1.0),
            (-t, 0.0, -1.0),
            (-t, 0.0, 1.0),
        ]
        .into_iter()
        .map(|(x, y, z)| Vec3::new(x, y, z).normalize() * radius)
        .collect();

        #[rustfmt::skip]
        let faces: [[u16; 3]; 20] = [
            [0, 11, 5], [0, 5, 1], [0, 1, 7], [0, 7, 10], [0, 10, 11],
            [1, 5, 9], [5, 11, 4], [11, 10, 2], [10, 7, 6], [7, 1, 8],
            [3, 9, 4], [3, 4, 2], [3, 2, 6], [3, 6, 8], [3, 8, 9],
            [4, 9, 5], [2, 4, 11], [6, 2, 10], [8, 6, 7], [9, 8, 1],
        ];

        let mut midpoints: HashMap<(u16, u16), u16> = HashMap::new();
        let mut midpoint = |a: u16, b: u16, vertices: &mut Vec<Vec3>| -> u16 {
            let key = (a.min(b), a.max(b));
            *midpoints.entry(key).or_insert_with(|| {
                let mid = (vertices[a as usize] + vertices[b as usize]).normalize() * radius;
                vertices.push(mid);
                (vertices.len() - 1) as u16
            })
        };

        let mut edges = BTreeSet::new();
        let mut add_edge = |a: u16, b: u16| {
            edges.insert([a.min(b), a.max(b)]);
        };
        for [a, b, c] in faces {
            let ab = midpoint(a, b, &mut vertices);
            let bc = midpoint(b, c, &mut vertices);
            let ca = midpoint(c, a, &mut vertices);
            for [p, q, r] in [[a, ab, ca], [b, bc, ab], [c, ca, bc], [ab, bc, ca]] {
                add_edge(p, q);
                add_edge(q, r);
                add_edge(r, p);
            }
        }

        Self {
            vertices,
            edges: edges.into_iter().collect(),
        }
    }

    /// Flat `x, y, z` positions, one line segment per edge.
    pub fn line_positions(&self) -> Vec<f32> {
        self.edges
            .iter()
            .flat_map(|&[a, b]| [self.vertices[a as usize], self.vertices[b as usize]])
            .flat_map(|v| v.to_array())
            .collect()
    }
}

/// Flat `x, y, z` positions spread uniformly over a cube of side `spread`.
///
/// `random` must yield values in `[0, 1)`.
pub fn particle_cloud(count: usize, spread: f32, mut random: impl FnMut() -> f32) -> Vec<f32> {
    (0..count * 3).map(|_| (random() - 0.5) * spread).collect()
}
