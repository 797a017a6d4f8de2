// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Triangle rasterizer
//!
//! Edge-function rasterization of solid, textured and depth-tested
//! triangles directly into the framebuffer.
//!
//! # Algorithm
//!
//! 1. Double all vertex coordinates so pixel centers `(2x+1, 2y+1)` are
//!    integers
//! 2. Compute the signed area; a negative area swaps two vertices so both
//!    windings share one inside test, a zero area draws nothing
//! 3. Scan the bounding box intersected with the framebuffer
//! 4. A pixel is inside when every edge function is positive, or zero on a
//!    top-left edge
//! 5. Barycentric weights `wᵢ / area` interpolate (s, t) and depth; the
//!    perspective path divides `Σ wᵢ·sᵢ·qᵢ` by `Σ wᵢ·qᵢ` per pixel
//!
//! Everything is exact integer arithmetic: identical input always produces
//! identical pixels.
//!
//! # References
//!
//! - [Juan Pineda, "A Parallel Algorithm for Polygon Rasterization"](https://doi.org/10.1145/378456.378457)
//! - [Scratchapixel: Rasterization](https://www.scratchapixel.com/lessons/3d-basic-rendering/rasterization-practical-implementation)

use super::pixel::Fill;
use super::sampler::TexCoord;
use crate::core::gfx::interp::Interpreter;
use crate::core::gfx::types::{Projection, TexVertex, TexelFormat, TextureRef};

/// Vertex coordinates are clamped to ±2^24 pixels
const COORD_LIMIT: i32 = 1 << 24;

/// Edge function over doubled coordinates
#[inline(always)]
fn edge(a: (i64, i64), b: (i64, i64), p: (i64, i64)) -> i64 {
    (b.0 - a.0) * (p.1 - a.1) - (b.1 - a.1) * (p.0 - a.0)
}

/// Top-left fill rule for edge a→b of a positively oriented triangle
#[inline(always)]
fn is_top_left(a: (i64, i64), b: (i64, i64)) -> bool {
    let dx = b.0 - a.0;
    let dy = b.1 - a.1;
    dy < 0 || (dy == 0 && dx > 0)
}

#[inline(always)]
fn covers(w: i64, top_left: bool) -> bool {
    w > 0 || (w == 0 && top_left)
}

fn doubled(v: &TexVertex) -> (i64, i64) {
    (
        v.x.clamp(-COORD_LIMIT, COORD_LIMIT) as i64 * 2,
        v.y.clamp(-COORD_LIMIT, COORD_LIMIT) as i64 * 2,
    )
}

impl Interpreter<'_> {
    /// Rasterize one triangle
    ///
    /// # Arguments
    ///
    /// * `vertices` - Pixel-space vertices with (s, t, q, z) attributes
    /// * `texture` - Texture source, or `None` for a solid draw
    /// * `projection` - Affine or perspective-correct (s, t)
    /// * `depth` - Whether this draw carries depth and may be Z-tested
    ///
    /// # Notes
    ///
    /// The Z test only runs while Z is enabled and a Z-buffer is set. It
    /// applies to solid and textured depth draws alike.
    pub(in crate::core::gfx) fn draw_triangle(
        &mut self,
        vertices: &[TexVertex; 3],
        texture: Option<(TexelFormat, TextureRef)>,
        projection: Projection,
        depth: bool,
    ) {
        let Some(fill) = self.resolve_fill(texture) else {
            return;
        };

        let mut v = *vertices;
        let mut p = v.each_ref().map(doubled);

        let mut area = edge(p[0], p[1], p[2]);
        if area == 0 {
            log::trace!("RSPDL: zero-area triangle skipped");
            return;
        }
        if area < 0 {
            v.swap(1, 2);
            p.swap(1, 2);
            area = -area;
        }

        // Pixel px is a candidate iff its center 2px+1 lies within [2min, 2max]
        let min_x = p.iter().map(|q| q.0).min().unwrap_or(0) / 2;
        let max_x = p.iter().map(|q| q.0).max().unwrap_or(0) / 2;
        let min_y = p.iter().map(|q| q.1).min().unwrap_or(0) / 2;
        let max_y = p.iter().map(|q| q.1).max().unwrap_or(0) / 2;

        let x_start = min_x.max(0);
        let x_end = max_x.min(self.fb.width as i64);
        let y_start = min_y.max(0);
        let y_end = max_y.min(self.fb.height as i64);
        if x_start >= x_end || y_start >= y_end {
            return;
        }

        log::trace!(
            "RSPDL: triangle ({},{}) ({},{}) ({},{}) {:?} depth={}",
            v[0].x,
            v[0].y,
            v[1].x,
            v[1].y,
            v[2].x,
            v[2].y,
            projection,
            depth
        );

        let top_left = [
            is_top_left(p[1], p[2]),
            is_top_left(p[2], p[0]),
            is_top_left(p[0], p[1]),
        ];
        let depth_test = depth && self.state.depth_active();

        for py in y_start..y_end {
            for px in x_start..x_end {
                let center = (px * 2 + 1, py * 2 + 1);
                let w = [
                    edge(p[1], p[2], center),
                    edge(p[2], p[0], center),
                    edge(p[0], p[1], center),
                ];
                if !(0..3).all(|i| covers(w[i], top_left[i])) {
                    continue;
                }

                let (x, y) = (px as i32, py as i32);

                let z = if depth_test {
                    let z = interpolate(&w, v.each_ref().map(|v| v.z as i128), area as i128);
                    let z = z.clamp(0, u16::MAX as i128) as u16;
                    if !self.depth_passes(x, y, z) {
                        continue;
                    }
                    Some(z)
                } else {
                    None
                };

                let (color, punch_through) = match fill {
                    Fill::Solid(color) => (color, false),
                    Fill::Texture(format, texture) => {
                        let coord = tex_coord(&w, &v, area, projection);
                        (self.sample(format, &texture, coord), true)
                    }
                };

                if self.plot(x, y, color, punch_through) {
                    if let Some(z) = z {
                        self.depth_write(x, y, z);
                    }
                }
            }
        }
    }
}

/// floor(Σ wᵢ·aᵢ / area)
#[inline(always)]
fn interpolate(w: &[i64; 3], attr: [i128; 3], area: i128) -> i128 {
    let sum: i128 = (0..3).map(|i| w[i] as i128 * attr[i]).sum();
    sum.div_euclid(area)
}

fn tex_coord(w: &[i64; 3], v: &[TexVertex; 3], area: i64, projection: Projection) -> TexCoord {
    match projection {
        Projection::Affine => TexCoord {
            s: (0..3).map(|i| w[i] as i128 * v[i].s as i128).sum(),
            t: (0..3).map(|i| w[i] as i128 * v[i].t as i128).sum(),
            den: area as i128,
        },
        Projection::Perspective => perspective_coord(w, v).unwrap_or(TexCoord::ORIGIN),
    }
}

/// Perspective-correct (s, t) with q⁻¹ weights
///
/// Each vertex weighs in by `1/qᵢ`. Scaling every reciprocal by the product
/// of the nonzero q keeps the sums exact: `rᵢ = Π qⱼ (j ≠ i)`. A zero q has a
/// zero reciprocal. `None` if every reciprocal is zero.
fn perspective_coord(w: &[i64; 3], v: &[TexVertex; 3]) -> Option<TexCoord> {
    let q = reduced_q(v.each_ref().map(|v| v.q))?;
    weighted_coord(w, v, reciprocal_weights(q)).or_else(|| {
        // Too wide for i128: keep the top 16 bits of every q
        let top = q.iter().copied().max().unwrap_or(0);
        let shift = (64 - top.leading_zeros()).saturating_sub(16);
        let q = q.map(|q| if q == 0 { 0 } else { (q >> shift).max(1) });
        weighted_coord(w, v, reciprocal_weights(q))
    })
}

/// Nonzero q divided by their common factor
fn reduced_q(q: [u32; 3]) -> Option<[u64; 3]> {
    let g = q.iter().fold(0u64, |g, &q| gcd(g, q as u64));
    if g == 0 {
        return None;
    }
    Some(q.map(|q| q as u64 / g))
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

fn reciprocal_weights(q: [u64; 3]) -> [i128; 3] {
    std::array::from_fn(|i| {
        if q[i] == 0 {
            return 0;
        }
        (0..3)
            .filter(|&j| j != i && q[j] != 0)
            .fold(1i128, |r, j| r * q[j] as i128)
    })
}

fn weighted_coord(w: &[i64; 3], v: &[TexVertex; 3], r: [i128; 3]) -> Option<TexCoord> {
    let mut coord = TexCoord { s: 0, t: 0, den: 0 };
    for ((&w, r), v) in w.iter().zip(r).zip(v) {
        let wr = (w as i128).checked_mul(r)?;
        coord.s = coord.s.checked_add(wr.checked_mul(v.s as i128)?)?;
        coord.t = coord.t.checked_add(wr.checked_mul(v.t as i128)?)?;
        coord.den = coord.den.checked_add(wr)?;
    }
    if coord.den == 0 {
        return Some(TexCoord::ORIGIN);
    }
    Some(coord)
}
