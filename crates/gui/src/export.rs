//! Binary export of the layered point cloud.
//!
//! Two formats, both an ASCII header followed by a little-endian binary body:
//! PLY (3×f32 position + 3×u8 color per vertex) and PCD v0.7 (3×f32 position
//! + one u32 with the color packed as `(r<<16)|(g<<8)|b`).

use std::io;
use std::path::Path;

use crate::cloud::{LayeredCloud, PointCloud};

/// Bytes per PLY vertex record: 3×f32 + 3×u8.
const PLY_RECORD_SIZE: usize = 15;
/// Bytes per PCD point record: 3×f32 + u32.
const PCD_RECORD_SIZE: usize = 16;

/// Build a complete binary PLY file from layered geometry.
pub fn build_ply(cloud: &LayeredCloud) -> Vec<u8> {
    let header = format!(
        "ply\n\
         format binary_little_endian 1.0\n\
         element vertex {}\n\
         property float x\n\
         property float y\n\
         property float z\n\
         property uchar red\n\
         property uchar green\n\
         property uchar blue\n\
         end_header\n",
        cloud.len()
    );

    let mut out = Vec::with_capacity(header.len() + cloud.len() * PLY_RECORD_SIZE);
    out.extend_from_slice(header.as_bytes());
    for (p, c) in cloud.points.iter().zip(&cloud.colors) {
        push_position(&mut out, p);
        out.extend_from_slice(c);
    }
    out
}

/// Build a complete binary PCD v0.7 file from layered geometry.
pub fn build_pcd(cloud: &LayeredCloud) -> Vec<u8> {
    let n = cloud.len();
    let header = format!(
        "# .PCD v0.7\n\
         VERSION 0.7\n\
         FIELDS x y z rgb\n\
         SIZE 4 4 4 4\n\
         TYPE F F F U\n\
         COUNT 1 1 1 1\n\
         WIDTH {n}\n\
         HEIGHT 1\n\
         VIEWPOINT 0 0 0 1 0 0 0\n\
         POINTS {n}\n\
         DATA binary\n"
    );

    let mut out = Vec::with_capacity(header.len() + n * PCD_RECORD_SIZE);
    out.extend_from_slice(header.as_bytes());
    for (p, c) in cloud.points.iter().zip(&cloud.colors) {
        push_position(&mut out, p);
        let rgb = (u32::from(c[0]) << 16) | (u32::from(c[1]) << 8) | u32::from(c[2]);
        out.extend_from_slice(&rgb.to_le_bytes());
    }
    out
}

/// Write the layered cloud to `path` as binary PLY.
///
/// Returns `Ok(false)` without touching the filesystem when the store is
/// empty; write failures propagate.
pub fn save_ply(cloud: &PointCloud, path: &Path) -> io::Result<bool> {
    let Some(layers) = cloud.build_layers() else {
        return Ok(false);
    };
    std::fs::write(path, build_ply(&layers))?;
    tracing::info!(
        "Exported {} points ({} layers) to {}",
        layers.len(),
        cloud.export.layer_count,
        path.display()
    );
    Ok(true)
}

/// Write the layered cloud to `path` as binary PCD. Same contract as
/// [`save_ply`].
pub fn save_pcd(cloud: &PointCloud, path: &Path) -> io::Result<bool> {
    let Some(layers) = cloud.build_layers() else {
        return Ok(false);
    };
    std::fs::write(path, build_pcd(&layers))?;
    tracing::info!(
        "Exported {} points ({} layers) to {}",
        layers.len(),
        cloud.export.layer_count,
        path.display()
    );
    Ok(true)
}

fn push_position(out: &mut Vec<u8>, p: &[f64; 3]) {
    out.extend_from_slice(&(p[0] as f32).to_le_bytes());
    out.extend_from_slice(&(p[1] as f32).to_le_bytes());
    out.extend_from_slice(&(p[2] as f32).to_le_bytes());
}
