//! End-to-end export tests: paint through the harness, save to disk,
//! read the files back with a minimal binary reader.

use cloudsketch_gui_lib::controller::ExportFormat;
use cloudsketch_gui_lib::fixtures::layered_settings;
use cloudsketch_gui_lib::harness::SketchHarness;

/// Split an exported file into its ASCII header and binary body.
fn split(data: &[u8], terminator: &str) -> (String, Vec<u8>) {
    let text = String::from_utf8_lossy(data);
    let end = text.find(terminator).expect("header terminator") + terminator.len();
    (text[..end].to_string(), data[end..].to_vec())
}

fn f32_at(body: &[u8], offset: usize) -> f32 {
    f32::from_le_bytes(body[offset..offset + 4].try_into().unwrap())
}

#[test]
fn test_ply_export_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sketch.ply");

    let mut h = SketchHarness::with_settings(layered_settings(0.25, 3));
    h.press(2.0, 3.0);
    h.release();
    h.prompt.save_path = Some(path.clone());

    assert!(h.export(ExportFormat::Ply).unwrap());
    assert_eq!(h.prompt.save_path_requests, vec!["ply".to_string()]);

    let data = std::fs::read(&path).unwrap();
    let (header, body) = split(&data, "end_header\n");

    let n = h.cloud.len() * 3;
    assert!(header.contains(&format!("element vertex {n}")));
    assert_eq!(body.len(), n * 15);

    let layers = h.cloud.build_layers().unwrap();
    for (i, p) in layers.points.iter().enumerate() {
        let base = i * 15;
        assert_eq!(f32_at(&body, base), p[0] as f32);
        assert_eq!(f32_at(&body, base + 4), p[1] as f32);
        assert_eq!(f32_at(&body, base + 8), p[2] as f32);
        assert_eq!(&body[base + 12..base + 15], &layers.colors[i]);
    }
}

#[test]
fn test_pcd_export_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sketch.pcd");

    let mut h = SketchHarness::with_settings(layered_settings(0.5, 2));
    h.press(1.0, 1.0);
    h.drag_to(2.0, 2.0);
    h.release();
    h.prompt.save_path = Some(path.clone());

    assert!(h.export(ExportFormat::Pcd).unwrap());

    let data = std::fs::read(&path).unwrap();
    let (header, body) = split(&data, "DATA binary\n");

    let n = h.cloud.len() * 2;
    assert!(header.contains(&format!("WIDTH {n}")));
    assert!(header.contains(&format!("POINTS {n}")));
    assert_eq!(body.len(), n * 16);

    let layers = h.cloud.build_layers().unwrap();
    for (i, (p, c)) in layers.points.iter().zip(&layers.colors).enumerate() {
        let base = i * 16;
        assert_eq!(f32_at(&body, base), p[0] as f32);
        assert_eq!(f32_at(&body, base + 4), p[1] as f32);
        assert_eq!(f32_at(&body, base + 8), p[2] as f32);
        let rgb = u32::from_le_bytes(body[base + 12..base + 16].try_into().unwrap());
        assert_eq!(rgb >> 16 & 0xff, u32::from(c[0]));
        assert_eq!(rgb >> 8 & 0xff, u32::from(c[1]));
        assert_eq!(rgb & 0xff, u32::from(c[2]));
    }
}

#[test]
fn test_export_empty_buffer_declines() {
    let mut h = SketchHarness::new();
    assert!(!h.export(ExportFormat::Ply).unwrap());
    assert!(!h.export(ExportFormat::Pcd).unwrap());
    // No dialog shown, only the error notification.
    assert!(h.prompt.save_path_requests.is_empty());
    assert_eq!(h.prompt.notifications.len(), 2);
}

#[test]
fn test_exported_z_spans_layer_heights() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tall.ply");

    let mut h = SketchHarness::with_settings(layered_settings(0.25, 10));
    h.press(5.0, 5.0);
    h.release();
    h.prompt.save_path = Some(path.clone());
    assert!(h.export(ExportFormat::Ply).unwrap());

    let data = std::fs::read(&path).unwrap();
    let (_, body) = split(&data, "end_header\n");

    let per_layer = h.cloud.len();
    let mut max_z = f32::MIN;
    for i in 0..per_layer * 10 {
        max_z = max_z.max(f32_at(&body, i * 15 + 8));
    }
    assert_eq!(max_z, 2.25); // (10 - 1) × 0.25, exact in f32
}
