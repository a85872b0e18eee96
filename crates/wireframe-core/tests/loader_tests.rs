use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;
use wireframe_core::connectivity::edges_within;
use wireframe_core::render::{FrameBuffer, Rgb};
use wireframe_core::{
    Animator, BrainConfig, BrainLoader, LoaderConfig, PolyhedronLoader, Shape, Solid, Tick,
};

#[test]
fn test_polyhedron_frame_at_clock_zero() {
    let loader = PolyhedronLoader::new(LoaderConfig::default()).unwrap();
    let frame = loader.frame(0);
    let icosa = Shape::solid(Solid::Icosahedron, 80.0);

    assert_eq!(frame.projected.len(), 12);
    for (p, v) in frame.projected.iter().zip(icosa.points()) {
        let scale = 200.0 / (200.0 + v.z);
        assert!((p.x - v.x * scale).abs() < 1e-4);
        assert!((p.y - v.y * scale).abs() < 1e-4);
        assert_eq!(p.z, v.z);
    }
    // Structural edges come from the unrotated shape: every non-antipodal
    // pair of the icosahedron sits closer than 160.
    assert_eq!(frame.structural, edges_within(icosa.points(), 160.0));
    assert!(frame.structural.len() >= 60);
}

#[test]
fn test_structural_edges_use_unrotated_vertices() {
    let loader = PolyhedronLoader::new(LoaderConfig::default()).unwrap();
    // Rotation changes every tick but the morph is frozen at phase starts,
    // so structural edges at clock 0 and 6000 must match.
    assert_eq!(loader.frame(0).structural, loader.frame(6000).structural);
    assert_ne!(loader.frame(0).projected, loader.frame(6000).projected);
}

#[test]
fn test_render_styles_by_depth() {
    let loader = PolyhedronLoader::new(LoaderConfig::default()).unwrap();
    let frame = loader.frame(1234);
    let mut buf = FrameBuffer::default();
    loader.draw(Tick::at(1234), &mut buf);

    for (pt, p) in buf.points.iter().zip(&frame.projected) {
        let expected = if p.z > 0.0 { Rgb::GREEN } else { Rgb::PURPLE };
        assert_eq!(pt.color, expected);
        assert!((0.0..=1.0).contains(&pt.opacity));
        assert_eq!(pt.radius, 2.0);
    }

    let structural = &buf.lines[frame.ambient.len()..];
    assert_eq!(structural.len(), frame.structural.len());
    for (line, e) in structural.iter().zip(&frame.structural) {
        let depth = (frame.projected[e.a].z + frame.projected[e.b].z) / 2.0;
        let expected = ((depth + 100.0) / 200.0).clamp(0.0, 1.0);
        assert!((line.opacity - expected).abs() < 1e-6);
        assert_eq!(line.width, 2.0);
    }

    for line in &buf.lines[..frame.ambient.len()] {
        assert_eq!(line.color, Rgb::GREEN);
        assert!(line.opacity >= 0.0 && line.opacity <= 0.3);
    }
}

#[test]
fn test_brain_loader_is_seeded() {
    let a = BrainLoader::new(BrainConfig::default(), &mut StdRng::seed_from_u64(11)).unwrap();
    let b = BrainLoader::new(BrainConfig::default(), &mut StdRng::seed_from_u64(11)).unwrap();
    assert_eq!(a.cloud(), b.cloud());
    assert_eq!(a.frame(Tick::at(480)), b.frame(Tick::at(480)));
    assert_eq!(a.cloud().len(), 100);
}

#[test]
fn test_brain_entry_zoom_scales_projection() {
    let loader = BrainLoader::new(BrainConfig::default(), &mut StdRng::seed_from_u64(2)).unwrap();
    let settled = loader.frame(Tick { clock: 0, entering: false });
    let zoomed = loader.frame(Tick { clock: 0, entering: true });
    for (s, z) in settled.projected.iter().zip(&zoomed.projected) {
        assert!((z.x - s.x * 0.2).abs() < 1e-4);
        assert!((z.y - s.y * 0.2).abs() < 1e-4);
        assert_eq!(z.z, s.z, "zoom leaves depth alone");
    }
    // Shrunk points crowd together, so more ambient lines appear.
    assert!(zoomed.ambient.len() >= settled.ambient.len());
}

#[test]
fn test_brain_structural_edges_are_stable() {
    let loader = BrainLoader::new(BrainConfig::default(), &mut StdRng::seed_from_u64(8)).unwrap();
    assert_eq!(
        loader.frame(Tick::at(0)).structural,
        loader.frame(Tick::at(9600)).structural
    );
}

#[test]
fn test_invalid_configs_rejected() {
    let bad_radius = LoaderConfig {
        radius: 0.0,
        ..LoaderConfig::default()
    };
    assert!(PolyhedronLoader::new(bad_radius).is_err());

    let no_points = BrainConfig {
        point_count: 0,
        ..BrainConfig::default()
    };
    assert!(BrainLoader::new(no_points, &mut StdRng::seed_from_u64(0)).is_err());

    let flat = BrainConfig {
        stretch: Vec3::new(1.0, 0.0, 1.0),
        ..BrainConfig::default()
    };
    assert!(BrainLoader::new(flat, &mut StdRng::seed_from_u64(0)).is_err());
}

#[test]
fn test_custom_solid_order() {
    let config = LoaderConfig {
        solids: vec![Solid::Cube, Solid::Octahedron],
        cycle_length: 4000,
        ..LoaderConfig::default()
    };
    let loader = PolyhedronLoader::new(config).unwrap();
    assert_eq!(loader.cycle().shapes().len(), 2);
    assert_eq!(loader.frame(2000).projected.len(), 8); // octahedron -> cube wraps to 8
}
