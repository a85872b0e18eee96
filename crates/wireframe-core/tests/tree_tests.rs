use glam::Vec2;
use wireframe_core::render::FrameBuffer;
use wireframe_core::tree::{branch_length, NeuralTree, MAX_TREE_DEPTH};
use wireframe_core::{Animator, ConfigError, Tick, TreeConfig, TreeLoader};

#[test]
fn test_branch_count_matches_depth() {
    for depth in 1..=6 {
        let config = TreeConfig {
            depth,
            ..TreeConfig::default()
        };
        let tree = NeuralTree::grow(&config).unwrap();
        let per_root = (1usize << depth) - 1;
        assert_eq!(tree.len(), 8 * per_root, "depth {depth}");
    }
}

#[test]
fn test_default_tree_shape() {
    let tree = NeuralTree::grow(&TreeConfig::default()).unwrap();
    assert_eq!(tree.len(), 8 * 15);
    let roots: Vec<_> = tree.branches().iter().filter(|b| b.parent.is_none()).collect();
    assert_eq!(roots.len(), 8);
    for (i, root) in roots.iter().enumerate() {
        assert_eq!(root.depth, 4);
        let expected = Vec2::new(200.0, 150.0)
            + Vec2::from_angle(i as f32 * std::f32::consts::TAU / 8.0) * 50.0;
        assert!((root.start - expected).length() < 1e-4, "root {i} at {:?}", root.start);
        assert!(((root.end - root.start).length() - 15.0).abs() < 1e-4);
    }
}

#[test]
fn test_parents_precede_children() {
    let tree = NeuralTree::grow(&TreeConfig::default()).unwrap();
    for (i, b) in tree.branches().iter().enumerate() {
        if let Some(p) = b.parent {
            assert!(p < i, "branch {i} listed before its parent {p}");
            let parent = tree.branches()[p];
            assert_eq!(b.depth + 1, parent.depth);
            assert_eq!(b.start, parent.end, "child must start at the parent's node");
            let turn = (b.angle - parent.angle).abs();
            assert!((turn - 0.5).abs() < 1e-5, "child turned by {turn}");
        }
    }
}

#[test]
fn test_left_child_first() {
    let tree = NeuralTree::grow(&TreeConfig::default()).unwrap();
    let b = tree.branches();
    // Pre-order: root, then its -spread child.
    assert_eq!(b[1].parent, Some(0));
    assert!((b[1].angle - (b[0].angle - 0.5)).abs() < 1e-6);
}

#[test]
fn test_leaves_have_depth_one() {
    let tree = NeuralTree::grow(&TreeConfig::default()).unwrap();
    let mut has_child = vec![false; tree.len()];
    for b in tree.branches() {
        if let Some(p) = b.parent {
            has_child[p] = true;
        }
    }
    for (i, b) in tree.branches().iter().enumerate() {
        assert_eq!(b.depth == 1, !has_child[i], "branch {i}");
    }
}

#[test]
fn test_branch_length_formula() {
    assert_eq!(branch_length(30.0, 2), 30.0);
    assert_eq!(branch_length(30.0, 3), 20.0);
}

#[test]
fn test_depth_bound_enforced() {
    let too_deep = TreeConfig {
        depth: MAX_TREE_DEPTH + 1,
        ..TreeConfig::default()
    };
    assert_eq!(
        NeuralTree::grow(&too_deep).unwrap_err(),
        ConfigError::InvalidTreeDepth {
            depth: MAX_TREE_DEPTH + 1,
            max: MAX_TREE_DEPTH
        }
    );
    let max = TreeConfig {
        depth: MAX_TREE_DEPTH,
        roots: 1,
        ..TreeConfig::default()
    };
    assert_eq!(NeuralTree::grow(&max).unwrap().len(), (1 << MAX_TREE_DEPTH) - 1);
}

#[test]
fn test_zero_depth_and_roots_rejected() {
    let zero_depth = TreeConfig {
        depth: 0,
        ..TreeConfig::default()
    };
    assert!(NeuralTree::grow(&zero_depth).is_err());
    let no_roots = TreeConfig {
        roots: 0,
        ..TreeConfig::default()
    };
    assert_eq!(NeuralTree::grow(&no_roots).unwrap_err(), ConfigError::NoTreeRoots);
}

#[test]
fn test_tree_loader_draws_every_branch() {
    let loader = TreeLoader::new(TreeConfig::default()).unwrap();
    let mut frame = FrameBuffer::default();
    loader.draw(Tick::at(0), &mut frame);
    assert_eq!(frame.lines.len(), 120);
    // One node per branch plus the central core.
    assert_eq!(frame.points.len(), 121);
    let core = frame.points.last().unwrap();
    assert_eq!(core.center, Vec2::new(200.0, 150.0));
    assert_eq!(core.radius, 20.0);
}

#[test]
fn test_tree_container_shrinks_mid_sequence() {
    let loader = TreeLoader::new(TreeConfig::default()).unwrap();
    let spread = |clock: u64| {
        let mut frame = FrameBuffer::default();
        loader.draw(Tick::at(clock), &mut frame);
        frame
            .points
            .iter()
            .map(|p| (p.center - Vec2::new(200.0, 150.0)).length())
            .fold(0.0_f32, f32::max)
    };
    assert!(spread(4500) < spread(0) * 0.2, "30% keyframe scales to 0.1");
}

#[test]
fn test_sway_is_delayed_by_depth() {
    let loader = TreeLoader::new(TreeConfig::default()).unwrap();
    for depth in 1..4 {
        for clock in [0u64, 1234, 7777] {
            assert_eq!(
                loader.branch_sway(clock + 200, depth + 1),
                loader.branch_sway(clock, depth),
                "depth {depth} at {clock}"
            );
        }
    }
}

#[test]
fn test_odd_trees_sway_backwards() {
    let loader = TreeLoader::new(TreeConfig::default()).unwrap();
    let center = Vec2::new(200.0, 150.0);
    // A quarter into the sway: rotated 90 degrees and shifted by 10.
    let forward = loader.root_sway(2500, 0).transform_point2(center);
    assert!((forward - (center + Vec2::new(0.0, 10.0))).length() < 1e-3, "{forward:?}");
    // Played backwards the same moment is three quarters in.
    let backward = loader.root_sway(2500, 1).transform_point2(center);
    assert!((backward - (center + Vec2::new(0.0, -10.0))).length() < 1e-3, "{backward:?}");
    assert_eq!(loader.root_sway(2500, 2), loader.root_sway(2500, 0));
}

#[test]
fn test_nodes_follow_nested_sway() {
    let loader = TreeLoader::new(TreeConfig::default()).unwrap();
    let clock = 3333;
    let mut frame = FrameBuffer::default();
    loader.draw(Tick::at(clock), &mut frame);
    for (i, b) in loader.tree().branches().iter().enumerate() {
        let expected = loader.placement(clock, b).transform_point2(b.end);
        let got = frame.points[i].center;
        assert!((got - expected).length() < 1e-3, "branch {i}: {got:?} vs {expected:?}");
    }
}

#[test]
fn test_sway_at_rest_on_clock_zero() {
    let loader = TreeLoader::new(TreeConfig::default()).unwrap();
    let mut frame = FrameBuffer::default();
    loader.draw(Tick::at(0), &mut frame);
    for (i, b) in loader.tree().branches().iter().enumerate() {
        assert!((frame.points[i].center - b.end).length() < 1e-3, "branch {i}");
    }
}

#[test]
fn test_strokes_grow_from_their_start() {
    let loader = TreeLoader::new(TreeConfig::default()).unwrap();
    let draw = |clock: u64| {
        let mut frame = FrameBuffer::default();
        loader.draw(Tick::at(clock), &mut frame);
        frame
    };

    // Nothing drawn yet at the start of a grow period.
    for line in &draw(0).lines {
        assert_eq!(line.from, line.to);
    }

    // 30 units in, 6 units of every stroke are visible.
    let early = draw(30);
    let scale = loader.pose(30).scale;
    for (line, b) in early.lines.iter().zip(loader.tree().branches()) {
        let drawn = (line.to - line.from).length();
        let full = (b.end - b.start).length() * scale;
        assert!(drawn > 0.0);
        assert!((drawn - 6.0 * scale).abs() < 1e-3, "drawn {drawn} of {full}");
        assert!(drawn < full);
    }

    // Halfway through the period every stroke is complete.
    let late = draw(2500);
    let scale = loader.pose(2500).scale;
    for (line, b) in late.lines.iter().zip(loader.tree().branches()) {
        let drawn = (line.to - line.from).length();
        let full = (b.end - b.start).length() * scale;
        assert!((drawn - full).abs() < 1e-3 * full.max(1.0), "drawn {drawn} of {full}");
    }
}
