//! Monitor hit-testing and the guide arrows around it
//!
//! The room asset contains exactly one interactive object group: the
//! monitor, split across three mesh primitives. Pointer rays only count
//! when their nearest hit lands on one of those primitives.

/// Normalized names of the monitor primitives
pub const MONITOR_MESH_NAMES: [&str; 3] = ["plane006_2", "plane005_2", "plane004_2"];

/// Emissive highlight applied while the monitor is hovered (#4facfe)
pub const HIGHLIGHT_RGB: [f32; 3] = [0x4f as f32 / 255.0, 0xac as f32 / 255.0, 0xfe as f32 / 255.0];
pub const HIGHLIGHT_INTENSITY: f32 = 0.5;

pub const ARROW_COUNT: usize = 3;
pub const ARROW_RADIUS: f32 = 1.0;
/// Height of the arrow ring above the monitor origin
pub const ARROW_LIFT: f32 = 1.1;
/// Phase offset between consecutive arrows, in seconds
pub const ARROW_DELAY_STEP: f32 = 0.4;
/// Spin around Y in radians per second
pub const ARROW_SPIN_RATE: f32 = 0.6;

/// Normalize a glTF node or primitive name so names produced by different
/// loaders compare equal.
///
/// `Plane.006.2` (primitive 2 of mesh `Plane.006`) and `Plane006_2` both
/// normalize to `plane006_2`.
pub fn normalize_mesh_name(name: &str) -> String {
    let lower = name.trim().to_lowercase();
    let parts: Vec<&str> = lower.split('.').collect();

    if parts.len() >= 3 {
        let last = parts[parts.len() - 1];
        if !last.is_empty() && last.chars().all(|c| c.is_ascii_digit()) {
            return format!("{}_{}", parts[..parts.len() - 1].concat(), last);
        }
    }

    parts.concat()
}

/// Key of one primitive of a glTF mesh, in three.js naming.
///
/// Bevy names primitive entities `{mesh}.{material}`, which says nothing
/// about the primitive index. The key is rebuilt from the mesh name and the
/// primitive's position among its siblings: primitive 2 of `Plane.006`
/// becomes `plane006_2`. A mesh with a single primitive keeps the bare name.
pub fn primitive_key(mesh_name: &str, index: usize, count: usize) -> String {
    let base: String = mesh_name
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | '.' | ':' | '/'))
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect();

    if count > 1 {
        format!("{}_{}", base, index)
    } else {
        base
    }
}

/// Whether a mesh name belongs to the monitor group
pub fn is_monitor_mesh(name: &str) -> bool {
    let normalized = normalize_mesh_name(name);
    MONITOR_MESH_NAMES.iter().any(|m| normalized.contains(m))
}

/// A single ray intersection
#[derive(Debug, Clone, PartialEq)]
pub struct RayHit<E> {
    pub entity: E,
    /// Names of the hit entity and its ancestors, nearest first
    pub names: Vec<String>,
    pub distance: f32,
}

impl<E> RayHit<E> {
    pub fn is_monitor(&self) -> bool {
        self.names.iter().any(|name| is_monitor_mesh(name))
    }
}

/// Returns the monitor entity if the nearest hit is a monitor primitive.
///
/// Hits behind the nearest one are ignored, so a monitor occluded by other
/// geometry is not interactive.
pub fn nearest_hit_is_monitor<E: Copy>(hits: &[RayHit<E>]) -> Option<E> {
    let nearest = hits
        .iter()
        .min_by(|a, b| a.distance.total_cmp(&b.distance))?;

    nearest.is_monitor().then_some(nearest.entity)
}

/// Result of feeding a pointer sample into [`HoverState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverChange<E> {
    /// Highlight `entity`; restore `previous` when the pointer moved
    /// straight from one primitive to another
    Entered { entity: E, previous: Option<E> },
    /// Restore `previous`
    Left { previous: E },
    Unchanged,
}

/// Which monitor primitive, if any, the pointer is over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoverState<E> {
    hovered: Option<E>,
}

impl<E> Default for HoverState<E> {
    fn default() -> Self {
        Self { hovered: None }
    }
}

impl<E: Copy + PartialEq> HoverState<E> {
    pub fn hovered(&self) -> Option<E> {
        self.hovered
    }

    pub fn is_hovering(&self) -> bool {
        self.hovered.is_some()
    }

    /// Pointer moved; `monitor_hit` is the result of [`nearest_hit_is_monitor`]
    pub fn pointer_moved(&mut self, monitor_hit: Option<E>) -> HoverChange<E> {
        if self.hovered == monitor_hit {
            return HoverChange::Unchanged;
        }
        let previous = std::mem::replace(&mut self.hovered, monitor_hit);
        match (monitor_hit, previous) {
            (Some(entity), previous) => HoverChange::Entered { entity, previous },
            (None, Some(previous)) => HoverChange::Left { previous },
            (None, None) => HoverChange::Unchanged,
        }
    }

    /// Pointer left the canvas or went over a UI panel
    pub fn pointer_left(&mut self) -> HoverChange<E> {
        self.pointer_moved(None)
    }
}

/// Base placement of one guide arrow
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowSpot {
    pub position: [f32; 3],
    pub delay: f32,
}

/// Arrows spaced evenly on a horizontal circle above the monitor
pub fn arrow_ring(center: [f32; 3], count: usize, radius: f32, lift: f32) -> Vec<ArrowSpot> {
    (0..count)
        .map(|i| {
            let angle = i as f32 / count as f32 * std::f32::consts::TAU;
            ArrowSpot {
                position: [
                    center[0] + angle.cos() * radius,
                    center[1] + lift,
                    center[2] + angle.sin() * radius,
                ],
                delay: i as f32 * ARROW_DELAY_STEP,
            }
        })
        .collect()
}

/// Animated pose of an arrow at time `t`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowPose {
    pub translation: [f32; 3],
    /// Added to the arrow's base roll
    pub wobble: f32,
    pub scale: f32,
    pub spin: f32,
}

impl ArrowPose {
    pub fn at(spot: &ArrowSpot, t: f32) -> Self {
        let phase = t * 2.0 + spot.delay;
        let [x, y, z] = spot.position;
        Self {
            translation: [x, y + phase.sin() * 0.2, z],
            wobble: (t * 3.0 + spot.delay).sin() * 0.15,
            scale: 1.0 + phase.sin() * 0.15,
            spin: t * ARROW_SPIN_RATE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(entity: u32, name: &str, distance: f32) -> RayHit<u32> {
        RayHit {
            entity,
            names: vec![name.to_string()],
            distance,
        }
    }

    #[test]
    fn test_normalize_mesh_name() {
        assert_eq!(normalize_mesh_name("Plane.006.2"), "plane006_2");
        assert_eq!(normalize_mesh_name("Plane006_2"), "plane006_2");
        assert_eq!(normalize_mesh_name("Plane.006"), "plane006");
        assert_eq!(normalize_mesh_name("Desk"), "desk");
    }

    #[test]
    fn test_monitor_names() {
        assert!(is_monitor_mesh("Plane.005.2"));
        assert!(is_monitor_mesh("PLANE004_2"));
        assert!(!is_monitor_mesh("Plane.006.1"));
        assert!(!is_monitor_mesh("Plane.006"));
        assert!(!is_monitor_mesh("Chair"));
    }

    #[test]
    fn test_nearest_hit_only() {
        let hits = vec![hit(1, "Plane.006.2", 3.0), hit(2, "Desk", 1.5)];
        assert_eq!(nearest_hit_is_monitor(&hits), None);

        let hits = vec![hit(2, "Desk", 4.0), hit(1, "Plane.006.2", 3.0)];
        assert_eq!(nearest_hit_is_monitor(&hits), Some(1));

        assert_eq!(nearest_hit_is_monitor::<u32>(&[]), None);

        let unnamed = vec![RayHit {
            entity: 7u32,
            names: Vec::new(),
            distance: 1.0,
        }];
        assert_eq!(nearest_hit_is_monitor(&unnamed), None);
    }

    #[test]
    fn test_primitive_key() {
        assert_eq!(primitive_key("Plane.006", 2, 3), "plane006_2");
        assert_eq!(primitive_key("Plane.006", 0, 3), "plane006_0");
        assert_eq!(primitive_key("Desk Top", 0, 1), "desk_top");
        assert!(is_monitor_mesh(&primitive_key("Plane.004", 2, 3)));
        assert!(!is_monitor_mesh(&primitive_key("Plane.006", 1, 3)));
    }

    #[test]
    fn test_bevy_primitive_names_alone_are_not_monitors() {
        // Entity names from bevy_gltf carry the material, not the index
        for name in ["Plane.006.Material.001", "Plane.006.Screen", "Plane.006"] {
            assert!(!is_monitor_mesh(name), "{name}");
        }

        // The rebuilt key among the ancestor names makes the hit count
        let hit = RayHit {
            entity: 1u32,
            names: vec![
                primitive_key("Plane.006", 2, 3),
                "Plane.006.Screen".to_string(),
                "Plane.006".to_string(),
            ],
            distance: 2.0,
        };
        assert!(hit.is_monitor());
        assert_eq!(nearest_hit_is_monitor(&[hit]), Some(1));
    }

    #[test]
    fn test_hover_state() {
        let mut hover = HoverState::default();
        assert_eq!(hover.pointer_moved(None), HoverChange::Unchanged);

        assert_eq!(
            hover.pointer_moved(Some(3u32)),
            HoverChange::Entered { entity: 3, previous: None }
        );
        assert!(hover.is_hovering());
        assert_eq!(hover.pointer_moved(Some(3)), HoverChange::Unchanged);

        // Moving straight from one primitive to another restores the first
        assert_eq!(
            hover.pointer_moved(Some(4)),
            HoverChange::Entered { entity: 4, previous: Some(3) }
        );

        assert_eq!(hover.pointer_left(), HoverChange::Left { previous: 4 });
        assert_eq!(hover.pointer_left(), HoverChange::Unchanged);
        assert_eq!(hover.hovered(), None);
    }

    #[test]
    fn test_arrow_ring() {
        let ring = arrow_ring([1.0, 2.0, 3.0], ARROW_COUNT, ARROW_RADIUS, ARROW_LIFT);
        assert_eq!(ring.len(), 3);

        let first = ring[0].position;
        assert!((first[0] - 2.0).abs() < 1e-5);
        assert!((first[1] - 3.1).abs() < 1e-5);
        assert!((first[2] - 3.0).abs() < 1e-5);
        assert!((ring[2].delay - 0.8).abs() < 1e-6);

        for spot in &ring {
            let dx = spot.position[0] - 1.0;
            let dz = spot.position[2] - 3.0;
            assert!(((dx * dx + dz * dz).sqrt() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_arrow_pose() {
        let spot = ArrowSpot {
            position: [0.0, 1.0, 0.0],
            delay: 0.0,
        };
        let rest = ArrowPose::at(&spot, 0.0);
        assert_eq!(rest.translation, [0.0, 1.0, 0.0]);
        assert_eq!(rest.scale, 1.0);
        assert_eq!(rest.spin, 0.0);

        let peak = ArrowPose::at(&spot, std::f32::consts::FRAC_PI_4);
        assert!((peak.translation[1] - 1.2).abs() < 1e-5);
        assert!((peak.scale - 1.15).abs() < 1e-5);
    }
}
