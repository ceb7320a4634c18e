//! Hit tests used by the frame update.
//!
//! These are deliberately coarse and tuned for feel; the thresholds are part of
//! the gameplay and should only change together with playtesting.

use crate::entities::{Asteroid, Ship};
use crate::types::Vector2D;

/// Axis-aligned overlap between the ship's box and the asteroid's box, which spans
/// `x .. x + size` horizontally and `y - size/2 .. y + size/2` vertically.
pub fn ship_hits_asteroid(ship: &Ship, asteroid: &Asteroid) -> bool {
    let half = asteroid.size / 2.0;
    ship.position.x < asteroid.position.x + asteroid.size
        && ship.position.x + ship.width > asteroid.position.x
        && ship.position.y < asteroid.position.y + half
        && ship.position.y + ship.height > asteroid.position.y - half
}

/// Pickup test for fuel orbs and the delivery target. Compares top-left corners,
/// so the live zone sits up and left of the drawn orb.
pub fn ship_reaches(ship: &Ship, target: Vector2D) -> bool {
    (ship.position.x - target.x).abs() < ship.width
        && (ship.position.y - target.y).abs() < ship.height
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asteroid_box_is_centred_vertically_on_its_anchor() {
        let ship = Ship::new(100.0, 100.0);
        // Body spans y 105..135, ship spans 100..120.
        assert!(ship_hits_asteroid(&ship, &Asteroid::new(90.0, 120.0, 0.0)));
        // Ship bottom edge touches the body's top edge exactly: no hit.
        assert!(!ship_hits_asteroid(&ship, &Asteroid::new(90.0, 135.0, 0.0)));
        assert!(!ship_hits_asteroid(&ship, &Asteroid::new(90.0, 85.0, 0.0)));
        assert!(ship_hits_asteroid(&ship, &Asteroid::new(90.0, 86.0, 0.0)));
    }

    #[test]
    fn asteroid_box_spans_size_horizontally() {
        let ship = Ship::new(100.0, 100.0);
        assert!(ship_hits_asteroid(&ship, &Asteroid::new(71.0, 110.0, 0.0)));
        assert!(!ship_hits_asteroid(&ship, &Asteroid::new(70.0, 110.0, 0.0)));
        assert!(ship_hits_asteroid(&ship, &Asteroid::new(119.0, 110.0, 0.0)));
        assert!(!ship_hits_asteroid(&ship, &Asteroid::new(120.0, 110.0, 0.0)));
    }

    #[test]
    fn reach_compares_top_left_corners() {
        let ship = Ship::new(100.0, 100.0);
        assert!(ship_reaches(&ship, Vector2D::new(100.0, 100.0)));
        assert!(ship_reaches(&ship, Vector2D::new(119.9, 80.1)));
        assert!(!ship_reaches(&ship, Vector2D::new(120.0, 100.0)));
        assert!(!ship_reaches(&ship, Vector2D::new(100.0, 80.0)));
    }
}
