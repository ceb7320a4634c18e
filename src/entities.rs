use crate::constants::*;
use crate::rendering::GameGrid;
use crate::types::{Canvas, Vector2D, random_below, wrap_horizontal};
use rand::Rng;

// --- Ship ---
#[derive(Clone, Debug, PartialEq)]
pub struct Ship {
    pub position: Vector2D, // Top-left corner of the bounding box
    pub width: f64,
    pub height: f64,
    pub speed: f64,
}

impl Ship {
    pub fn new(x: f64, y: f64) -> Self {
        Ship {
            position: Vector2D::new(x, y),
            width: SHIP_WIDTH,
            height: SHIP_HEIGHT,
            speed: SHIP_SPEED,
        }
    }

    /// Ship at its launch position, pulled inside canvases too small to hold it.
    pub fn at_start(canvas: Canvas) -> Self {
        let mut ship = Ship::new(SHIP_START_X, SHIP_START_Y);
        ship.clamp_to(canvas);
        ship
    }

    /// Pulls the ship back inside `canvas`.
    pub fn clamp_to(&mut self, canvas: Canvas) {
        self.position.x = self.position.x.min(canvas.width - self.width).max(0.0);
        self.position.y = self.position.y.min(canvas.height - self.height).max(0.0);
    }

    pub fn move_left(&mut self) {
        if self.position.x > 0.0 {
            self.position.x = (self.position.x - self.speed).max(0.0);
        }
    }

    pub fn move_right(&mut self, canvas: Canvas) {
        let limit = canvas.width - self.width;
        if self.position.x < limit {
            self.position.x = (self.position.x + self.speed).min(limit);
        }
    }

    pub fn move_up(&mut self) {
        if self.position.y > 0.0 {
            self.position.y = (self.position.y - self.speed).max(0.0);
        }
    }

    pub fn move_down(&mut self, canvas: Canvas) {
        let limit = canvas.height - self.height;
        if self.position.y < limit {
            self.position.y = (self.position.y + self.speed).min(limit);
        }
    }

    pub fn hull(&self) -> [(f64, f64); 3] {
        let Vector2D { x, y } = self.position;
        [
            (x, y + self.height),
            (x + self.width / 2.0, y),
            (x + self.width, y + self.height),
        ]
    }

    pub fn flame(&self) -> [(f64, f64); 3] {
        let mid = self.position.x + self.width / 2.0;
        let base = self.position.y + self.height;
        [
            (mid - FLAME_HALF_WIDTH, base),
            (mid + FLAME_HALF_WIDTH, base),
            (mid, base + FLAME_LENGTH),
        ]
    }

    pub fn draw(&self, game_grid: &mut GameGrid) {
        game_grid.fill_polygon(&self.flame(), '*');
        game_grid.fill_polygon(&self.hull(), 'A');
    }
}

// --- Asteroid ---
#[derive(Clone, Debug, PartialEq)]
pub struct Asteroid {
    pub position: Vector2D, // Left tip; the body spans y - size/2 .. y + size/2
    pub size: f64,
    pub speed: f64, // Signed horizontal pixels per frame
}

impl Asteroid {
    pub fn new(x: f64, y: f64, speed: f64) -> Self {
        Asteroid { position: Vector2D::new(x, y), size: ASTEROID_SIZE, speed }
    }

    /// Random asteroid whose speed is drawn from `[-2, 2) * level`.
    pub fn spawn(rng: &mut impl Rng, canvas: Canvas, level: u32) -> Self {
        let x = random_below(rng, canvas.width);
        let y = random_below(rng, ASTEROID_SPAWN_MAX_Y);
        let scale = level.max(1) as f64;
        let speed = rng.gen_range(-ASTEROID_BASE_SPEED..ASTEROID_BASE_SPEED) * scale;
        Asteroid::new(x, y, speed)
    }

    pub fn update(&mut self, canvas: Canvas) {
        self.position.x += self.speed;
        self.position.x = wrap_horizontal(self.position.x, self.size, canvas.width);
    }

    pub fn outline(&self) -> [(f64, f64); 6] {
        let Vector2D { x, y } = self.position;
        let s = self.size;
        [
            (x, y),
            (x + s / 3.0, y - s / 2.0),
            (x + s / 1.5, y - s / 3.0),
            (x + s, y),
            (x + s / 1.5, y + s / 3.0),
            (x + s / 3.0, y + s / 2.0),
        ]
    }

    pub fn draw(&self, game_grid: &mut GameGrid) {
        game_grid.fill_polygon(&self.outline(), '#');
    }
}

// --- Stars ---
#[derive(Clone, Debug, PartialEq)]
pub struct Star {
    pub position: Vector2D,
    pub size: f64,
}

/// Decorative backdrop; created once and never reset.
#[derive(Clone, Debug)]
pub struct Starfield {
    pub stars: Vec<Star>,
}

impl Starfield {
    pub fn new(rng: &mut impl Rng, canvas: Canvas) -> Self {
        let stars = (0..STAR_COUNT)
            .map(|_| Star {
                position: Vector2D::new(random_below(rng, canvas.width), random_below(rng, canvas.height)),
                size: rng.gen_range(STAR_MIN_SIZE..STAR_MAX_SIZE),
            })
            .collect();
        Starfield { stars }
    }

    pub fn draw(&self, game_grid: &mut GameGrid) {
        for star in &self.stars {
            let c = if star.size >= 2.0 { '*' } else { '.' };
            game_grid.plot(star.position.x, star.position.y, c);
        }
    }
}

// --- Delivery target ---
#[derive(Clone, Debug, PartialEq)]
pub struct DeliveryTarget {
    pub position: Vector2D, // Top-left corner
    pub size: f64,
}

impl DeliveryTarget {
    pub fn spawn(rng: &mut impl Rng, canvas: Canvas) -> Self {
        let mut target = DeliveryTarget { position: Vector2D::new(0.0, 0.0), size: DELIVERY_SIZE };
        target.relocate(rng, canvas);
        target
    }

    pub fn relocate(&mut self, rng: &mut impl Rng, canvas: Canvas) {
        let max_y = DELIVERY_SPAWN_MAX_Y.min(canvas.height - self.size);
        self.position = Vector2D::new(
            random_below(rng, canvas.width - self.size),
            random_below(rng, max_y),
        );
    }

    pub fn fits(&self, canvas: Canvas) -> bool {
        box_fits(self.position, self.size, canvas)
    }

    pub fn center(&self) -> Vector2D {
        self.position.add(Vector2D::new(self.size / 2.0, self.size / 2.0))
    }

    /// Rendered radius at wall-clock time `now_ms`.
    pub fn pulse_radius(&self, now_ms: f64) -> f64 {
        (now_ms * PULSE_RATE).sin() * PULSE_AMPLITUDE + self.size / 2.0
    }

    pub fn draw(&self, game_grid: &mut GameGrid, now_ms: f64) {
        let center = self.center();
        game_grid.fill_circle(center.x, center.y, self.pulse_radius(now_ms), '@');
    }
}

// --- Fuel pickup ---
#[derive(Clone, Debug, PartialEq)]
pub struct FuelPickup {
    pub position: Vector2D, // Top-left corner
    pub size: f64,
}

impl FuelPickup {
    pub fn spawn(rng: &mut impl Rng, canvas: Canvas) -> Self {
        FuelPickup {
            position: Vector2D::new(
                random_below(rng, canvas.width - FUEL_PICKUP_SPAWN_MARGIN),
                random_below(rng, canvas.height - FUEL_PICKUP_SPAWN_MARGIN),
            ),
            size: FUEL_PICKUP_SIZE,
        }
    }

    pub fn fits(&self, canvas: Canvas) -> bool {
        box_fits(self.position, self.size, canvas)
    }

    pub fn draw(&self, game_grid: &mut GameGrid) {
        let r = self.size / 2.0;
        game_grid.fill_circle(self.position.x + r, self.position.y + r, r, '+');
    }
}

/// Whether a square of `size` anchored at its top-left corner lies on the canvas.
fn box_fits(position: Vector2D, size: f64, canvas: Canvas) -> bool {
    position.x >= 0.0
        && position.y >= 0.0
        && position.x <= canvas.width - size
        && position.y <= canvas.height - size
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const CANVAS: Canvas = Canvas { width: 800.0, height: 600.0 };

    #[test]
    fn ship_movement_stops_at_canvas_edges() {
        let mut ship = Ship::new(3.0, 578.0);
        ship.move_left();
        assert_eq!(ship.position.x, 0.0);
        ship.move_left();
        assert_eq!(ship.position.x, 0.0);

        ship.move_down(CANVAS);
        assert_eq!(ship.position.y, 580.0);
        ship.move_down(CANVAS);
        assert_eq!(ship.position.y, 580.0);

        let mut ship = Ship::new(780.0, 0.0);
        ship.move_right(CANVAS);
        assert_eq!(ship.position.x, 780.0);
        ship.move_up();
        assert_eq!(ship.position.y, 0.0);
    }

    #[test]
    fn ship_moves_by_its_speed() {
        let mut ship = Ship::at_start(CANVAS);
        assert_eq!(ship.position, Vector2D::new(400.0, 500.0));
        ship.move_right(CANVAS);
        ship.move_up();
        assert_eq!(ship.position, Vector2D::new(405.0, 495.0));
    }

    #[test]
    fn ship_start_is_pulled_inside_small_canvas() {
        let ship = Ship::at_start(Canvas::new(300.0, 200.0));
        assert_eq!(ship.position, Vector2D::new(280.0, 180.0));
    }

    #[test]
    fn clamp_pulls_ship_back_onto_a_smaller_canvas() {
        let mut ship = Ship::new(760.0, 560.0);
        ship.clamp_to(Canvas::new(400.0, 300.0));
        assert_eq!(ship.position, Vector2D::new(380.0, 280.0));

        let mut inside = Ship::new(100.0, 100.0);
        inside.clamp_to(Canvas::new(400.0, 300.0));
        assert_eq!(inside.position, Vector2D::new(100.0, 100.0));
    }

    #[test]
    fn targets_report_whether_they_fit() {
        let small = Canvas::new(400.0, 300.0);
        let target = DeliveryTarget { position: Vector2D::new(380.0, 280.0), size: DELIVERY_SIZE };
        assert!(target.fits(small));
        let target = DeliveryTarget { position: Vector2D::new(380.5, 100.0), size: DELIVERY_SIZE };
        assert!(!target.fits(small));
        let orb = FuelPickup { position: Vector2D::new(100.0, 290.0), size: FUEL_PICKUP_SIZE };
        assert!(!orb.fits(small));
    }

    #[test]
    fn asteroid_wraps_on_both_sides() {
        let mut right = Asteroid::new(799.0, 100.0, 2.0);
        right.update(CANVAS);
        assert_eq!(right.position.x, 0.0);

        let mut left = Asteroid::new(-29.0, 100.0, -2.0);
        left.update(CANVAS);
        assert_eq!(left.position.x, 800.0);

        let mut partly_off = Asteroid::new(-10.0, 100.0, -2.0);
        partly_off.update(CANVAS);
        assert_eq!(partly_off.position.x, -12.0);
    }

    #[test]
    fn spawned_asteroid_speed_scales_with_level() {
        let mut rng = StdRng::seed_from_u64(11);
        for level in 1..5 {
            for _ in 0..50 {
                let a = Asteroid::spawn(&mut rng, CANVAS, level);
                let bound = ASTEROID_BASE_SPEED * level as f64;
                assert!(a.speed >= -bound && a.speed < bound);
                assert!(a.position.y >= 0.0 && a.position.y < ASTEROID_SPAWN_MAX_Y);
                assert_eq!(a.size, ASTEROID_SIZE);
            }
        }
    }

    #[test]
    fn delivery_relocates_within_bounds() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut target = DeliveryTarget::spawn(&mut rng, CANVAS);
        for _ in 0..200 {
            target.relocate(&mut rng, CANVAS);
            assert!(target.position.x >= 0.0 && target.position.x < 780.0);
            assert!(target.position.y >= 0.0 && target.position.y < 300.0);
        }

        let short = Canvas::new(200.0, 100.0);
        for _ in 0..200 {
            target.relocate(&mut rng, short);
            assert!(target.position.y < 80.0);
        }
    }

    #[test]
    fn delivery_pulse_oscillates_around_half_size() {
        let target = DeliveryTarget { position: Vector2D::new(0.0, 0.0), size: 20.0 };
        assert_abs_diff_eq!(target.pulse_radius(0.0), 10.0, epsilon = 1e-9);
        let peak = std::f64::consts::FRAC_PI_2 / PULSE_RATE;
        assert_abs_diff_eq!(target.pulse_radius(peak), 13.0, epsilon = 1e-9);
    }

    #[test]
    fn starfield_has_fixed_star_count() {
        let mut rng = StdRng::seed_from_u64(3);
        let field = Starfield::new(&mut rng, CANVAS);
        assert_eq!(field.stars.len(), STAR_COUNT);
        assert!(field.stars.iter().all(|s| s.size >= 1.0 && s.size < 3.0));
    }

    #[test]
    fn fuel_pickup_spawns_inside_margin() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..200 {
            let p = FuelPickup::spawn(&mut rng, CANVAS);
            assert!(p.position.x < 780.0 && p.position.y < 580.0);
        }
    }

    #[test]
    fn ship_draws_hull_and_flame() {
        let mut grid = GameGrid::new(80, 30);
        Ship::at_start(CANVAS).draw(&mut grid);
        assert!((40..=42).any(|col| grid.char_at(col, 25) == Some('A')));
        assert_eq!(grid.char_at(41, 26), Some('*'));
    }
}
