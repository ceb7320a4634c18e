//! Draws a read-only view of the session into a `GameGrid`.

use crate::entities::Starfield;
use crate::rendering::GameGrid;
use crate::session::{Phase, Session};

const START_SCREEN: [(f64, f64, &str); 7] = [
    (250.0, 200.0, "Cosmic Courier"),
    (200.0, 260.0, "Pilot your ship with arrow keys."),
    (200.0, 290.0, "Deliver packages (yellow orbs) to score."),
    (200.0, 320.0, "Collect green fuel orbs to stay alive."),
    (200.0, 350.0, "Avoid asteroids or crash!"),
    (200.0, 380.0, "Make 5 deliveries to level up. Survive 3+ minutes!"),
    (300.0, 450.0, "Press SPACE to start"),
];

pub fn draw_scene(grid: &mut GameGrid, starfield: &Starfield, session: &Session, now_ms: f64) {
    grid.clear();
    starfield.draw(grid);

    match session.phase {
        Phase::Start => draw_start_screen(grid),
        Phase::Playing => draw_playing(grid, session, now_ms),
        Phase::GameOver => draw_game_over(grid, session),
    }
}

fn draw_start_screen(grid: &mut GameGrid) {
    for (x, y, line) in START_SCREEN {
        grid.put_text(x, y, line);
    }
}

fn draw_playing(grid: &mut GameGrid, session: &Session, now_ms: f64) {
    grid.put_text(10.0, 30.0, &format!("Fuel: {}", session.fuel.floor() as u32));
    grid.put_text(10.0, 60.0, &format!("Score: {}", session.score));
    grid.put_text(10.0, 90.0, &format!("Level: {}", session.level));

    session.ship.draw(grid);
    for asteroid in &session.asteroids {
        asteroid.draw(grid);
    }
    session.delivery.draw(grid, now_ms);
    for pickup in &session.fuel_pickups {
        pickup.draw(grid);
    }
}

fn draw_game_over(grid: &mut GameGrid, session: &Session) {
    grid.put_text(300.0, 250.0, "Game Over!");
    grid.put_text(340.0, 300.0, &format!("Score: {}", session.score));
    grid.put_text(340.0, 340.0, &format!("Level: {}", session.level));
    grid.put_text(300.0, 400.0, "Press SPACE to restart");
}
