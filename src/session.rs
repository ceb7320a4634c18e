//! Per-session game state and the frame update.
//!
//! `Session` is a plain value: the update takes it by value and hands back the
//! next state together with the events the frame produced. Nothing in here draws
//! or makes sound.

use rand::Rng;

use crate::collision::{ship_hits_asteroid, ship_reaches};
use crate::constants::*;
use crate::entities::{Asteroid, DeliveryTarget, FuelPickup, Ship};
use crate::types::Canvas;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Start,
    Playing,
    GameOver,
}

/// Something noteworthy that happened while advancing the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Started,
    Crashed,
    FuelExhausted,
    FuelCollected,
    PackageDelivered,
    LevelUp { level: u32 },
}

#[derive(Clone, Debug)]
pub struct Session {
    pub phase: Phase,
    pub ship: Ship,
    pub asteroids: Vec<Asteroid>,
    pub delivery: DeliveryTarget,
    pub fuel_pickups: Vec<FuelPickup>,
    pub fuel: f64,
    pub score: u32,
    pub deliveries: u32,
    pub level: u32,
}

impl Session {
    /// A fresh session waiting on the start screen.
    pub fn new(rng: &mut impl Rng, canvas: Canvas) -> Self {
        Session::fresh(rng, canvas, Phase::Start)
    }

    fn fresh(rng: &mut impl Rng, canvas: Canvas, phase: Phase) -> Self {
        let asteroids = (0..INITIAL_ASTEROID_COUNT)
            .map(|_| Asteroid::spawn(rng, canvas, 1))
            .collect();
        let delivery = DeliveryTarget::spawn(rng, canvas);
        let fuel_pickups = vec![FuelPickup::spawn(rng, canvas)];

        Session {
            phase,
            ship: Ship::at_start(canvas),
            asteroids,
            delivery,
            fuel_pickups,
            fuel: MAX_FUEL,
            score: 0,
            deliveries: 0,
            level: 1,
        }
    }

    /// Begins a new run from the start or game-over screen. Ignored mid-run.
    pub fn launch(self, rng: &mut impl Rng, canvas: Canvas) -> (Self, Vec<GameEvent>) {
        match self.phase {
            Phase::Start | Phase::GameOver => {
                (Session::fresh(rng, canvas, Phase::Playing), vec![GameEvent::Started])
            }
            Phase::Playing => (self, Vec::new()),
        }
    }

    /// Keeps the session playable after the canvas changes size: the ship is pulled
    /// back inside, and a delivery target or fuel orb left off the canvas is moved
    /// to a fresh spot.
    pub fn fit_to(mut self, canvas: Canvas, rng: &mut impl Rng) -> Self {
        self.ship.clamp_to(canvas);
        if !self.delivery.fits(canvas) {
            self.delivery.relocate(rng, canvas);
        }
        for pickup in &mut self.fuel_pickups {
            if !pickup.fits(canvas) {
                *pickup = FuelPickup::spawn(rng, canvas);
            }
        }
        self
    }

    /// Advances one frame. Only a running session changes.
    ///
    /// Checks run in a fixed order and all of them run even after a crash earlier
    /// in the same frame, so a crashing frame can still deliver or collect fuel.
    pub fn step(mut self, canvas: Canvas, rng: &mut impl Rng) -> (Self, Vec<GameEvent>) {
        let mut events = Vec::new();
        match self.phase {
            Phase::Start | Phase::GameOver => return (self, events),
            Phase::Playing => {}
        }

        for asteroid in &mut self.asteroids {
            asteroid.update(canvas);
            if ship_hits_asteroid(&self.ship, asteroid) {
                self.phase = Phase::GameOver;
                events.push(GameEvent::Crashed);
            }
        }

        // At most one orb per frame; its replacement is not tested until the next.
        if let Some(index) = self
            .fuel_pickups
            .iter()
            .position(|pickup| ship_reaches(&self.ship, pickup.position))
        {
            self.fuel_pickups.remove(index);
            self.add_fuel(FUEL_PICKUP_AMOUNT);
            self.fuel_pickups.push(FuelPickup::spawn(rng, canvas));
            events.push(GameEvent::FuelCollected);
        }

        if ship_reaches(&self.ship, self.delivery.position) {
            self.deliver(rng, canvas, &mut events);
        }

        self.fuel -= FUEL_DECAY_PER_FRAME;
        if self.fuel <= 0.0 {
            self.phase = Phase::GameOver;
            events.push(GameEvent::FuelExhausted);
        }
        self.fuel = self.fuel.clamp(0.0, MAX_FUEL);

        (self, events)
    }

    fn deliver(&mut self, rng: &mut impl Rng, canvas: Canvas, events: &mut Vec<GameEvent>) {
        self.score += DELIVERY_SCORE;
        self.deliveries += 1;
        self.delivery.relocate(rng, canvas);
        events.push(GameEvent::PackageDelivered);

        if self.deliveries >= DELIVERIES_PER_LEVEL {
            self.level += 1;
            self.deliveries = 0;
            for asteroid in &mut self.asteroids {
                asteroid.speed *= LEVEL_UP_SPEED_FACTOR;
            }
            for _ in 0..ASTEROIDS_PER_LEVEL {
                self.asteroids.push(Asteroid::spawn(rng, canvas, self.level));
            }
            self.add_fuel(LEVEL_UP_FUEL_BONUS);
            events.push(GameEvent::LevelUp { level: self.level });
        }
    }

    fn add_fuel(&mut self, amount: f64) {
        self.fuel = (self.fuel + amount).min(MAX_FUEL);
    }
}
